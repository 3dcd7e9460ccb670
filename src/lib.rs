//! Compile visual node graphs into multi-pass GLSL shader programs.
//!
//! A graph arrives as a JSON document of nodes and links ([`dsl`]). The
//! compiler walks it from the color output sink, memoizing each node into a
//! typed GLSL expression ([`compiler`]), and the assembler wraps the result
//! into a fixed two-pass program: a base pass that shades the surface and a
//! composite pass that applies bloom, blur, feedback, vignette and chromatic
//! aberration ([`assembler`]). Literal leaves become dynamic uniforms so the
//! host can animate them without recompiling.

pub mod assembler;
pub mod compiler;
pub mod dsl;
pub mod error;
pub mod registry;
pub mod validation;

pub use assembler::{CompiledShaderBundle, PassConfig};
pub use compiler::types::{DynamicUniform, UniformValue};
pub use dsl::{GraphDocument, document_from_path, document_from_str};
pub use error::{CompileError, GraphShapeError};

/// Compile a graph document into a shader bundle.
pub fn compile(doc: &GraphDocument) -> Result<CompiledShaderBundle, CompileError> {
    compiler::compile_document(doc)
}
