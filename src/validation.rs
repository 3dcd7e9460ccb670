//! GLSL validation using the naga library.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("GLSL parse failed:\n{0}")]
    Parse(String),
    #[error("GLSL validation failed:\n{0}")]
    Validate(String),
}

/// Parse and validate GLSL source with naga's frontend.
///
/// Returns the parsed naga Module on success, or an error carrying the
/// formatted diagnostics and a numbered source listing on failure.
pub fn validate_glsl(source: &str, stage: ShaderStage) -> Result<naga::Module, ValidationError> {
    let mut frontend = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options {
        stage: stage.to_naga(),
        defines: Default::default(),
    };

    let module = frontend
        .parse(&options, source)
        .map_err(|e| ValidationError::Parse(format_with_listing(source, &format!("{e:?}"))))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| ValidationError::Validate(format_with_listing(source, &format!("{e:?}"))))?;

    Ok(module)
}

/// Validate GLSL and name which pass generated it in the error message.
pub fn validate_glsl_with_context(
    source: &str,
    stage: ShaderStage,
    context: &str,
) -> Result<naga::Module, ValidationError> {
    validate_glsl(source, stage).map_err(|e| match e {
        ValidationError::Parse(msg) => ValidationError::Parse(format!("{context}: {msg}")),
        ValidationError::Validate(msg) => ValidationError::Validate(format!("{context}: {msg}")),
    })
}

/// Attach a numbered source listing to a naga diagnostic.
fn format_with_listing(source: &str, error: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("  {error}\n"));
    output.push_str("\nGenerated GLSL:\n");
    output.push_str("---\n");
    for (line_num, line) in source.lines().enumerate() {
        output.push_str(&format!("{:4} | {}\n", line_num + 1, line));
    }
    output.push_str("---\n");
    output
}
