//! Compiler for the texture sampling node.
//!
//! Exactly two texture slots exist; they are bound externally by the host
//! renderer. The node's `slot` property selects one and is clamped into range.

use crate::dsl::parse_i64;
use crate::error::CompileError;

use super::types::TypedExpr;
use super::{CompilationState, NodeRecord, input_expr};

pub(crate) fn compile_sample(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let coord = input_expr(state, node, 0)?;
    let slot = parse_i64(&node.properties, "slot")
        .unwrap_or(0)
        .clamp(0, 1) as usize;
    state.texture_slots[slot] = true;
    Ok(TypedExpr::vec3(format!(
        "texture(u_texture{slot}, {}).rgb",
        coord.source
    )))
}
