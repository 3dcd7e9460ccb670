//! Compilers for color operation nodes.

use crate::error::CompileError;

use super::types::{ExprType, TypedExpr, convert, saturate};
use super::{CompilationState, NodeRecord, input_expr};

/// `color/hsv`: three scalars through the prelude's HSV-to-RGB helper.
pub(crate) fn compile_hsv(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let hue = input_expr(state, node, 0)?;
    let saturation = input_expr(state, node, 1)?;
    let value = input_expr(state, node, 2)?;
    Ok(TypedExpr::vec3(format!(
        "fx_hsv2rgb({}, {}, {})",
        hue.source, saturation.source, value.source
    )))
}

/// `color/mix`: both colors are vec3 by slot declaration; the factor widens so
/// the emitted call uses the gentype overload.
pub(crate) fn compile_mix(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let a = input_expr(state, node, 0)?;
    let b = input_expr(state, node, 1)?;
    let t = input_expr(state, node, 2)?;
    let t = convert(&t, ExprType::Vec3);
    Ok(TypedExpr::vec3(format!(
        "mix({}, {}, {})",
        a.source, b.source, t.source
    )))
}

/// `color/gradient`: mix between two colors by a saturated position.
pub(crate) fn compile_gradient(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let t = input_expr(state, node, 0)?;
    let from = input_expr(state, node, 1)?;
    let to = input_expr(state, node, 2)?;
    let t = convert(&saturate(&t), ExprType::Vec3);
    Ok(TypedExpr::vec3(format!(
        "mix({}, {}, {})",
        from.source, to.source, t.source
    )))
}

/// `color/grayscale`: channel average, the vec3-to-scalar narrowing rule.
pub(crate) fn compile_grayscale(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let color = input_expr(state, node, 0)?;
    Ok(convert(&color, ExprType::Scalar))
}
