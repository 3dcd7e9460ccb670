//! Compilers for arithmetic and math-function nodes.
//!
//! Binary operators promote both operands to the wider type before emitting
//! infix GLSL; function nodes emit builtin calls with exact overloads.

use crate::error::CompileError;
use crate::registry;

use super::types::{ExprType, TypedExpr, coerce_binary, convert, saturate};
use super::{CompilationState, NodeRecord, input_expr};

/// `math/add`, `math/subtract`, `math/multiply`, `math/divide`.
pub(crate) fn compile_binary(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let a = input_expr(state, node, 0)?;
    let b = input_expr(state, node, 1)?;
    let (a, b, ty) = coerce_binary(a, b);

    let op = match node.type_name.as_str() {
        registry::MATH_ADD => "+",
        registry::MATH_SUBTRACT => "-",
        registry::MATH_MULTIPLY => "*",
        _ => "/",
    };
    Ok(TypedExpr::new(
        format!("({} {} {})", a.source, op, b.source),
        ty,
    ))
}

/// `math/mix`: operands promoted pairwise, the factor widened to match so the
/// emitted `mix` call uses a single-gentype overload.
pub(crate) fn compile_mix(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let a = input_expr(state, node, 0)?;
    let b = input_expr(state, node, 1)?;
    let t = input_expr(state, node, 2)?;
    let (a, b, ty) = coerce_binary(a, b);
    let t = convert(&t, ty);
    Ok(TypedExpr::new(
        format!("mix({}, {}, {})", a.source, b.source, t.source),
        ty,
    ))
}

/// `math/saturate`: type-preserving clamp to [0, 1].
pub(crate) fn compile_saturate(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let value = input_expr(state, node, 0)?;
    Ok(saturate(&value))
}

pub(crate) fn compile_power(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let base = input_expr(state, node, 0)?;
    let exponent = input_expr(state, node, 1)?;
    let (base, exponent, ty) = coerce_binary(base, exponent);
    Ok(TypedExpr::new(
        format!("pow({}, {})", base.source, exponent.source),
        ty,
    ))
}

/// `math/sine`, `math/cosine`, `math/absolute`, `math/fract`: component-wise
/// builtins that keep the operand's type.
pub(crate) fn compile_componentwise(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let value = input_expr(state, node, 0)?;
    let func = match node.type_name.as_str() {
        registry::MATH_SINE => "sin",
        registry::MATH_COSINE => "cos",
        registry::MATH_ABSOLUTE => "abs",
        _ => "fract",
    };
    let ty = value.ty;
    Ok(TypedExpr::new(format!("{func}({})", value.source), ty))
}

/// `math/length`: vectors take their euclidean length; a scalar degenerates to
/// its absolute value (GLSL has no `length(float)` overload worth relying on).
pub(crate) fn compile_length(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let value = input_expr(state, node, 0)?;
    let source = match value.ty {
        ExprType::Scalar => format!("abs({})", value.source),
        _ => format!("length({})", value.source),
    };
    Ok(TypedExpr::scalar(source))
}

/// `math/dot`: operands promoted to a common type; two scalars multiply.
pub(crate) fn compile_dot(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let a = input_expr(state, node, 0)?;
    let b = input_expr(state, node, 1)?;
    let (a, b, ty) = coerce_binary(a, b);
    let source = match ty {
        ExprType::Scalar => format!("({} * {})", a.source, b.source),
        _ => format!("dot({}, {})", a.source, b.source),
    };
    Ok(TypedExpr::scalar(source))
}

/// `math/smoothstep`: scalar edges widened to the value's type.
pub(crate) fn compile_smoothstep(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let edge0 = input_expr(state, node, 0)?;
    let edge1 = input_expr(state, node, 1)?;
    let value = input_expr(state, node, 2)?;
    let ty = value.ty;
    let e0 = convert(&edge0, ty);
    let e1 = convert(&edge1, ty);
    Ok(TypedExpr::new(
        format!("smoothstep({}, {}, {})", e0.source, e1.source, value.source),
        ty,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::normalize;
    use crate::dsl::{GraphDocument, NodeDescriptor, link_entry};

    fn add_graph() -> (CompilationState, NodeRecord) {
        // scalar(1) and color(2) feed add(3).
        let doc = GraphDocument {
            nodes: vec![
                NodeDescriptor::new(1, registry::INPUT_SCALAR),
                NodeDescriptor::new(2, registry::INPUT_COLOR),
                NodeDescriptor::new(3, registry::MATH_ADD),
            ],
            links: vec![link_entry(10, 1, 0, 3, 0), link_entry(11, 2, 0, 3, 1)],
        };
        let state = normalize(&doc).unwrap();
        let node = state.nodes.get(&3).unwrap().clone();
        (state, node)
    }

    #[test]
    fn binary_add_widens_the_scalar_operand() {
        let (mut state, node) = add_graph();
        let expr = compile_binary(&mut state, &node).unwrap();
        assert_eq!(expr.ty, ExprType::Vec3);
        assert_eq!(expr.source, "(vec3(u_node1_float) + u_node2_vec3)");
    }

    #[test]
    fn unconnected_operands_fall_back_to_slot_defaults() {
        let doc = GraphDocument {
            nodes: vec![NodeDescriptor::new(5, registry::MATH_MULTIPLY)],
            links: vec![],
        };
        let mut state = normalize(&doc).unwrap();
        let node = state.nodes.get(&5).unwrap().clone();
        let expr = compile_binary(&mut state, &node).unwrap();
        assert_eq!(expr.source, "(1.0 * 1.0)");
        assert_eq!(expr.ty, ExprType::Scalar);
    }

    #[test]
    fn dot_of_scalars_multiplies() {
        let doc = GraphDocument {
            nodes: vec![NodeDescriptor::new(1, registry::MATH_DOT)],
            links: vec![],
        };
        let mut state = normalize(&doc).unwrap();
        let node = state.nodes.get(&1).unwrap().clone();
        let expr = compile_dot(&mut state, &node).unwrap();
        assert_eq!(expr.source, "(0.0 * 0.0)");
        assert_eq!(expr.ty, ExprType::Scalar);
    }

    #[test]
    fn mix_widens_its_factor_with_the_operands() {
        let doc = GraphDocument {
            nodes: vec![
                NodeDescriptor::new(1, registry::INPUT_COLOR),
                NodeDescriptor::new(2, registry::MATH_MIX),
            ],
            links: vec![link_entry(1, 1, 0, 2, 0)],
        };
        let mut state = normalize(&doc).unwrap();
        let node = state.nodes.get(&2).unwrap().clone();
        let expr = compile_mix(&mut state, &node).unwrap();
        assert_eq!(expr.ty, ExprType::Vec3);
        assert_eq!(
            expr.source,
            "mix(u_node1_vec3, vec3(1.0), vec3(0.5))"
        );
    }
}
