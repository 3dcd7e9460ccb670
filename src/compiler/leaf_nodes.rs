//! Leaf nodes: literal values and built-in runtime inputs.
//!
//! Literal leaves never inline their value. They register a dynamic uniform
//! named from the node id and type, so the value stays live-tunable after
//! compilation.

use crate::dsl::{parse_f32, parse_f32_array};
use crate::registry;

use super::types::{TypedExpr, UniformValue};
use super::{CompilationState, NodeRecord, register_uniform};

/// Compile `input/scalar`, `input/vec2` and `input/color` into a dynamic
/// uniform reference.
pub(crate) fn compile_literal(state: &mut CompilationState, node: &NodeRecord) -> TypedExpr {
    let value = literal_value(node);
    let name = register_uniform(state, node.id, value);
    match value {
        UniformValue::Scalar(_) => TypedExpr::scalar(name),
        UniformValue::Vec2(_) => TypedExpr::vec2(name),
        UniformValue::Vec3(_) => TypedExpr::vec3(name),
    }
}

/// Initial value for a literal leaf, read from node properties with
/// per-component fallbacks.
pub(crate) fn literal_value(node: &NodeRecord) -> UniformValue {
    match node.type_name.as_str() {
        registry::INPUT_VEC2 => {
            let v = parse_f32_array(&node.properties, "value", [0.0, 0.0]).unwrap_or([
                parse_f32(&node.properties, "x").unwrap_or(0.0),
                parse_f32(&node.properties, "y").unwrap_or(0.0),
            ]);
            UniformValue::Vec2(v)
        }
        registry::INPUT_COLOR => {
            let v = parse_f32_array(&node.properties, "value", [1.0, 1.0, 1.0]).unwrap_or([
                parse_f32(&node.properties, "r").unwrap_or(1.0),
                parse_f32(&node.properties, "g").unwrap_or(1.0),
                parse_f32(&node.properties, "b").unwrap_or(1.0),
            ]);
            UniformValue::Vec3(v)
        }
        // input/scalar
        _ => UniformValue::Scalar(parse_f32(&node.properties, "value").unwrap_or(0.5)),
    }
}

/// Compile the built-in runtime leaves. `input/coord` references the surface
/// sampling coordinate in scope at every evaluation site.
pub(crate) fn compile_builtin(node: &NodeRecord) -> TypedExpr {
    match node.type_name.as_str() {
        registry::INPUT_TIME => TypedExpr::scalar("u_time"),
        registry::INPUT_RESOLUTION => TypedExpr::vec2("u_resolution"),
        registry::INPUT_POINTER => TypedExpr::vec2("u_pointer"),
        // input/coord
        _ => TypedExpr::vec2("sp"),
    }
}
