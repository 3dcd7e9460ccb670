//! Sink nodes and the post-effect passthrough control.
//!
//! The two sink types produce `Void` expressions and are never read
//! downstream. The post-effect sink resolves each of its five inputs twice:
//! once into a runtime GLSL expression for the composite pass, and once into a
//! static number by a single-hop lookup. The static side deliberately falls
//! back to hardcoded defaults for anything deeper than one hop, even though
//! the live expression still reflects the full graph.

use crate::assembler::PassConfig;
use crate::dsl::{parse_bool, parse_f32};
use crate::error::CompileError;
use crate::registry::{self, Literal};

use super::types::{TypedExpr, fmt_f32};
use super::{CompilationState, ColorOutput, NodeRecord, PostFxOutput, input_expr, node_def};

/// Upper bound for the five post-effect amounts in the static configuration.
const POSTFX_AMOUNT_MAX: f32 = 2.5;

const DEFAULT_BLOOM_THRESHOLD: f32 = 0.6;

/// `postfx/control`: a scalar passthrough. Driven, it forwards its input;
/// un-driven, it exposes its `amount` property (or the slot default).
pub(crate) fn compile_control(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    if super::incoming_link(state, node, 0).is_some() {
        return input_expr(state, node, 0);
    }
    let amount = parse_f32(&node.properties, "amount").unwrap_or_else(|| slot_default(node, 0));
    Ok(TypedExpr::scalar(fmt_f32(amount)))
}

/// `output/color`: consumes a vec3 color and a scalar alpha, records them for
/// the assembler and terminates the walk with `Void`.
pub(crate) fn compile_color_sink(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let color = input_expr(state, node, 0)?;
    let alpha = input_expr(state, node, 1)?;
    state.color_output = Some(ColorOutput {
        color: color.source,
        alpha: alpha.source,
    });
    Ok(TypedExpr::void())
}

/// `output/postfx`: five scalar amounts, each resolved to a live expression
/// and a clamped static value, plus the threshold/strict properties.
pub(crate) fn compile_postfx_sink(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let mut exprs: [String; 5] = Default::default();
    let mut amounts = [0.0f32; 5];
    for slot in 0..5 {
        exprs[slot] = input_expr(state, node, slot)?.source;
        amounts[slot] = static_amount(state, node, slot).clamp(0.0, POSTFX_AMOUNT_MAX);
    }

    let config = PassConfig {
        bloom_amount: amounts[0],
        blur_amount: amounts[1],
        feedback_amount: amounts[2],
        vignette_amount: amounts[3],
        chromatic_amount: amounts[4],
        bloom_threshold: parse_f32(&node.properties, "threshold")
            .unwrap_or(DEFAULT_BLOOM_THRESHOLD)
            .clamp(0.0, 1.0),
        strict_mode: parse_bool(&node.properties, "strict").unwrap_or(false),
    };
    state.postfx_output = Some(PostFxOutput { exprs, config });
    Ok(TypedExpr::void())
}

/// Single-hop static resolution of one post-effect slot.
///
/// Unlinked: the slot's declared default. Linked to a literal scalar leaf: its
/// `value` property. Linked to an un-driven passthrough control: the control's
/// `amount` property or its slot default. Anything else: the hardcoded
/// fallback, which is the sink slot's default; the live expression is not
/// evaluated on the CPU.
fn static_amount(state: &CompilationState, node: &NodeRecord, slot: usize) -> f32 {
    let fallback = slot_default(node, slot);

    let Some(link) = super::incoming_link(state, node, slot) else {
        return fallback;
    };
    let Some(origin) = state.nodes.get(&link.origin_node) else {
        return fallback;
    };

    match origin.type_name.as_str() {
        registry::INPUT_SCALAR => parse_f32(&origin.properties, "value").unwrap_or(0.5),
        registry::POSTFX_CONTROL if super::incoming_link(state, origin, 0).is_none() => {
            parse_f32(&origin.properties, "amount").unwrap_or_else(|| slot_default(origin, 0))
        }
        _ => fallback,
    }
}

fn slot_default(node: &NodeRecord, slot: usize) -> f32 {
    match node_def(node).inputs[slot].default {
        Literal::Scalar(v) => v,
        Literal::Vec2([x, _]) => x,
        Literal::Vec3([x, _, _]) => x,
    }
}
