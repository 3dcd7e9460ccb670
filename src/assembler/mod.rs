//! Assembly of the final multi-pass shader program text.
//!
//! The base pass wraps the compiled color/alpha expression in a fixed
//! multi-surface, multi-mode fragment program; the composite pass blends the
//! base output with bloom and feedback textures under the five post-effect
//! amounts. Any failure earlier in the pipeline aborts assembly entirely; no
//! partial bundle is ever produced.

pub mod base_pass;
pub mod composite_pass;
pub mod prelude;

use serde::Serialize;

use crate::compiler::types::{DynamicUniform, fmt_f32};
use crate::compiler::{ColorOutput, CompilationState};

/// Static post-effect configuration resolved at compile time. The five
/// amounts are clamped to [0, 2.5], the bloom threshold to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassConfig {
    pub bloom_amount: f32,
    pub blur_amount: f32,
    pub feedback_amount: f32,
    pub vignette_amount: f32,
    pub chromatic_amount: f32,
    pub bloom_threshold: f32,
    pub strict_mode: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        // Mirrors the declared defaults of the output/postfx slots.
        Self {
            bloom_amount: 0.35,
            blur_amount: 0.0,
            feedback_amount: 0.0,
            vignette_amount: 0.3,
            chromatic_amount: 0.0,
            bloom_threshold: 0.6,
            strict_mode: false,
        }
    }
}

/// Everything a host renderer needs to run the compiled graph: program text
/// for the two passes, the static post-effect configuration, and the dynamic
/// uniforms the graph exposes for live tweaking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledShaderBundle {
    pub vertex_source: String,
    pub base_fragment_source: String,
    pub composite_fragment_source: String,
    pub pass_config: PassConfig,
    pub dynamic_uniforms: Vec<DynamicUniform>,
}

/// Fixed fullscreen vertex program shared by both passes.
pub const VERTEX_SOURCE: &str = "\
#version 450

layout(location = 0) in vec2 a_position;
layout(location = 1) in vec2 a_uv;

layout(location = 0) out vec2 v_uv;

void main() {
    v_uv = a_uv;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

pub(crate) fn assemble(state: &CompilationState, color: &ColorOutput) -> CompiledShaderBundle {
    let mut uniforms = state.uniforms.clone();
    uniforms.sort_by(|a, b| {
        (a.node_id, a.uniform_name.as_str()).cmp(&(b.node_id, b.uniform_name.as_str()))
    });

    let graph_block = prelude::graph_params_block(&uniforms);

    let (fx_exprs, pass_config) = match &state.postfx_output {
        Some(fx) => (fx.exprs.clone(), fx.config.clone()),
        None => (default_fx_exprs(), PassConfig::default()),
    };

    CompiledShaderBundle {
        vertex_source: VERTEX_SOURCE.to_string(),
        base_fragment_source: base_pass::build(&graph_block, color),
        composite_fragment_source: composite_pass::build(
            &graph_block,
            state.texture_slots,
            &fx_exprs,
        ),
        pass_config,
        dynamic_uniforms: uniforms,
    }
}

/// Composite expressions used when the graph has no post-effect sink: the
/// default configuration, spelled as literals.
fn default_fx_exprs() -> [String; 5] {
    let c = PassConfig::default();
    [
        fmt_f32(c.bloom_amount),
        fmt_f32(c.blur_amount),
        fmt_f32(c.feedback_amount),
        fmt_f32(c.vignette_amount),
        fmt_f32(c.chromatic_amount),
    ]
}
