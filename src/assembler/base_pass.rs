//! The per-pixel base pass.
//!
//! A fixed wrapper around the compiled color+alpha expression: three surface
//! sampling strategies selected by `u_surface_mode`, and a shading mode
//! uniform choosing between a single evaluation (flat or lit) and a
//! volumetric accumulation that re-evaluates the graph at offset coordinates.

use crate::compiler::ColorOutput;

use super::prelude::HELPER_FUNCTIONS;

const IO: &str = "\
#version 450

layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 out_color;
";

/// The always-present runtime uniforms the host binds every frame.
const GLOBALS: &str = "\
layout(set = 0, binding = 0) uniform FxGlobals {
    float u_time;
    vec2 u_resolution;
    vec2 u_pointer;
    float u_opacity;
    float u_intensity;
    vec3 u_tint;
    int u_shade_mode;
    int u_surface_mode;
    vec3 u_light_dir;
    float u_light_strength;
    float u_vol_density;
    int u_vol_steps;
    float u_vol_stretch;
};

layout(set = 0, binding = 2) uniform sampler2D u_texture0;
layout(set = 0, binding = 3) uniform sampler2D u_texture1;
";

/// Surface sampling and the lighting helper. These read the globals block, so
/// they live here rather than in the shared prelude.
const SURFACE_AND_LIGHT: &str = "\
vec2 fx_surface(vec2 uv) {
    vec2 c = uv * 2.0 - vec2(1.0, 1.0);
    if (u_surface_mode == 1) {
        float r = length(c);
        float z = sqrt(max(1.0 - r * r, 0.0));
        return vec2(c.x / (z + 1.0), c.y / (z + 1.0));
    }
    if (u_surface_mode == 2) {
        return vec2(fract(atan(c.y, c.x) / 6.2831853 + 0.5), length(c));
    }
    return c;
}

vec3 fx_lighting(vec3 color, vec2 p) {
    vec3 n = normalize(vec3(p * 0.5, 1.0));
    vec3 l = normalize(u_light_dir);
    float d = max(dot(n, l), 0.0);
    return color * mix(1.0, d, clamp(u_light_strength, 0.0, 1.0));
}
";

/// Volumetric accumulation walks up to 36 progressively offset samples,
/// compositing front-to-back and bailing once coverage saturates.
const MAIN: &str = "\
void main() {
    vec2 sp = fx_surface(v_uv);
    vec4 shade;
    if (u_shade_mode == 2) {
        vec4 acc = vec4(0.0);
        for (int i = 0; i < 36; i++) {
            if (i >= u_vol_steps) {
                break;
            }
            float t = (float(i) + 0.5) / 36.0;
            vec4 s = fx_graph(sp + sp * (t * u_vol_stretch));
            float a = clamp(s.a * u_vol_density * (1.0 / 36.0), 0.0, 1.0) * (1.0 - acc.a);
            acc = acc + vec4(s.rgb * a, a);
            if (acc.a >= 0.985) {
                break;
            }
        }
        shade = acc;
    } else {
        shade = fx_graph(sp);
        if (u_shade_mode == 1) {
            shade = vec4(fx_lighting(shade.rgb, sp), shade.a);
        }
    }
    vec3 color = shade.rgb * u_tint * u_intensity;
    out_color = vec4(color, clamp(shade.a, 0.0, 1.0) * u_opacity);
}
";

pub(crate) fn build(graph_params_block: &str, color: &ColorOutput) -> String {
    format!(
        "{IO}\n{GLOBALS}\n{graph_params_block}\n{HELPER_FUNCTIONS}\n{SURFACE_AND_LIGHT}\n\
vec4 fx_graph(vec2 sp) {{\n    vec3 color = {};\n    float alpha = {};\n    return vec4(color, alpha);\n}}\n\n{MAIN}",
        color.color, color.alpha
    )
}
