//! The compositing pass.
//!
//! Fixed blend of the base-pass color, the bloom-extracted/blurred texture
//! and the feedback history texture, driven by the five post-effect
//! expressions resolved from the graph.

use super::prelude::HELPER_FUNCTIONS;

const IO: &str = "\
#version 450

layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 out_color;
";

const GLOBALS: &str = "\
layout(set = 0, binding = 0) uniform CompositeGlobals {
    float u_time;
    vec2 u_resolution;
    vec2 u_pointer;
    float u_opacity;
    float u_intensity;
    vec3 u_tint;
};

layout(set = 0, binding = 2) uniform sampler2D u_scene;
layout(set = 0, binding = 3) uniform sampler2D u_bloom;
layout(set = 0, binding = 4) uniform sampler2D u_feedback;
";

pub(crate) fn build(
    graph_params_block: &str,
    texture_slots: [bool; 2],
    fx_exprs: &[String; 5],
) -> String {
    // The graph texture slots only appear here when the graph references
    // them; bindings 5 and 6 keep clear of the pass's own textures.
    let mut graph_textures = String::new();
    for (slot, used) in texture_slots.iter().enumerate() {
        if *used {
            graph_textures.push_str(&format!(
                "layout(set = 0, binding = {}) uniform sampler2D u_texture{slot};\n",
                5 + slot
            ));
        }
    }

    let main = format!(
        "\
void main() {{
    vec2 sp = v_uv * 2.0 - vec2(1.0, 1.0);
    float fx_bloom = clamp({bloom}, 0.0, 2.5);
    float fx_blur = clamp({blur}, 0.0, 2.5);
    float fx_feedback = clamp({feedback}, 0.0, 2.5);
    float fx_vignette = clamp({vignette}, 0.0, 2.5);
    float fx_chromatic = clamp({chromatic}, 0.0, 2.5);

    vec2 shift = vec2(fx_chromatic * 0.004, 0.0);
    vec3 base = vec3(
        texture(u_scene, v_uv + shift).r,
        texture(u_scene, v_uv).g,
        texture(u_scene, v_uv - shift).b);

    vec2 px = vec2(1.0, 1.0) / u_resolution;
    vec3 soft = (
        texture(u_scene, v_uv + vec2(px.x, 0.0)).rgb +
        texture(u_scene, v_uv - vec2(px.x, 0.0)).rgb +
        texture(u_scene, v_uv + vec2(0.0, px.y)).rgb +
        texture(u_scene, v_uv - vec2(0.0, px.y)).rgb) * 0.25;

    vec3 color = mix(base, soft, vec3(clamp(fx_blur * 0.4, 0.0, 1.0)));
    color = color + texture(u_bloom, v_uv).rgb * fx_bloom;
    color = mix(color, texture(u_feedback, v_uv).rgb, vec3(clamp(fx_feedback, 0.0, 0.95)));
    float vig = clamp(1.0 - fx_vignette * dot(sp, sp) * 0.5, 0.0, 1.0);
    color = color * vig * u_tint * u_intensity;
    out_color = vec4(color, u_opacity);
}}
",
        bloom = fx_exprs[0],
        blur = fx_exprs[1],
        feedback = fx_exprs[2],
        vignette = fx_exprs[3],
        chromatic = fx_exprs[4],
    );

    format!("{IO}\n{GLOBALS}\n{graph_params_block}{graph_textures}\n{HELPER_FUNCTIONS}\n{main}")
}
