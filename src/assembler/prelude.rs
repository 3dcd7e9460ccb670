//! Shared GLSL building blocks: the procedural helper library and the dynamic
//! uniform block, emitted into both fragment passes.

use crate::compiler::types::DynamicUniform;

/// Procedural helper functions. Declared once per fragment program, before
/// any compiled graph expression; every function is pure so the block is
/// identical in both passes.
pub const HELPER_FUNCTIONS: &str = "\
float fx_hash(vec2 p) {
    return fract(sin(dot(p, vec2(127.1, 311.7))) * 43758.5453123);
}

float fx_value_noise(vec2 p) {
    vec2 i = floor(p);
    vec2 f = fract(p);
    vec2 u = f * f * (3.0 - 2.0 * f);
    float a = fx_hash(i);
    float b = fx_hash(i + vec2(1.0, 0.0));
    float c = fx_hash(i + vec2(0.0, 1.0));
    float d = fx_hash(i + vec2(1.0, 1.0));
    return mix(mix(a, b, u.x), mix(c, d, u.x), u.y);
}

float fx_fbm(vec2 p, float gain) {
    float sum = 0.0;
    float amp = 0.5;
    vec2 q = p;
    for (int i = 0; i < 5; i++) {
        sum = sum + amp * fx_value_noise(q);
        q = q * 2.03 + vec2(17.3, 9.1);
        amp = amp * gain;
    }
    return sum;
}

float fx_voronoi(vec2 p) {
    vec2 cell = floor(p);
    vec2 f = fract(p);
    float best = 8.0;
    for (int y = -1; y <= 1; y++) {
        for (int x = -1; x <= 1; x++) {
            vec2 o = vec2(float(x), float(y));
            vec2 site = o + vec2(fx_hash(cell + o), fx_hash(cell + o + vec2(41.0, 7.0))) - f;
            best = min(best, dot(site, site));
        }
    }
    return sqrt(best);
}

float fx_stripes(vec2 p, float freq, float phase) {
    return 0.5 + 0.5 * sin(p.x * freq + phase);
}

float fx_checker(vec2 p, float scale) {
    vec2 q = floor(p * scale);
    return mod(q.x + q.y, 2.0);
}

float fx_rings(vec2 p, float freq) {
    return 0.5 + 0.5 * cos(length(p) * freq);
}

vec3 fx_hsv2rgb(float h, float s, float v) {
    vec3 k = fract(vec3(h, h + 2.0 / 3.0, h + 1.0 / 3.0)) * 6.0;
    vec3 rgb = clamp(abs(k - vec3(3.0)) - vec3(1.0), vec3(0.0), vec3(1.0));
    return v * mix(vec3(1.0), rgb, vec3(s));
}
";

/// Uniform block for the graph's dynamic uniforms, or nothing when the graph
/// exposes none. Binding 1 in both passes.
pub fn graph_params_block(uniforms: &[DynamicUniform]) -> String {
    if uniforms.is_empty() {
        return String::new();
    }
    let mut out = String::from("layout(set = 0, binding = 1) uniform GraphParams {\n");
    for u in uniforms {
        out.push_str("    ");
        out.push_str(u.ty.glsl());
        out.push(' ');
        out.push_str(&u.uniform_name);
        out.push_str(";\n");
    }
    out.push_str("};\n");
    out
}
