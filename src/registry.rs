//! Fixed registry of every node type the compiler understands.
//!
//! Pure data: each entry describes a node type's input slots (name, value
//! type, default literal), output slots, palette category and authoring tier.
//! The compiler consults it for slot defaults and type validation; node-palette
//! UIs and template builders consult it to construct well-shaped descriptors.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

pub const INPUT_SCALAR: &str = "input/scalar";
pub const INPUT_VEC2: &str = "input/vec2";
pub const INPUT_COLOR: &str = "input/color";
pub const INPUT_TIME: &str = "input/time";
pub const INPUT_RESOLUTION: &str = "input/resolution";
pub const INPUT_POINTER: &str = "input/pointer";
pub const INPUT_COORD: &str = "input/coord";

pub const MATH_ADD: &str = "math/add";
pub const MATH_SUBTRACT: &str = "math/subtract";
pub const MATH_MULTIPLY: &str = "math/multiply";
pub const MATH_DIVIDE: &str = "math/divide";
pub const MATH_MIX: &str = "math/mix";
pub const MATH_SATURATE: &str = "math/saturate";
pub const MATH_POWER: &str = "math/power";
pub const MATH_SINE: &str = "math/sine";
pub const MATH_COSINE: &str = "math/cosine";
pub const MATH_ABSOLUTE: &str = "math/absolute";
pub const MATH_FRACT: &str = "math/fract";
pub const MATH_LENGTH: &str = "math/length";
pub const MATH_DOT: &str = "math/dot";
pub const MATH_SMOOTHSTEP: &str = "math/smoothstep";

pub const PATTERN_NOISE: &str = "pattern/noise";
pub const PATTERN_FBM: &str = "pattern/fbm";
pub const PATTERN_VORONOI: &str = "pattern/voronoi";
pub const PATTERN_STRIPES: &str = "pattern/stripes";
pub const PATTERN_CHECKER: &str = "pattern/checker";
pub const PATTERN_RINGS: &str = "pattern/rings";

pub const COLOR_HSV: &str = "color/hsv";
pub const COLOR_MIX: &str = "color/mix";
pub const COLOR_GRADIENT: &str = "color/gradient";
pub const COLOR_GRAYSCALE: &str = "color/grayscale";

pub const TEXTURE_SAMPLE: &str = "texture/sample";

pub const POSTFX_CONTROL: &str = "postfx/control";

pub const OUTPUT_COLOR: &str = "output/color";
pub const OUTPUT_POSTFX: &str = "output/postfx";

/// Value shape of a slot. `Dynamic` is a placeholder resolved at compile time
/// by inspecting the actual operand flowing into the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueType {
    Scalar,
    Vec2,
    Vec3,
    Dynamic,
}

/// Palette grouping. No compiler semantics beyond lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Input,
    Math,
    Pattern,
    Color,
    Texture,
    PostFx,
    Output,
}

/// Authoring complexity classification used to filter palettes. Not enforced
/// by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    Basic,
    Advanced,
}

/// Literal fallback value for an unconnected or dangling input slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Literal {
    Scalar(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotSpec {
    pub name: &'static str,
    pub ty: ValueType,
    pub default: Literal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSpec {
    pub name: &'static str,
    pub ty: ValueType,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeTypeDef {
    pub type_name: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub tier: Tier,
    pub inputs: Vec<SlotSpec>,
    pub outputs: Vec<OutputSpec>,
}

impl NodeTypeDef {
    fn new(type_name: &'static str, title: &'static str, category: Category, tier: Tier) -> Self {
        Self {
            type_name,
            title,
            category,
            tier,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    fn input(mut self, name: &'static str, ty: ValueType, default: Literal) -> Self {
        self.inputs.push(SlotSpec { name, ty, default });
        self
    }

    fn input_dyn(self, name: &'static str, default: f32) -> Self {
        self.input(name, ValueType::Dynamic, Literal::Scalar(default))
    }

    fn input_scalar(self, name: &'static str, default: f32) -> Self {
        self.input(name, ValueType::Scalar, Literal::Scalar(default))
    }

    fn input_vec2(self, name: &'static str, default: [f32; 2]) -> Self {
        self.input(name, ValueType::Vec2, Literal::Vec2(default))
    }

    fn input_vec3(self, name: &'static str, default: [f32; 3]) -> Self {
        self.input(name, ValueType::Vec3, Literal::Vec3(default))
    }

    fn output(mut self, name: &'static str, ty: ValueType) -> Self {
        self.outputs.push(OutputSpec { name, ty });
        self
    }
}

struct Registry {
    defs: Vec<NodeTypeDef>,
    by_name: HashMap<&'static str, usize>,
}

fn build_registry() -> Registry {
    use Category::*;
    use Tier::*;
    use ValueType::{Dynamic, Scalar, Vec2, Vec3};

    let defs = vec![
        // Leaves. Literal leaves compile to dynamic uniforms; builtin leaves
        // reference the always-present runtime uniforms.
        NodeTypeDef::new(INPUT_SCALAR, "Value", Input, Basic).output("value", Scalar),
        NodeTypeDef::new(INPUT_VEC2, "Vector2", Input, Advanced).output("value", Vec2),
        NodeTypeDef::new(INPUT_COLOR, "Color", Input, Basic).output("color", Vec3),
        NodeTypeDef::new(INPUT_TIME, "Time", Input, Basic).output("seconds", Scalar),
        NodeTypeDef::new(INPUT_RESOLUTION, "Resolution", Input, Advanced).output("size", Vec2),
        NodeTypeDef::new(INPUT_POINTER, "Pointer", Input, Advanced).output("position", Vec2),
        NodeTypeDef::new(INPUT_COORD, "Coordinate", Input, Basic).output("position", Vec2),
        // Math.
        NodeTypeDef::new(MATH_ADD, "Add", Math, Basic)
            .input_dyn("a", 0.0)
            .input_dyn("b", 0.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_SUBTRACT, "Subtract", Math, Advanced)
            .input_dyn("a", 0.0)
            .input_dyn("b", 0.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_MULTIPLY, "Multiply", Math, Basic)
            .input_dyn("a", 1.0)
            .input_dyn("b", 1.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_DIVIDE, "Divide", Math, Advanced)
            .input_dyn("a", 0.0)
            .input_dyn("b", 1.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_MIX, "Mix", Math, Basic)
            .input_dyn("a", 0.0)
            .input_dyn("b", 1.0)
            .input_scalar("t", 0.5)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_SATURATE, "Saturate", Math, Basic)
            .input_dyn("value", 0.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_POWER, "Power", Math, Advanced)
            .input_dyn("base", 1.0)
            .input_scalar("exponent", 2.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_SINE, "Sine", Math, Basic)
            .input_dyn("value", 0.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_COSINE, "Cosine", Math, Advanced)
            .input_dyn("value", 0.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_ABSOLUTE, "Absolute", Math, Advanced)
            .input_dyn("value", 0.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_FRACT, "Fraction", Math, Advanced)
            .input_dyn("value", 0.0)
            .output("result", Dynamic),
        NodeTypeDef::new(MATH_LENGTH, "Length", Math, Advanced)
            .input_dyn("value", 0.0)
            .output("result", Scalar),
        NodeTypeDef::new(MATH_DOT, "Dot Product", Math, Advanced)
            .input_dyn("a", 0.0)
            .input_dyn("b", 0.0)
            .output("result", Scalar),
        NodeTypeDef::new(MATH_SMOOTHSTEP, "Smoothstep", Math, Advanced)
            .input_scalar("edge0", 0.0)
            .input_scalar("edge1", 1.0)
            .input_dyn("value", 0.0)
            .output("result", Dynamic),
        // Patterns. All emit calls into the fixed helper library declared once
        // in the shader prelude.
        NodeTypeDef::new(PATTERN_NOISE, "Noise", Pattern, Basic)
            .input_vec2("coord", [0.0, 0.0])
            .input_scalar("scale", 4.0)
            .output("value", Scalar),
        NodeTypeDef::new(PATTERN_FBM, "Fractal Noise", Pattern, Basic)
            .input_vec2("coord", [0.0, 0.0])
            .input_scalar("scale", 3.0)
            .input_scalar("gain", 0.5)
            .output("value", Scalar),
        NodeTypeDef::new(PATTERN_VORONOI, "Voronoi", Pattern, Advanced)
            .input_vec2("coord", [0.0, 0.0])
            .input_scalar("scale", 5.0)
            .output("value", Scalar),
        NodeTypeDef::new(PATTERN_STRIPES, "Stripes", Pattern, Advanced)
            .input_vec2("coord", [0.0, 0.0])
            .input_scalar("frequency", 6.0)
            .input_scalar("phase", 0.0)
            .output("value", Scalar),
        NodeTypeDef::new(PATTERN_CHECKER, "Checker", Pattern, Advanced)
            .input_vec2("coord", [0.0, 0.0])
            .input_scalar("scale", 4.0)
            .output("value", Scalar),
        NodeTypeDef::new(PATTERN_RINGS, "Rings", Pattern, Advanced)
            .input_vec2("coord", [0.0, 0.0])
            .input_scalar("frequency", 8.0)
            .output("value", Scalar),
        // Color.
        NodeTypeDef::new(COLOR_HSV, "HSV Color", Color, Basic)
            .input_scalar("hue", 0.0)
            .input_scalar("saturation", 1.0)
            .input_scalar("value", 1.0)
            .output("color", Vec3),
        NodeTypeDef::new(COLOR_MIX, "Mix Colors", Color, Basic)
            .input_vec3("a", [0.0, 0.0, 0.0])
            .input_vec3("b", [1.0, 1.0, 1.0])
            .input_scalar("t", 0.5)
            .output("color", Vec3),
        NodeTypeDef::new(COLOR_GRADIENT, "Gradient", Color, Advanced)
            .input_scalar("t", 0.0)
            .input_vec3("from", [0.0, 0.0, 0.0])
            .input_vec3("to", [1.0, 1.0, 1.0])
            .output("color", Vec3),
        NodeTypeDef::new(COLOR_GRAYSCALE, "Grayscale", Color, Advanced)
            .input_vec3("color", [1.0, 1.0, 1.0])
            .output("value", Scalar),
        // Texture sampling against the two fixed external slots.
        NodeTypeDef::new(TEXTURE_SAMPLE, "Texture Sample", Texture, Advanced)
            .input_vec2("coord", [0.0, 0.0])
            .output("color", Vec3),
        // Post-effect passthrough control.
        NodeTypeDef::new(POSTFX_CONTROL, "Effect Control", PostFx, Advanced)
            .input_scalar("amount", 0.5)
            .output("amount", Scalar),
        // Sinks.
        NodeTypeDef::new(OUTPUT_COLOR, "Output", Output, Basic)
            .input_vec3("color", [1.0, 1.0, 1.0])
            .input_scalar("alpha", 1.0),
        NodeTypeDef::new(OUTPUT_POSTFX, "Post Effects", Output, Basic)
            .input_scalar("bloom", 0.35)
            .input_scalar("blur", 0.0)
            .input_scalar("feedback", 0.0)
            .input_scalar("vignette", 0.3)
            .input_scalar("chromatic", 0.0),
    ];

    let by_name = defs
        .iter()
        .enumerate()
        .map(|(i, d)| (d.type_name, i))
        .collect();

    Registry { defs, by_name }
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

pub fn lookup(type_name: &str) -> Option<&'static NodeTypeDef> {
    let reg = registry();
    reg.by_name.get(type_name).map(|&i| &reg.defs[i])
}

/// All definitions, in declaration order (stable for palette UIs).
pub fn all() -> &'static [NodeTypeDef] {
    &registry().defs
}

pub fn list_by_category(category: Category) -> Vec<&'static NodeTypeDef> {
    registry()
        .defs
        .iter()
        .filter(|d| d.category == category)
        .collect()
}

/// Definitions of the given tier. The `Advanced` listing always includes the
/// output sinks so they stay selectable regardless of authoring tier.
pub fn list_by_tier(tier: Tier) -> Vec<&'static NodeTypeDef> {
    let mut out: Vec<&'static NodeTypeDef> = registry()
        .defs
        .iter()
        .filter(|d| d.tier == tier)
        .collect();
    if tier == Tier::Advanced {
        for sink in [OUTPUT_COLOR, OUTPUT_POSTFX] {
            if !out.iter().any(|d| d.type_name == sink) {
                if let Some(d) = lookup(sink) {
                    out.push(d);
                }
            }
        }
    }
    out
}
