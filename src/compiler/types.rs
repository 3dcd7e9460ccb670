//! Concrete expression types, widening/narrowing conversions and the dynamic
//! uniform registry entries.

use serde::Serialize;

use crate::registry::Literal;

/// Concrete type of a compiled expression. `Void` is produced only by the two
/// sink node types, which are never read downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExprType {
    Scalar,
    Vec2,
    Vec3,
    Void,
}

impl ExprType {
    pub fn glsl(self) -> &'static str {
        match self {
            ExprType::Scalar => "float",
            ExprType::Vec2 => "vec2",
            ExprType::Vec3 => "vec3",
            ExprType::Void => "void",
        }
    }

    /// Uniform-name suffix; also the wire spelling hosts bind against.
    pub fn uniform_suffix(self) -> &'static str {
        match self {
            ExprType::Scalar => "float",
            ExprType::Vec2 => "vec2",
            ExprType::Vec3 => "vec3",
            ExprType::Void => "void",
        }
    }

    fn rank(self) -> u8 {
        match self {
            ExprType::Void => 0,
            ExprType::Scalar => 1,
            ExprType::Vec2 => 2,
            ExprType::Vec3 => 3,
        }
    }
}

/// A typed GLSL source-expression fragment. The unit of memoized compiler
/// output per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedExpr {
    pub ty: ExprType,
    pub source: String,
}

impl TypedExpr {
    pub fn new(source: impl Into<String>, ty: ExprType) -> Self {
        Self {
            ty,
            source: source.into(),
        }
    }

    pub fn scalar(source: impl Into<String>) -> Self {
        Self::new(source, ExprType::Scalar)
    }

    pub fn vec2(source: impl Into<String>) -> Self {
        Self::new(source, ExprType::Vec2)
    }

    pub fn vec3(source: impl Into<String>) -> Self {
        Self::new(source, ExprType::Vec3)
    }

    pub fn void() -> Self {
        Self::new("", ExprType::Void)
    }
}

/// Format a float as a GLSL literal. Always keeps a decimal point so the
/// emitted token is unambiguously a float.
pub fn fmt_f32(v: f32) -> String {
    if v.is_finite() { format!("{v:?}") } else { "0.0".to_string() }
}

/// Emit a registry default literal as an expression.
pub fn literal_expr(lit: &Literal) -> TypedExpr {
    match lit {
        Literal::Scalar(v) => TypedExpr::scalar(fmt_f32(*v)),
        Literal::Vec2([x, y]) => {
            TypedExpr::vec2(format!("vec2({}, {})", fmt_f32(*x), fmt_f32(*y)))
        }
        Literal::Vec3([x, y, z]) => TypedExpr::vec3(format!(
            "vec3({}, {}, {})",
            fmt_f32(*x),
            fmt_f32(*y),
            fmt_f32(*z)
        )),
    }
}

/// Convert an expression to a target concrete type.
///
/// Widening replicates scalars and zero-extends vec2; narrowing averages vec3
/// channels and takes vec2 length. Conversions from `Void` (a sink wired where
/// a value is expected) degrade to a zero of the target type.
pub fn convert(expr: &TypedExpr, target: ExprType) -> TypedExpr {
    use ExprType::*;
    if expr.ty == target {
        return expr.clone();
    }
    let e = &expr.source;
    match (expr.ty, target) {
        (Scalar, Vec2) => TypedExpr::vec2(format!("vec2({e})")),
        (Scalar, Vec3) => TypedExpr::vec3(format!("vec3({e})")),
        (Vec2, Vec3) => TypedExpr::vec3(format!("vec3({e}, 0.0)")),
        (Vec3, Vec2) => TypedExpr::vec2(format!("({e}).xy")),
        (Vec2, Scalar) => TypedExpr::scalar(format!("length({e})")),
        (Vec3, Scalar) => TypedExpr::scalar(format!("(dot({e}, vec3(1.0)) / 3.0)")),
        (Void, _) => convert(&TypedExpr::scalar("0.0"), target),
        (_, Void) => TypedExpr::void(),
        // Equal types are handled by the early return above.
        (Scalar, Scalar) | (Vec2, Vec2) | (Vec3, Vec3) => expr.clone(),
    }
}

/// Promote two operands for a binary operator: the result type is the wider of
/// the two, both operands are widened up to it, and narrowing never happens
/// automatically.
pub fn coerce_binary(a: TypedExpr, b: TypedExpr) -> (TypedExpr, TypedExpr, ExprType) {
    let target = if a.ty.rank() >= b.ty.rank() { a.ty } else { b.ty };
    let aa = convert(&a, target);
    let bb = convert(&b, target);
    (aa, bb, target)
}

/// Clamp to [0, 1], preserving the expression's type. Vector bounds are
/// spelled out so every call uses an exact builtin overload.
pub fn saturate(expr: &TypedExpr) -> TypedExpr {
    let e = &expr.source;
    match expr.ty {
        ExprType::Scalar => TypedExpr::scalar(format!("clamp({e}, 0.0, 1.0)")),
        ExprType::Vec2 => TypedExpr::vec2(format!("clamp({e}, vec2(0.0), vec2(1.0))")),
        ExprType::Vec3 => TypedExpr::vec3(format!("clamp({e}, vec3(0.0), vec3(1.0))")),
        ExprType::Void => expr.clone(),
    }
}

/// Initial value of a dynamic uniform, serialized as a bare number or a fixed
/// array to match the host-facing schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UniformValue {
    Scalar(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

impl UniformValue {
    pub fn expr_type(&self) -> ExprType {
        match self {
            UniformValue::Scalar(_) => ExprType::Scalar,
            UniformValue::Vec2(_) => ExprType::Vec2,
            UniformValue::Vec3(_) => ExprType::Vec3,
        }
    }
}

/// A live-tunable shader input generated from a literal leaf node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicUniform {
    pub node_id: i64,
    #[serde(rename = "type")]
    pub ty: ExprType,
    pub uniform_name: String,
    pub initial_value: UniformValue,
}

/// Deterministic uniform name for a literal leaf, derived from node id and
/// value type only.
pub fn uniform_name(node_id: i64, ty: ExprType) -> String {
    sanitize_ident(&format!("u_node{}_{}", node_id, ty.uniform_suffix()))
}

/// Restrict to GLSL identifier characters (negative ids carry a '-').
fn sanitize_ident(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
