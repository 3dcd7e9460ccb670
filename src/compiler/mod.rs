//! Graph normalization and the memoized, cycle-detecting node compiler.
//!
//! The compiler walks backward from the output sink(s), producing one typed
//! source-expression fragment per visited node. All state lives in a
//! [`CompilationState`] created fresh per compile call; nothing persists
//! across calls.

pub mod color_nodes;
pub mod leaf_nodes;
pub mod math_nodes;
pub mod output_nodes;
pub mod pattern_nodes;
pub mod texture_nodes;
pub mod types;

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::assembler;
use crate::assembler::CompiledShaderBundle;
use crate::dsl::{GraphDocument, NodeDescriptor};
use crate::error::{CompileError, GraphShapeError};
use crate::registry::{self, NodeTypeDef, SlotSpec, ValueType};
use types::{DynamicUniform, ExprType, TypedExpr, UniformValue, convert, literal_expr, uniform_name};

/// Hard cap on document size.
pub const MAX_GRAPH_NODES: usize = 64;

/// A validated directed edge. Slot indices are already non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub origin_node: i64,
    pub origin_slot: usize,
    pub target_node: i64,
    pub target_slot: usize,
}

/// Strict in-memory form of one node after normalization.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub id: i64,
    pub type_name: String,
    pub properties: HashMap<String, serde_json::Value>,
    /// Link id per declared input slot, as exported by the editor.
    pub input_links: Vec<Option<i64>>,
}

/// Compiled color sink: the two expressions the base pass wraps.
#[derive(Debug, Clone)]
pub struct ColorOutput {
    pub color: String,
    pub alpha: String,
}

/// Compiled post-effect sink: five runtime expressions for the composite pass
/// plus the statically resolved configuration.
#[derive(Debug, Clone)]
pub struct PostFxOutput {
    pub exprs: [String; 5],
    pub config: assembler::PassConfig,
}

/// Transient per-compile state: node/link maps, the expression cache, the
/// in-progress visiting set and the dynamic-uniform registry.
#[derive(Debug)]
pub struct CompilationState {
    pub(crate) nodes: HashMap<i64, NodeRecord>,
    pub(crate) links: HashMap<i64, Link>,
    incoming: HashMap<(i64, usize), i64>,
    cache: HashMap<i64, TypedExpr>,
    visiting: HashSet<i64>,
    pub(crate) uniforms: Vec<DynamicUniform>,
    uniform_by_node: HashMap<i64, usize>,
    pub(crate) texture_slots: [bool; 2],
    pub(crate) color_output: Option<ColorOutput>,
    pub(crate) postfx_output: Option<PostFxOutput>,
}

/// Compile a whole document into a shader bundle. Synchronous, side-effect
/// free, deterministic: two calls with structurally identical input produce
/// byte-identical output.
pub fn compile_document(doc: &GraphDocument) -> Result<CompiledShaderBundle, CompileError> {
    let mut state = normalize(doc)?;
    debug!(
        "compiling graph: {} nodes, {} links",
        state.nodes.len(),
        state.links.len()
    );

    let color_sink = lowest_id_of_type(&state, registry::OUTPUT_COLOR)
        .ok_or(CompileError::MissingOutputNode)?;
    compile_node(&mut state, color_sink)?;

    if let Some(fx_sink) = lowest_id_of_type(&state, registry::OUTPUT_POSTFX) {
        compile_node(&mut state, fx_sink)?;
    }

    let color = state
        .color_output
        .clone()
        .ok_or(CompileError::MissingOutputNode)?;
    debug!("graph exposes {} dynamic uniforms", state.uniforms.len());
    Ok(assembler::assemble(&state, &color))
}

/// Convert the loose wire document into validated node and link maps.
pub fn normalize(doc: &GraphDocument) -> Result<CompilationState, CompileError> {
    if doc.nodes.is_empty() {
        return Err(GraphShapeError::EmptyGraph.into());
    }
    if doc.nodes.len() > MAX_GRAPH_NODES {
        return Err(GraphShapeError::TooManyNodes(doc.nodes.len()).into());
    }

    let mut nodes: HashMap<i64, NodeRecord> = HashMap::with_capacity(doc.nodes.len());
    for n in &doc.nodes {
        let record = normalize_node(n)?;
        if nodes.contains_key(&record.id) {
            return Err(GraphShapeError::DuplicateNodeId(record.id).into());
        }
        nodes.insert(record.id, record);
    }

    let mut links: HashMap<i64, Link> = HashMap::new();
    let mut incoming: HashMap<(i64, usize), i64> = HashMap::new();
    for raw in &doc.links {
        let Some(link) = parse_link(raw) else {
            warn!("dropping malformed link entry: {raw}");
            continue;
        };
        // Dangling endpoints are filtered, not rejected: graphs under active
        // editing must still compile to something usable.
        if !nodes.contains_key(&link.origin_node) || !nodes.contains_key(&link.target_node) {
            debug!("dropping dangling link {}", link.id);
            continue;
        }
        incoming.insert((link.target_node, link.target_slot), link.id);
        links.insert(link.id, link);
    }

    Ok(CompilationState {
        nodes,
        links,
        incoming,
        cache: HashMap::new(),
        visiting: HashSet::new(),
        uniforms: Vec::new(),
        uniform_by_node: HashMap::new(),
        texture_slots: [false, false],
        color_output: None,
        postfx_output: None,
    })
}

fn normalize_node(n: &NodeDescriptor) -> Result<NodeRecord, CompileError> {
    let id = n.id.ok_or(GraphShapeError::NodeMissingId)?;
    let type_name = match n.type_name.as_deref() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return Err(GraphShapeError::NodeMissingType(id).into()),
    };
    if registry::lookup(&type_name).is_none() {
        return Err(CompileError::UnknownNodeType {
            node_id: id,
            type_name,
        });
    }
    Ok(NodeRecord {
        id,
        type_name,
        properties: n.properties.clone(),
        input_links: n.input_slots.iter().map(|s| s.link).collect(),
    })
}

/// Parse one raw wire link tuple. Entries with fewer than five integer fields
/// or negative slot indices are malformed and yield `None`.
fn parse_link(raw: &serde_json::Value) -> Option<Link> {
    let arr = raw.as_array()?;
    if arr.len() < 5 {
        return None;
    }
    let field = |i: usize| arr.get(i).and_then(serde_json::Value::as_i64);
    Some(Link {
        id: field(0)?,
        origin_node: field(1)?,
        origin_slot: usize::try_from(field(2)?).ok()?,
        target_node: field(3)?,
        target_slot: usize::try_from(field(4)?).ok()?,
    })
}

fn lowest_id_of_type(state: &CompilationState, type_name: &str) -> Option<i64> {
    state
        .nodes
        .values()
        .filter(|n| n.type_name == type_name)
        .map(|n| n.id)
        .min()
}

/// Memoized recursive compilation of one node into a typed expression.
pub(crate) fn compile_node(state: &mut CompilationState, node_id: i64) -> Result<TypedExpr, CompileError> {
    if let Some(cached) = state.cache.get(&node_id) {
        return Ok(cached.clone());
    }
    if state.visiting.contains(&node_id) {
        return Err(CompileError::CycleDetected { node_id });
    }
    // Absent ids only occur through hand-built state; degrade like a dangling
    // link would.
    let Some(node) = state.nodes.get(&node_id).cloned() else {
        return Ok(TypedExpr::void());
    };

    state.visiting.insert(node_id);
    let result = dispatch(state, &node);
    state.visiting.remove(&node_id);

    let expr = result?;
    state.cache.insert(node_id, expr.clone());
    Ok(expr)
}

fn dispatch(state: &mut CompilationState, node: &NodeRecord) -> Result<TypedExpr, CompileError> {
    use crate::registry::*;

    match node.type_name.as_str() {
        INPUT_SCALAR | INPUT_VEC2 | INPUT_COLOR => Ok(leaf_nodes::compile_literal(state, node)),
        INPUT_TIME | INPUT_RESOLUTION | INPUT_POINTER | INPUT_COORD => {
            Ok(leaf_nodes::compile_builtin(node))
        }

        MATH_ADD | MATH_SUBTRACT | MATH_MULTIPLY | MATH_DIVIDE => {
            math_nodes::compile_binary(state, node)
        }
        MATH_MIX => math_nodes::compile_mix(state, node),
        MATH_SATURATE => math_nodes::compile_saturate(state, node),
        MATH_POWER => math_nodes::compile_power(state, node),
        MATH_SINE | MATH_COSINE | MATH_ABSOLUTE | MATH_FRACT => {
            math_nodes::compile_componentwise(state, node)
        }
        MATH_LENGTH => math_nodes::compile_length(state, node),
        MATH_DOT => math_nodes::compile_dot(state, node),
        MATH_SMOOTHSTEP => math_nodes::compile_smoothstep(state, node),

        PATTERN_NOISE | PATTERN_FBM | PATTERN_VORONOI | PATTERN_STRIPES | PATTERN_CHECKER
        | PATTERN_RINGS => pattern_nodes::compile(state, node),

        COLOR_HSV => color_nodes::compile_hsv(state, node),
        COLOR_MIX => color_nodes::compile_mix(state, node),
        COLOR_GRADIENT => color_nodes::compile_gradient(state, node),
        COLOR_GRAYSCALE => color_nodes::compile_grayscale(state, node),

        TEXTURE_SAMPLE => texture_nodes::compile_sample(state, node),

        POSTFX_CONTROL => output_nodes::compile_control(state, node),
        OUTPUT_COLOR => output_nodes::compile_color_sink(state, node),
        OUTPUT_POSTFX => output_nodes::compile_postfx_sink(state, node),

        // Normalization already rejected unregistered types.
        other => Err(CompileError::UnknownNodeType {
            node_id: node.id,
            type_name: other.to_string(),
        }),
    }
}

/// Look up the definition of an already-validated node type.
pub(crate) fn node_def(node: &NodeRecord) -> &'static NodeTypeDef {
    // Normalization guarantees registry membership; an empty fallback def is
    // unrepresentable, so index directly.
    registry::lookup(&node.type_name).unwrap_or_else(|| {
        unreachable!("node {} passed normalization with unknown type", node.id)
    })
}

/// The link currently driving an input slot, if any. Prefers the node's own
/// `inputs[slot].link` reference, then the target index built from the link
/// array.
fn incoming_link(state: &CompilationState, node: &NodeRecord, slot: usize) -> Option<Link> {
    if let Some(Some(link_id)) = node.input_links.get(slot)
        && let Some(link) = state.links.get(link_id)
    {
        return Some(*link);
    }
    state
        .incoming
        .get(&(node.id, slot))
        .and_then(|id| state.links.get(id))
        .copied()
}

/// Resolve one declared input slot to a typed expression: follow its link to
/// the origin node's compiled output, or fall back to the slot's declared
/// default literal. Slots with a concrete declared type convert the incoming
/// expression to that type; `Dynamic` slots keep the operand's own type.
pub(crate) fn input_expr(
    state: &mut CompilationState,
    node: &NodeRecord,
    slot: usize,
) -> Result<TypedExpr, CompileError> {
    let def = node_def(node);
    let spec: &SlotSpec = &def.inputs[slot];

    let resolved = if let Some(link) = incoming_link(state, node, slot) {
        let expr = compile_node(state, link.origin_node)?;
        if expr.ty == ExprType::Void {
            // A sink wired where a value is expected: degrade to the default.
            literal_expr(&spec.default)
        } else {
            expr
        }
    } else {
        literal_expr(&spec.default)
    };

    Ok(match spec.ty {
        ValueType::Scalar => convert(&resolved, ExprType::Scalar),
        ValueType::Vec2 => convert(&resolved, ExprType::Vec2),
        ValueType::Vec3 => convert(&resolved, ExprType::Vec3),
        ValueType::Dynamic => resolved,
    })
}

/// Register (or re-use) the dynamic uniform generated for a literal leaf node.
pub(crate) fn register_uniform(
    state: &mut CompilationState,
    node_id: i64,
    value: UniformValue,
) -> String {
    if let Some(&idx) = state.uniform_by_node.get(&node_id) {
        return state.uniforms[idx].uniform_name.clone();
    }
    let ty = value.expr_type();
    let name = uniform_name(node_id, ty);
    let idx = state.uniforms.len();
    state.uniforms.push(DynamicUniform {
        node_id,
        ty,
        uniform_name: name.clone(),
        initial_value: value,
    });
    state.uniform_by_node.insert(node_id, idx);
    name
}
