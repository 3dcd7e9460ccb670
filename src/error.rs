//! Error taxonomy for graph compilation.
//!
//! Every error aborts the whole compile; there is no partial bundle. Callers
//! are expected to keep their last successfully compiled bundle around and
//! only replace it when a new compile succeeds.

use thiserror::Error;

/// Structural problems with the input document, detected before any node is
/// compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphShapeError {
    /// The document has no `nodes` array, or the array is empty.
    #[error("document contains no nodes")]
    EmptyGraph,
    /// The document exceeds [`crate::compiler::MAX_GRAPH_NODES`].
    #[error("document contains {0} nodes (limit is {limit})", limit = crate::compiler::MAX_GRAPH_NODES)]
    TooManyNodes(usize),
    /// A node entry carries no `id` field.
    #[error("a node is missing its id")]
    NodeMissingId,
    /// A node entry carries no `type` field.
    #[error("node {0} is missing its type")]
    NodeMissingType(i64),
    /// Two node entries share the same id.
    #[error("duplicate node id {0}")]
    DuplicateNodeId(i64),
}

/// The single error type returned by [`crate::compile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid graph shape: {0}")]
    GraphShape(#[from] GraphShapeError),

    /// A node names a type that is not in the registry. Raised even for nodes
    /// that are never linked to anything.
    #[error("unknown node type '{type_name}' at node {node_id}")]
    UnknownNodeType { node_id: i64, type_name: String },

    /// No `output/color` node exists to terminate the graph.
    #[error("graph has no output color node")]
    MissingOutputNode,

    /// A node reachable from an output sink was revisited while still on the
    /// active compile stack. Cycles in unreachable subgraphs are never
    /// visited, so they never trigger this.
    #[error("cycle detected through node {node_id}")]
    CycleDetected { node_id: i64 },
}
