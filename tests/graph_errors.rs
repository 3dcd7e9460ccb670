use serde_json::Value;
use shadegraph::dsl::{GraphDocument, NodeDescriptor, link_entry};
use shadegraph::{CompileError, GraphShapeError, compile, registry};

fn doc(nodes: Vec<NodeDescriptor>, links: Vec<Value>) -> GraphDocument {
    GraphDocument { nodes, links }
}

#[test]
fn empty_and_absent_node_lists_are_rejected() {
    let err = compile(&doc(vec![], vec![])).unwrap_err();
    assert_eq!(err, CompileError::GraphShape(GraphShapeError::EmptyGraph));

    let parsed = shadegraph::document_from_str("{}").unwrap();
    let err = compile(&parsed).unwrap_err();
    assert_eq!(err, CompileError::GraphShape(GraphShapeError::EmptyGraph));
}

#[test]
fn oversized_documents_fail_before_any_link_is_read() {
    let mut nodes: Vec<NodeDescriptor> = (1..=64)
        .map(|i| NodeDescriptor::new(i, registry::INPUT_SCALAR))
        .collect();
    nodes.push(NodeDescriptor::new(65, registry::OUTPUT_COLOR));

    // The garbage link never gets a chance to matter.
    let err = compile(&doc(nodes, vec![serde_json::json!("junk")])).unwrap_err();
    assert_eq!(
        err,
        CompileError::GraphShape(GraphShapeError::TooManyNodes(65))
    );
}

#[test]
fn a_graph_without_a_color_sink_cannot_compile() {
    let err = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_SCALAR),
            NodeDescriptor::new(2, registry::MATH_SINE),
        ],
        vec![link_entry(1, 1, 0, 2, 0)],
    ))
    .unwrap_err();
    assert_eq!(err, CompileError::MissingOutputNode);
}

#[test]
fn unknown_types_are_rejected_even_when_disconnected() {
    let err = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::OUTPUT_COLOR),
            NodeDescriptor::new(2, "sound/oscillator"),
        ],
        vec![],
    ))
    .unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownNodeType {
            node_id: 2,
            type_name: "sound/oscillator".to_string()
        }
    );
}

#[test]
fn duplicate_and_missing_ids_are_shape_errors() {
    let err = compile(&doc(
        vec![
            NodeDescriptor::new(7, registry::INPUT_SCALAR),
            NodeDescriptor::new(7, registry::OUTPUT_COLOR),
        ],
        vec![],
    ))
    .unwrap_err();
    assert_eq!(
        err,
        CompileError::GraphShape(GraphShapeError::DuplicateNodeId(7))
    );

    let mut anonymous = NodeDescriptor::new(1, registry::INPUT_SCALAR);
    anonymous.id = None;
    let err = compile(&doc(vec![anonymous], vec![])).unwrap_err();
    assert_eq!(err, CompileError::GraphShape(GraphShapeError::NodeMissingId));
}

#[test]
fn a_cycle_reachable_from_the_sink_is_detected() {
    let err = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::OUTPUT_COLOR),
            NodeDescriptor::new(2, registry::MATH_ADD),
        ],
        vec![
            link_entry(1, 2, 0, 2, 0), // self loop
            link_entry(2, 2, 0, 1, 0),
        ],
    ))
    .unwrap_err();
    assert_eq!(err, CompileError::CycleDetected { node_id: 2 });
}

#[test]
fn a_two_node_cycle_reports_the_node_that_closed_it() {
    let err = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::OUTPUT_COLOR),
            NodeDescriptor::new(2, registry::MATH_ADD),
            NodeDescriptor::new(3, registry::MATH_MULTIPLY),
        ],
        vec![
            link_entry(1, 2, 0, 3, 0),
            link_entry(2, 3, 0, 2, 0),
            link_entry(3, 2, 0, 1, 0),
        ],
    ))
    .unwrap_err();
    assert_eq!(err, CompileError::CycleDetected { node_id: 2 });
}

#[test]
fn cycles_the_sink_never_reaches_are_ignored() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_COLOR),
            NodeDescriptor::new(2, registry::OUTPUT_COLOR),
            NodeDescriptor::new(3, registry::MATH_ADD),
            NodeDescriptor::new(4, registry::MATH_MULTIPLY),
        ],
        vec![
            link_entry(1, 1, 0, 2, 0),
            link_entry(2, 3, 0, 4, 0), // orphaned loop off to the side
            link_entry(3, 4, 0, 3, 0),
        ],
    ))
    .unwrap();
    assert!(bundle.base_fragment_source.contains("u_node1_vec3"));
}
