use serde_json::Value;
use shadegraph::dsl::{GraphDocument, NodeDescriptor, link_entry};
use shadegraph::{PassConfig, UniformValue, compile, registry};

fn doc(nodes: Vec<NodeDescriptor>, links: Vec<Value>) -> GraphDocument {
    GraphDocument { nodes, links }
}

#[test]
fn color_and_alpha_leaves_become_uniforms_in_the_base_pass() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_COLOR)
                .with_property("value", serde_json::json!([1.0, 0.5, 0.2])),
            NodeDescriptor::new(2, registry::INPUT_SCALAR).with_property("value", 0.65),
            NodeDescriptor::new(3, registry::OUTPUT_COLOR),
        ],
        vec![link_entry(1, 1, 0, 3, 0), link_entry(2, 2, 0, 3, 1)],
    ))
    .unwrap();

    assert!(bundle.vertex_source.contains("gl_Position"));
    assert!(bundle.base_fragment_source.contains("out_color ="));
    assert!(bundle.base_fragment_source.contains("uniform GraphParams"));
    assert!(bundle.base_fragment_source.contains("vec3 u_node1_vec3;"));
    assert!(bundle.base_fragment_source.contains("float u_node2_float;"));

    assert_eq!(bundle.dynamic_uniforms.len(), 2);
    assert_eq!(bundle.dynamic_uniforms[0].uniform_name, "u_node1_vec3");
    assert_eq!(
        bundle.dynamic_uniforms[0].initial_value,
        UniformValue::Vec3([1.0, 0.5, 0.2])
    );
    assert_eq!(bundle.dynamic_uniforms[1].uniform_name, "u_node2_float");
    assert_eq!(
        bundle.dynamic_uniforms[1].initial_value,
        UniformValue::Scalar(0.65)
    );

    // No post-effect sink: the composite pass runs its defaults.
    assert_eq!(bundle.pass_config, PassConfig::default());
    assert!(bundle.composite_fragment_source.contains("float fx_bloom = clamp(0.35, 0.0, 2.5);"));
}

#[test]
fn documents_compile_straight_from_json_text() -> anyhow::Result<()> {
    let doc = shadegraph::document_from_str(
        r#"{
            "nodes": [
                {"id": 1, "type": "input/time"},
                {"id": 2, "type": "math/fract", "inputs": [{"link": 1}]},
                {"id": 3, "type": "output/color", "inputs": [{"link": 2}]}
            ],
            "links": [
                [1, 1, 0, 2, 0, 0],
                [2, 2, 0, 3, 0, 0]
            ]
        }"#,
    )?;
    let bundle = compile(&doc)?;
    assert!(bundle.base_fragment_source.contains("vec3(fract(u_time))"));
    Ok(())
}

#[test]
fn scalar_operands_widen_to_the_vector_side_of_a_binary_op() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_SCALAR).with_property("value", 0.2),
            NodeDescriptor::new(2, registry::INPUT_COLOR),
            NodeDescriptor::new(3, registry::MATH_ADD),
            NodeDescriptor::new(4, registry::OUTPUT_COLOR),
        ],
        vec![
            link_entry(1, 1, 0, 3, 0),
            link_entry(2, 2, 0, 3, 1),
            link_entry(3, 3, 0, 4, 0),
        ],
    ))
    .unwrap();

    assert!(
        bundle
            .base_fragment_source
            .contains("(vec3(u_node1_float) + u_node2_vec3)")
    );
}

#[test]
fn dangling_links_are_tolerated_and_slots_fall_back_to_defaults() {
    let bundle = compile(&doc(
        vec![NodeDescriptor::new(1, registry::OUTPUT_COLOR)],
        vec![
            link_entry(5, 99, 0, 1, 0),
            serde_json::json!([6, 1]),
            serde_json::json!(null),
        ],
    ))
    .unwrap();

    // The unconnected sink wraps its declared white/opaque defaults.
    assert!(bundle.base_fragment_source.contains("vec3(1.0, 1.0, 1.0)"));
    assert!(bundle.dynamic_uniforms.is_empty());
}

#[test]
fn builtin_leaves_reference_runtime_uniforms_not_graph_params() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_TIME),
            NodeDescriptor::new(2, registry::MATH_SINE),
            NodeDescriptor::new(3, registry::OUTPUT_COLOR),
        ],
        vec![link_entry(1, 1, 0, 2, 0), link_entry(2, 2, 0, 3, 0)],
    ))
    .unwrap();

    assert!(bundle.base_fragment_source.contains("sin(u_time)"));
    assert!(bundle.dynamic_uniforms.is_empty());
    // With no literal leaves the GraphParams block is omitted entirely.
    assert!(!bundle.base_fragment_source.contains("GraphParams"));
}

#[test]
fn shared_subexpressions_register_one_uniform_per_node() {
    // One scalar leaf fans out to both the color (via gradient) and alpha.
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_SCALAR).with_property("value", 0.4),
            NodeDescriptor::new(2, registry::COLOR_GRADIENT),
            NodeDescriptor::new(3, registry::OUTPUT_COLOR),
        ],
        vec![
            link_entry(1, 1, 0, 2, 0),
            link_entry(2, 2, 0, 3, 0),
            link_entry(3, 1, 0, 3, 1),
        ],
    ))
    .unwrap();

    assert_eq!(bundle.dynamic_uniforms.len(), 1);
    assert_eq!(bundle.dynamic_uniforms[0].uniform_name, "u_node1_float");
    assert_eq!(bundle.dynamic_uniforms[0].node_id, 1);
}

#[test]
fn uniform_listing_is_sorted_by_node_id() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(9, registry::INPUT_SCALAR).with_property("value", 0.1),
            NodeDescriptor::new(2, registry::INPUT_COLOR),
            NodeDescriptor::new(5, registry::COLOR_GRADIENT),
            NodeDescriptor::new(6, registry::OUTPUT_COLOR),
        ],
        vec![
            link_entry(1, 9, 0, 5, 0),
            link_entry(2, 2, 0, 5, 2),
            link_entry(3, 5, 0, 6, 0),
        ],
    ))
    .unwrap();

    let names: Vec<&str> = bundle
        .dynamic_uniforms
        .iter()
        .map(|u| u.uniform_name.as_str())
        .collect();
    assert_eq!(names, vec!["u_node2_vec3", "u_node9_float"]);
}

#[test]
fn texture_samples_declare_their_slot_in_both_passes() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_COORD),
            NodeDescriptor::new(2, registry::TEXTURE_SAMPLE).with_property("slot", 1),
            NodeDescriptor::new(3, registry::OUTPUT_COLOR),
        ],
        vec![link_entry(1, 1, 0, 2, 0), link_entry(2, 2, 0, 3, 0)],
    ))
    .unwrap();

    assert!(bundle.base_fragment_source.contains("texture(u_texture1, "));
    // Composite re-declares the slot at its own binding so live expressions
    // stay valid there.
    assert!(
        bundle
            .composite_fragment_source
            .contains("layout(set = 0, binding = 6) uniform sampler2D u_texture1;")
    );
    assert!(!bundle.composite_fragment_source.contains("u_texture0"));
}

#[test]
fn postfx_sink_resolves_static_config_one_hop_deep() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(1, registry::INPUT_COLOR),
            NodeDescriptor::new(2, registry::OUTPUT_COLOR),
            NodeDescriptor::new(3, registry::INPUT_SCALAR).with_property("value", 0.9),
            NodeDescriptor::new(4, registry::POSTFX_CONTROL).with_property("amount", 1.2),
            NodeDescriptor::new(5, registry::INPUT_TIME),
            NodeDescriptor::new(6, registry::MATH_SINE),
            NodeDescriptor::new(7, registry::OUTPUT_POSTFX).with_property("threshold", 0.8),
        ],
        vec![
            link_entry(1, 1, 0, 2, 0),
            link_entry(2, 3, 0, 7, 0), // bloom: literal leaf, resolved statically
            link_entry(3, 4, 0, 7, 3), // vignette: un-driven control's amount
            link_entry(4, 5, 0, 6, 0),
            link_entry(5, 6, 0, 7, 4), // chromatic: deeper expression, static falls back
        ],
    ))
    .unwrap();

    assert_eq!(bundle.pass_config.bloom_amount, 0.9);
    assert_eq!(bundle.pass_config.vignette_amount, 1.2);
    // The live expression still reflects the graph even when the static side
    // could not.
    assert_eq!(bundle.pass_config.chromatic_amount, 0.0);
    assert!(
        bundle
            .composite_fragment_source
            .contains("float fx_chromatic = clamp(sin(u_time), 0.0, 2.5);")
    );
    assert_eq!(bundle.pass_config.bloom_threshold, 0.8);
    assert!(!bundle.pass_config.strict_mode);
}

#[test]
fn lowest_id_sink_wins_when_several_are_present() {
    let bundle = compile(&doc(
        vec![
            NodeDescriptor::new(4, registry::OUTPUT_COLOR),
            NodeDescriptor::new(2, registry::OUTPUT_COLOR),
            NodeDescriptor::new(1, registry::INPUT_SCALAR).with_property("value", 0.3),
            NodeDescriptor::new(3, registry::INPUT_COLOR),
        ],
        vec![
            link_entry(1, 1, 0, 2, 1), // alpha into sink 2
            link_entry(2, 3, 0, 4, 0), // color into sink 4, which loses
        ],
    ))
    .unwrap();

    // Sink 2's alpha uniform is present; sink 4's color leaf was never walked.
    let names: Vec<&str> = bundle
        .dynamic_uniforms
        .iter()
        .map(|u| u.uniform_name.as_str())
        .collect();
    assert_eq!(names, vec!["u_node1_float"]);
}
