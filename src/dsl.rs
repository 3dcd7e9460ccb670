//! Wire-format document model.
//!
//! A [`GraphDocument`] is the serialized node+link description produced by
//! node-graph editors, preset libraries and template builders. The shape is
//! deliberately loose: node ids and types are optional at this layer, node
//! properties are raw JSON values, and links are raw JSON tuples
//! `[linkId, originNodeId, originSlot, targetNodeId, targetSlot, reserved]`.
//! Normalization into the strict in-memory form happens in
//! [`crate::compiler`].

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The compiler's sole input: a list of node descriptors plus raw link tuples.
/// Immutable during compilation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// One node as exported by an editor. `properties` hold literal values for the
/// node's own unconnected inputs; `inputs[slot].link` carries the id of the
/// link driving that slot, if any.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NodeDescriptor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
    #[serde(rename = "inputs", default)]
    pub input_slots: Vec<InputSlotRef>,
    #[serde(rename = "outputs", default)]
    pub output_slots: Vec<OutputSlotRef>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputSlotRef {
    #[serde(default)]
    pub link: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputSlotRef {
    #[serde(default)]
    pub links: Vec<i64>,
}

impl NodeDescriptor {
    pub fn new(id: i64, type_name: &str) -> Self {
        Self {
            id: Some(id),
            type_name: Some(type_name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Build one wire-format link tuple. The trailing `reserved` field is kept so
/// documents round-trip against editors that store a port type there.
pub fn link_entry(
    link_id: i64,
    origin_node: i64,
    origin_slot: i64,
    target_node: i64,
    target_slot: i64,
) -> Value {
    serde_json::json!([link_id, origin_node, origin_slot, target_node, target_slot, 0])
}

pub fn document_from_str(json: &str) -> serde_json::Result<GraphDocument> {
    serde_json::from_str(json)
}

pub fn document_from_path(path: &Path) -> std::io::Result<GraphDocument> {
    let text = std::fs::read_to_string(path)?;
    document_from_str(&text).map_err(std::io::Error::other)
}

/// Parse a JSON value as an f32, accepting any numeric representation.
pub fn number_f32(v: &Value) -> Option<f32> {
    v.as_f64()
        .map(|x| x as f32)
        .or_else(|| v.as_i64().map(|x| x as f32))
        .or_else(|| v.as_u64().map(|x| x as f32))
}

pub fn parse_f32(props: &HashMap<String, Value>, key: &str) -> Option<f32> {
    props.get(key).and_then(number_f32)
}

pub fn parse_i64(props: &HashMap<String, Value>, key: &str) -> Option<i64> {
    props.get(key)?.as_i64()
}

pub fn parse_bool(props: &HashMap<String, Value>, key: &str) -> Option<bool> {
    props.get(key)?.as_bool()
}

/// Parse a fixed-length float array property, padding missing components with
/// the matching entry of `defaults`.
pub fn parse_f32_array<const N: usize>(
    props: &HashMap<String, Value>,
    key: &str,
    defaults: [f32; N],
) -> Option<[f32; N]> {
    let arr = props.get(key)?.as_array()?;
    let mut out = defaults;
    for (i, slot) in out.iter_mut().enumerate() {
        if let Some(v) = arr.get(i).and_then(number_f32) {
            *slot = v;
        }
    }
    Some(out)
}
