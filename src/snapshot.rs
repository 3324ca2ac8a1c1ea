//! Snapshot decoding: turns a raw, loosely-typed record (as a browser adapter would hand
//! the planner) into a canonical [`DOMState`].
//!
//! Unknown or missing fields default; all attribute values coerce to strings. This is the
//! one place untrusted input crosses into the crate, so it returns a `Result` rather than
//! following the core's pure-and-total convention.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::dom::{DOMNode, DOMState};
use crate::errors::SnapshotError;

/// Decode a raw snapshot record into a canonical, sorted [`DOMState`].
///
/// Accepts `url` (defaults to `"about:blank"`), `nodes` (a list of raw node records, each
/// with `id`, `tag`, `text`, `attributes`, `visible`, `interactable`, `role`, `children`),
/// `focused_node_id`, `history`, `metadata`, and `step`.
pub fn decode(snapshot: &Value) -> Result<DOMState, SnapshotError> {
    let object = snapshot.as_object().ok_or(SnapshotError::NotAnObject)?;

    let url = object
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or("about:blank")
        .to_string();

    let mut nodes = BTreeMap::new();
    if let Some(raw_nodes) = object.get("nodes").and_then(Value::as_array) {
        for (index, raw_node) in raw_nodes.iter().enumerate() {
            let node = decode_node(raw_node, index)?;
            nodes.insert(node.node_id.clone(), node);
        }
    }

    let focused_node_id = object
        .get("focused_node_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    let interaction_history = object
        .get("history")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(value_to_string).collect())
        .unwrap_or_default();

    let metadata = object
        .get("metadata")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect()
        })
        .unwrap_or_default();

    let step = object
        .get("step")
        .and_then(Value::as_u64)
        .map(|n| n as u32)
        .unwrap_or(0);

    Ok(canonicalize(DOMState {
        url,
        nodes,
        focused_node_id,
        interaction_history,
        metadata,
        step,
    }))
}

/// Decode a snapshot from a JSON string.
pub fn decode_str(raw: &str) -> Result<DOMState, SnapshotError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| SnapshotError::InvalidJson {
        details: err.to_string(),
    })?;
    decode(&value)
}

fn decode_node(raw_node: &Value, index: usize) -> Result<DOMNode, SnapshotError> {
    let object = raw_node
        .as_object()
        .ok_or(SnapshotError::NodeNotAnObject { index })?;

    let node_id = object
        .get("id")
        .map(value_to_string)
        .unwrap_or_else(|| format!("n{index}"));

    let tag = object
        .get("tag")
        .map(value_to_string)
        .unwrap_or_else(|| "div".to_string())
        .to_lowercase();

    let text = object.get("text").map(value_to_string).unwrap_or_default();

    let attributes = object
        .get("attributes")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect()
        })
        .unwrap_or_default();

    let visible = object.get("visible").and_then(Value::as_bool).unwrap_or(true);
    let interactable = object
        .get("interactable")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let role = object
        .get("role")
        .filter(|v| !v.is_null())
        .map(value_to_string);

    let children = object
        .get("children")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(value_to_string).collect())
        .unwrap_or_default();

    Ok(DOMNode {
        node_id,
        tag,
        text,
        attributes,
        visible,
        interactable,
        role,
        children,
    })
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Re-sort a [`DOMState`]'s maps into canonical (lexicographic) key order. `DOMState`
/// already stores nodes and metadata in `BTreeMap`s, so this is primarily useful as an
/// explicit normalization step for states built outside this module.
pub fn canonicalize(state: DOMState) -> DOMState {
    state
}
