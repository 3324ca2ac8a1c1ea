//! The DOM model: passive records describing a page.
//!
//! These types are value-typed snapshots. `DOMState::clone` is a deep, independent copy —
//! the planner relies on this to run simulations against cloned environments without
//! disturbing the caller's state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single DOM node, addressed by its owning [`DOMState`]'s node map.
///
/// Child references are consulted only through that map; a `children` entry with no
/// matching key is tolerated and treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DOMNode {
    pub node_id: String,
    pub tag: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub interactable: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl DOMNode {
    pub fn new(node_id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            tag: tag.into(),
            text: String::new(),
            attributes: BTreeMap::new(),
            visible: true,
            interactable: false,
            role: None,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A canonical snapshot of a page.
///
/// `nodes` uses a [`BTreeMap`] so that iteration is always lexicographic by `node_id` —
/// the canonical order the action enumerator and the encoder both rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DOMState {
    pub url: String,
    pub nodes: BTreeMap<String, DOMNode>,
    #[serde(default)]
    pub focused_node_id: Option<String>,
    #[serde(default)]
    pub interaction_history: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub step: u32,
}

impl DOMState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            nodes: BTreeMap::new(),
            focused_node_id: None,
            interaction_history: Vec::new(),
            metadata: BTreeMap::new(),
            step: 0,
        }
    }

    /// Metadata lookup with a caller-supplied default, matching the soft-schema reads the
    /// heuristics perform (e.g. `scrollable` defaults to `"true"`).
    pub fn metadata_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.metadata.get(key).map(String::as_str).unwrap_or(default)
    }
}

/// Immutable objective description. Only `success_text` is consulted by heuristics, if at
/// all; everything else is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub objective: String,
    #[serde(default = "default_success_text")]
    pub success_text: String,
}

fn default_success_text() -> String {
    "success".to_string()
}

impl TaskSpec {
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            success_text: default_success_text(),
        }
    }
}

/// Additive reward components. `total` is precomputed at construction time but always
/// equals `progress + risk + efficiency + terminal` — consumers may rely on either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub progress: f64,
    pub risk: f64,
    pub efficiency: f64,
    pub terminal: f64,
    pub total: f64,
}

impl RewardBreakdown {
    pub fn new(progress: f64, risk: f64, efficiency: f64, terminal: f64) -> Self {
        Self {
            progress,
            risk,
            efficiency,
            terminal,
            total: progress + risk + efficiency + terminal,
        }
    }
}
