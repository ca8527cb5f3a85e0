use crate::classify::{self, Category};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of node kinds a call flow can contain.
///
/// Raw type tags (including the `question`/`condition` aliases) are resolved
/// into this enum by the normalizer; nothing downstream looks at the raw tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Message,
    Decision,
    Action,
    End,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Start,
        NodeKind::Message,
        NodeKind::Decision,
        NodeKind::Action,
        NodeKind::End,
    ];

    /// Resolves a raw type tag, folding the decision aliases.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "start" => Some(NodeKind::Start),
            "end" => Some(NodeKind::End),
            "message" => Some(NodeKind::Message),
            "action" => Some(NodeKind::Action),
            "decision" | "question" | "condition" => Some(NodeKind::Decision),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Start => "start",
            NodeKind::Message => "message",
            NodeKind::Decision => "decision",
            NodeKind::Action => "action",
            NodeKind::End => "end",
        };
        write!(f, "{}", name)
    }
}

/// How a call ends. Only meaningful on `End` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    #[default]
    Neutral,
}

impl Outcome {
    /// Lenient parse used for model output; unrecognized values are `Neutral`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" | "successful" | "positive" | "qualified" => Outcome::Success,
            "failure" | "failed" | "fail" | "negative" | "rejected" => Outcome::Failure,
            _ => Outcome::Neutral,
        }
    }
}

/// A single step of the call flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Spoken content, question or description shown under the label.
    pub aux_text: Option<String>,
    /// `Some` for `End` nodes, `None` for every other kind.
    pub outcome: Option<Outcome>,
}

/// A directed transition between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    /// Derived from the label by the classifier; `Neutral` until classified.
    #[serde(default)]
    pub category: Category,
}

/// The canonical, validated call-flow graph.
///
/// Built only by the normalizer, so the hard invariants (one start node,
/// unique ids, edges referencing existing nodes) always hold. Nodes and edges
/// keep the order of the input description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    title: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub(crate) fn new_unchecked(title: String, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            title,
            nodes,
            edges,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// The start node. Always present on graphs built by the normalizer.
    pub fn start(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Start)
    }

    pub fn end_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::End)
    }

    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    pub fn count_of(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Returns the same graph with every edge's category derived from its label.
    pub fn classify_edges(mut self) -> Self {
        for edge in &mut self.edges {
            edge.category = classify::classify(edge);
        }
        self
    }
}
