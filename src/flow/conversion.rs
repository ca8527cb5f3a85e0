use super::definition::Graph;
use super::normalize::normalize_titled;
use super::raw::RawFlow;
use crate::error::ValidationError;

/// A trait for flow descriptions that can be converted into a canonical `Graph`.
///
/// `RawFlow` implements it for the extractor's JSON shape. Other input formats
/// plug in by mapping themselves onto `RawFlow` (or building nodes directly)
/// inside their own implementation.
///
/// # Example
///
/// ```rust,no_run
/// use callflow::prelude::*;
///
/// struct Script { steps: Vec<String> }
///
/// impl IntoGraph for Script {
///     fn into_graph(self) -> std::result::Result<Graph, ValidationError> {
///         let mut nodes = vec![RawNode { id: "start".into(), node_type: "start".into(), ..Default::default() }];
///         let mut edges = Vec::new();
///         let mut previous = "start".to_string();
///         for (i, step) in self.steps.into_iter().enumerate() {
///             let id = format!("step-{}", i);
///             nodes.push(RawNode { id: id.clone(), node_type: "message".into(), label: Some(step), ..Default::default() });
///             edges.push(RawEdge { source: previous, target: id.clone(), label: None });
///             previous = id;
///         }
///         nodes.push(RawNode { id: "end".into(), node_type: "end".into(), ..Default::default() });
///         edges.push(RawEdge { source: previous, target: "end".into(), label: None });
///         RawFlow { title: "Script".into(), nodes, edges }.into_graph()
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the description and converts it into a validated graph.
    fn into_graph(self) -> Result<Graph, ValidationError>;
}

impl IntoGraph for RawFlow {
    fn into_graph(self) -> Result<Graph, ValidationError> {
        normalize_titled(self.title, self.nodes, self.edges)
    }
}
