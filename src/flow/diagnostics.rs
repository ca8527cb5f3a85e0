use super::definition::{Graph, NodeKind};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A soft invariant violation. Reported to the caller, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The flow has no `End` node.
    MissingEnd,
    /// A decision with fewer than two outgoing branches.
    UnderBranchedDecision { node_id: String, outgoing: usize },
    /// A non-start node nothing points to.
    OrphanNode { node_id: String },
    /// A node that cannot be reached by following edges from the start node.
    UnreachableNode { node_id: String },
    /// An edge closing a cycle; it was left out of ranking.
    CycleBroken { edge_id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingEnd => write!(f, "flow has no end node"),
            Diagnostic::UnderBranchedDecision { node_id, outgoing } => write!(
                f,
                "decision '{}' has {} outgoing edge(s), expected at least 2",
                node_id, outgoing
            ),
            Diagnostic::OrphanNode { node_id } => {
                write!(f, "node '{}' has no incoming edge", node_id)
            }
            Diagnostic::UnreachableNode { node_id } => {
                write!(f, "node '{}' is not reachable from the start node", node_id)
            }
            Diagnostic::CycleBroken { edge_id } => {
                write!(f, "edge '{}' closes a cycle and was ignored for ranking", edge_id)
            }
        }
    }
}

impl Graph {
    /// Checks the soft invariants of the model.
    ///
    /// Cycle detection is done by the layout engine, which reports
    /// [`Diagnostic::CycleBroken`] through its result.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut found = Vec::new();

        if self.count_of(NodeKind::End) == 0 {
            found.push(Diagnostic::MissingEnd);
        }

        for node in self.nodes() {
            if node.kind == NodeKind::Decision {
                let outgoing = self.outgoing(&node.id).count();
                if outgoing < 2 {
                    found.push(Diagnostic::UnderBranchedDecision {
                        node_id: node.id.clone(),
                        outgoing,
                    });
                }
            }
            if node.kind != NodeKind::Start && self.incoming(&node.id).next().is_none() {
                found.push(Diagnostic::OrphanNode {
                    node_id: node.id.clone(),
                });
            }
        }

        let reachable = self.reachable_from_start();
        for node in self.nodes() {
            if !reachable.contains(node.id.as_str()) {
                found.push(Diagnostic::UnreachableNode {
                    node_id: node.id.clone(),
                });
            }
        }

        found
    }

    fn reachable_from_start(&self) -> AHashSet<&str> {
        let mut visited = AHashSet::new();
        let Some(start) = self.start() else {
            return visited;
        };
        let mut stack = vec![start.id.as_str()];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            stack.extend(
                self.outgoing(id)
                    .map(|e| e.target.as_str())
                    .filter(|t| !visited.contains(t)),
            );
        }
        visited
    }
}
