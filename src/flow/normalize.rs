use super::definition::{Edge, Graph, Node, NodeKind, Outcome};
use super::raw::{RawEdge, RawNode};
use crate::classify::Category;
use crate::error::ValidationError;
use ahash::AHashSet;
use tracing::debug;

/// Converts the extractor's raw nodes and edges into a canonical, untitled `Graph`.
pub fn normalize(raw_nodes: Vec<RawNode>, raw_edges: Vec<RawEdge>) -> Result<Graph, ValidationError> {
    normalize_titled(String::new(), raw_nodes, raw_edges)
}

/// Same as [`normalize`] but keeps the flow title.
///
/// Validation happens in a fixed order: node ids and types first, then the
/// start node, then edge endpoints. The first problem found is returned.
pub fn normalize_titled(
    title: String,
    raw_nodes: Vec<RawNode>,
    raw_edges: Vec<RawEdge>,
) -> Result<Graph, ValidationError> {
    let mut seen: AHashSet<String> = AHashSet::with_capacity(raw_nodes.len());
    let mut nodes = Vec::with_capacity(raw_nodes.len());

    for (index, raw) in raw_nodes.into_iter().enumerate() {
        let node = normalize_node(index, raw)?;
        if !seen.insert(node.id.clone()) {
            return Err(ValidationError::DuplicateNodeId(node.id));
        }
        nodes.push(node);
    }

    let start_ids: Vec<String> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Start)
        .map(|n| n.id.clone())
        .collect();
    match start_ids.len() {
        0 => return Err(ValidationError::MissingStart),
        1 => {}
        _ => {
            return Err(ValidationError::MultipleStartNodes {
                node_ids: start_ids,
            });
        }
    }

    let edges = raw_edges
        .into_iter()
        .enumerate()
        .map(|(index, raw)| normalize_edge(index, raw, &seen))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "normalized flow '{}'",
        title
    );
    Ok(Graph::new_unchecked(title, nodes, edges))
}

fn normalize_node(index: usize, raw: RawNode) -> Result<Node, ValidationError> {
    let id = raw.id.trim().to_string();
    if id.is_empty() {
        return Err(ValidationError::EmptyNodeId { index });
    }

    let kind =
        NodeKind::from_type_tag(&raw.node_type).ok_or_else(|| ValidationError::UnknownNodeType {
            node_id: id.clone(),
            type_name: raw.node_type.clone(),
        })?;

    let aux_text = [raw.content, raw.question, raw.condition, raw.description]
        .into_iter()
        .flatten()
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty());

    let outcome = match kind {
        NodeKind::End => Some(
            raw.outcome
                .as_deref()
                .map(Outcome::parse_lenient)
                .unwrap_or_default(),
        ),
        _ => None,
    };

    Ok(Node {
        id,
        kind,
        label: raw.label.map(|l| l.trim().to_string()).unwrap_or_default(),
        aux_text,
        outcome,
    })
}

fn normalize_edge(
    index: usize,
    raw: RawEdge,
    known_ids: &AHashSet<String>,
) -> Result<Edge, ValidationError> {
    let source = raw.source.trim().to_string();
    let target = raw.target.trim().to_string();

    for endpoint in [&source, &target] {
        if !known_ids.contains(endpoint.as_str()) {
            return Err(ValidationError::UnknownEdgeEndpoint {
                source_id: source.clone(),
                target_id: target.clone(),
                missing_node_id: endpoint.clone(),
            });
        }
    }

    let label = raw
        .label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    Ok(Edge {
        id: format!("e{}-{}-{}", index, source, target),
        source,
        target,
        label,
        category: Category::Neutral,
    })
}
