use crate::flow::{Graph, NodeKind};
use ahash::AHashMap;

/// Index-based adjacency view of a graph, built once per layout run.
pub(super) struct Topology {
    pub node_count: usize,
    pub start: Option<usize>,
    /// Per node: `(edge index, target node index)` in edge input order.
    pub successors: Vec<Vec<(usize, usize)>>,
    /// Per edge: `(source, target)` node indices, `None` if an endpoint is unknown.
    pub endpoints: Vec<Option<(usize, usize)>>,
}

impl Topology {
    pub fn new(graph: &Graph) -> Self {
        let index: AHashMap<&str, usize> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut successors = vec![Vec::new(); graph.nodes().len()];
        let endpoints = graph
            .edges()
            .iter()
            .enumerate()
            .map(|(edge_idx, edge)| {
                let source = *index.get(edge.source.as_str())?;
                let target = *index.get(edge.target.as_str())?;
                successors[source].push((edge_idx, target));
                Some((source, target))
            })
            .collect();

        Self {
            node_count: graph.nodes().len(),
            start: graph.nodes().iter().position(|n| n.kind == NodeKind::Start),
            successors,
            endpoints,
        }
    }
}

/// Output of the ranking phase.
pub(super) struct Ranking {
    /// Rank per node index.
    pub ranks: Vec<usize>,
    /// Edge indices that close a cycle, ascending.
    pub back_edges: Vec<usize>,
    /// Per edge: whether it took part in the longest-path computation.
    pub ranking_edges: Vec<bool>,
    /// Node indices in depth-first discovery order.
    pub discovery: Vec<usize>,
    pub rank_count: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Assigns every node its longest-path distance from the start node.
///
/// A depth-first search from the start node (then from the remaining roots in
/// input order) marks every edge into a node still on the search stack as a
/// back-edge. Back-edges, edges into the start node and edges from nodes the
/// start node cannot reach into nodes it can reach are left out, so the start
/// node stays at rank 0 and reachable ranks equal their longest path from it.
pub(super) fn assign_ranks(topology: &Topology) -> Ranking {
    let n = topology.node_count;
    let mut state = vec![Visit::New; n];
    let mut back = vec![false; topology.endpoints.len()];
    let mut discovery = Vec::with_capacity(n);
    let mut postorder = Vec::with_capacity(n);

    let mut has_incoming = vec![false; n];
    for (source, target) in topology.endpoints.iter().flatten() {
        if source != target {
            has_incoming[*target] = true;
        }
    }

    let roots = topology
        .start
        .into_iter()
        .chain((0..n).filter(|&i| !has_incoming[i]))
        .chain(0..n);

    let mut reachable_from_start = vec![false; n];
    for (root_number, root) in roots.enumerate() {
        if state[root] != Visit::New {
            continue;
        }
        let from_start = root_number == 0 && topology.start == Some(root);
        depth_first(
            topology,
            root,
            &mut state,
            &mut back,
            &mut discovery,
            &mut postorder,
        );
        if from_start {
            for &node in &discovery {
                reachable_from_start[node] = true;
            }
        }
    }

    let ranking_edges: Vec<bool> = topology
        .endpoints
        .iter()
        .enumerate()
        .map(|(edge_idx, endpoints)| match endpoints {
            Some((source, target)) => {
                !back[edge_idx]
                    && Some(*target) != topology.start
                    && !(reachable_from_start[*target] && !reachable_from_start[*source])
            }
            None => false,
        })
        .collect();

    // Reverse postorder is a topological order once back-edges are removed.
    let mut ranks = vec![0usize; n];
    for &node in postorder.iter().rev() {
        for &(edge_idx, target) in &topology.successors[node] {
            if ranking_edges[edge_idx] && ranks[target] < ranks[node] + 1 {
                ranks[target] = ranks[node] + 1;
            }
        }
    }

    let back_edges = back
        .iter()
        .enumerate()
        .filter_map(|(edge_idx, is_back)| is_back.then_some(edge_idx))
        .collect();
    let rank_count = ranks.iter().max().map_or(0, |max| max + 1);

    Ranking {
        ranks,
        back_edges,
        ranking_edges,
        discovery,
        rank_count,
    }
}

/// Iterative depth-first search, so deep flows cannot overflow the stack.
fn depth_first(
    topology: &Topology,
    root: usize,
    state: &mut [Visit],
    back: &mut [bool],
    discovery: &mut Vec<usize>,
    postorder: &mut Vec<usize>,
) {
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    state[root] = Visit::Active;
    discovery.push(root);

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        match topology.successors[node].get(next) {
            Some(&(edge_idx, target)) => {
                frame.1 += 1;
                match state[target] {
                    Visit::New => {
                        state[target] = Visit::Active;
                        discovery.push(target);
                        stack.push((target, 0));
                    }
                    Visit::Active => back[edge_idx] = true,
                    Visit::Done => {}
                }
            }
            None => {
                stack.pop();
                state[node] = Visit::Done;
                postorder.push(node);
            }
        }
    }
}
