use super::rank::{Ranking, Topology};
use itertools::Itertools;
use tracing::trace;

/// Neighbours of each node along ranking edges, split by direction.
pub(super) struct RankedNeighbours {
    pub parents: Vec<Vec<usize>>,
    pub children: Vec<Vec<usize>>,
}

impl RankedNeighbours {
    pub fn new(topology: &Topology, ranking: &Ranking) -> Self {
        let mut parents = vec![Vec::new(); topology.node_count];
        let mut children = vec![Vec::new(); topology.node_count];
        for (edge_idx, endpoints) in topology.endpoints.iter().enumerate() {
            if let Some((source, target)) = endpoints {
                if ranking.ranking_edges[edge_idx] {
                    parents[*target].push(*source);
                    children[*source].push(*target);
                }
            }
        }
        Self { parents, children }
    }
}

/// Orders the nodes inside each rank to reduce edge crossings.
///
/// Starts from depth-first discovery order and runs alternating down and up
/// barycenter sweeps, keeping the ordering with the fewest crossings seen.
/// Sorting is stable, so nodes with equal barycenters keep their relative
/// order and the result is deterministic.
pub(super) fn order_ranks(
    ranking: &Ranking,
    neighbours: &RankedNeighbours,
    passes: usize,
) -> Vec<Vec<usize>> {
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); ranking.rank_count];
    for &node in &ranking.discovery {
        layers[ranking.ranks[node]].push(node);
    }

    let mut best = layers.clone();
    let mut best_crossings = count_crossings(&layers, &neighbours.children, &ranking.ranks);

    for pass in 0..passes {
        if best_crossings == 0 {
            break;
        }
        for rank in 1..layers.len() {
            sweep(&mut layers, rank, &neighbours.parents);
        }
        for rank in (0..layers.len().saturating_sub(1)).rev() {
            sweep(&mut layers, rank, &neighbours.children);
        }

        let crossings = count_crossings(&layers, &neighbours.children, &ranking.ranks);
        trace!(pass, crossings, "barycenter sweep");
        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.clone();
        }
    }

    best
}

/// Re-sorts one rank by the mean relative position of each node's neighbours.
fn sweep(layers: &mut [Vec<usize>], rank: usize, neighbours: &[Vec<usize>]) {
    let positions = relative_positions(layers);
    let layer = &layers[rank];
    let keys: Vec<(usize, f64)> = layer
        .iter()
        .map(|&node| {
            let own = positions[node];
            let barycenter = if neighbours[node].is_empty() {
                own
            } else {
                neighbours[node].iter().map(|&n| positions[n]).sum::<f64>()
                    / neighbours[node].len() as f64
            };
            (node, barycenter)
        })
        .collect();

    layers[rank] = keys
        .into_iter()
        .sorted_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(node, _)| node)
        .collect();
}

/// Position of every node within its rank, scaled to `0..1` so ranks of
/// different widths are comparable.
fn relative_positions(layers: &[Vec<usize>]) -> Vec<f64> {
    let node_count = layers.iter().map(Vec::len).sum::<usize>();
    let max_index = layers.iter().flatten().copied().max().map_or(0, |m| m + 1);
    let mut positions = vec![0.0; max_index.max(node_count)];
    for layer in layers {
        let len = layer.len() as f64;
        for (i, &node) in layer.iter().enumerate() {
            positions[node] = (i as f64 + 0.5) / len;
        }
    }
    positions
}

/// Counts crossings between edges joining adjacent ranks.
pub(super) fn count_crossings(
    layers: &[Vec<usize>],
    children: &[Vec<usize>],
    ranks: &[usize],
) -> usize {
    let mut slot = vec![0usize; ranks.len()];
    for layer in layers {
        for (i, &node) in layer.iter().enumerate() {
            slot[node] = i;
        }
    }

    layers
        .iter()
        .map(|layer| {
            let segments: Vec<(usize, usize)> = layer
                .iter()
                .flat_map(move |&source| {
                    children[source]
                        .iter()
                        .filter(move |&&target| ranks[target] == ranks[source] + 1)
                        .map(move |&target| (source, target))
                })
                .map(|(source, target)| (slot[source], slot[target]))
                .collect();
            segments
                .iter()
                .tuple_combinations()
                .filter(|((s1, t1), (s2, t2))| (s1 < s2 && t1 > t2) || (s1 > s2 && t1 < t2))
                .count()
        })
        .sum()
}
