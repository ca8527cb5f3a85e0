//! Layered (Sugiyama-style) layout of a call-flow graph, top to bottom.
//!
//! Phases:
//!   1. Ranking by longest path from the start node, ignoring back-edges
//!   2. Nominal sizing per node kind
//!   3. Horizontal spacing adapted to the number of decisions
//!   4. Crossing reduction (barycenter sweeps)
//!   5. Coordinate assignment
//!   6. Edge anchors, label placement and stroke style

use crate::classify;
use crate::flow::{Graph, NodeKind};
use ahash::AHashMap;
use tracing::{debug, warn};

mod config;
mod order;
mod position;
mod rank;
mod types;

pub use config::{LayoutConfig, NodeSize, NodeSizes};
pub use types::{Bounds, EdgeRoute, LayoutResult, NodeBox, Point};

use order::RankedNeighbours;
use rank::Topology;

/// Computes `LayoutResult`s. Stateless apart from its configuration, so the
/// same graph always produces the same layout.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

pub struct LayoutEngineBuilder {
    config: LayoutConfig,
}

impl LayoutEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_node_sizes(mut self, sizes: NodeSizes) -> Self {
        self.config.node_sizes = sizes;
        self
    }
    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.config.vertical_spacing = spacing;
        self
    }
    pub fn with_horizontal_spacing_bounds(mut self, min: f64, max: f64) -> Self {
        self.config.min_horizontal_spacing = min;
        self.config.max_horizontal_spacing = max;
        self
    }
    pub fn with_ordering_passes(mut self, passes: usize) -> Self {
        self.config.ordering_passes = passes;
        self
    }
    pub fn build(self) -> LayoutEngine {
        LayoutEngine::new(self.config)
    }
}

impl Default for LayoutEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn builder() -> LayoutEngineBuilder {
        LayoutEngineBuilder::new()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self, graph: &Graph) -> LayoutResult {
        let nodes = graph.nodes();
        let edges = graph.edges();
        if nodes.is_empty() {
            return LayoutResult::default();
        }

        let topology = Topology::new(graph);
        let ranking = rank::assign_ranks(&topology);
        let neighbours = RankedNeighbours::new(&topology, &ranking);

        let sizes: Vec<NodeSize> = nodes
            .iter()
            .map(|n| self.config.node_sizes.get(n.kind))
            .collect();
        let decisions = graph.count_of(NodeKind::Decision);
        let gap = self.config.horizontal_spacing(decisions);

        let layers = order::order_ranks(&ranking, &neighbours, self.config.ordering_passes);
        let xs = position::assign_x(&layers, &sizes, &neighbours.parents, gap);
        let rank_pitch = self.config.node_sizes.tallest() + self.config.vertical_spacing;

        let boxes: Vec<NodeBox> = (0..nodes.len())
            .map(|idx| {
                let rank = ranking.ranks[idx];
                let size = sizes[idx];
                let center_y = rank as f64 * rank_pitch;
                NodeBox {
                    x: xs[idx] - size.width / 2.0,
                    y: center_y - size.height / 2.0,
                    width: size.width,
                    height: size.height,
                    rank,
                }
            })
            .collect();
        let bounds = bounds_of(&boxes);

        let mut edge_routes = AHashMap::with_capacity(edges.len());
        for (idx, edge) in edges.iter().enumerate() {
            let Some((source, target)) = topology.endpoints[idx] else {
                continue;
            };
            let source_anchor = boxes[source].bottom_center();
            let target_anchor = boxes[target].top_center();
            let category = classify::classify(edge);
            edge_routes.insert(
                edge.id.clone(),
                EdgeRoute {
                    source_anchor,
                    target_anchor,
                    label_position: edge
                        .label
                        .as_ref()
                        .map(|_| source_anchor.midpoint(target_anchor)),
                    category,
                    stroke: category.stroke(),
                    back_edge: ranking.back_edges.binary_search(&idx).is_ok(),
                },
            );
        }

        let back_edges: Vec<String> = ranking
            .back_edges
            .iter()
            .map(|&idx| edges[idx].id.clone())
            .collect();
        for edge_id in &back_edges {
            warn!(edge = %edge_id, "cycle detected; edge ignored for ranking");
        }
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            ranks = ranking.rank_count,
            gap,
            "laid out flow '{}'",
            graph.title()
        );

        let node_boxes = nodes
            .iter()
            .zip(boxes)
            .map(|(node, node_box)| (node.id.clone(), node_box))
            .collect();

        LayoutResult {
            node_boxes,
            edge_routes,
            rank_count: ranking.rank_count,
            back_edges,
            horizontal_spacing: gap,
            bounds,
        }
    }
}

fn bounds_of(boxes: &[NodeBox]) -> Bounds {
    let Some(first) = boxes.first() else {
        return Bounds::default();
    };
    boxes.iter().skip(1).fold(
        Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x + first.width,
            max_y: first.y + first.height,
        },
        |b, n| Bounds {
            min_x: b.min_x.min(n.x),
            min_y: b.min_y.min(n.y),
            max_x: b.max_x.max(n.x + n.width),
            max_y: b.max_y.max(n.y + n.height),
        },
    )
}

/// Lays out a graph with the default configuration.
pub fn layout(graph: &Graph) -> LayoutResult {
    LayoutEngine::default().layout(graph)
}
