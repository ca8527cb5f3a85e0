use crate::classify::{Category, Stroke};
use crate::flow::Diagnostic;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Placement of a node. `x`/`y` are the top-left corner of the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: usize,
}

impl NodeBox {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn top_center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y,
        }
    }

    pub fn bottom_center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height,
        }
    }

    /// True when the two boxes share interior area. Touching edges do not count.
    pub fn overlaps(&self, other: &NodeBox) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Routing metadata for one edge. Path geometry is left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRoute {
    pub source_anchor: Point,
    pub target_anchor: Point,
    /// Where to draw the label; `None` for unlabeled edges.
    pub label_position: Option<Point>,
    pub category: Category,
    pub stroke: Stroke,
    /// The edge closes a cycle and was ignored when ranking.
    pub back_edge: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// The positions and routing data computed for a graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    pub node_boxes: AHashMap<String, NodeBox>,
    pub edge_routes: AHashMap<String, EdgeRoute>,
    pub rank_count: usize,
    /// Edge ids excluded from ranking because they close a cycle, in input order.
    pub back_edges: Vec<String>,
    /// Horizontal gap used between neighbouring nodes of a rank.
    pub horizontal_spacing: f64,
    pub bounds: Bounds,
}

impl LayoutResult {
    pub fn node_box(&self, node_id: &str) -> Option<&NodeBox> {
        self.node_boxes.get(node_id)
    }

    pub fn rank_of(&self, node_id: &str) -> Option<usize> {
        self.node_boxes.get(node_id).map(|b| b.rank)
    }

    pub fn edge_route(&self, edge_id: &str) -> Option<&EdgeRoute> {
        self.edge_routes.get(edge_id)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.back_edges
            .iter()
            .map(|edge_id| Diagnostic::CycleBroken {
                edge_id: edge_id.clone(),
            })
            .collect()
    }
}
