use crate::flow::NodeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

impl NodeSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Nominal box size per node kind. Sizes do not depend on label length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizes {
    pub start: NodeSize,
    pub message: NodeSize,
    pub decision: NodeSize,
    pub action: NodeSize,
    pub end: NodeSize,
}

impl Default for NodeSizes {
    fn default() -> Self {
        Self {
            start: NodeSize::new(160.0, 56.0),
            message: NodeSize::new(280.0, 110.0),
            decision: NodeSize::new(280.0, 120.0),
            action: NodeSize::new(240.0, 90.0),
            end: NodeSize::new(180.0, 64.0),
        }
    }
}

impl NodeSizes {
    pub fn get(&self, kind: NodeKind) -> NodeSize {
        match kind {
            NodeKind::Start => self.start,
            NodeKind::Message => self.message,
            NodeKind::Decision => self.decision,
            NodeKind::Action => self.action,
            NodeKind::End => self.end,
        }
    }

    /// Height of the tallest kind; every rank reserves this much.
    pub fn tallest(&self) -> f64 {
        NodeKind::ALL
            .iter()
            .map(|kind| self.get(*kind).height)
            .fold(0.0, f64::max)
    }
}

/// Tunables of the layered layout.
///
/// Deserializes from partial JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_sizes: NodeSizes,
    /// Gap between the bottom of one rank and the top of the next.
    pub vertical_spacing: f64,
    pub min_horizontal_spacing: f64,
    pub max_horizontal_spacing: f64,
    /// Divided by `decisions + 1` to get the horizontal gap before clamping.
    pub spacing_budget: f64,
    /// Down/up barycenter sweeps used to reduce crossings.
    pub ordering_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_sizes: NodeSizes::default(),
            vertical_spacing: 80.0,
            min_horizontal_spacing: 40.0,
            max_horizontal_spacing: 150.0,
            spacing_budget: 400.0,
            ordering_passes: 8,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(text).map(Self::sanitized)
    }

    /// Horizontal gap for a graph with `decisions` decision nodes: the more
    /// decision points, the tighter the spacing, within the configured bounds.
    pub fn horizontal_spacing(&self, decisions: usize) -> f64 {
        (self.spacing_budget / (decisions as f64 + 1.0))
            .clamp(self.min_horizontal_spacing, self.max_horizontal_spacing)
    }

    /// Repairs values that would break the layout: negative or non-finite
    /// spacings fall back to the defaults and the spacing bounds are ordered.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        self.vertical_spacing = fix(self.vertical_spacing, defaults.vertical_spacing);
        self.min_horizontal_spacing =
            fix(self.min_horizontal_spacing, defaults.min_horizontal_spacing);
        self.max_horizontal_spacing =
            fix(self.max_horizontal_spacing, defaults.max_horizontal_spacing);
        self.spacing_budget = fix(self.spacing_budget, defaults.spacing_budget);
        if self.min_horizontal_spacing > self.max_horizontal_spacing {
            std::mem::swap(
                &mut self.min_horizontal_spacing,
                &mut self.max_horizontal_spacing,
            );
        }
        for kind in NodeKind::ALL {
            let size = self.node_sizes.get(kind);
            let fixed = NodeSize::new(
                fix(size.width, defaults.node_sizes.get(kind).width),
                fix(size.height, defaults.node_sizes.get(kind).height),
            );
            match kind {
                NodeKind::Start => self.node_sizes.start = fixed,
                NodeKind::Message => self.node_sizes.message = fixed,
                NodeKind::Decision => self.node_sizes.decision = fixed,
                NodeKind::Action => self.node_sizes.action = fixed,
                NodeKind::End => self.node_sizes.end = fixed,
            }
        }
        self
    }
}
