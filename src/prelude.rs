//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the callflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use callflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = RawFlow::from_json(&std::fs::read_to_string("path/to/flow.json")?)?;
//! let graph = raw.into_graph()?.classify_edges();
//! let layout = layout(&graph);
//!
//! let mut cache = FlowCache::new(MemoryStore::new());
//! cache.put("agent-1", &compute_hash("source text"), &graph, &layout)?;
//! # Ok(())
//! # }
//! ```

// Model and normalization
pub use crate::flow::{
    Diagnostic, Edge, Graph, IntoGraph, Node, NodeKind, Outcome, RawEdge, RawFlow, RawNode,
    normalize,
};

// Classification
pub use crate::classify::{Category, Stroke, classify, classify_label};

// Layout
pub use crate::layout::{
    Bounds, EdgeRoute, LayoutConfig, LayoutEngine, LayoutResult, NodeBox, NodeSize, NodeSizes,
    Point, layout,
};

// Cache
pub use crate::cache::{CacheEntry, CacheStore, FileStore, FlowCache, MemoryStore, compute_hash};

// Pipeline
pub use crate::pipeline::{
    FlowDiagram, FlowExtractor, FlowGenerator, GenerateOptions, JsonExtractor,
};

// Error types
pub use crate::error::{CacheError, ExtractError, FlowError, StoreError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
