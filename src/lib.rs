//! # callflow - Call-Flow Diagram Engine
//!
//! **callflow** turns the decision tree of a voice agent, as described by an
//! external text-generation service, into a diagram a renderer can draw
//! without further work: a validated graph, positioned node boxes, and edge
//! anchors styled by what the transition means.
//!
//! ## Core Workflow
//!
//! 1.  **Parse**: Read the extractor's output into a `RawFlow` (`from_json` or
//!     `from_model_output`, which also accepts fenced Markdown).
//! 2.  **Normalize**: `RawFlow::into_graph` validates the description and
//!     resolves type aliases into a closed `NodeKind`, producing a `Graph`.
//! 3.  **Classify**: `Graph::classify_edges` tags every edge as positive,
//!     negative or neutral from its label.
//! 4.  **Lay out**: `LayoutEngine::layout` ranks, orders and positions the
//!     nodes top to bottom and computes edge anchors.
//! 5.  **Cache**: `FlowCache` stores the result under the subject id and the
//!     hash of the input text, so an unchanged configuration is never
//!     regenerated. `FlowGenerator` runs all of the above in one call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use callflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = std::fs::read_to_string("flow.json")?;
//!
//!     let mut generator = FlowGenerator::builder(JsonExtractor, FileStore::open(".flow-cache")?)
//!         .with_layout_engine(LayoutEngine::builder().with_vertical_spacing(60.0).build())
//!         .build();
//!
//!     let diagram = generator.generate("agent-42", &text, GenerateOptions::default())?;
//!     for node in diagram.graph.nodes() {
//!         if let Some(b) = diagram.layout.node_box(&node.id) {
//!             println!("{:<12} rank {} at ({:.0}, {:.0})", node.id, b.rank, b.x, b.y);
//!         }
//!     }
//!     for diagnostic in &diagram.diagnostics {
//!         println!("warning: {}", diagnostic);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod error;
pub mod flow;
pub mod layout;
pub mod pipeline;
pub mod prelude;
