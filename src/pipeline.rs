//! End-to-end generation of a flow diagram for a subject.
//!
//! extractor → normalizer → classifier → layout → cache
//!
//! Only a fully laid-out result is ever written to the cache, and the write
//! is the last step, so abandoning a generation midway leaves the previous
//! entry untouched. A generator holds `&mut` access to its cache while
//! generating; callers that share one store between several generators must
//! serialize regenerations of the same subject themselves, otherwise the last
//! writer wins.

use crate::cache::{CacheStore, FlowCache, compute_hash};
use crate::error::{ExtractError, FlowError};
use crate::flow::{Diagnostic, Graph, IntoGraph, RawFlow};
use crate::layout::{LayoutEngine, LayoutResult};
use serde::Serialize;
use tracing::{debug, info, warn};

/// The seam to the external text-generation service that turns a free-text
/// agent configuration into a raw decision-tree description.
pub trait FlowExtractor {
    fn extract(&self, config_text: &str) -> Result<RawFlow, ExtractError>;
}

impl<F> FlowExtractor for F
where
    F: Fn(&str) -> Result<RawFlow, ExtractError>,
{
    fn extract(&self, config_text: &str) -> Result<RawFlow, ExtractError> {
        self(config_text)
    }
}

/// An extractor for input that already is a JSON flow description,
/// possibly wrapped in a Markdown code fence.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExtractor;

impl FlowExtractor for JsonExtractor {
    fn extract(&self, config_text: &str) -> Result<RawFlow, ExtractError> {
        RawFlow::from_model_output(config_text).map_err(|e| ExtractError::Failed(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Skip the cache lookup. The fresh result is still written.
    pub force: bool,
}

/// A laid-out flow ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDiagram {
    pub subject_id: String,
    pub input_hash: String,
    pub graph: Graph,
    pub layout: LayoutResult,
    pub diagnostics: Vec<Diagnostic>,
    /// The result came from the cache instead of being generated.
    pub from_cache: bool,
    /// The result is stored in the cache. `false` when the write failed.
    pub persisted: bool,
}

pub struct FlowGenerator<E: FlowExtractor, S: CacheStore> {
    extractor: E,
    cache: FlowCache<S>,
    engine: LayoutEngine,
}

pub struct FlowGeneratorBuilder<E: FlowExtractor, S: CacheStore> {
    extractor: E,
    cache: FlowCache<S>,
    engine: LayoutEngine,
}

impl<E: FlowExtractor, S: CacheStore> FlowGeneratorBuilder<E, S> {
    pub fn new(extractor: E, store: S) -> Self {
        Self {
            extractor,
            cache: FlowCache::new(store),
            engine: LayoutEngine::default(),
        }
    }
    pub fn with_layout_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }
    pub fn build(self) -> FlowGenerator<E, S> {
        FlowGenerator {
            extractor: self.extractor,
            cache: self.cache,
            engine: self.engine,
        }
    }
}

impl<E: FlowExtractor, S: CacheStore> FlowGenerator<E, S> {
    pub fn builder(extractor: E, store: S) -> FlowGeneratorBuilder<E, S> {
        FlowGeneratorBuilder::new(extractor, store)
    }

    pub fn cache(&self) -> &FlowCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut FlowCache<S> {
        &mut self.cache
    }

    /// Produces the diagram for a subject's current configuration text,
    /// reusing the cached one when the text is unchanged.
    pub fn generate(
        &mut self,
        subject_id: &str,
        config_text: &str,
        options: GenerateOptions,
    ) -> Result<FlowDiagram, FlowError> {
        let input_hash = compute_hash(config_text);

        if !options.force {
            if let Some(entry) = self.cache.get(subject_id, &input_hash) {
                debug!(subject = subject_id, hash = %input_hash, "cache hit");
                let diagnostics = collect_diagnostics(&entry.graph, &entry.layout);
                return Ok(FlowDiagram {
                    subject_id: entry.subject_id,
                    input_hash: entry.input_hash,
                    graph: entry.graph,
                    layout: entry.layout,
                    diagnostics,
                    from_cache: true,
                    persisted: true,
                });
            }
        }

        info!(subject = subject_id, hash = %input_hash, force = options.force, "generating flow");
        let raw = self.extractor.extract(config_text)?;
        let graph = raw.into_graph()?.classify_edges();
        let layout = self.engine.layout(&graph);

        let diagnostics = collect_diagnostics(&graph, &layout);
        for diagnostic in &diagnostics {
            warn!(subject = subject_id, "{}", diagnostic);
        }

        let persisted = match self.cache.put(subject_id, &input_hash, &graph, &layout) {
            Ok(()) => true,
            Err(e) => {
                warn!(subject = subject_id, error = %e, "failed to persist flow; returning it uncached");
                false
            }
        };

        Ok(FlowDiagram {
            subject_id: subject_id.to_string(),
            input_hash,
            graph,
            layout,
            diagnostics,
            from_cache: false,
            persisted,
        })
    }
}

fn collect_diagnostics(graph: &Graph, layout: &LayoutResult) -> Vec<Diagnostic> {
    let mut diagnostics = graph.diagnostics();
    diagnostics.extend(layout.diagnostics());
    diagnostics
}
