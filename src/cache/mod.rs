//! Content-addressed cache of laid-out flows.
//!
//! One entry is kept per subject (the agent or configuration whose flow is
//! shown). Writing a new entry replaces the previous one whatever its hash:
//! the cache exists to skip regeneration for the *current* input, not to keep
//! history. A lookup only hits when the stored hash equals the hash of the
//! current input. Records that cannot be read or decoded count as misses.

mod hash;
mod store;

pub use hash::compute_hash;
pub use store::{CacheStore, FileStore, MemoryStore};

use crate::error::CacheError;
use crate::flow::Graph;
use crate::layout::LayoutResult;
use bincode::config::{Config, standard};
use bincode::serde::{decode_from_slice, encode_to_vec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Bumped whenever the persisted record layout changes; older records miss.
pub const RECORD_FORMAT_VERSION: u32 = 1;

/// Upper bound on a decoded record, so a corrupt length prefix cannot
/// trigger a huge allocation.
const MAX_RECORD_BYTES: usize = 64 * 1024 * 1024;

fn record_config() -> impl Config {
    standard().with_limit::<MAX_RECORD_BYTES>()
}

/// A cached, fully laid-out flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub subject_id: String,
    pub input_hash: String,
    pub graph: Graph,
    pub layout: LayoutResult,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct RecordRef<'a> {
    format_version: u32,
    subject_id: &'a str,
    input_hash: &'a str,
    graph: &'a Graph,
    layout: &'a LayoutResult,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct Record {
    format_version: u32,
    subject_id: String,
    input_hash: String,
    graph: Graph,
    layout: LayoutResult,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

/// The single-entry-per-subject cache policy over an injected store.
pub struct FlowCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> FlowCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the entry for `subject_id` if it was computed from input
    /// hashing to `input_hash`.
    pub fn get(&self, subject_id: &str, input_hash: &str) -> Option<CacheEntry> {
        let entry = self.load_entry(subject_id)?;
        if entry.input_hash != input_hash {
            debug!(
                subject = subject_id,
                stored = %entry.input_hash,
                requested = input_hash,
                "cache entry is stale"
            );
            return None;
        }
        Some(entry)
    }

    /// Looks up the entry for the current input text of a subject.
    pub fn get_for_input(&self, subject_id: &str, input: &str) -> Option<CacheEntry> {
        self.get(subject_id, &compute_hash(input))
    }

    /// Stores the entry for a subject, replacing whatever was there.
    pub fn put(
        &mut self,
        subject_id: &str,
        input_hash: &str,
        graph: &Graph,
        layout: &LayoutResult,
    ) -> Result<(), CacheError> {
        let record = RecordRef {
            format_version: RECORD_FORMAT_VERSION,
            subject_id,
            input_hash,
            graph,
            layout,
            created_at: Utc::now(),
        };
        let bytes =
            encode_to_vec(&record, record_config()).map_err(|e| CacheError::Encode(e.to_string()))?;
        self.store.save(subject_id, &bytes)?;
        debug!(
            subject = subject_id,
            hash = input_hash,
            bytes = bytes.len(),
            "cache entry written"
        );
        Ok(())
    }

    /// Drops the entry of a subject, if any.
    pub fn invalidate(&mut self, subject_id: &str) -> Result<(), CacheError> {
        self.store.remove(subject_id)?;
        Ok(())
    }

    fn load_entry(&self, subject_id: &str) -> Option<CacheEntry> {
        let bytes = match self.store.load(subject_id) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(subject = subject_id, error = %e, "cache read failed; treating as miss");
                return None;
            }
        };

        let record: Record = match decode_from_slice(&bytes, record_config()) {
            Ok((record, _)) => record,
            Err(e) => {
                warn!(subject = subject_id, error = %e, "cache record is corrupt; treating as miss");
                return None;
            }
        };

        if record.format_version != RECORD_FORMAT_VERSION {
            debug!(
                subject = subject_id,
                version = record.format_version,
                "cache record has an outdated format"
            );
            return None;
        }
        if record.subject_id != subject_id {
            warn!(
                subject = subject_id,
                stored_subject = %record.subject_id,
                "cache record belongs to another subject; treating as miss"
            );
            return None;
        }

        Some(CacheEntry {
            subject_id: record.subject_id,
            input_hash: record.input_hash,
            graph: record.graph,
            layout: record.layout,
            created_at: record.created_at,
        })
    }
}
