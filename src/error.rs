use thiserror::Error;

/// Errors raised while normalizing a raw flow description into a `Graph`.
///
/// These are fatal to the current generation attempt and carry the offending
/// ids so the caller can build a user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Flow has no start node")]
    MissingStart,

    #[error("Flow has more than one start node: {}", node_ids.join(", "))]
    MultipleStartNodes { node_ids: Vec<String> },

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNodeId(String),

    #[error("Node at position {index} has an empty id")]
    EmptyNodeId { index: usize },

    #[error("Node '{node_id}' has an unknown type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error(
        "Edge from '{source_id}' to '{target_id}' references node '{missing_node_id}', which does not exist"
    )]
    UnknownEdgeEndpoint {
        source_id: String,
        target_id: String,
        missing_node_id: String,
    },
}

/// Errors reported by a `CacheStore` implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed for subject '{subject_id}': {source}")]
    Io {
        subject_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur when persisting a cache entry.
///
/// Reads never fail: anything unreadable is a cache miss.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to encode cache record: {0}")]
    Encode(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by the external text-generation collaborator.
#[derive(Error, Debug, Clone)]
pub enum ExtractError {
    #[error("Flow extraction failed: {0}")]
    Failed(String),
}

/// Errors that abort a flow generation.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Failed to parse flow description: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),
}
