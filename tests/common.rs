//! Common test utilities for building flow descriptions.
use callflow::prelude::*;

/// The homeowner qualification call as the extractor would return it.
///
/// Flow: `start -> homeowner ?[Yes] book -> booked`, `homeowner ?[No] declined`
#[allow(dead_code)]
pub const HOMEOWNER_JSON: &str = r#"{
    "title": "Homeowner qualification",
    "nodes": [
        { "id": "start", "type": "start", "label": "Call begins" },
        { "id": "homeowner", "type": "question", "label": "Homeowner?", "question": "Are you the owner of the property?" },
        { "id": "book", "type": "action", "label": "Book", "description": "Book a site visit" },
        { "id": "booked", "type": "end", "label": "Appointment booked", "outcome": "success" },
        { "id": "declined", "type": "end", "label": "Not a homeowner", "outcome": "failure" }
    ],
    "edges": [
        { "source": "start", "target": "homeowner" },
        { "source": "homeowner", "target": "book", "label": "Yes" },
        { "source": "book", "target": "booked" },
        { "source": "homeowner", "target": "declined", "label": "No" }
    ]
}"#;

#[allow(dead_code)]
pub fn raw_node(id: &str, node_type: &str, label: &str) -> RawNode {
    RawNode {
        id: id.to_string(),
        node_type: node_type.to_string(),
        label: Some(label.to_string()),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn raw_end(id: &str, outcome: &str) -> RawNode {
    RawNode {
        outcome: Some(outcome.to_string()),
        ..raw_node(id, "end", "Call ends")
    }
}

#[allow(dead_code)]
pub fn raw_edge(source: &str, target: &str, label: Option<&str>) -> RawEdge {
    RawEdge {
        source: source.to_string(),
        target: target.to_string(),
        label: label.map(str::to_string),
    }
}

#[allow(dead_code)]
pub fn homeowner_flow() -> RawFlow {
    RawFlow::from_json(HOMEOWNER_JSON).expect("homeowner fixture must parse")
}

/// A flow whose retry loop points back at the question.
///
/// Flow: `start -> ask ?[Yes] done`, `ask ?[No] retry -> ask`
#[allow(dead_code)]
pub fn retry_loop_flow() -> RawFlow {
    RawFlow {
        title: "Retry loop".to_string(),
        nodes: vec![
            raw_node("start", "start", "Call begins"),
            raw_node("ask", "decision", "Ready to continue?"),
            raw_node("retry", "message", "Let me explain again"),
            raw_end("done", "success"),
        ],
        edges: vec![
            raw_edge("start", "ask", None),
            raw_edge("ask", "done", Some("Yes")),
            raw_edge("ask", "retry", Some("No")),
            raw_edge("retry", "ask", None),
        ],
    }
}

/// A straight chain `start -> n1 -> ... -> n{len} -> end`.
#[allow(dead_code)]
pub fn chain_flow(len: usize) -> RawFlow {
    let mut nodes = vec![raw_node("start", "start", "Call begins")];
    let mut edges = Vec::new();
    let mut previous = "start".to_string();
    for i in 1..=len {
        let id = format!("n{}", i);
        nodes.push(raw_node(&id, "message", "Step"));
        edges.push(raw_edge(&previous, &id, None));
        previous = id;
    }
    nodes.push(raw_end("end", "neutral"));
    edges.push(raw_edge(&previous, "end", None));
    RawFlow {
        title: format!("Chain of {}", len),
        nodes,
        edges,
    }
}

/// Normalizes and classifies a fixture that is known to be valid.
#[allow(dead_code)]
pub fn graph_of(flow: RawFlow) -> Graph {
    flow.into_graph()
        .expect("fixture flow must be valid")
        .classify_edges()
}

/// A store whose writes always fail, to simulate a full or offline backend.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
}

impl CacheStore for FailingStore {
    fn load(&self, subject_id: &str) -> std::result::Result<Option<Vec<u8>>, StoreError> {
        self.inner.load(subject_id)
    }

    fn save(&mut self, _subject_id: &str, _bytes: &[u8]) -> std::result::Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&mut self, subject_id: &str) -> std::result::Result<(), StoreError> {
        self.inner.remove(subject_id)
    }
}
