//! Serde model of the decision-tree description produced by the external
//! text-generation service.
//!
//! The shapes here are deliberately loose: ids may arrive as numbers, fields
//! may use camelCase or shorthand names, and the whole document may be wrapped
//! in a Markdown code fence. Nothing here is validated; that is the job of
//! [`normalize`](super::normalize::normalize).

use crate::error::FlowError;
use serde::{Deserialize, Deserializer, Serialize};

/// A node as emitted by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type", alias = "nodeType", alias = "kind", default)]
    pub node_type: String,
    #[serde(default, alias = "text", deserialize_with = "optional_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub outcome: Option<String>,
}

/// An edge as emitted by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    #[serde(alias = "sourceId", alias = "from", deserialize_with = "string_or_number")]
    pub source: String,
    #[serde(alias = "targetId", alias = "to", deserialize_with = "string_or_number")]
    pub target: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub label: Option<String>,
}

/// The complete extraction output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFlow {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

impl RawFlow {
    /// Parses a strict JSON document.
    pub fn from_json(text: &str) -> Result<Self, FlowError> {
        serde_json::from_str(text).map_err(|e| FlowError::Parse(e.to_string()))
    }

    /// Parses text returned by a language model, which often wraps the JSON
    /// in a code fence or surrounds it with prose.
    pub fn from_model_output(text: &str) -> Result<Self, FlowError> {
        let start = text.find('{');
        let end = text.rfind('}');
        match (start, end) {
            (Some(start), Some(end)) if start < end => Self::from_json(&text[start..=end]),
            _ => Err(FlowError::Parse(
                "no JSON object found in model output".to_string(),
            )),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {}",
            other
        ))),
    }
}

/// Accepts strings, numbers and booleans; `null` and anything else become `None`.
fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
