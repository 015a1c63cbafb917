//! Backend result envelope.
//!
//! No field of a backend response is guaranteed present. Absent collections
//! read as empty slices; every field this crate does not interpret is kept in
//! `extra` and written back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Field names whose emptiness decides whether an envelope carries content.
pub const CANONICAL_FIELDS: [&str; 5] = ["results", "answers", "corrections", "infoboxes", "suggestions"];

/// Structured response of one backend search call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrections: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infoboxes: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Value>>,

    /// Backend error marker; any truthy value counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_results: Option<Number>,

    /// Present only on envelopes produced by the aggregator.
    #[serde(rename = "_aggregation", default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationMeta>,

    /// Every other backend field, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Summary appended to aggregated envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationMeta {
    pub requested: usize,
    pub returned: usize,
    pub pages_fetched: u32,
}

impl ResultEnvelope {
    pub fn results(&self) -> &[Value] {
        self.results.as_deref().unwrap_or_default()
    }

    pub fn answers(&self) -> &[Value] {
        self.answers.as_deref().unwrap_or_default()
    }

    pub fn corrections(&self) -> &[Value] {
        self.corrections.as_deref().unwrap_or_default()
    }

    pub fn infoboxes(&self) -> &[Value] {
        self.infoboxes.as_deref().unwrap_or_default()
    }

    pub fn suggestions(&self) -> &[Value] {
        self.suggestions.as_deref().unwrap_or_default()
    }

    /// Whether the backend flagged this response as an error.
    pub fn has_error_flag(&self) -> bool {
        self.error.as_ref().is_some_and(is_truthy) || self.empty == Some(true)
    }

    /// Whether every canonical collection is absent or zero-length.
    pub fn canonical_fields_empty(&self) -> bool {
        self.results().is_empty()
            && self.answers().is_empty()
            && self.corrections().is_empty()
            && self.infoboxes().is_empty()
            && self.suggestions().is_empty()
    }

    /// Parse a JSON value into an envelope.
    ///
    /// Returns `None` for anything that is not an object, and for objects whose
    /// known fields carry the wrong types.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
