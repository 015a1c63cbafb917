//! Scripted transport shared by the executor and aggregator tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use crate::{Error, Payload, ResultEnvelope, SearchParams, Transport};

#[derive(Debug, Clone)]
pub enum Reply {
    /// Envelope with `n` results.
    Results(usize),
    /// Envelope whose canonical fields are all empty.
    Empty,
    /// Envelope with no `results` field but other content.
    NoResultsField,
    Envelope(Value),
    Text(&'static str),
    Fail(&'static str),
    /// Never resolves.
    Hang,
}

pub struct ScriptedTransport {
    replies: HashMap<(String, u32), Reply>,
    fallback: Reply,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self { replies: HashMap::new(), fallback: Reply::Empty, calls: Mutex::new(Vec::new()) }
    }

    pub fn reply(mut self, endpoint: &str, page: u32, reply: Reply) -> Self {
        self.replies.insert((endpoint.to_string(), page), reply);
        self
    }

    pub fn fallback(mut self, reply: Reply) -> Self {
        self.fallback = reply;
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn page_of(count: usize, page: u32) -> Value {
    let results: Vec<Value> = (0..count)
        .map(|i| json!({"title": format!("p{page}-r{i}"), "url": format!("https://example.com/{page}/{i}")}))
        .collect();
    json!({"query": "rust", "results": results, "number_of_results": 1000, "suggestions": []})
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, endpoint: &str, page: u32, _params: &SearchParams) -> Result<Payload, Error> {
        self.calls.lock().unwrap().push((endpoint.to_string(), page));
        let reply = self
            .replies
            .get(&(endpoint.to_string(), page))
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());

        let value = match reply {
            Reply::Results(n) => page_of(n, page),
            Reply::Empty => json!({
                "results": [], "answers": [], "corrections": [], "infoboxes": [], "suggestions": []
            }),
            Reply::NoResultsField => json!({"answers": ["42"]}),
            Reply::Envelope(value) => value,
            Reply::Text(text) => return Ok(Payload::Text(text.to_string())),
            Reply::Fail(msg) => return Err(Error::Transport(msg.to_string())),
            Reply::Hang => std::future::pending().await,
        };

        let envelope: ResultEnvelope = serde_json::from_value(value).unwrap();
        Ok(Payload::Envelope(envelope))
    }
}
