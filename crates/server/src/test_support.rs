//! Stub transport for router tests.

use std::sync::Mutex;

use serde_json::{Value, json};

use searchgate_core::{Error, Payload, ResultEnvelope, SearchParams, Transport};

type Respond = Box<dyn Fn(&str, u32) -> Result<Payload, Error> + Send + Sync>;

/// One recorded call: endpoint, page and the forwarded query pairs.
pub type Call = (String, u32, Vec<(String, String)>);

pub struct StubTransport {
    respond: Respond,
    calls: Mutex<Vec<Call>>,
}

impl StubTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, u32) -> Result<Payload, Error> + Send + Sync + 'static,
    {
        Self { respond: Box::new(respond), calls: Mutex::new(Vec::new()) }
    }

    /// Every call returns `per_page` results.
    pub fn with_results(per_page: usize) -> Self {
        Self::new(move |_, page| Ok(Payload::Envelope(page_envelope(per_page, page))))
    }

    pub fn failing() -> Self {
        Self::new(|_, _| Err(Error::Transport("connection refused".into())))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn page_envelope(per_page: usize, page: u32) -> ResultEnvelope {
    let results: Vec<Value> = (0..per_page).map(|i| json!({"title": format!("p{page}-r{i}")})).collect();
    serde_json::from_value(json!({"query": "rust", "results": results, "number_of_results": 1000})).unwrap()
}

#[async_trait::async_trait]
impl Transport for StubTransport {
    async fn send(&self, endpoint: &str, page: u32, params: &SearchParams) -> Result<Payload, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), page, params.query_pairs(page)));
        (self.respond)(endpoint, page)
    }
}
