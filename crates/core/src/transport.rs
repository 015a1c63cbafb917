//! Transport capability used by the failover executors.

use crate::{Error, ResultEnvelope, SearchParams};

/// Outcome of one successful transport call.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON object body.
    Envelope(ResultEnvelope),
    /// Plain text, or JSON that is not an object. Never usable as a result.
    Text(String),
}

impl Payload {
    pub fn as_envelope(&self) -> Option<&ResultEnvelope> {
        match self {
            Payload::Envelope(envelope) => Some(envelope),
            Payload::Text(_) => None,
        }
    }

    pub fn into_envelope(self) -> Option<ResultEnvelope> {
        match self {
            Payload::Envelope(envelope) => Some(envelope),
            Payload::Text(_) => None,
        }
    }
}

impl From<ResultEnvelope> for Payload {
    fn from(envelope: ResultEnvelope) -> Self {
        Payload::Envelope(envelope)
    }
}

/// Sends one page request to one endpoint.
///
/// Implementations report network failures as `Error::Transport` and their own
/// deadline expiry as `Error::Timeout`. The executors additionally bound every
/// call with their configured timeout.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: &str, page: u32, params: &SearchParams) -> Result<Payload, Error>;
}
