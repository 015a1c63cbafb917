//! Result emptiness validation.
//!
//! Used by the page-level executor to decide whether a response is worth
//! returning or whether failover should move on.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::envelope::{CANONICAL_FIELDS, ResultEnvelope};

/// Caller-supplied predicate; returning `false` marks the envelope invalid.
pub type CustomValidator = Arc<dyn Fn(&ResultEnvelope) -> bool + Send + Sync>;

/// Options controlling [`is_empty`].
#[derive(Clone)]
pub struct ValidationOptions {
    pub custom: Option<CustomValidator>,

    /// Treat a truthy `error` or `empty: true` as empty.
    pub check_error_flag: bool,

    /// Extra fields to inspect. Advisory only: logged, never part of the verdict.
    pub additional_empty_checks: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            custom: None,
            check_error_flag: true,
            additional_empty_checks: ["answers", "corrections", "infoboxes", "suggestions"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl fmt::Debug for ValidationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationOptions")
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .field("check_error_flag", &self.check_error_flag)
            .field("additional_empty_checks", &self.additional_empty_checks)
            .finish()
    }
}

impl ValidationOptions {
    pub fn with_custom<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResultEnvelope) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(f));
        self
    }
}

/// Whether `envelope` carries no usable content.
pub fn is_empty(envelope: Option<&ResultEnvelope>, options: &ValidationOptions) -> bool {
    let Some(envelope) = envelope else {
        tracing::debug!("result is absent");
        return true;
    };

    if let Some(custom) = &options.custom
        && !custom(envelope)
    {
        tracing::debug!("custom validator rejected result");
        return true;
    }

    if options.check_error_flag && envelope.has_error_flag() {
        tracing::debug!("error flag is present");
        return true;
    }

    if envelope.canonical_fields_empty() {
        tracing::debug!("all key fields are empty or missing");
        return true;
    }

    for field in &options.additional_empty_checks {
        if CANONICAL_FIELDS.contains(&field.as_str()) {
            continue;
        }
        if let Some(Value::Array(values)) = envelope.extra.get(field)
            && values.is_empty()
        {
            tracing::debug!(field = %field, "additional field is an empty array");
        }
    }

    false
}
