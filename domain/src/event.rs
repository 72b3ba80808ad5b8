use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Provider-neutral notification that an object landed in a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEvent {
    pub source_bucket: String,
    pub source_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_status: Option<String>,
}

impl ObjectEvent {
    pub fn new(
        source_bucket: impl Into<String>,
        source_key: impl Into<String>,
        event_status: Option<String>,
    ) -> DomainResult<Self> {
        let event = Self {
            source_bucket: source_bucket.into(),
            source_key: source_key.into(),
            event_status,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.source_bucket.trim().is_empty() {
            return Err(DomainError::InvalidEvent(
                "source bucket is empty".to_string(),
            ));
        }
        if self.source_key.is_empty() {
            return Err(DomainError::InvalidEvent("source key is empty".to_string()));
        }
        Ok(())
    }
}

pub const DEFAULT_ACCEPTED_STATUSES: [&str; 2] = ["added", "ObjectCreated:*"];

/// Gate applied before any fetch happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub accepted_statuses: Vec<String>,
    #[serde(default)]
    pub ignored_key_prefixes: Vec<String>,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            accepted_statuses: DEFAULT_ACCEPTED_STATUSES
                .iter()
                .map(ToString::to_string)
                .collect(),
            ignored_key_prefixes: Vec::new(),
        }
    }
}

impl EventFilter {
    /// Events without a status come from bindings that only fire on insert,
    /// so they always pass the status check.
    #[must_use]
    pub fn should_process(&self, event: &ObjectEvent) -> bool {
        if self
            .ignored_key_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && event.source_key.starts_with(prefix.as_str()))
        {
            return false;
        }

        match event.event_status.as_deref() {
            None => true,
            Some(status) => self
                .accepted_statuses
                .iter()
                .any(|pattern| status_matches(pattern, status)),
        }
    }
}

fn status_matches(pattern: &str, status: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => status.starts_with(prefix),
        None => pattern == status,
    }
}
