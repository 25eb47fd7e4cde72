use crate::correlation::CorrelationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One in-flight command invocation, persisted by the caller between turns.
///
/// The chat platform delivers each turn as a fresh payload carrying every
/// previously-bound field value plus the correlation id from the prior
/// turn's action payloads; a `Session` is that payload made explicit. The
/// resolver reads and writes parameter values here and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correlation_id: Option<CorrelationId>,
    #[serde(default)]
    fields: BTreeMap<String, String>,
    /// When false, the cumulative resolved-parameter summary is suppressed.
    #[serde(default = "default_true")]
    display_resolved: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            correlation_id: None,
            fields: BTreeMap::new(),
            display_resolved: true,
        }
    }

    /// A field holding the empty string counts as unset.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation_id.as_ref()
    }

    /// Generate a correlation id on first use; later turns carry it forward.
    pub fn ensure_correlation_id(&mut self) -> &CorrelationId {
        self.correlation_id.get_or_insert_with(CorrelationId::new)
    }

    pub fn display_resolved(&self) -> bool {
        self.display_resolved
    }

    pub fn set_display_resolved(&mut self, display: bool) {
        self.display_resolved = display;
    }
}
