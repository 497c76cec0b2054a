//! Build log events

use serde::{Deserialize, Serialize};

/// Nested payload of a build event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub text: Option<String>,
}

/// One record from the deployment events endpoint.
///
/// Current API versions nest the line under `payload.text`; older responses
/// carry a flat `text`. [`LogEvent::text`] reads whichever is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub payload: Option<EventPayload>,

    #[serde(default)]
    pub text: Option<String>,
}

impl LogEvent {
    /// Build an event the way the current API shapes it
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            payload: Some(EventPayload {
                text: Some(text.into()),
            }),
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        self.payload
            .as_ref()
            .and_then(|payload| payload.text.as_deref())
            .or(self.text.as_deref())
            .unwrap_or("")
    }
}
