use crate::{HubError, Result as HubResult};

use axum::extract::ws::{Message, Utf8Bytes};

/// A normalized event payload, ready to fan out.
///
/// The hub never looks inside: producers put serialized chat events here and
/// subscribers decode them. Cloning is cheap, so every subscriber shares one
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMessage(Utf8Bytes);

impl EventMessage {
    /// Validate and normalize a text payload.
    ///
    /// The size limit applies to the raw payload. A payload that is empty after
    /// normalization is rejected.
    #[track_caller]
    pub fn new(text: &str, max_size: usize) -> HubResult<Self> {
        if text.len() > max_size {
            return Err(HubError::message_too_large(text.len(), max_size));
        }

        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(HubError::invalid_message("message is empty after normalization"));
        }

        Ok(Self(Utf8Bytes::from(normalized)))
    }

    /// Same as [`EventMessage::new`] for a raw byte payload, which must be UTF-8.
    #[track_caller]
    pub fn from_bytes(bytes: &[u8], max_size: usize) -> HubResult<Self> {
        if bytes.len() > max_size {
            return Err(HubError::message_too_large(bytes.len(), max_size));
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|e| HubError::invalid_message(format!("payload is not UTF-8: {e}")))?;
        Self::new(text, max_size)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn len(&self) -> usize {
        self.0.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<EventMessage> for Message {
    fn from(event: EventMessage) -> Self {
        Message::Text(event.0)
    }
}

impl std::fmt::Display for EventMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn every line break into a single space and trim the edges.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ").trim().to_string()
}
