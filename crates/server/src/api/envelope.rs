use serde::Serialize;

/// The uniform response envelope of every plugin-surfaced endpoint:
/// `code` 0 on success (with optional `data`), 1 on failure (with a
/// human-readable `message`). No error ever propagates past a handler.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: 0,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            data: None,
            message: Some(message.into()),
        }
    }
}
