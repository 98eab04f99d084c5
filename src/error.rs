//! Error types for API calls and controller operations.
//!
//! ERROR HANDLING
//! ==============
//! Every failure reaching the UI is ultimately rendered as one banner
//! string, so the enums stay small: transport, HTTP status with the best
//! message the server gave us, and decode failures. Controllers wrap
//! [`ApiError`] and add the few domain cases they reject locally.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by [`crate::api::BoardApi`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The configured API origin is not an absolute http(s) URL.
    #[error("invalid API URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// HTTP status code, when the server responded at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Errors produced by [`crate::canvas::CanvasController`].
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("element not found: {0}")]
    UnknownElement(String),

    #[error("element {0} has no editable text")]
    NotEditable(String),

    #[error("clipboard is empty")]
    NothingToPaste,

    #[error("nothing selected")]
    EmptySelection,

    #[error("connector endpoints must be two different elements")]
    SelfConnector,
}

/// Errors produced by [`crate::boards::BoardList`].
#[derive(Debug, thiserror::Error)]
pub enum BoardsError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("board title is required")]
    EmptyTitle,

    #[error("a board is already being created")]
    CreateInFlight,
}

/// Errors produced by [`crate::ai::AiDialog`].
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("an AI request is already in flight")]
    Busy,
}
