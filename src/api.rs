//! REST client for the board backend.
//!
//! DESIGN
//! ======
//! [`BoardApi`] is the seam every controller talks through; [`HttpApi`] is
//! the reqwest implementation and tests swap in a mock. The client is a
//! pass-through: one HTTP round trip per call, no retries, no backoff.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses become [`ApiError::Status`] whose message is the
//! JSON body's `detail` field when the server sent one, otherwise
//! `Error {status}: {reason}`. A 204 decodes as an empty JSON object so
//! delete calls share the same decode path as everything else.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::{
    AnalyzeRequest, Board, BoardAnalysis, BoardElement, BoardPatch, ElementPatch, GenerateRequest, NewBoard, NewElement,
};

pub const BOARDS_PATH: &str = "/api/boards";
pub const ELEMENTS_PATH: &str = "/api/elements";
pub const AI_GENERATE_PATH: &str = "/api/ai/generate";
pub const AI_ANALYZE_PATH: &str = "/api/ai/analyze";

// =============================================================================
// SEAM
// =============================================================================

/// Every backend call the client makes.
#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn list_boards(&self) -> Result<Vec<Board>, ApiError>;
    async fn get_board(&self, board_id: &str) -> Result<Board, ApiError>;
    async fn create_board(&self, board: &NewBoard) -> Result<Board, ApiError>;
    async fn update_board(&self, board_id: &str, patch: &BoardPatch) -> Result<Board, ApiError>;
    async fn delete_board(&self, board_id: &str) -> Result<(), ApiError>;

    async fn list_elements(&self, board_id: &str) -> Result<Vec<BoardElement>, ApiError>;
    async fn create_element(&self, element: &NewElement) -> Result<BoardElement, ApiError>;
    async fn update_element(&self, element_id: &str, patch: &ElementPatch) -> Result<BoardElement, ApiError>;
    async fn delete_element(&self, element_id: &str) -> Result<(), ApiError>;

    async fn generate_elements(&self, request: &GenerateRequest) -> Result<Vec<BoardElement>, ApiError>;
    async fn analyze_board(&self, board_id: &str) -> Result<BoardAnalysis, ApiError>;
}

// =============================================================================
// PATHS
// =============================================================================

fn board_path(board_id: &str) -> String {
    format!("{BOARDS_PATH}/{board_id}")
}

fn board_elements_path(board_id: &str) -> String {
    format!("{ELEMENTS_PATH}/board/{board_id}")
}

fn element_path(element_id: &str) -> String {
    format!("{ELEMENTS_PATH}/{element_id}")
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

/// Best-effort human message for a failed response.
fn error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("detail").cloned())
        .and_then(|detail| match detail {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        });

    detail.unwrap_or_else(|| format!("Error {status}: {}", reason.unwrap_or("")).trim_end().to_owned())
}

fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if status == 204 || body.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Object(Map::new()))?);
    }
    Ok(serde_json::from_str(body)?)
}

fn validate_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ApiError::InvalidBaseUrl(raw.to_owned()))
    }
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// [`BoardApi`] over HTTP/JSON.
#[derive(Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client for `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute http(s) or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = validate_base_url(&config.api_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, has_body = body.is_some(), "api request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            error!(%method, %url, error = %e, "api request failed to send");
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), status.canonical_reason(), &text);
            error!(%method, %url, status = status.as_u16(), %message, "api request rejected");
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        decode_body(status.as_u16(), &text)
    }

    async fn send_with<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.send(method, path, Some(body)).await
    }
}

#[async_trait]
impl BoardApi for HttpApi {
    async fn list_boards(&self) -> Result<Vec<Board>, ApiError> {
        self.send(Method::GET, BOARDS_PATH, None).await
    }

    async fn get_board(&self, board_id: &str) -> Result<Board, ApiError> {
        self.send(Method::GET, &board_path(board_id), None).await
    }

    async fn create_board(&self, board: &NewBoard) -> Result<Board, ApiError> {
        self.send_with(Method::POST, BOARDS_PATH, board).await
    }

    async fn update_board(&self, board_id: &str, patch: &BoardPatch) -> Result<Board, ApiError> {
        self.send_with(Method::PUT, &board_path(board_id), patch).await
    }

    async fn delete_board(&self, board_id: &str) -> Result<(), ApiError> {
        let _: Value = self.send(Method::DELETE, &board_path(board_id), None).await?;
        Ok(())
    }

    async fn list_elements(&self, board_id: &str) -> Result<Vec<BoardElement>, ApiError> {
        self.send(Method::GET, &board_elements_path(board_id), None).await
    }

    async fn create_element(&self, element: &NewElement) -> Result<BoardElement, ApiError> {
        self.send_with(Method::POST, ELEMENTS_PATH, element).await
    }

    async fn update_element(&self, element_id: &str, patch: &ElementPatch) -> Result<BoardElement, ApiError> {
        self.send_with(Method::PUT, &element_path(element_id), patch).await
    }

    async fn delete_element(&self, element_id: &str) -> Result<(), ApiError> {
        let _: Value = self.send(Method::DELETE, &element_path(element_id), None).await?;
        Ok(())
    }

    async fn generate_elements(&self, request: &GenerateRequest) -> Result<Vec<BoardElement>, ApiError> {
        self.send_with(Method::POST, AI_GENERATE_PATH, request).await
    }

    async fn analyze_board(&self, board_id: &str) -> Result<BoardAnalysis, ApiError> {
        let request = AnalyzeRequest { board_id: board_id.to_owned() };
        self.send_with(Method::POST, AI_ANALYZE_PATH, &request).await
    }
}
