//! AI dialog controller.
//!
//! Two modes share one dialog: `Generate` turns a prompt into new board
//! elements, `Analyze` asks for a summary of the board. The dialog never
//! touches the canvas itself; generated elements are handed back to the
//! caller for [`crate::canvas::CanvasController::merge_generated`].

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::BoardApi;
use crate::error::{AiError, ApiError};
use crate::model::{BoardAnalysis, BoardElement, BoardId, GenerateRequest};

pub const GENERATE_FAILED: &str = "Failed to generate elements. Please try again.";
pub const ANALYZE_FAILED: &str = "Failed to analyze board. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AiMode {
    #[default]
    Generate,
    Analyze,
}

pub struct AiDialog {
    api: Arc<dyn BoardApi>,
    board_id: BoardId,
    pub mode: AiMode,
    pub prompt: String,
    open: bool,
    loading: bool,
    error: Option<String>,
    result: Option<BoardAnalysis>,
}

impl AiDialog {
    #[must_use]
    pub fn new(api: Arc<dyn BoardApi>, board_id: &str) -> Self {
        Self {
            api,
            board_id: board_id.to_owned(),
            mode: AiMode::default(),
            prompt: String::new(),
            open: false,
            loading: false,
            error: None,
            result: None,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&BoardAnalysis> {
        self.result.as_ref()
    }

    /// The generate button is enabled.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        !self.loading && !self.prompt.trim().is_empty()
    }

    /// Send the prompt. On success the prompt is cleared, the dialog closes
    /// and the new elements are returned for merging.
    ///
    /// # Errors
    ///
    /// [`AiError::EmptyPrompt`] for a blank prompt and [`AiError::Busy`]
    /// while a request is running, both without a network call;
    /// [`AiError::Api`] when the backend fails.
    pub async fn generate(&mut self) -> Result<Vec<BoardElement>, AiError> {
        if self.loading {
            return Err(AiError::Busy);
        }
        let text = self.prompt.trim();
        if text.is_empty() {
            return Err(AiError::EmptyPrompt);
        }
        let request = GenerateRequest { text: text.to_owned(), board_id: self.board_id.clone() };

        self.loading = true;
        self.error = None;
        let result = self.api.generate_elements(&request).await;
        self.loading = false;

        match result {
            Ok(elements) => {
                info!(board_id = %self.board_id, count = elements.len(), "elements generated");
                self.prompt.clear();
                self.open = false;
                Ok(elements)
            }
            Err(e) => Err(self.fail(GENERATE_FAILED, e)),
        }
    }

    /// Ask for an analysis of the board, replacing any previous result.
    ///
    /// # Errors
    ///
    /// [`AiError::Busy`] while a request is running; [`AiError::Api`] when
    /// the backend fails.
    pub async fn analyze(&mut self) -> Result<&BoardAnalysis, AiError> {
        if self.loading {
            return Err(AiError::Busy);
        }
        self.loading = true;
        self.error = None;
        self.result = None;
        let result = self.api.analyze_board(&self.board_id).await;
        self.loading = false;

        match result {
            Ok(analysis) => {
                info!(board_id = %self.board_id, suggestions = analysis.suggestions.len(), "board analyzed");
                Ok(self.result.insert(analysis))
            }
            Err(e) => Err(self.fail(ANALYZE_FAILED, e)),
        }
    }

    fn fail(&mut self, message: &str, error: ApiError) -> AiError {
        warn!(board_id = %self.board_id, error = %error, "{message}");
        self.error = Some(message.to_owned());
        AiError::Api(error)
    }
}
