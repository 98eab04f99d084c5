//! Board list controller: the cached list of boards plus the "new board"
//! draft.
//!
//! The list is a cache of server state. Every mutation waits for the server
//! before touching it, except that a failed call leaves the cache as it was
//! and sets the banner.

#[cfg(test)]
#[path = "boards_test.rs"]
mod boards_test;

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::BoardApi;
use crate::error::{ApiError, BoardsError};
use crate::model::{Board, BoardPatch, NewBoard};

pub const LOAD_FAILED: &str = "Failed to load boards. Please try again later.";
pub const CREATE_FAILED: &str = "Failed to create board";
pub const DELETE_FAILED: &str = "Failed to delete board";
pub const UPDATE_FAILED: &str = "Failed to update board";

/// Fields of the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDraft {
    pub title: String,
    pub description: String,
}

impl BoardDraft {
    /// Request body for the draft, or `None` when the title is blank.
    #[must_use]
    pub fn to_new_board(&self) -> Option<NewBoard> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let description = self.description.trim();
        Some(NewBoard {
            title: title.to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
        })
    }
}

pub struct BoardList {
    api: Arc<dyn BoardApi>,
    boards: Vec<Board>,
    pub draft: BoardDraft,
    creating: bool,
    loading: bool,
    error: Option<String>,
}

impl BoardList {
    #[must_use]
    pub fn new(api: Arc<dyn BoardApi>) -> Self {
        Self { api, boards: Vec::new(), draft: BoardDraft::default(), creating: false, loading: false, error: None }
    }

    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// The create button is enabled.
    #[must_use]
    pub fn can_create(&self) -> bool {
        !self.creating && !self.draft.title.trim().is_empty()
    }

    /// Replace the cache with the server's list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::Api`] and sets the banner when the fetch fails.
    pub async fn load(&mut self) -> Result<usize, BoardsError> {
        self.loading = true;
        let result = self.api.list_boards().await;
        self.loading = false;

        match result {
            Ok(boards) => {
                info!(count = boards.len(), "boards loaded");
                self.boards = boards;
                self.error = None;
                Ok(self.boards.len())
            }
            Err(e) => Err(self.fail(LOAD_FAILED, e)),
        }
    }

    /// Create a board from the draft and put it at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::EmptyTitle`] without a network call for a blank
    /// title, [`BoardsError::CreateInFlight`] while another create runs, or
    /// [`BoardsError::Api`] when the server rejects it (the draft is kept).
    pub async fn create(&mut self) -> Result<Board, BoardsError> {
        if self.creating {
            return Err(BoardsError::CreateInFlight);
        }
        let new_board = self.draft.to_new_board().ok_or(BoardsError::EmptyTitle)?;

        self.creating = true;
        let result = self.api.create_board(&new_board).await;
        self.creating = false;

        match result {
            Ok(board) => {
                info!(board_id = %board.id, title = %board.title, "board created");
                self.boards.insert(0, board.clone());
                self.draft = BoardDraft::default();
                Ok(board)
            }
            Err(e) => Err(self.fail(CREATE_FAILED, e)),
        }
    }

    /// Delete a board once the user has confirmed. Returns whether the board
    /// was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::Api`] when the server rejects the delete; the
    /// board stays in the list.
    pub async fn delete(&mut self, board_id: &str, confirmed: bool) -> Result<bool, BoardsError> {
        if !confirmed {
            return Ok(false);
        }
        if let Err(e) = self.api.delete_board(board_id).await {
            return Err(self.fail(DELETE_FAILED, e));
        }
        self.boards.retain(|b| b.id != board_id);
        info!(board_id, "board deleted");
        Ok(true)
    }

    /// Apply `patch` and replace the cached copy with the server's answer.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::EmptyTitle`] when the patch blanks the title,
    /// or [`BoardsError::Api`] when the server rejects it.
    pub async fn rename(&mut self, board_id: &str, patch: &BoardPatch) -> Result<Board, BoardsError> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(BoardsError::EmptyTitle);
        }
        let updated = match self.api.update_board(board_id, patch).await {
            Ok(board) => board,
            Err(e) => return Err(self.fail(UPDATE_FAILED, e)),
        };
        match self.boards.iter_mut().find(|b| b.id == updated.id) {
            Some(slot) => *slot = updated.clone(),
            None => self.boards.insert(0, updated.clone()),
        }
        Ok(updated)
    }

    fn fail(&mut self, message: &str, error: ApiError) -> BoardsError {
        warn!(error = %error, "{message}");
        self.error = Some(message.to_owned());
        BoardsError::Api(error)
    }
}
