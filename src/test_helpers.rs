//! Shared fixtures for unit tests: element builders and an in-memory
//! [`BoardApi`] that records calls and can be told to fail.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::api::BoardApi;
use crate::error::ApiError;
use crate::model::{
    Board, BoardAnalysis, BoardElement, BoardPatch, ElementPatch, ElementType, GenerateRequest, NewBoard, NewElement,
    Position, Size,
};

pub const BOARD_ID: &str = "board-1";

/// A committed sticky note at `(x, y)` with a 200x150 size.
pub fn element_at(id: &str, x: f64, y: f64) -> BoardElement {
    BoardElement {
        id: id.to_owned(),
        kind: ElementType::StickyNote,
        content: json!({ "text": format!("note {id}") }),
        position: Position::new(x, y),
        size: Some(Size::new(200.0, 150.0)),
        style: serde_json::Map::new(),
        z_index: 0,
        board_id: BOARD_ID.to_owned(),
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        updated_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

pub fn board(id: &str, title: &str) -> Board {
    Board {
        id: id.to_owned(),
        title: title.to_owned(),
        description: None,
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        updated_at: "2024-01-01T00:00:00Z".to_owned(),
        user_id: "user-1".to_owned(),
    }
}

fn server_error() -> ApiError {
    ApiError::Status { status: 500, message: "Error 500: Internal Server Error".to_owned() }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status { status: 404, message: format!("{what} not found") }
}

/// In-memory backend. Operation names passed to [`MockApi::fail_on`] match
/// the [`BoardApi`] method names.
#[derive(Default)]
pub struct MockApi {
    pub boards: Mutex<Vec<Board>>,
    pub elements: Mutex<Vec<BoardElement>>,
    pub generated: Mutex<Vec<BoardElement>>,
    pub analysis: Mutex<BoardAnalysis>,
    pub calls: Mutex<Vec<String>>,
    pub updates: Mutex<Vec<(String, ElementPatch)>>,
    failing: Mutex<HashSet<&'static str>>,
    /// Fail `create_element` once this many creates have succeeded.
    creates_before_failure: Mutex<Option<usize>>,
    delete_delay: Mutex<Option<Duration>>,
    next_id: AtomicUsize,
}

impl MockApi {
    pub fn with_elements(elements: Vec<BoardElement>) -> Self {
        let api = Self::default();
        *api.elements.lock().unwrap() = elements;
        api
    }

    pub fn with_boards(boards: Vec<Board>) -> Self {
        let api = Self::default();
        *api.boards.lock().unwrap() = boards;
        api
    }

    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
    }

    pub fn fail_creates_after(&self, successes: usize) {
        *self.creates_before_failure.lock().unwrap() = Some(successes);
    }

    /// Hold every `delete_element` call for `delay` before answering.
    pub fn delay_deletes(&self, delay: Duration) {
        *self.delete_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == op).count()
    }

    pub fn updates(&self) -> Vec<(String, ElementPatch)> {
        self.updates.lock().unwrap().clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(op.to_owned());
        if self.failing.lock().unwrap().contains(op) { Err(server_error()) } else { Ok(()) }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl BoardApi for MockApi {
    async fn list_boards(&self) -> Result<Vec<Board>, ApiError> {
        self.enter("list_boards")?;
        Ok(self.boards.lock().unwrap().clone())
    }

    async fn get_board(&self, board_id: &str) -> Result<Board, ApiError> {
        self.enter("get_board")?;
        self.boards.lock().unwrap().iter().find(|b| b.id == board_id).cloned().ok_or_else(|| not_found("Board"))
    }

    async fn create_board(&self, new: &NewBoard) -> Result<Board, ApiError> {
        self.enter("create_board")?;
        let mut created = board(&self.next_id("board"), &new.title);
        created.description.clone_from(&new.description);
        self.boards.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_board(&self, board_id: &str, patch: &BoardPatch) -> Result<Board, ApiError> {
        self.enter("update_board")?;
        let mut boards = self.boards.lock().unwrap();
        let existing = boards.iter_mut().find(|b| b.id == board_id).ok_or_else(|| not_found("Board"))?;
        if let Some(title) = &patch.title {
            existing.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            existing.description = Some(description.clone());
        }
        Ok(existing.clone())
    }

    async fn delete_board(&self, board_id: &str) -> Result<(), ApiError> {
        self.enter("delete_board")?;
        self.boards.lock().unwrap().retain(|b| b.id != board_id);
        Ok(())
    }

    async fn list_elements(&self, board_id: &str) -> Result<Vec<BoardElement>, ApiError> {
        self.enter("list_elements")?;
        Ok(self.elements.lock().unwrap().iter().filter(|e| e.board_id == board_id).cloned().collect())
    }

    async fn create_element(&self, element: &NewElement) -> Result<BoardElement, ApiError> {
        self.enter("create_element")?;
        {
            let mut budget = self.creates_before_failure.lock().unwrap();
            if let Some(remaining) = budget.as_mut() {
                if *remaining == 0 {
                    return Err(server_error());
                }
                *remaining -= 1;
            }
        }
        let mut created = element.to_temporary();
        created.id = self.next_id("srv");
        self.elements.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_element(&self, element_id: &str, patch: &ElementPatch) -> Result<BoardElement, ApiError> {
        self.updates.lock().unwrap().push((element_id.to_owned(), patch.clone()));
        self.enter("update_element")?;
        let mut elements = self.elements.lock().unwrap();
        let existing = elements.iter_mut().find(|e| e.id == element_id).ok_or_else(|| not_found("Element"))?;
        patch.apply_to(existing);
        Ok(existing.clone())
    }

    async fn delete_element(&self, element_id: &str) -> Result<(), ApiError> {
        let delay = *self.delete_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enter("delete_element")?;
        self.elements.lock().unwrap().retain(|e| e.id != element_id);
        Ok(())
    }

    async fn generate_elements(&self, _request: &GenerateRequest) -> Result<Vec<BoardElement>, ApiError> {
        self.enter("generate_elements")?;
        Ok(self.generated.lock().unwrap().clone())
    }

    async fn analyze_board(&self, _board_id: &str) -> Result<BoardAnalysis, ApiError> {
        self.enter("analyze_board")?;
        Ok(self.analysis.lock().unwrap().clone())
    }
}
