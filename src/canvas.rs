//! Canvas state controller for one open board.
//!
//! DESIGN
//! ======
//! [`CanvasController`] is the single owner of everything the board view
//! shows: the element list, tool state, viewport, selection, undo history,
//! clipboard and error banner. Every mutation goes through `&mut self`, so
//! there is no shared mutable state between the view and in-flight
//! requests.
//!
//! Creation is optimistic. [`CanvasController::begin_create`] inserts a
//! `temp-` element and selects it; [`CanvasController::finish_create`]
//! swaps it for the server's element or removes it again. The combined
//! `create_*` methods await the request in between.
//!
//! Drags update the local position at once and persist through a per-element
//! [`Debouncer`]. The save runs on its own task; failures come back over an
//! unbounded channel and are folded into the banner by
//! [`CanvasController::collect_background_errors`].
//!
//! History records the committed element list after each change. Undo and
//! redo replace the local list only and never call the server.
//!
//! ERROR HANDLING
//! ==============
//! Server failures set a fixed, user-facing banner message, are logged with
//! the underlying error, and are returned as [`CanvasError::Api`]. Local
//! precondition failures (unknown id, nothing to paste) return an error
//! without touching the banner.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::BoardApi;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::error::{ApiError, CanvasError};
use crate::history::History;
use crate::model::{
    BoardElement, BoardId, ElementId, ElementPatch, ElementType, NewElement, Position, ShapeKind, Size, TEMP_ID_PREFIX,
};
use crate::template;
use crate::tool::{Shortcut, Tool, ToolEffect, ToolState};
use crate::viewport::{CULL_PADDING, Viewport};

/// Offset applied to pasted and duplicated copies.
pub const PASTE_OFFSET: f64 = 20.0;

pub const LOAD_FAILED: &str = "Failed to load board elements";
pub const UPDATE_FAILED: &str = "Failed to update element";
pub const DELETE_FAILED: &str = "Failed to delete elements";
pub const PASTE_FAILED: &str = "Failed to paste elements";
pub const DUPLICATE_FAILED: &str = "Failed to duplicate elements";

// =============================================================================
// SELECTION
// =============================================================================

/// Current selection. A multi-selection keeps click order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Single(ElementId),
    Multi(Vec<ElementId>),
}

impl Selection {
    /// Build from a list of ids: empty is `None`, one id is `Single`.
    #[must_use]
    pub fn from_ids(mut ids: Vec<ElementId>) -> Self {
        match ids.len() {
            0 => Self::None,
            1 => Self::Single(ids.remove(0)),
            _ => Self::Multi(ids),
        }
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        match self {
            Self::None => Vec::new(),
            Self::Single(id) => vec![id.clone()],
            Self::Multi(ids) => ids.clone(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::None => false,
            Self::Single(selected) => selected == id,
            Self::Multi(ids) => ids.iter().any(|s| s == id),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Drop ids that no longer name an element.
    fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        let ids = self.ids().into_iter().filter(|id| keep(id)).collect();
        *self = Self::from_ids(ids);
    }
}

// =============================================================================
// BACKGROUND FAILURES
// =============================================================================

/// A debounced save that failed after the triggering call returned.
#[derive(Debug)]
pub struct BackgroundFailure {
    pub element_id: ElementId,
    pub message: &'static str,
    pub error: ApiError,
}

/// Handle for an optimistic create between `begin_create` and `finish_create`.
#[derive(Debug)]
pub struct PendingCreate {
    pub temp_id: ElementId,
    pub element: NewElement,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct CanvasController {
    api: Arc<dyn BoardApi>,
    board_id: BoardId,
    elements: Vec<BoardElement>,
    tools: ToolState,
    viewport: Viewport,
    selection: Selection,
    history: History<Vec<BoardElement>>,
    clipboard: Vec<BoardElement>,
    connector_source: Option<ElementId>,
    error: Option<String>,
    loading: bool,
    debouncer: Debouncer,
    drag_delay: Duration,
    failures_tx: mpsc::UnboundedSender<BackgroundFailure>,
    failures_rx: mpsc::UnboundedReceiver<BackgroundFailure>,
}

impl CanvasController {
    #[must_use]
    pub fn new(api: Arc<dyn BoardApi>, board_id: &str, config: &ClientConfig) -> Self {
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();
        Self {
            api,
            board_id: board_id.to_owned(),
            elements: Vec::new(),
            tools: ToolState::default(),
            viewport: Viewport::default(),
            selection: Selection::None,
            history: History::new(Vec::new(), config.history_limit),
            clipboard: Vec::new(),
            connector_source: None,
            error: None,
            loading: false,
            debouncer: Debouncer::new(),
            drag_delay: config.drag_debounce,
            failures_tx,
            failures_rx,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    #[must_use]
    pub fn elements(&self) -> &[BoardElement] {
        &self.elements
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&BoardElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Elements in paint order (ascending `z_index`, stable).
    #[must_use]
    pub fn render_order(&self) -> Vec<&BoardElement> {
        let mut ordered: Vec<&BoardElement> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    #[must_use]
    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn clipboard(&self) -> &[BoardElement] {
        &self.clipboard
    }

    #[must_use]
    pub fn connector_source(&self) -> Option<&str> {
        self.connector_source.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Fetch the board's elements and start a fresh history from them.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Api`] when the fetch fails; the previous
    /// element list is kept.
    pub async fn load(&mut self) -> Result<usize, CanvasError> {
        self.loading = true;
        let result = self.api.list_elements(&self.board_id).await;
        self.loading = false;

        let elements = match result {
            Ok(elements) => elements,
            Err(e) => return Err(self.fail(LOAD_FAILED, e)),
        };
        for element in &elements {
            if let Err(e) = element.typed_content() {
                warn!(element_id = %element.id, error = %e, "element content does not match its type");
            }
        }

        info!(board_id = %self.board_id, count = elements.len(), "board elements loaded");
        self.elements = elements;
        self.history.reset(self.elements.clone());
        self.selection = Selection::None;
        self.connector_source = None;
        self.error = None;
        Ok(self.elements.len())
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    /// Insert a temporary copy of `element` and select it.
    pub fn begin_create(&mut self, element: NewElement) -> PendingCreate {
        let temp = element.to_temporary();
        let temp_id = temp.id.clone();
        debug!(temp_id = %temp_id, kind = %element.kind, "optimistic create");
        self.elements.push(temp);
        self.selection = Selection::Single(temp_id.clone());
        PendingCreate { temp_id, element }
    }

    /// Reconcile an optimistic create with the server's answer.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Api`] when `result` is an error; the temporary
    /// element is removed and the banner names the element type.
    pub fn finish_create(
        &mut self,
        pending: PendingCreate,
        result: Result<BoardElement, ApiError>,
    ) -> Result<BoardElement, CanvasError> {
        match result {
            Ok(mut created) => {
                match self.elements.iter().position(|e| e.id == pending.temp_id) {
                    Some(at) => {
                        // Moves and edits made while the create was in flight win.
                        let temp = &self.elements[at];
                        let local = ElementPatch {
                            position: (temp.position != pending.element.position).then_some(temp.position),
                            content: (temp.content != pending.element.content).then(|| temp.content.clone()),
                            ..ElementPatch::default()
                        };
                        local.apply_to(&mut created);
                        self.elements[at] = created.clone();
                        if !local.is_empty() {
                            self.schedule_save(&created.id, local);
                        }
                    }
                    None => self.elements.push(created.clone()),
                }
                self.selection = Selection::Single(created.id.clone());
                self.tools.activate(Tool::Select);
                self.commit();
                info!(element_id = %created.id, kind = %created.kind, "element created");
                Ok(created)
            }
            Err(e) => {
                self.elements.retain(|el| el.id != pending.temp_id);
                self.selection = Selection::None;
                let message = format!("Failed to create {}. Please try again.", pending.element.kind);
                Err(self.fail(message, e))
            }
        }
    }

    /// Create `element` optimistically and wait for the server.
    ///
    /// # Errors
    ///
    /// See [`CanvasController::finish_create`].
    pub async fn create(&mut self, element: NewElement) -> Result<BoardElement, CanvasError> {
        let pending = self.begin_create(element);
        let result = self.api.create_element(&pending.element).await;
        self.finish_create(pending, result)
    }

    /// Create the active tool's element at a world point. Returns `None`
    /// when the active tool does not place elements with a click.
    ///
    /// # Errors
    ///
    /// See [`CanvasController::finish_create`].
    pub async fn create_at(&mut self, world: Position) -> Result<Option<BoardElement>, CanvasError> {
        let Some(element) = template::for_tool(&self.tools, &self.board_id, world, self.next_z_index()) else {
            return Ok(None);
        };
        self.create(element).await.map(Some)
    }

    /// Create the active tool's element at the centre of the visible stage.
    ///
    /// # Errors
    ///
    /// See [`CanvasController::finish_create`].
    pub async fn create_at_center(&mut self, stage: Size) -> Result<Option<BoardElement>, CanvasError> {
        let centre = self.viewport.center_world(stage);
        self.create_at(centre).await
    }

    /// # Errors
    ///
    /// See [`CanvasController::finish_create`].
    pub async fn create_image(&mut self, url: &str, world: Position) -> Result<BoardElement, CanvasError> {
        let element = template::image(&self.board_id, url, world, self.next_z_index());
        self.create(element).await
    }

    fn next_z_index(&self) -> i64 {
        i64::try_from(self.elements.len()).unwrap_or(i64::MAX)
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Click on empty canvas at a screen point.
    ///
    /// # Errors
    ///
    /// See [`CanvasController::finish_create`].
    pub async fn click_canvas(&mut self, screen: Position) -> Result<Option<BoardElement>, CanvasError> {
        match self.tools.active {
            Tool::Select => {
                self.clear_selection();
                Ok(None)
            }
            Tool::Sticky | Tool::Shape | Tool::Text => {
                let world = self.viewport.screen_to_world(screen);
                self.create_at(world).await
            }
            Tool::Connector => {
                self.connector_source = None;
                Ok(None)
            }
            Tool::Pan | Tool::Image | Tool::Ai => Ok(None),
        }
    }

    /// Click on an element. With the connector tool the second click on a
    /// different element creates a connector and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownElement`] for an id not on the board,
    /// [`CanvasError::SelfConnector`] when a connector would join an element
    /// to itself, or a create failure.
    pub async fn click_element(&mut self, id: &str, additive: bool) -> Result<Option<BoardElement>, CanvasError> {
        if self.element(id).is_none() {
            return Err(CanvasError::UnknownElement(id.to_owned()));
        }

        match self.tools.active {
            Tool::Connector => self.connect(id).await,
            Tool::Select => {
                self.toggle_selection(id, additive);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn toggle_selection(&mut self, id: &str, additive: bool) {
        if !additive {
            self.selection = match &self.selection {
                Selection::Single(current) if current == id => Selection::None,
                _ => Selection::Single(id.to_owned()),
            };
            return;
        }

        let mut ids = self.selection.ids();
        if let Some(at) = ids.iter().position(|s| s == id) {
            ids.remove(at);
            self.selection = Selection::from_ids(ids);
        } else {
            ids.push(id.to_owned());
            self.selection = Selection::Multi(ids);
        }
    }

    async fn connect(&mut self, id: &str) -> Result<Option<BoardElement>, CanvasError> {
        let Some(source) = self.connector_source.take() else {
            debug!(element_id = id, "connector source picked");
            self.connector_source = Some(id.to_owned());
            return Ok(None);
        };
        if source == id {
            return Err(CanvasError::SelfConnector);
        }

        let at = self.element(&source).map(|e| e.position).unwrap_or_default();
        let element = template::connector(&self.board_id, &source, id, at, self.next_z_index());
        self.create(element).await.map(Some)
    }

    /// Move an element locally and schedule a debounced position save.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownElement`] for an id not on the board.
    pub fn drag_element(&mut self, id: &str, position: Position) -> Result<(), CanvasError> {
        let element =
            self.elements.iter_mut().find(|e| e.id == id).ok_or_else(|| CanvasError::UnknownElement(id.to_owned()))?;
        element.position = position;
        if element.is_temporary() {
            debug!(element_id = id, "unsaved element moved locally");
            return Ok(());
        }

        self.commit();
        self.schedule_save(id, ElementPatch::position(position));
        Ok(())
    }

    /// Persist `patch` for `id` after the drag delay, replacing any save
    /// already pending for that element.
    fn schedule_save(&mut self, id: &str, patch: ElementPatch) {
        let api = Arc::clone(&self.api);
        let failures = self.failures_tx.clone();
        let element_id = id.to_owned();
        self.debouncer.schedule(id, self.drag_delay, async move {
            if let Err(error) = api.update_element(&element_id, &patch).await {
                warn!(element_id = %element_id, error = %error, "debounced element save failed");
                let _ = failures.send(BackgroundFailure { element_id, message: UPDATE_FAILED, error });
            }
        });
    }

    /// Fold failed background saves into the banner. Returns them in
    /// arrival order.
    pub fn collect_background_errors(&mut self) -> Vec<BackgroundFailure> {
        let mut failures = Vec::new();
        while let Ok(failure) = self.failures_rx.try_recv() {
            self.error = Some(failure.message.to_owned());
            failures.push(failure);
        }
        failures
    }

    /// Number of position saves still waiting for their debounce delay.
    pub fn pending_saves(&mut self) -> usize {
        self.debouncer.pending()
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Replace the text of a sticky note or text element and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownElement`], [`CanvasError::NotEditable`]
    /// for elements without text, or [`CanvasError::Api`] when the save
    /// fails (the local edit is kept).
    pub async fn edit_text(&mut self, id: &str, text: &str) -> Result<(), CanvasError> {
        let element =
            self.elements.iter_mut().find(|e| e.id == id).ok_or_else(|| CanvasError::UnknownElement(id.to_owned()))?;
        if !matches!(element.kind, ElementType::StickyNote | ElementType::Text) {
            return Err(CanvasError::NotEditable(id.to_owned()));
        }
        let Some(content) = with_text(&element.content, text) else {
            return Err(CanvasError::NotEditable(id.to_owned()));
        };
        element.content = content.clone();
        if element.is_temporary() {
            debug!(element_id = id, "unsaved element edited locally");
            return Ok(());
        }
        self.commit();

        match self.api.update_element(id, &ElementPatch::content(content)).await {
            Ok(saved) => {
                if let Some(slot) = self.elements.iter_mut().find(|e| e.id == saved.id) {
                    *slot = saved;
                }
                Ok(())
            }
            Err(e) => Err(self.fail(UPDATE_FAILED, e)),
        }
    }

    /// Delete every selected element.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Api`] if any delete fails; nothing is removed
    /// locally in that case.
    pub async fn delete_selected(&mut self) -> Result<usize, CanvasError> {
        let ids = self.selection.ids();
        self.delete_ids(ids).await
    }

    /// Delete one element regardless of the selection.
    ///
    /// # Errors
    ///
    /// See [`CanvasController::delete_selected`].
    pub async fn delete_element(&mut self, id: &str) -> Result<usize, CanvasError> {
        if self.element(id).is_none() {
            return Err(CanvasError::UnknownElement(id.to_owned()));
        }
        self.delete_ids(vec![id.to_owned()]).await
    }

    async fn delete_ids(&mut self, ids: Vec<ElementId>) -> Result<usize, CanvasError> {
        if ids.is_empty() {
            return Ok(0);
        }

        // A save firing while the delete is in flight would target a
        // vanishing element.
        let cancelled: Vec<&ElementId> = ids.iter().filter(|id| self.debouncer.cancel(id)).collect();

        let api = Arc::clone(&self.api);
        let remote = ids.iter().filter(|id| !id.starts_with(TEMP_ID_PREFIX));
        if let Err(e) = try_join_all(remote.map(|id| api.delete_element(id))).await {
            for id in cancelled {
                let Some(patch) = self.element(id).map(|element| ElementPatch {
                    position: Some(element.position),
                    content: Some(element.content.clone()),
                    ..ElementPatch::default()
                }) else {
                    continue;
                };
                self.schedule_save(id, patch);
            }
            return Err(self.fail(DELETE_FAILED, e));
        }

        self.elements.retain(|e| !ids.contains(&e.id));
        self.selection = Selection::None;
        if self.connector_source.as_ref().is_some_and(|s| ids.contains(s)) {
            self.connector_source = None;
        }
        self.commit();
        info!(board_id = %self.board_id, count = ids.len(), "elements deleted");
        Ok(ids.len())
    }

    // -------------------------------------------------------------------------
    // Clipboard
    // -------------------------------------------------------------------------

    /// Copy the selected elements, in board order. Returns how many.
    pub fn copy_selection(&mut self) -> usize {
        let copied: Vec<BoardElement> =
            self.elements.iter().filter(|e| self.selection.contains(&e.id)).cloned().collect();
        if !copied.is_empty() {
            self.clipboard = copied;
        }
        self.clipboard.len()
    }

    /// Create offset copies of the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NothingToPaste`] for an empty clipboard, or
    /// [`CanvasError::Api`] if any create fails.
    pub async fn paste(&mut self) -> Result<Vec<BoardElement>, CanvasError> {
        if self.clipboard.is_empty() {
            return Err(CanvasError::NothingToPaste);
        }
        let sources = self.clipboard.clone();
        self.create_copies(&sources, PASTE_FAILED).await
    }

    /// Create offset copies of the selection without touching the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::EmptySelection`] when nothing is selected, or
    /// [`CanvasError::Api`] if any create fails.
    pub async fn duplicate_selection(&mut self) -> Result<Vec<BoardElement>, CanvasError> {
        let sources: Vec<BoardElement> =
            self.elements.iter().filter(|e| self.selection.contains(&e.id)).cloned().collect();
        if sources.is_empty() {
            return Err(CanvasError::EmptySelection);
        }
        self.create_copies(&sources, DUPLICATE_FAILED).await
    }

    async fn create_copies(
        &mut self,
        sources: &[BoardElement],
        failure: &'static str,
    ) -> Result<Vec<BoardElement>, CanvasError> {
        let payloads: Vec<NewElement> =
            sources.iter().map(|e| e.to_new_element().offset(PASTE_OFFSET, PASTE_OFFSET)).collect();

        let api = Arc::clone(&self.api);
        let created = match try_join_all(payloads.iter().map(|p| api.create_element(p))).await {
            Ok(created) => created,
            Err(e) => return Err(self.fail(failure, e)),
        };

        self.elements.extend(created.iter().cloned());
        self.selection = Selection::from_ids(created.iter().map(|e| e.id.clone()).collect());
        self.commit();
        info!(board_id = %self.board_id, count = created.len(), "elements copied");
        Ok(created)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn select_all(&mut self) {
        self.selection = Selection::from_ids(self.elements.iter().map(|e| e.id.clone()).collect());
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Restore the previous snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.elements = snapshot.clone();
        self.after_restore();
        true
    }

    /// Restore the next snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.elements = snapshot.clone();
        self.after_restore();
        true
    }

    fn after_restore(&mut self) {
        let elements = &self.elements;
        self.selection.retain(|id| elements.iter().any(|e| e.id == id));
    }

    /// Record the current list. Unsaved `temp-` elements are left out so
    /// undo never brings back an element the server does not know.
    fn commit(&mut self) {
        let committed = self.elements.iter().filter(|e| !e.is_temporary()).cloned().collect();
        self.history.record(committed);
    }

    // -------------------------------------------------------------------------
    // Viewport and tools
    // -------------------------------------------------------------------------

    /// Apply a wheel tick at a screen point. Returns the new scale.
    pub fn wheel(&mut self, pointer: Position, delta_y: f64) -> f64 {
        self.viewport.wheel(pointer, delta_y)
    }

    /// Pan the stage. Ignored unless the pan tool is active.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !self.tools.is_stage_draggable() {
            return false;
        }
        self.viewport.pan_by(dx, dy);
        true
    }

    /// Back to scale 1 with the world origin at the stage corner.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Current zoom as a whole percentage, for the zoom readout.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    /// Elements near enough to the visible stage to be worth rendering.
    #[must_use]
    pub fn visible_elements(&self, stage: Size) -> Vec<&BoardElement> {
        self.elements.iter().filter(|e| self.viewport.is_visible(e, stage, CULL_PADDING)).collect()
    }

    pub fn set_tool(&mut self, tool: Tool) -> ToolEffect {
        if tool != Tool::Connector {
            self.connector_source = None;
        }
        self.tools.activate(tool)
    }

    pub fn set_shape(&mut self, kind: ShapeKind) {
        self.connector_source = None;
        self.tools.pick_shape(kind);
    }

    /// Append elements produced by the AI and return to the select tool.
    pub fn merge_generated(&mut self, generated: Vec<BoardElement>) {
        if generated.is_empty() {
            return;
        }
        info!(board_id = %self.board_id, count = generated.len(), "generated elements merged");
        self.elements.extend(generated);
        self.tools.activate(Tool::Select);
        self.commit();
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Run the action bound to a shortcut. Returns the tool effect for tool
    /// shortcuts so the host can react.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying action. An empty clipboard or
    /// selection is not an error here.
    pub async fn handle_key(&mut self, shortcut: Shortcut) -> Result<ToolEffect, CanvasError> {
        match shortcut {
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::Copy => {
                self.copy_selection();
            }
            Shortcut::Paste => match self.paste().await {
                Ok(_) | Err(CanvasError::NothingToPaste) => {}
                Err(e) => return Err(e),
            },
            Shortcut::Duplicate => match self.duplicate_selection().await {
                Ok(_) | Err(CanvasError::EmptySelection) => {}
                Err(e) => return Err(e),
            },
            Shortcut::SelectAll => self.select_all(),
            Shortcut::Delete => {
                self.delete_selected().await?;
            }
            Shortcut::ClearSelection => self.clear_selection(),
            Shortcut::ResetView => self.reset_view(),
            Shortcut::Tool(tool) => return Ok(self.set_tool(tool)),
            Shortcut::Shape(kind) => self.set_shape(kind),
        }
        Ok(ToolEffect::None)
    }

    // -------------------------------------------------------------------------
    // Errors
    // -------------------------------------------------------------------------

    fn fail(&mut self, message: impl Into<String>, error: ApiError) -> CanvasError {
        let message = message.into();
        warn!(board_id = %self.board_id, error = %error, "{message}");
        self.error = Some(message);
        CanvasError::Api(error)
    }
}

/// `content` with its `text` field replaced, or `None` when `content` is
/// not an object.
fn with_text(content: &Value, text: &str) -> Option<Value> {
    let mut object = match content {
        Value::Object(map) => map.clone(),
        Value::Null => serde_json::Map::new(),
        _ => return None,
    };
    object.insert("text".to_owned(), Value::String(text.to_owned()));
    Some(Value::Object(object))
}
