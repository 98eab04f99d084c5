//! Native client for the InkSpire infinite-canvas board service.
//!
//! The library owns everything a board UI needs between the user and the
//! REST backend: the cached board list, the element list of the open board,
//! the viewport transform, selection, the active tool, snapshot undo/redo,
//! and debounced persistence of drags. Rendering is left to the host; it
//! reads state from the controllers and feeds user intents back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | `BoardApi` seam and the reqwest-backed [`api::HttpApi`] |
//! | [`model`] | Boards, elements, typed element content, write payloads |
//! | [`canvas`] | Canvas state controller for one open board |
//! | [`boards`] | Board list controller |
//! | [`ai`] | AI dialog controller (generate / analyze) |
//! | [`tool`] | Toolbar tool state machine and keyboard shortcuts |
//! | [`template`] | Default element payloads per tool |
//! | [`viewport`] | Pan/zoom transform and visibility culling |
//! | [`history`] | Snapshot undo/redo stack |
//! | [`debounce`] | Per-key trailing debounce on tokio |
//! | [`config`] | Environment-driven client configuration |
//! | [`error`] | Error types |

pub mod ai;
pub mod api;
pub mod boards;
pub mod canvas;
pub mod config;
pub mod debounce;
pub mod error;
pub mod history;
pub mod model;
pub mod template;
pub mod tool;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_helpers;
