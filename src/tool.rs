//! Toolbar tool state machine and keyboard shortcut mapping.
//!
//! Activating a tool is a transition that can carry a side effect for the
//! host: the shape tool reveals its sub-menu of shape kinds and the AI tool
//! opens the AI dialog. Everything else is a plain state change.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use std::fmt;

use crate::model::{ElementType, ShapeKind};

/// Active canvas tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Sticky,
    Shape,
    Text,
    Connector,
    Image,
    Ai,
}

impl Tool {
    pub const ALL: [Self; 8] =
        [Self::Select, Self::Pan, Self::Sticky, Self::Shape, Self::Text, Self::Connector, Self::Image, Self::Ai];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Pan => "pan",
            Self::Sticky => "sticky",
            Self::Shape => "shape",
            Self::Text => "text",
            Self::Connector => "connector",
            Self::Image => "image",
            Self::Ai => "ai",
        }
    }

    /// Element type this tool creates, if it creates one.
    #[must_use]
    pub fn creates(self) -> Option<ElementType> {
        match self {
            Self::Sticky => Some(ElementType::StickyNote),
            Self::Shape => Some(ElementType::Shape),
            Self::Text => Some(ElementType::Text),
            Self::Connector => Some(ElementType::Connector),
            Self::Image => Some(ElementType::Image),
            Self::Select | Self::Pan | Self::Ai => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effect the host should perform after a tool transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEffect {
    None,
    ShowShapeMenu,
    OpenAiDialog,
}

/// Tool selection plus the shape sub-menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolState {
    pub active: Tool,
    pub shape: ShapeKind,
    pub shape_menu_open: bool,
}

impl ToolState {
    /// Switch to `tool`.
    pub fn activate(&mut self, tool: Tool) -> ToolEffect {
        self.active = tool;
        match tool {
            Tool::Shape => {
                self.shape_menu_open = true;
                ToolEffect::ShowShapeMenu
            }
            Tool::Ai => {
                self.shape_menu_open = false;
                ToolEffect::OpenAiDialog
            }
            _ => {
                self.shape_menu_open = false;
                ToolEffect::None
            }
        }
    }

    /// Choose a shape kind from the sub-menu; also makes `shape` active.
    pub fn pick_shape(&mut self, shape: ShapeKind) {
        self.active = Tool::Shape;
        self.shape = shape;
        self.shape_menu_open = false;
    }

    pub fn close_shape_menu(&mut self) {
        self.shape_menu_open = false;
    }

    /// The stage itself can be dragged (panned) only with the pan tool.
    #[must_use]
    pub fn is_stage_draggable(&self) -> bool {
        self.active == Tool::Pan
    }

    /// Elements can be dragged only with the select tool.
    #[must_use]
    pub fn are_elements_draggable(&self) -> bool {
        self.active == Tool::Select
    }
}

// =============================================================================
// SHORTCUTS
// =============================================================================

/// Intent produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Copy,
    Paste,
    SelectAll,
    Duplicate,
    Delete,
    ClearSelection,
    ResetView,
    Tool(Tool),
    Shape(ShapeKind),
}

/// Modifier keys held during a key press. `command` is Ctrl or Cmd.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub command: bool,
    pub shift: bool,
}

impl Shortcut {
    /// Map a DOM-style key name to a shortcut.
    #[must_use]
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        if modifiers.command {
            return match key.to_ascii_lowercase().as_str() {
                "z" if modifiers.shift => Some(Self::Redo),
                "z" => Some(Self::Undo),
                "c" => Some(Self::Copy),
                "v" => Some(Self::Paste),
                "a" => Some(Self::SelectAll),
                "d" => Some(Self::Duplicate),
                "0" => Some(Self::ResetView),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(Self::Delete),
            "Escape" => Some(Self::ClearSelection),
            "1" => Some(Self::Tool(Tool::Select)),
            "2" => Some(Self::Tool(Tool::Pan)),
            "s" => Some(Self::Tool(Tool::Sticky)),
            "t" => Some(Self::Tool(Tool::Text)),
            "r" => Some(Self::Shape(ShapeKind::Rectangle)),
            "c" => Some(Self::Shape(ShapeKind::Ellipse)),
            _ => None,
        }
    }
}
