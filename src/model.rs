//! Board and element model as exchanged with the backend.
//!
//! Boards and elements are plain serde structs with camelCase field names.
//! An element's `content` stays raw JSON on the struct so that payloads the
//! client does not understand still load and round-trip untouched; the
//! typed view [`ElementContent`] decodes it per element type on demand.
//! `style` is an open-ended JSON object read through [`StyleView`].

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Server-assigned board identifier.
pub type BoardId = String;
/// Server-assigned (or temporary) element identifier.
pub type ElementId = String;
/// Free-form element style bag (`fill`, `stroke`, `strokeWidth`, ...).
pub type Style = Map<String, Value>;

/// Prefix of ids given to optimistically created elements.
pub const TEMP_ID_PREFIX: &str = "temp-";

// =============================================================================
// BOARD
// =============================================================================

/// A named canvas owned by a user. The server owns the lifecycle; the
/// client only holds a cached copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub user_id: String,
}

/// Body of `POST /api/boards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBoard {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /api/boards/{id}`. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BoardPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// A point in world coordinates (or screen pixels, depending on context).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// ELEMENT TYPES
// =============================================================================

/// Discriminator of a board element, kebab-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    StickyNote,
    Shape,
    Text,
    Connector,
    Image,
}

impl ElementType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StickyNote => "sticky-note",
            Self::Shape => "shape",
            Self::Text => "text",
            Self::Connector => "connector",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometric kind of a `shape` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Diamond,
    Star,
    Arrow,
}

impl ShapeKind {
    pub const ALL: [Self; 6] = [Self::Rectangle, Self::Ellipse, Self::Triangle, Self::Diamond, Self::Star, Self::Arrow];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
            Self::Star => "star",
            Self::Arrow => "arrow",
        }
    }

    /// Parse a shape name. `circle` is accepted as an alias of `ellipse`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Some(Self::Rectangle),
            "ellipse" | "circle" => Some(Self::Ellipse),
            "triangle" => Some(Self::Triangle),
            "diamond" => Some(Self::Diamond),
            "star" => Some(Self::Star),
            "arrow" => Some(Self::Arrow),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ELEMENT CONTENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyNoteContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Star point count, or explicit polygon coordinates for custom shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapePoints {
    Count(u32),
    Polygon(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeContent {
    pub shape_type: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<ShapePoints>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorContent {
    pub from_element_id: ElementId,
    pub to_element_id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Typed view of an element's `content`, keyed by its [`ElementType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    StickyNote(StickyNoteContent),
    Shape(ShapeContent),
    Text(TextContent),
    Connector(ConnectorContent),
    Image(ImageContent),
}

/// An element's `content` does not have the shape its `type` requires.
#[derive(Debug, thiserror::Error)]
#[error("{element_type} content is malformed: {reason}")]
pub struct ContentError {
    pub element_type: ElementType,
    pub reason: String,
}

impl ElementContent {
    /// Decode raw `content` JSON according to `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] when the JSON lacks a field the type needs.
    pub fn decode(kind: ElementType, raw: &Value) -> Result<Self, ContentError> {
        let wrap = |e: serde_json::Error| ContentError { element_type: kind, reason: e.to_string() };
        let raw = raw.clone();
        Ok(match kind {
            ElementType::StickyNote => Self::StickyNote(serde_json::from_value(raw).map_err(wrap)?),
            ElementType::Shape => Self::Shape(serde_json::from_value(raw).map_err(wrap)?),
            ElementType::Text => Self::Text(serde_json::from_value(raw).map_err(wrap)?),
            ElementType::Connector => Self::Connector(serde_json::from_value(raw).map_err(wrap)?),
            ElementType::Image => Self::Image(serde_json::from_value(raw).map_err(wrap)?),
        })
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::StickyNote(_) => ElementType::StickyNote,
            Self::Shape(_) => ElementType::Shape,
            Self::Text(_) => ElementType::Text,
            Self::Connector(_) => ElementType::Connector,
            Self::Image(_) => ElementType::Image,
        }
    }

    /// Encode back to the raw JSON carried on the wire.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let encoded = match self {
            Self::StickyNote(c) => serde_json::to_value(c),
            Self::Shape(c) => serde_json::to_value(c),
            Self::Text(c) => serde_json::to_value(c),
            Self::Connector(c) => serde_json::to_value(c),
            Self::Image(c) => serde_json::to_value(c),
        };
        // Plain structs with string keys always encode.
        encoded.unwrap_or(Value::Null)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::StickyNote(c) => Some(&c.text),
            Self::Text(c) => Some(&c.text),
            _ => None,
        }
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A positioned, styled item on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementType,
    #[serde(default)]
    pub content: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: Style,
    #[serde(default, deserialize_with = "null_as_default")]
    pub z_index: i64,
    pub board_id: BoardId,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl BoardElement {
    /// Decode `content` according to `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] when `type` and `content` disagree.
    pub fn typed_content(&self) -> Result<ElementContent, ContentError> {
        ElementContent::decode(self.kind, &self.content)
    }

    /// Editable text of sticky notes and text elements.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self.kind {
            ElementType::StickyNote | ElementType::Text => self.content.get("text").and_then(Value::as_str),
            _ => None,
        }
    }

    /// True for elements still waiting for a server-assigned id.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }

    /// Size used for layout and culling when the element carries none.
    #[must_use]
    pub fn effective_size(&self) -> Size {
        self.size.unwrap_or_else(|| default_size(self.kind))
    }

    #[must_use]
    pub fn style_view(&self) -> StyleView<'_> {
        StyleView::new(&self.style, self.kind)
    }

    /// Strip server-owned fields, producing a payload that recreates this element.
    #[must_use]
    pub fn to_new_element(&self) -> NewElement {
        NewElement {
            kind: self.kind,
            content: self.content.clone(),
            position: self.position,
            size: self.size,
            style: self.style.clone(),
            z_index: self.z_index,
            board_id: self.board_id.clone(),
        }
    }
}

fn default_size(kind: ElementType) -> Size {
    match kind {
        ElementType::Shape => Size::new(100.0, 100.0),
        ElementType::Connector => Size::new(0.0, 0.0),
        _ => Size::new(200.0, 150.0),
    }
}

/// Body of `POST /api/elements`: an element without server-owned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    #[serde(rename = "type")]
    pub kind: ElementType,
    pub content: Value,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub style: Style,
    #[serde(default)]
    pub z_index: i64,
    pub board_id: BoardId,
}

impl NewElement {
    /// Build from a typed content value; `type` is derived from the content.
    #[must_use]
    pub fn new(board_id: &str, content: &ElementContent, position: Position) -> Self {
        Self {
            kind: content.element_type(),
            content: content.to_value(),
            position,
            size: None,
            style: Style::new(),
            z_index: 0,
            board_id: board_id.to_owned(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    #[must_use]
    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.position = self.position.offset(dx, dy);
        self
    }

    /// Materialize a local placeholder with a fresh `temp-` id.
    #[must_use]
    pub fn to_temporary(&self) -> BoardElement {
        let now = now_rfc3339();
        BoardElement {
            id: temporary_id(),
            kind: self.kind,
            content: self.content.clone(),
            position: self.position,
            size: self.size,
            style: self.style.clone(),
            z_index: self.z_index,
            board_id: self.board_id.clone(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Body of `PUT /api/elements/{id}`. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl ElementPatch {
    #[must_use]
    pub fn position(position: Position) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    #[must_use]
    pub fn content(content: Value) -> Self {
        Self { content: Some(content), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.content.is_none()
            && self.position.is_none()
            && self.size.is_none()
            && self.style.is_none()
            && self.z_index.is_none()
    }

    /// Apply every present field to `element`.
    pub fn apply_to(&self, element: &mut BoardElement) {
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
        if let Some(content) = &self.content {
            element.content = content.clone();
        }
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(size) = self.size {
            element.size = Some(size);
        }
        if let Some(style) = &self.style {
            element.style = style.clone();
        }
        if let Some(z_index) = self.z_index {
            element.z_index = z_index;
        }
    }
}

// =============================================================================
// AI PAYLOADS
// =============================================================================

/// Body of `POST /api/ai/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub text: String,
    pub board_id: BoardId,
}

/// Body of `POST /api/ai/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub board_id: BoardId,
}

/// Response of `POST /api/ai/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

// =============================================================================
// STYLE ACCESS
// =============================================================================

/// Typed access to common keys of an element's style bag, with the
/// per-type fallbacks a renderer applies when a key is absent.
pub struct StyleView<'a> {
    style: &'a Style,
    kind: ElementType,
}

impl<'a> StyleView<'a> {
    #[must_use]
    pub fn new(style: &'a Style, kind: ElementType) -> Self {
        Self { style, kind }
    }

    #[must_use]
    pub fn fill(&self) -> &str {
        self.style.get("fill").and_then(Value::as_str).unwrap_or(match self.kind {
            ElementType::StickyNote => "#fbbf24",
            ElementType::Shape => "#3b82f6",
            ElementType::Text => "#f8fafc",
            ElementType::Connector | ElementType::Image => "transparent",
        })
    }

    #[must_use]
    pub fn stroke(&self) -> &str {
        self.style.get("stroke").and_then(Value::as_str).unwrap_or(match self.kind {
            ElementType::StickyNote => "#f59e0b",
            ElementType::Shape => "#2563eb",
            ElementType::Connector => "#94a3b8",
            ElementType::Text | ElementType::Image => "transparent",
        })
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.style.get("strokeWidth").and_then(Value::as_f64).unwrap_or(match self.kind {
            ElementType::StickyNote => 1.0,
            ElementType::Shape | ElementType::Connector => 2.0,
            ElementType::Text | ElementType::Image => 0.0,
        })
    }

    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.style.get("cornerRadius").and_then(Value::as_f64).unwrap_or(match self.kind {
            ElementType::StickyNote => 8.0,
            _ => 0.0,
        })
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// A fresh temporary element id.
#[must_use]
pub fn temporary_id() -> ElementId {
    format!("{TEMP_ID_PREFIX}{}", Uuid::new_v4().simple())
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
