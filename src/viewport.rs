//! Viewport transform for the infinite canvas.
//!
//! `position` is the screen-space offset of the world origin (CSS pixels)
//! and `scale` the zoom factor, so `screen = world * scale + position`.
//! Wheel zoom multiplies the scale by [`ZOOM_STEP`] per tick, anchored on
//! the pointer, and clamps it to [`MIN_SCALE`, `MAX_SCALE`].

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::model::{BoardElement, Position, Size};

/// Scale multiplier applied per wheel tick.
pub const ZOOM_STEP: f64 = 1.05;
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 3.0;
/// Extra margin around the visible area when culling, in world units.
pub const CULL_PADDING: f64 = 100.0;

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldRect {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn expand(&self, by: f64) -> Self {
        Self { x: self.x - by, y: self.y - by, width: self.width + by * 2.0, height: self.height + by * 2.0 }
    }

    /// True when the rectangles overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.x > self.right() || other.right() < self.x || other.y > self.bottom() || other.bottom() < self.y)
    }
}

/// Pan offset and zoom scale applied to the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub position: Position,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, position: Position::default() }
    }
}

impl Viewport {
    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Position) -> Position {
        Position { x: (screen.x - self.position.x) / self.scale, y: (screen.y - self.position.y) / self.scale }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Position) -> Position {
        Position { x: world.x * self.scale + self.position.x, y: world.y * self.scale + self.position.y }
    }

    /// Apply one wheel tick at `pointer` (screen space). Negative `delta_y`
    /// zooms in. Returns the resulting scale.
    pub fn wheel(&mut self, pointer: Position, delta_y: f64) -> f64 {
        if delta_y < 0.0 {
            self.zoom_at(pointer, self.scale * ZOOM_STEP)
        } else if delta_y > 0.0 {
            self.zoom_at(pointer, self.scale / ZOOM_STEP)
        } else {
            self.scale
        }
    }

    /// Set the scale, keeping the world point under `pointer` fixed on screen.
    pub fn zoom_at(&mut self, pointer: Position, scale: f64) -> f64 {
        let anchor = self.screen_to_world(pointer);
        let clamped = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.scale = clamped;
        self.position = Position { x: pointer.x - anchor.x * clamped, y: pointer.y - anchor.y * clamped };
        clamped
    }

    /// Translate the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale as a rounded percentage. The clamp keeps it within `10..=300`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// World point at the centre of a stage of the given size.
    #[must_use]
    pub fn center_world(&self, stage: Size) -> Position {
        self.screen_to_world(Position::new(stage.width / 2.0, stage.height / 2.0))
    }

    /// World-space area covered by a stage of the given size.
    #[must_use]
    pub fn visible_rect(&self, stage: Size) -> WorldRect {
        let origin = self.screen_to_world(Position::default());
        WorldRect { x: origin.x, y: origin.y, width: stage.width / self.scale, height: stage.height / self.scale }
    }

    /// True when `element` overlaps the visible area grown by `padding`.
    #[must_use]
    pub fn is_visible(&self, element: &BoardElement, stage: Size, padding: f64) -> bool {
        let size = element.effective_size();
        let bounds = WorldRect { x: element.position.x, y: element.position.y, width: size.width, height: size.height };
        self.visible_rect(stage).expand(padding).intersects(&bounds)
    }
}
