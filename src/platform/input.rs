//! Virtual joystick
//!
//! Turns a pointer/touch drag into a normalized 2D vector. Handlers only touch
//! the joystick's own state; the frame tick reads [`Joystick::vector`] once per
//! frame, so the latest event before the frame wins.

use glam::Vec2;

use crate::consts::JOYSTICK_MAX_RADIUS;

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Idle,
    Active { start: Vec2 },
}

#[derive(Debug, Clone)]
pub struct Joystick {
    /// Knob travel in device pixels
    max_radius: f32,
    drag: Drag,
    /// Clamped pixel offset of the knob from the drag start
    offset: Vec2,
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new(JOYSTICK_MAX_RADIUS)
    }
}

impl Joystick {
    pub fn new(max_radius: f32) -> Self {
        Self {
            max_radius,
            drag: Drag::Idle,
            offset: Vec2::ZERO,
        }
    }

    /// Begin a drag at `point`. A malformed point is ignored.
    pub fn on_drag_start(&mut self, point: Vec2) {
        if !point.is_finite() {
            log::warn!("Ignoring drag start with malformed point {:?}", point);
            return;
        }
        self.drag = Drag::Active { start: point };
        self.offset = Vec2::ZERO;
    }

    /// Update the drag; ignored while idle or for a malformed point
    pub fn on_drag_move(&mut self, point: Vec2) -> Vec2 {
        let Drag::Active { start } = self.drag else {
            return self.vector();
        };
        if !point.is_finite() {
            log::warn!("Ignoring drag move with malformed point {:?}", point);
            return self.vector();
        }

        // Clamp to the knob radius instead of discarding the move
        self.offset = (point - start).clamp_length_max(self.max_radius);
        self.vector()
    }

    /// Release the knob; the vector returns to zero
    pub fn on_drag_end(&mut self) -> Vec2 {
        self.drag = Drag::Idle;
        self.offset = Vec2::ZERO;
        Vec2::ZERO
    }

    /// Current input vector, each axis in [-1, 1]
    pub fn vector(&self) -> Vec2 {
        match self.drag {
            Drag::Idle => Vec2::ZERO,
            // Clamp absorbs rounding from the length clamp
            Drag::Active { .. } => (self.offset / self.max_radius).clamp(Vec2::NEG_ONE, Vec2::ONE),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.drag, Drag::Active { .. })
    }

    /// Knob offset in device pixels (for drawing the handle)
    pub fn handle_offset(&self) -> Vec2 {
        self.offset
    }
}

/// First point of a touch list, if any
///
/// Touch events sometimes arrive without touches (e.g. a cancelled gesture);
/// callers treat `None` as a no-op.
pub fn first_point(points: &[Vec2]) -> Option<Vec2> {
    points.first().copied().filter(|p| p.is_finite())
}
