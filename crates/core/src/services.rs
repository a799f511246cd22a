//! Collaborator interfaces the engine calls into.
//!
//! The engine never touches a terminal, a window or the system clock
//! directly. Frontends implement [`Renderer`] and [`GameEvents`]; the
//! controller owns a [`Clock`] and a random source.

use std::cell::Cell;
use std::time::Instant;

use crate::types::{Color, PieceKind, Vector2};

/// Drawing surface in canvas-pixel coordinates.
pub trait Renderer {
    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle whose upper-left corner is `position`.
    fn draw_filled_rect(&mut self, position: Vector2, size: Vector2, color: Color);
}

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Notifications published by the controller.
///
/// All methods default to no-ops so sinks only implement what they display.
pub trait GameEvents {
    /// A frozen piece overflowed the top of the board. Sent once per session.
    fn on_death(&mut self) {}

    /// Score changed.
    fn on_score(&mut self, _score: u32) {}

    /// Fall speed changed (tiles/second).
    fn on_speed(&mut self, _speed: f64) {}

    /// A new preview kind is available.
    fn on_preview(&mut self, _kind: PieceKind) {}

    /// Rows were removed by the last freeze.
    fn on_lines_cleared(&mut self, _rows: u32) {}

    /// The session was reset to an empty board.
    fn on_restart(&mut self) {}
}

/// Anything that can both draw and receive events.
pub trait Frontend: Renderer + GameEvents {}

impl<T: Renderer + GameEvents + ?Sized> Frontend for T {}

/// Frontend that draws nothing and ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Renderer for Headless {
    fn clear(&mut self) {}

    fn draw_filled_rect(&mut self, _position: Vector2, _size: Vector2, _color: Color) {}
}

impl GameEvents for Headless {}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
