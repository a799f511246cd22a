//! Live piece: position, rotation and fall timer.

use crate::catalog::{shape_for, PieceShape, Tiles};
use crate::services::Renderer;
use crate::types::{PieceKind, RotateDirection, Rotation, Vector2, SPAWN_X, TILE_SIZE};

/// A falling piece.
///
/// Movement and rotation never check the board; callers validate with
/// [`Board::check_collision`](crate::Board::check_collision) and correct.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceInstance {
    shape: &'static PieceShape,
    position: Vector2,
    rotation: Rotation,
    /// Offsets for the current rotation, relative to `position`.
    tiles: Tiles,
    last_moved_ms: u64,
}

impl PieceInstance {
    /// Create a piece at the spawn position
    pub fn new(kind: PieceKind, now_ms: u64) -> Self {
        Self::spawn_at(kind, SPAWN_X, now_ms)
    }

    /// Create a piece at `(spawn_x, 0)`.
    pub fn spawn_at(kind: PieceKind, spawn_x: i32, now_ms: u64) -> Self {
        let shape = shape_for(kind);
        Self {
            shape,
            position: Vector2::new(spawn_x, 0),
            rotation: Rotation::North,
            tiles: shape.rotated(Rotation::North),
            last_moved_ms: now_ms,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &'static PieceShape {
        self.shape
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Offsets for the current rotation, relative to the position.
    pub fn tiles(&self) -> &[Vector2] {
        &self.tiles
    }

    /// Board coordinates of every tile.
    pub fn absolute_tiles(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.tiles.iter().map(move |&t| self.position + t)
    }

    pub fn last_moved_ms(&self) -> u64 {
        self.last_moved_ms
    }

    /// Fall one row if more than `1000 / speed` ms passed since the last fall.
    ///
    /// Returns true if the piece moved.
    pub fn advance_if_due(&mut self, speed: f64, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_moved_ms) as f64;
        if elapsed > 1000.0 / speed {
            self.position.y += 1;
            self.last_moved_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Rotate one quadrant and rebuild the tile buffer.
    pub fn rotate(&mut self, direction: RotateDirection) {
        self.rotation = self.rotation.step(direction);
        self.tiles = self.shape.rotated(self.rotation);
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position += Vector2::new(dx, dy);
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    /// Draw every tile, including tiles above the board.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let color = self.shape.color();
        for tile in self.absolute_tiles() {
            renderer.draw_filled_rect(tile.tile_to_canvas(), TILE_SIZE, color);
        }
    }
}
