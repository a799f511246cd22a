//! Board module - manages the occupancy grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of a
//! frozen tile. Uses a flat row-major array so its length is always W×H.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Pieces may hang above row 0 while falling; that space is
//! not stored.

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::piece::PieceInstance;
use crate::services::Renderer;
use crate::types::{
    Cell, Vector2, BOARD_CELLS, BOARD_COLOR, BOARD_DIMS, BOARD_HEIGHT, BOARD_POS, BOARD_WIDTH,
    COLLISION_SAFETY_FACTOR, TILE_SIZE,
};

/// Row indices removed by one clear pass, in removal order.
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Result of pushing a piece out of walls and frozen tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Best position found.
    pub position: Vector2,
    /// Number of one-tile corrections applied.
    pub corrections: usize,
    /// The correction budget ran out before a clean pass.
    pub exhausted: bool,
}

impl Resolution {
    /// True if the position had to change.
    pub fn moved_from(&self, origin: Vector2) -> bool {
        self.position != origin
    }
}

/// Result of freezing a piece into the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Tiles that were above row 0 and could not be written.
    pub overflowed_tiles: usize,
    /// Rows completed and removed by this freeze.
    pub cleared_rows: ClearedRows,
}

impl LockOutcome {
    /// The freeze ended the game.
    pub fn overflowed(&self) -> bool {
        self.overflowed_tiles > 0
    }

    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH || y < 0 || y >= BOARD_HEIGHT {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> i32 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> i32 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Cells of row `y`, or None if out of range.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Clear a row and shift all rows above down
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }

        let width = BOARD_WIDTH as usize;

        // Shift all rows above down by one using copy
        // Note: copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        // Clear the top row
        self.cells[..width].fill(None);

        1
    }

    /// Remove every complete row, scanning top to bottom.
    ///
    /// After a removal the same index is examined again, since it now holds
    /// the row that used to sit above it.
    pub fn clear_complete_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = 0;
        while y < BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared.push(y);
                continue;
            }
            y += 1;
        }
        cleared
    }

    /// Push a piece out of walls, the floor and frozen tiles.
    ///
    /// Returns `None` if the piece already sits in free space, otherwise the
    /// corrected position. The corrected position is the last free spot
    /// before the overlap; callers treat a vertical correction as contact.
    /// Tiles above the board (y < 0) are never corrected here.
    pub fn check_collision(&self, piece: &PieceInstance) -> Option<Vector2> {
        let origin = piece.position();
        let resolution = self.resolve(origin, piece.tiles());
        resolution
            .moved_from(origin)
            .then_some(resolution.position)
    }

    /// Iterative correction behind [`check_collision`](Self::check_collision).
    ///
    /// Every violation nudges the whole piece one tile (right off the left
    /// wall, left off the right wall, up off the floor, up off a frozen tile)
    /// and restarts the scan from the first tile, because moving the piece
    /// can break tiles that were already checked. Gives up after
    /// `tiles.len() * COLLISION_SAFETY_FACTOR` corrections and returns the
    /// position reached so far.
    pub fn resolve(&self, origin: Vector2, tiles: &[Vector2]) -> Resolution {
        let budget = tiles.len() * COLLISION_SAFETY_FACTOR;
        let mut position = origin;
        let mut corrections = 0;
        let mut i = 0;

        while i < tiles.len() {
            let cell = position + tiles[i];
            let left = cell.x < 0;
            let right = cell.x >= BOARD_WIDTH;
            let floor = cell.y >= BOARD_HEIGHT;
            let occupied = self.is_occupied(cell.x, cell.y);

            if !(left || right || floor || occupied) {
                i += 1;
                continue;
            }

            if corrections >= budget {
                warn!(
                    %origin,
                    %position,
                    corrections,
                    "collision correction budget exhausted"
                );
                return Resolution {
                    position,
                    corrections,
                    exhausted: true,
                };
            }

            if left {
                position.x += 1;
            }
            if right {
                position.x -= 1;
            }
            if floor {
                position.y -= 1;
            }
            if occupied {
                position.y -= 1;
            }
            corrections += 1;
            i = 0;
        }

        Resolution {
            position,
            corrections,
            exhausted: false,
        }
    }

    /// Freeze a piece into the grid and clear completed rows.
    ///
    /// No collision handling happens here. Tiles above the board count as
    /// overflow (the loss condition) and are skipped; every other tile is
    /// written with the piece color.
    pub fn add_piece(&mut self, piece: &PieceInstance) -> LockOutcome {
        let color = piece.shape().color();
        let mut outcome = LockOutcome::default();

        for tile in piece.absolute_tiles() {
            if tile.y < 0 {
                outcome.overflowed_tiles += 1;
                continue;
            }
            if !self.set(tile.x, tile.y, Some(color)) {
                debug!(%tile, kind = ?piece.kind(), "dropped tile outside the board");
            }
        }

        outcome.cleared_rows = self.clear_complete_rows();
        if !outcome.cleared_rows.is_empty() {
            debug!(rows = ?outcome.cleared_rows, "cleared rows");
        }
        outcome
    }

    /// Draw the background and every frozen tile.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_filled_rect(BOARD_POS, BOARD_DIMS.mul_components(TILE_SIZE), BOARD_COLOR);

        for (i, cell) in self.cells.iter().enumerate() {
            if let Some(color) = cell {
                let tile = Vector2::from_tile_index(i, BOARD_WIDTH as usize);
                renderer.draw_filled_rect(tile.tile_to_canvas(), TILE_SIZE, *color);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
