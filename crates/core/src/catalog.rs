//! Shape catalog - piece templates and quadrant rotation
//!
//! Each kind has one static [`PieceShape`]: relative tile offsets around an
//! implicit origin plus a display color. Rotation uses the closed-form integer
//! form of a 90° rotation matrix, so there is no trigonometric rounding.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Color, PieceKind, Rotation, Vector2, MAX_PIECE_TILES};

/// Owned tile buffer for one piece.
pub type Tiles = ArrayVec<Vector2, MAX_PIECE_TILES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("rotation output holds {actual} tiles, shape has {expected}")]
    TileBufferMismatch { expected: usize, actual: usize },
}

/// Immutable template for a piece kind.
#[derive(Debug, PartialEq, Eq)]
pub struct PieceShape {
    kind: PieceKind,
    tiles: &'static [Vector2],
    color: Color,
}

const fn v(x: i32, y: i32) -> Vector2 {
    Vector2::new(x, y)
}

static LINE: PieceShape = PieceShape {
    kind: PieceKind::Line,
    tiles: &[v(0, -1), v(0, 0), v(0, 1), v(0, 2)],
    color: Color::rgba(40, 190, 250, 255),
};

static BLOCK: PieceShape = PieceShape {
    kind: PieceKind::Block,
    tiles: &[v(0, 0), v(0, 1), v(1, 0), v(1, 1)],
    color: Color::rgba(128, 40, 140, 255),
};

static LEFT_SKEW: PieceShape = PieceShape {
    kind: PieceKind::LeftSkew,
    tiles: &[v(-1, 0), v(0, 0), v(0, 1), v(1, 1)],
    color: Color::rgba(140, 169, 178, 255),
};

static RIGHT_SKEW: PieceShape = PieceShape {
    kind: PieceKind::RightSkew,
    tiles: &[v(1, 0), v(0, 0), v(0, 1), v(-1, 1)],
    color: Color::rgba(90, 180, 210, 255),
};

static POINTY: PieceShape = PieceShape {
    kind: PieceKind::Pointy,
    tiles: &[v(-1, 0), v(0, 0), v(1, 0), v(0, 1)],
    color: Color::rgba(240, 220, 110, 255),
};

static LEFT_EL: PieceShape = PieceShape {
    kind: PieceKind::LeftEl,
    tiles: &[v(0, -1), v(0, 0), v(0, 1), v(1, 1)],
    color: Color::rgba(30, 160, 180, 255),
};

static RIGHT_EL: PieceShape = PieceShape {
    kind: PieceKind::RightEl,
    tiles: &[v(0, -1), v(0, 0), v(0, 1), v(-1, 1)],
    color: Color::rgba(220, 20, 220, 255),
};

/// Get the shared template for a piece kind
pub fn shape_for(kind: PieceKind) -> &'static PieceShape {
    match kind {
        PieceKind::Line => &LINE,
        PieceKind::Block => &BLOCK,
        PieceKind::LeftSkew => &LEFT_SKEW,
        PieceKind::RightSkew => &RIGHT_SKEW,
        PieceKind::Pointy => &POINTY,
        PieceKind::LeftEl => &LEFT_EL,
        PieceKind::RightEl => &RIGHT_EL,
    }
}

/// Write the tiles of `kind` at `rotation` into `out`.
///
/// `out` must be exactly as long as the shape's tile count.
pub fn rotate_into(
    kind: PieceKind,
    rotation: Rotation,
    out: &mut [Vector2],
) -> Result<(), CatalogError> {
    shape_for(kind).rotate_into(rotation, out)
}

impl PieceShape {
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Unrotated offsets.
    pub fn tiles(&self) -> &'static [Vector2] {
        self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Rotated offsets as an owned buffer.
    pub fn rotated(&self, rotation: Rotation) -> Tiles {
        self.tiles
            .iter()
            .map(|&tile| self.rotate_tile(tile, rotation))
            .collect()
    }

    /// Write rotated offsets into a caller-supplied buffer.
    pub fn rotate_into(&self, rotation: Rotation, out: &mut [Vector2]) -> Result<(), CatalogError> {
        if out.len() != self.tiles.len() {
            return Err(CatalogError::TileBufferMismatch {
                expected: self.tiles.len(),
                actual: out.len(),
            });
        }

        for (dst, &tile) in out.iter_mut().zip(self.tiles) {
            *dst = self.rotate_tile(tile, rotation);
        }
        Ok(())
    }

    fn rotate_tile(&self, tile: Vector2, rotation: Rotation) -> Vector2 {
        // The 2x2 block looks the same in every quadrant.
        if self.kind == PieceKind::Block {
            return tile;
        }
        rotate_offset(tile, rotation)
    }
}

/// Rotate a single offset by whole quadrants.
pub fn rotate_offset(tile: Vector2, rotation: Rotation) -> Vector2 {
    match rotation {
        Rotation::North => tile,
        Rotation::East => Vector2::new(-tile.y, tile.x),
        Rotation::South => Vector2::new(-tile.x, -tile.y),
        Rotation::West => Vector2::new(tile.y, -tile.x),
    }
}
