//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be
//! used by the engine, the terminal frontend and the tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (5, 0); pieces may extend above row 0 while falling
//!
//! # Timing and Speed
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DROP_SPEED` | 1.0 | Initial fall speed in tiles/second |
//! | `SPEED_INCREASE_INTERVAL_MS` | 5000 | Wall-clock interval between speed-ups |
//! | `SPEED_INCREASE_AMOUNT` | 0.5 | Tiles/second added per interval |
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("pointy").unwrap();
//! assert_eq!(piece, PieceKind::Pointy);
//!
//! let rotated = Rotation::North.rotate_cw();
//! assert_eq!(rotated, Rotation::East);
//! assert_eq!(rotated.quadrant(), 1);
//!
//! let action = GameAction::from_str("softDrop").unwrap();
//! assert_eq!(action, GameAction::SoftDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

mod vector;

pub use vector::Vector2;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: i32 = 20;

/// Board dimensions as a vector.
pub const BOARD_DIMS: Vector2 = Vector2::new(BOARD_WIDTH, BOARD_HEIGHT);

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// Size of one tile in canvas pixels.
pub const TILE_SIZE: Vector2 = Vector2::new(32, 32);

/// Upper-left corner of the board in canvas pixels.
pub const BOARD_POS: Vector2 = Vector2::new(200, 0);

/// Column where new pieces appear.
pub const SPAWN_X: i32 = 5;

/// Initial fall speed in tiles per second.
pub const DEFAULT_DROP_SPEED: f64 = 1.0;

/// Wall-clock interval between speed increases.
pub const SPEED_INCREASE_INTERVAL_MS: u64 = 5000;

/// Tiles/second added at every speed increase.
pub const SPEED_INCREASE_AMOUNT: f64 = 0.5;

/// Frame interval for the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Largest tile count of any shape.
pub const MAX_PIECE_TILES: usize = 4;

/// Collision correction budget per tile.
///
/// The resolver gives up after `tiles * COLLISION_SAFETY_FACTOR` corrections.
/// This is a heuristic cap, not a proven upper bound on the corrections a
/// legal position can need.
pub const COLLISION_SAFETY_FACTOR: usize = 8;

/// Line clear scoring table
///
/// Base points for clearing N rows with one freeze:
/// - 0 rows: 0 points
/// - 1 row: 40 points
/// - 2 rows: 100 points
/// - 3 rows: 300 points
/// - 4 rows: 1200 points
///
/// Points are multiplied by `floor(speed) + 1`.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Background color of the play area.
pub const BOARD_COLOR: Color = Color::rgba(20, 40, 75, 255);

/// RGBA color of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Frozen tile of that color
pub type Cell = Option<Color>;

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Line,
    Block,
    LeftSkew,
    RightSkew,
    Pointy,
    LeftEl,
    RightEl,
}

impl PieceKind {
    /// Every kind, in declaration order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Line,
        PieceKind::Block,
        PieceKind::LeftSkew,
        PieceKind::RightSkew,
        PieceKind::Pointy,
        PieceKind::LeftEl,
        PieceKind::RightEl,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("line"), Some(PieceKind::Line));
    /// assert_eq!(PieceKind::from_str("LeftEl"), Some(PieceKind::LeftEl));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" => Some(PieceKind::Line),
            "block" => Some(PieceKind::Block),
            "leftskew" => Some(PieceKind::LeftSkew),
            "rightskew" => Some(PieceKind::RightSkew),
            "pointy" => Some(PieceKind::Pointy),
            "leftel" => Some(PieceKind::LeftEl),
            "rightel" => Some(PieceKind::RightEl),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::Block => "block",
            PieceKind::LeftSkew => "leftSkew",
            PieceKind::RightSkew => "rightSkew",
            PieceKind::Pointy => "pointy",
            PieceKind::LeftEl => "leftEl",
            PieceKind::RightEl => "rightEl",
        }
    }
}

/// Rotation state in 90° steps.
///
/// - **North**: Spawn orientation (quadrant 0)
/// - **East**: Rotated 90° clockwise (quadrant 1)
/// - **South**: Rotated 180° (quadrant 2)
/// - **West**: Rotated 270° clockwise (quadrant 3)
///
/// Clockwise is as seen on screen, where y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Step in the given direction.
    pub fn step(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Number of 90° steps from North (0..=3).
    pub fn quadrant(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for a quadrant number, wrapping modulo 4.
    pub fn from_quadrant(quadrant: u8) -> Self {
        match quadrant % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Direction of a single rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Game actions that can be applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell; freezes it on contact
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Restart => "restart",
        }
    }
}
