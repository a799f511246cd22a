//! Core game logic module - deterministic collision and board state
//!
//! This crate holds the rules of the falling-block game and nothing else. It
//! never touches a terminal or the system clock directly: drawing, time and
//! randomness arrive through the traits in [`services`] and [`rng`], so a
//! whole session can be replayed headless from a seed and a manual clock.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 occupancy grid, collision correction, row clearing
//! - [`catalog`]: the seven shape templates and quadrant rotation
//! - [`piece`]: the falling piece and its fall timer
//! - [`rng`]: seeded LCG and the shuffled bag with a preview cursor
//! - [`scoring`]: line-clear points and speed progression
//! - [`game_state`]: the controller that runs a session
//! - [`services`]: renderer, clock and event-sink collaborators
//! - [`config`]: per-session tunables
//!
//! # Game Rules
//!
//! - A piece falls one row whenever more than `1000 / speed` ms pass.
//! - Walls, floor and frozen tiles push the piece back one tile at a time;
//!   a correction during a fall or soft drop freezes it in place.
//! - Rotation corrections are applied and the piece keeps falling.
//! - Completed rows are removed on freeze and scored as
//!   `[0, 40, 100, 300, 1200][rows] * (floor(speed) + 1)`.
//! - Freezing any tile above the top row ends the session.
//! - Speed starts at 1 tile/s and rises by 0.5 every 5 seconds.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameController, Headless, ManualClock, SimpleRng};
//! use blockfall_core::types::GameAction;
//!
//! let clock = ManualClock::new(0);
//! let mut game = GameController::new(&clock, SimpleRng::new(12345));
//!
//! // First frame spawns a piece.
//! game.tick(&mut Headless);
//! assert!(game.active().is_some());
//!
//! // Drop it all the way to the floor.
//! while game.active().is_some() {
//!     game.apply_action(GameAction::SoftDrop, &mut Headless);
//! }
//! assert_eq!(game.board().occupied_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod services;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockOutcome, Resolution};
pub use catalog::{rotate_into, shape_for, CatalogError, PieceShape};
pub use config::SessionConfig;
pub use game_state::{GameController, LockEvent};
pub use piece::PieceInstance;
pub use rng::{PieceOrderQueue, RandomSource, SimpleRng};
pub use scoring::{calculate_line_score, speed_level, SpeedRamp};
pub use services::{Clock, Frontend, GameEvents, Headless, ManualClock, Renderer, SystemClock};
