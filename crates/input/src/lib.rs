//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. One key
//! press is one action; auto-repeat comes from the terminal itself.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
