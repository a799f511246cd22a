//! Terminal frontend module.
//!
//! A small, game-oriented rendering layer: the engine draws canvas-pixel
//! rectangles into a [`FrameCanvas`], which rasterizes them into a character
//! framebuffer that [`TerminalRenderer`] flushes to the terminal.
//!
//! - `core` stays free of I/O and testable
//! - board tiles are 2 chars wide to keep cells roughly square

pub mod canvas;
pub mod fb;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{FrameCanvas, Hud, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
