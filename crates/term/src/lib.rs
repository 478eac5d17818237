//! Terminal renderer for blockfall.
//!
//! Renders a [`core::GameSnapshot`] into a framebuffer of styled character cells,
//! then flushes only the changed runs to the terminal through crossterm. The
//! view is pure and unit-testable; only [`TerminalRenderer`] touches stdout.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
