//! Terminal renderer for the game.
//!
//! Snapshots are drawn into a plain framebuffer by [`GameView`] and flushed by
//! [`TerminalRenderer`], which implements the core's [`core::RenderSink`].
//! Field cells are two columns wide so blocks look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
