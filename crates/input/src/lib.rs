//! Terminal input module.
//!
//! Maps `crossterm` key events to [`types::InputEvent`]s and feeds them to the
//! core through [`core::InputSource`]. Works on terminals without key-release
//! events by timing out held keys.

pub mod map;
pub mod source;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use map::{map_key, should_quit, KeyBinding};
pub use source::{
    disable_keyboard_enhancement, enable_keyboard_enhancement, CrosstermInput, KeyTracker,
    KEY_RELEASE_TIMEOUT_MS,
};
