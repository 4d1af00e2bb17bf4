//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and no I/O. Hosts talk to it through
//! [`GameLoop`] and the [`InputSource`] / [`RenderSink`] traits, or drive a
//! [`Game`] directly.
//!
//! # Module Structure
//!
//! - [`grid`]: playfield cells, collision predicate, row clear and collapse
//! - [`pieces`]: spawn layouts and translation for the seven kinds
//! - [`rotation`]: rotation families and SRS wall-kick tables
//! - [`rng`]: seeded bag and uniform randomizers
//! - [`queue`]: fixed-length look-ahead queue
//! - [`hold`]: single-piece hold slot
//! - [`game`]: the per-frame controller
//! - [`snapshot`]: read-only view for renderers
//! - [`config`]: field size, level, queue length, randomizer policy
//! - [`driver`]: host seams and the frame driver
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, GameConfig};
//! use blockfall_core::types::{Control, InputEvent};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! game.start(0);
//!
//! game.handle_input(InputEvent::Press(Control::HardDrop));
//! game.update(16);
//!
//! assert_eq!(game.grid().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! [`Game::update`] takes the elapsed milliseconds since the previous frame.
//! Gravity runs every `1000 - (level - 1) * 100` ms (never below 100 ms), soft
//! drop every 20 ms, lateral auto-repeat every 60 ms.

pub mod config;
pub mod driver;
pub mod game;
pub mod grid;
pub mod hold;
pub mod pieces;
pub mod queue;
pub mod rng;
pub mod rotation;
pub mod snapshot;

pub use blockfall_types as types;

pub use config::{ConfigError, GameConfig, RandomizerKind};
pub use driver::{GameLoop, HostSignal, InputSource, RenderSink};
pub use game::{Game, InputFlags, LockEvent};
pub use grid::Grid;
pub use hold::HoldSlot;
pub use pieces::Piece;
pub use queue::PieceQueue;
pub use rng::{Randomizer, SevenBag, SimpleRng, UniformRandomizer};
pub use rotation::{try_rotate, RotationFamily};
pub use snapshot::{ActiveSnapshot, GameSnapshot, GameStatus};
