//! Rules engine for minesweeper-style games.
//!
//! A [`Grid`] is built once with its mines placed, then wrapped in a
//! [`GameEngine`] which applies player actions, runs reveal cascades and
//! tracks the win/lose state. Rendering and input live outside this crate;
//! they call into the engine with tile coordinates and draw from its state.
//!
//! ```
//! use minelogic_core::*;
//!
//! let grid = Grid::from_mine_coords((3, 3), &[(2, 2)])?;
//! let mut engine = GameEngine::new(grid);
//!
//! engine.secondary_action((0, 0), DiscoveryPolicy::Easy)?;
//! assert_eq!(engine.revealed_count(), 8);
//!
//! let outcome = engine.primary_action((2, 2), DiscoveryPolicy::Easy)?;
//! assert_eq!(outcome, ActionOutcome::Won);
//! # Ok::<(), GameError>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use policy::*;
#[cfg(feature = "std")]
pub use shared::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod config;
mod engine;
mod error;
mod generator;
mod grid;
mod policy;
#[cfg(feature = "std")]
mod shared;
mod tile;
mod types;
mod view;
