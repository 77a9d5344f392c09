//! A depth-limited agent for playing the board game 'Connect 4'
//!
//! The agent searches the game tree with negamax and alpha-beta pruning,
//! scoring leaves with a heuristic that counts unblocked four-in-a-row
//! potential. The heuristic is maintained incrementally as moves are
//! applied and undone, so the search never copies or rescans the board.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{config::EngineConfig, game::Game, search::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // the first player has three in a row along the bottom
//! let game = Game::from_moves("001122")?;
//! let mut solver = Solver::new(EngineConfig { depth: 2, ..EngineConfig::default() });
//!
//! assert_eq!(solver.select_move(&game)?, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod config;

pub mod evaluator;

pub mod position;

pub mod search;

pub mod game;

pub mod player;

pub mod gauntlet;


pub use error::{ConfigError, EngineError};
pub use position::{Cell, Position};
pub use search::{SearchOutcome, Solver};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tiles on the game board
pub const CELLS: usize = WIDTH * HEIGHT;

// the bottom-row pattern scan and the 13-line win check both assume
// a board at least 5 wide and 4 tall
const_assert!(WIDTH >= 5);
const_assert!(HEIGHT >= 4);
