//! Game rules and session state.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameSession`] - Board, active and next piece, pause/over state
//! - [`GameStats`] - Score, level, lines and piece counters
//! - [`Command`] - Discrete player commands
//! - [`GameEvent`] - Notifications for the UI
//! - [`PieceGenerator`] / [`PieceSeed`] - Deterministic uniform piece sequence
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally with a seed
//! 2. Feed it elapsed time through [`GameSession::tick`] and player input
//!    through [`GameSession::apply`]
//! 3. A piece that cannot move down locks; full rows are cleared and scored
//! 4. The next piece spawns; if it does not fit, the game is over
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Command, GameEvent, GameSession, MoveOutcome};
//!
//! let mut session = GameSession::new();
//!
//! session.apply(Command::MoveLeft);
//! session.apply(Command::Rotate);
//! assert_eq!(session.apply(Command::HardDrop), Some(MoveOutcome::Locked));
//!
//! session.tick(Duration::from_millis(16));
//!
//! for event in session.drain_events() {
//!     if let GameEvent::ScoreChanged { score } = event {
//!         println!("score: {score}");
//!     }
//! }
//! ```

pub use self::{command::*, game_session::*, game_stats::*, piece_generator::*};

mod command;
mod game_session;
mod game_stats;
mod piece_generator;
