//! Chess rules engine on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of optional pieces
//! - [`Position`] and [`GameState`] - positions, clocks, and history
//! - [`movegen`] - pseudo-legal move generation and attack detection
//! - [`execute`] - applying a move and deriving the bookkeeping that follows
//! - [`validate`] - filtering moves that would leave the king in check
//! - [`rules`] - check, checkmate, and draw detection
//! - [`Game`] - the engine: make/undo moves, events, JSON state
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! for m in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
//!     game.make_move_uci(m).unwrap();
//! }
//! assert_eq!(
//!     game.game_status(),
//!     GameStatus::Checkmate { winner: chess_core::Color::White }
//! );
//! ```

mod board;
pub mod error;
pub mod events;
pub mod execute;
mod game;
pub mod json;
pub mod movegen;
mod position;
pub mod rules;
mod state;
pub mod validate;

pub use board::Board;
pub use error::{MoveError, StateError, UndoError};
pub use events::{EventBus, GameEvent, ListenerId};
pub use game::Game;
pub use movegen::{is_king_attacked, is_square_attacked, MoveList};
pub use position::{king_origin, CastleSide, CastlingRights, Position};
pub use rules::{DrawReason, GameStatus};
pub use state::{GameState, MoveRecord, PendingPromotion};
