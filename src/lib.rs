#![warn(missing_debug_implementations)]

//! A tic-tac-toe game core: board state and move legality, win and draw
//! evaluation, and decision bots, including an exhaustive minimax engine
//! that plays perfectly.
//!
//! Boards are small copyable values. Applying a move returns a new board
//! and leaves the old one untouched, whose turn it is travels alongside as
//! an explicit [Player](board::Player), and the game status is derived from
//! the marks on demand:
//! ```
//! use ttt::ai::minimax::best_move;
//! use ttt::board::{Board, Coord, GameStatus, Player};
//!
//! # fn main() -> Result<(), ttt::board::InvalidMove> {
//! // X opens in the center, the engine picks O's reply
//! let board = Board::empty().apply_move(Coord::from_index(4)?, Player::X)?;
//! let reply = best_move(&board, Player::O);
//! let board = board.apply_move(reply, Player::O)?;
//!
//! assert_eq!(board.evaluate(), GameStatus::InProgress);
//! # Ok(())
//! # }
//! ```

/// Board state, move legality and win/draw evaluation.
pub mod board;

/// Move selection: the [Bot](ai::Bot) trait, a random bot and the minimax engine.
pub mod ai;

/// Support tooling: bot matches, random positions, game-tree statistics.
pub mod util;
