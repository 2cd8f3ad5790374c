//! Exhaustive minimax over the full game tree.
//!
//! Values are anchored to `O` everywhere: a board `O` has won is worth
//! [`WIN_O`], a board `X` has won is worth [`WIN_X`] and a draw is worth 0,
//! with no depth adjustment. [`best_move`] therefore maximizes when choosing
//! for `O` and minimizes when choosing for `X`. The anchor never flips to
//! the side being chosen for, so the same child values are compared no
//! matter who asks. Do not rewrite this as a negamax with per-side signs:
//! the values themselves stay correct, but equal-valued moves would resolve
//! differently and change which cell the engine picks.
//!
//! Ties are broken by keeping the first strictly better move in ascending
//! cell order, which makes the choice fully deterministic. On the empty
//! board every reply is a draw under perfect play, so the engine opens in
//! cell 0.

use crate::ai::Bot;
use crate::board::{Board, Coord, GameStatus, Player};

/// Value of a board `O` has won.
pub const WIN_O: i32 = 10;
/// Value of a board `X` has won.
pub const WIN_X: i32 = -10;

/// The exact value of `board` with `player` to move, searched to the end of
/// the game. No pruning: the full tree is at most 9! move sequences and
/// terminal wins cut most of them off early.
pub fn minimax_value(board: &Board, player: Player) -> i32 {
    match board.evaluate() {
        GameStatus::Won(Player::O) => WIN_O,
        GameStatus::Won(Player::X) => WIN_X,
        GameStatus::Draw => 0,
        GameStatus::InProgress => {
            let next = player.other();
            let mut best = match player {
                Player::O => i32::MIN,
                Player::X => i32::MAX,
            };

            for mv in board.empty_cells() {
                let child = board.apply_move(mv, player).expect("empty cell must be playable");
                let value = minimax_value(&child, next);
                best = match player {
                    Player::O => best.max(value),
                    Player::X => best.min(value),
                };
            }

            best
        }
    }
}

/// The optimal cell for `player` to mark on `board`.
///
/// When several cells share the best value the first one in ascending order
/// is kept, so the result is deterministic.
///
/// Panics if the board is already done.
pub fn best_move(board: &Board, player: Player) -> Coord {
    assert!(!board.is_done(), "Board must not be done");

    let mut best: Option<(i32, Coord)> = None;

    for mv in board.empty_cells() {
        let child = board.apply_move(mv, player).expect("empty cell must be playable");
        let value = minimax_value(&child, player.other());

        let better = match best {
            None => true,
            Some((best_value, _)) => match player {
                Player::O => value > best_value,
                Player::X => value < best_value,
            },
        };
        if better {
            best = Some((value, mv));
        }
    }

    let (_, mv) = best.unwrap();
    mv
}

/// The unbeatable opponent: plays [`best_move`].
#[derive(Debug)]
pub struct MiniMaxBot;

impl Bot for MiniMaxBot {
    fn select_move(&mut self, board: &Board, player: Player) -> Option<Coord> {
        if board.is_done() {
            return None;
        }
        Some(best_move(board, player))
    }
}
