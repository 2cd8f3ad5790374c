use crate::board::{Board, Coord, Player};

pub mod minimax;
pub mod simple;

/// A move selection strategy.
///
/// `select_move` picks the cell `player` should mark on `board`, or `None`
/// if the game is already over. The player is an explicit argument because
/// boards do not track whose turn it is.
pub trait Bot {
    fn select_move(&mut self, board: &Board, player: Player) -> Option<Coord>;
}

impl<F: FnMut(&Board, Player) -> Option<Coord>> Bot for F {
    fn select_move(&mut self, board: &Board, player: Player) -> Option<Coord> {
        self(board, player)
    }
}
