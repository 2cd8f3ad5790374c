use rand::Rng;

use crate::ai::Bot;
use crate::board::{Board, Coord, Player};

/// Marks a uniformly random empty cell, the easy opponent.
#[derive(Debug)]
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        RandomBot { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_move(&mut self, board: &Board, _player: Player) -> Option<Coord> {
        if board.is_done() {
            return None;
        }
        board.random_move(&mut self.rng).ok()
    }
}
