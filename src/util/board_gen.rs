use rand::Rng;

use crate::board::{Board, Coord, GameStatus, Player};

/// Generate a board by playing `n` random alternating moves from the empty
/// board, stopping early if the game ends. Returns the board together with
/// the player to move next.
pub fn random_board_with_moves(n: u32, rng: &mut impl Rng) -> (Board, Player) {
    let mut board = Board::empty();
    let mut player = Player::X;

    for _ in 0..n {
        if board.is_done() {
            break;
        }
        let mv = board.random_move(rng).expect("a live board has an empty cell");
        board = board.apply_move(mv, player).expect("empty cell must be playable");
        player = player.other();
    }

    (board, player)
}

/// Generate a board with the given terminal status by replaying random
/// games until one ends that way.
pub fn random_board_with_status(status: GameStatus, rng: &mut impl Rng) -> Board {
    assert!(status.is_done(), "only a terminal status can end a game");

    loop {
        let (board, _) = random_board_with_moves(9, rng);
        if board.evaluate() == status {
            return board;
        }
    }
}

/// Replay a fixed move sequence from the empty board, alternating players
/// starting with `X`. Returns the board together with the player to move.
pub fn board_from_moves(cells: &[usize]) -> (Board, Player) {
    let mut board = Board::empty();
    let mut player = Player::X;

    for &index in cells {
        let cell = Coord::from_index(index).expect("cell index on the board");
        board = board.apply_move(cell, player).expect("legal move sequence");
        player = player.other();
    }

    (board, player)
}
