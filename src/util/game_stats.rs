use std::collections::HashMap;

use crate::board::{Board, GameStatus, Player};

/// Tallies of complete games split by outcome.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct OutcomeCounts {
    pub won_x: u64,
    pub won_o: u64,
    pub draws: u64,
}

impl OutcomeCounts {
    pub fn total(self) -> u64 {
        self.won_x + self.won_o + self.draws
    }
}

/// The number of distinct complete games playable from `board` with
/// `player` to move, split by outcome. Every move sequence that reaches a
/// won or full board counts once. The same position shows up in many
/// sequences, so the recursion memoizes per (board, player).
pub fn count_outcomes(board: &Board, player: Player) -> OutcomeCounts {
    let mut map = HashMap::new();
    count_recurse(&mut map, *board, player)
}

fn count_recurse(
    map: &mut HashMap<(Board, Player), OutcomeCounts>,
    board: Board,
    player: Player,
) -> OutcomeCounts {
    match board.evaluate() {
        GameStatus::Won(Player::X) => return OutcomeCounts { won_x: 1, won_o: 0, draws: 0 },
        GameStatus::Won(Player::O) => return OutcomeCounts { won_x: 0, won_o: 1, draws: 0 },
        GameStatus::Draw => return OutcomeCounts { won_x: 0, won_o: 0, draws: 1 },
        GameStatus::InProgress => {}
    }

    if let Some(&counts) = map.get(&(board, player)) {
        return counts;
    }

    let mut counts = OutcomeCounts::default();
    for mv in board.empty_cells() {
        let child = board.apply_move(mv, player).expect("empty cell must be playable");
        let child_counts = count_recurse(map, child, player.other());

        counts.won_x += child_counts.won_x;
        counts.won_o += child_counts.won_o;
        counts.draws += child_counts.draws;
    }

    map.insert((board, player), counts);
    counts
}
