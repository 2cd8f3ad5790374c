use std::fmt;

use rand::Rng;
use thiserror::Error;

/// The two mark owners. `X` plays the first move of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    fn index(self) -> u8 {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A cell on the board, stored as a row-major index in `0..9`:
/// `0 1 2` on the top row, `3 4 5` in the middle, `6 7 8` on the bottom.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Coord(u8);

impl Coord {
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..9).map(Coord)
    }

    /// Checked constructor for untrusted indices, typically user input.
    pub fn from_index(index: usize) -> Result<Coord, InvalidMove> {
        if index < 9 {
            Ok(Coord(index as u8))
        } else {
            Err(InvalidMove::OutOfRange { index })
        }
    }

    pub fn from_xy(x: u8, y: u8) -> Coord {
        debug_assert!(x < 3 && y < 3);
        Coord(3 * y + x)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn x(self) -> u8 {
        self.0 % 3
    }

    pub fn y(self) -> u8 {
        self.0 / 3
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Coord({})", self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The state of a game as derived from the marks on a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_done(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// A rejected [`Board::apply_move`] call. The board value it came from is
/// unchanged, drivers report the reason and retry.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum InvalidMove {
    #[error("cell index {index} is outside the board")]
    OutOfRange { index: usize },
    #[error("cell {cell} is already occupied")]
    Occupied { cell: Coord },
    #[error("the game is already over")]
    GameOver,
}

/// There is no empty cell left to pick a move from.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("no empty cell left to pick a move from")]
pub struct NoLegalMove;

/// The eight winning lines: three rows, three columns, both diagonals.
pub const WIN_LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const WIN_MASKS: [u32; 8] = win_masks();

const fn win_masks() -> [u32; 8] {
    let mut masks = [0u32; 8];
    let mut i = 0;
    while i < WIN_LINES.len() {
        let line = WIN_LINES[i];
        masks[i] = (1 << line[0]) | (1 << line[1]) | (1 << line[2]);
        i += 1;
    }
    masks
}

/// A tic-tac-toe board: 9 cells that are each empty or marked by a player.
///
/// The marks are the whole state. Whose turn it is lives with the caller and
/// is passed into [`Board::apply_move`] explicitly, and the game status is
/// derived on demand by [`Board::evaluate`] instead of being stored. `X`
/// marks sit in bits `0..9`, `O` marks in bits `9..18`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    grid: u32,
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}

impl Board {
    const FULL_MASK: u32 = 0b111_111_111;

    pub fn empty() -> Board {
        Board { grid: 0 }
    }

    pub fn tile(self, cell: Coord) -> Option<Player> {
        get_player(self.grid, cell.0)
    }

    fn occupied(self) -> u32 {
        compact_grid(self.grid)
    }

    fn player_grid(self, player: Player) -> u32 {
        (self.grid >> (9 * player.index())) & Board::FULL_MASK
    }

    /// The board with `player`'s mark added on `cell`, leaving `self` as it
    /// was. Fails with [`InvalidMove::GameOver`] on a finished board and
    /// [`InvalidMove::Occupied`] on a non-empty cell.
    pub fn apply_move(self, cell: Coord, player: Player) -> Result<Board, InvalidMove> {
        if self.evaluate().is_done() {
            return Err(InvalidMove::GameOver);
        }
        if has_bit(self.occupied(), cell.0) {
            return Err(InvalidMove::Occupied { cell });
        }

        Ok(Board {
            grid: self.grid | 1 << (cell.0 + 9 * player.index()),
        })
    }

    /// Derive the game status from the marks: a line fully held by one
    /// player wins, a full board without one is a draw.
    ///
    /// Boards where both players hold a complete line cannot come from
    /// alternating play; they evaluate to a win for one of the two, never to
    /// `Draw` or `InProgress`.
    pub fn evaluate(self) -> GameStatus {
        for player in [Player::X, Player::O] {
            let grid = self.player_grid(player);
            for mask in WIN_MASKS {
                if has_mask(grid, mask) {
                    return GameStatus::Won(player);
                }
            }
        }

        if self.occupied() == Board::FULL_MASK {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_done(self) -> bool {
        self.evaluate().is_done()
    }

    /// The empty cells in ascending index order, which is the move order
    /// both engines see.
    pub fn empty_cells(self) -> impl Iterator<Item = Coord> {
        let free = !self.occupied() & Board::FULL_MASK;
        Coord::all().filter(move |cell| has_bit(free, cell.0))
    }

    /// A uniformly random empty cell.
    pub fn random_move(self, rng: &mut impl Rng) -> Result<Coord, NoLegalMove> {
        let free = !self.occupied() & Board::FULL_MASK;
        if free == 0 {
            return Err(NoLegalMove);
        }

        let n = rng.gen_range(0..free.count_ones());
        Ok(Coord(get_nth_set_bit(free, n) as u8))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..3 {
            if y == 1 || y == 2 {
                writeln!(f, "-+-+-")?;
            }

            for x in 0..3 {
                if x == 1 || x == 2 {
                    write!(f, "|")?;
                }
                let symbol = match self.tile(Coord::from_xy(x, y)) {
                    Some(Player::X) => 'X',
                    Some(Player::O) => 'O',
                    None => '.',
                };
                write!(f, "{}", symbol)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

fn has_bit(x: u32, i: u8) -> bool {
    ((x >> i) & 1) != 0
}

fn has_mask(x: u32, mask: u32) -> bool {
    x & mask == mask
}

fn get_nth_set_bit(mut x: u32, n: u32) -> u32 {
    for _ in 0..n {
        x &= x.wrapping_sub(1);
    }
    x.trailing_zeros()
}

fn compact_grid(grid: u32) -> u32 {
    (grid | grid >> 9) & Board::FULL_MASK
}

fn get_player(grid: u32, index: u8) -> Option<Player> {
    if has_bit(grid, index) {
        Some(Player::X)
    } else if has_bit(grid, index + 9) {
        Some(Player::O)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::board::{Board, Coord, GameStatus, InvalidMove, Player, WIN_LINES};

    fn coord(index: usize) -> Coord {
        Coord::from_index(index).unwrap()
    }

    #[test]
    fn empty_board() {
        let board = Board::empty();

        assert_eq!(board.evaluate(), GameStatus::InProgress);
        assert!(!board.is_done());
        assert!(Coord::all().all(|cell| board.tile(cell).is_none()));
        assert_eq!(board.empty_cells().count(), 9);
    }

    #[test]
    fn coord_bounds() {
        assert!(Coord::from_index(0).is_ok());
        assert!(Coord::from_index(8).is_ok());
        assert_eq!(Coord::from_index(9), Err(InvalidMove::OutOfRange { index: 9 }));
        assert_eq!(Coord::from_index(42), Err(InvalidMove::OutOfRange { index: 42 }));
    }

    #[test]
    fn apply_move_sets_one_tile() {
        let board = Board::empty();
        let next = board.apply_move(coord(4), Player::X).unwrap();

        assert_eq!(next.tile(coord(4)), Some(Player::X));
        assert_eq!(next.empty_cells().count(), 8);

        // the value we started from is unchanged
        assert_eq!(board.tile(coord(4)), None);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn apply_move_rejects_occupied_cell() {
        let board = Board::empty().apply_move(coord(4), Player::X).unwrap();

        let expected = Err(InvalidMove::Occupied { cell: coord(4) });
        assert_eq!(board.apply_move(coord(4), Player::O), expected);
        assert_eq!(board.apply_move(coord(4), Player::X), expected);
    }

    #[test]
    fn apply_move_rejects_finished_game() {
        let mut board = Board::empty();
        for index in [0, 1, 2] {
            board = board.apply_move(coord(index), Player::X).unwrap();
        }

        assert_eq!(board.evaluate(), GameStatus::Won(Player::X));
        assert_eq!(board.apply_move(coord(5), Player::O), Err(InvalidMove::GameOver));
    }

    #[test]
    fn every_line_wins_for_either_player() {
        for player in [Player::X, Player::O] {
            for line in WIN_LINES {
                let mut board = Board::empty();
                for index in line {
                    assert_eq!(board.evaluate(), GameStatus::InProgress);
                    board = board.apply_move(coord(index as usize), player).unwrap();
                }

                assert_eq!(board.evaluate(), GameStatus::Won(player));
                assert!(board.is_done());
            }
        }
    }

    #[test]
    fn empty_cells_ascending() {
        let board = Board::empty()
            .apply_move(coord(4), Player::X)
            .unwrap()
            .apply_move(coord(0), Player::O)
            .unwrap()
            .apply_move(coord(7), Player::X)
            .unwrap();

        let cells: Vec<usize> = board.empty_cells().map(|c| c.index()).collect();
        assert_eq!(cells, vec![1, 2, 3, 5, 6, 8]);
    }

    #[test]
    fn random_move_uniform() {
        let board = Board::empty()
            .apply_move(coord(4), Player::X)
            .unwrap()
            .apply_move(coord(0), Player::O)
            .unwrap()
            .apply_move(coord(7), Player::X)
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        let mut counts = [0i32; 9];
        for _ in 0..60_000 {
            counts[board.random_move(&mut rng).unwrap().index()] += 1;
        }

        let avg = 60_000 / 6;
        for (index, &count) in counts.iter().enumerate() {
            if board.tile(coord(index)).is_none() {
                assert!((count - avg).abs() < 1_000, "uniformly distributed");
            } else {
                assert_eq!(count, 0, "only empty cells returned");
            }
        }
    }

    #[test]
    fn display_grid() {
        let board = Board::empty()
            .apply_move(coord(0), Player::X)
            .unwrap()
            .apply_move(coord(4), Player::O)
            .unwrap();

        assert_eq!(board.to_string(), "X|.|.\n-+-+-\n.|O|.\n-+-+-\n.|.|.\n");
    }
}
