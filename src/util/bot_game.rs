use std::ops::Add;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

use crate::ai::Bot;
use crate::board::{Board, GameStatus, Player};

/// Play `games` full rounds between two bots in parallel, each starting
/// from the empty board with fresh bot instances.
///
/// With `shuffle` each round flips a coin for which bot plays `X`,
/// otherwise `bot_l` always does. Wins are tallied per bot, not per side.
pub fn run<L: Bot, R: Bot>(
    bot_l: impl Fn() -> L + Sync,
    bot_r: impl Fn() -> R + Sync,
    games: u32,
    shuffle: bool,
    print_progress_every: Option<u32>,
) -> BotGameResult {
    let progress_counter = AtomicU32::default();

    let result: ReductionResult = (0..games)
        .into_par_iter()
        .map(|_i| {
            let mut bot_l = bot_l();
            let mut bot_r = bot_r();

            let mut total_time_l = 0.0;
            let mut total_time_r = 0.0;
            let mut move_count_l: u32 = 0;
            let mut move_count_r: u32 = 0;

            let mut rand = SmallRng::from_entropy();

            let flip = if shuffle { rand.gen::<bool>() } else { false };
            let mut board = Board::empty();
            let mut player = Player::X;

            while !board.is_done() {
                let start = Instant::now();
                let mv = if flip ^ (player == Player::X) {
                    let mv = bot_l
                        .select_move(&board, player)
                        .expect("bot L didn't return a move in an unfinished game");
                    total_time_l += (Instant::now() - start).as_secs_f32();
                    move_count_l += 1;
                    mv
                } else {
                    let mv = bot_r
                        .select_move(&board, player)
                        .expect("bot R didn't return a move in an unfinished game");
                    total_time_r += (Instant::now() - start).as_secs_f32();
                    move_count_r += 1;
                    mv
                };

                board = board.apply_move(mv, player).expect("bots must return a legal move");
                player = player.other();
            }

            if let Some(print_progress) = print_progress_every {
                let progress = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                if progress % print_progress == 0 {
                    println!("Progress: {}", progress as f32 / games as f32);
                }
            }

            let outcome = board.evaluate();
            let win_x = (outcome == GameStatus::Won(Player::X)) as u32;
            let win_o = (outcome == GameStatus::Won(Player::O)) as u32;

            let (wins_l, wins_r) = if flip { (win_o, win_x) } else { (win_x, win_o) };

            ReductionResult {
                wins_l,
                wins_r,
                total_time_l,
                total_time_r,
                move_count_l,
                move_count_r,
            }
        })
        .reduce(ReductionResult::default, ReductionResult::add);

    let draws = games - result.wins_l - result.wins_r;
    BotGameResult {
        games,
        wins_l: result.wins_l,
        wins_r: result.wins_r,
        draws,
        win_rate_l: (result.wins_l as f32) / (games as f32),
        win_rate_r: (result.wins_r as f32) / (games as f32),
        draw_rate: (draws as f32) / (games as f32),
        time_l: result.total_time_l / (result.move_count_l as f32),
        time_r: result.total_time_r / (result.move_count_r as f32),
    }
}

#[derive(Default, Debug, Copy, Clone)]
struct ReductionResult {
    wins_l: u32,
    wins_r: u32,
    total_time_l: f32,
    total_time_r: f32,
    move_count_l: u32,
    move_count_r: u32,
}

impl Add for ReductionResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ReductionResult {
            wins_l: self.wins_l + rhs.wins_l,
            wins_r: self.wins_r + rhs.wins_r,
            total_time_l: self.total_time_l + rhs.total_time_l,
            total_time_r: self.total_time_r + rhs.total_time_r,
            move_count_l: self.move_count_l + rhs.move_count_l,
            move_count_r: self.move_count_r + rhs.move_count_r,
        }
    }
}

#[derive(Debug)]
#[must_use]
pub struct BotGameResult {
    pub games: u32,
    pub wins_l: u32,
    pub wins_r: u32,
    pub draws: u32,

    pub win_rate_l: f32,
    pub win_rate_r: f32,
    pub draw_rate: f32,

    /// time per move in seconds
    pub time_l: f32,
    /// time per move in seconds
    pub time_r: f32,
}
