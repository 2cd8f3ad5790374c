use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;

use ttt::ai::minimax::{best_move, MiniMaxBot};
use ttt::ai::simple::RandomBot;
use ttt::board::{Board, Coord, GameStatus, Player};
use ttt::util::board_gen::board_from_moves;
use ttt::util::bot_game;
use ttt::util::game_stats::count_outcomes;

fn seeded_rng(seed: u64) -> impl Rng {
    Xoroshiro64StarStar::seed_from_u64(seed)
}

fn coord(index: usize) -> Coord {
    Coord::from_index(index).unwrap()
}

/// Play one game with the engine on `engine_side` and random moves on the
/// other side, returning the final board.
fn engine_versus_random(engine_side: Player, rng: &mut impl Rng) -> Board {
    let mut board = Board::empty();
    let mut player = Player::X;

    while !board.is_done() {
        let mv = if player == engine_side {
            best_move(&board, player)
        } else {
            board.random_move(rng).unwrap()
        };
        board = board.apply_move(mv, player).unwrap();
        player = player.other();
    }

    board
}

#[test]
fn engine_never_loses_as_x() {
    for seed in 0..25 {
        let board = engine_versus_random(Player::X, &mut seeded_rng(seed));
        assert_ne!(
            board.evaluate(),
            GameStatus::Won(Player::O),
            "lost as X with seed {}:\n{}",
            seed,
            board
        );
    }
}

#[test]
fn engine_never_loses_as_o() {
    for seed in 0..25 {
        let board = engine_versus_random(Player::O, &mut seeded_rng(seed));
        assert_ne!(
            board.evaluate(),
            GameStatus::Won(Player::X),
            "lost as O with seed {}:\n{}",
            seed,
            board
        );
    }
}

#[test]
fn perfect_play_always_draws() {
    let mut board = Board::empty();
    let mut player = Player::X;

    while !board.is_done() {
        let mv = best_move(&board, player);
        board = board.apply_move(mv, player).unwrap();
        player = player.other();
    }

    assert_eq!(board.evaluate(), GameStatus::Draw, "not a draw:\n{}", board);
}

#[test]
fn forced_last_move() {
    // only cell 8 is still open
    let (board, player) = board_from_moves(&[1, 0, 3, 2, 4, 5, 6, 7]);
    assert_eq!(player, Player::X);
    assert_eq!(best_move(&board, player), coord(8));
}

#[test]
fn census_of_all_games() {
    let counts = count_outcomes(&Board::empty(), Player::X);

    assert_eq!(counts.won_x, 131_184);
    assert_eq!(counts.won_o, 77_904);
    assert_eq!(counts.draws, 46_080);
    assert_eq!(counts.total(), 255_168);
}

#[test]
fn duel_between_perfect_players_only_draws() {
    let result = bot_game::run(|| MiniMaxBot, || MiniMaxBot, 10, true, None);

    assert_eq!(result.games, 10);
    assert_eq!(result.draws, 10);
    assert_eq!(result.wins_l, 0);
    assert_eq!(result.wins_r, 0);
}

#[test]
fn random_never_beats_the_engine() {
    // every game gets its own seed so a failing run can be replayed
    let next_seed = AtomicU64::new(0);
    let result = bot_game::run(
        || MiniMaxBot,
        || RandomBot::new(SmallRng::seed_from_u64(next_seed.fetch_add(1, Ordering::Relaxed))),
        50,
        true,
        None,
    );

    assert_eq!(result.games, 50);
    assert_eq!(result.wins_r, 0);
    assert_eq!(result.wins_l + result.draws, 50);
}
