use std::io;
use std::io::Write;
use std::thread;
use std::time::Duration;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use ttt::ai::minimax::MiniMaxBot;
use ttt::ai::simple::RandomBot;
use ttt::ai::Bot;
use ttt::board::{Board, Coord, GameStatus, Player};

#[derive(Debug, Copy, Clone, PartialEq, clap::ValueEnum)]
enum Mode {
    /// two humans sharing the keyboard
    Pvp,
    /// human against the engine
    Pvai,
    /// watch two engines play each other
    Aivai,
}

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
enum Side {
    X,
    O,
}

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
enum Difficulty {
    /// random moves
    Easy,
    /// perfect play
    Hard,
}

#[derive(Debug, clap::Parser)]
struct Args {
    #[clap(long, value_enum, default_value = "pvai")]
    mode: Mode,

    /// the side the human plays in pvai mode
    #[clap(long, value_enum, default_value = "x")]
    side: Side,

    /// strength of the engine seats
    #[clap(long, value_enum, default_value = "hard")]
    difficulty: Difficulty,

    /// seed for the easy engine, random when missing
    #[clap(long)]
    seed: Option<u64>,

    /// pause before each engine move in milliseconds
    #[clap(long, default_value_t = 500)]
    delay_ms: u64,

    /// rounds to play in aivai mode before exiting
    #[clap(long, default_value_t = 1)]
    rounds: u32,
}

enum Controller {
    Human,
    Engine(Box<dyn Bot>),
}

fn main() {
    let args = Args::parse();

    let engine = || -> Box<dyn Bot> {
        match args.difficulty {
            Difficulty::Easy => {
                let rng = match args.seed {
                    Some(seed) => SmallRng::seed_from_u64(seed),
                    None => SmallRng::from_entropy(),
                };
                Box::new(RandomBot::new(rng))
            }
            Difficulty::Hard => Box::new(MiniMaxBot),
        }
    };

    let human_player = match args.side {
        Side::X => Player::X,
        Side::O => Player::O,
    };

    // seat X first, seat O second
    let mut controllers = match args.mode {
        Mode::Pvp => [Controller::Human, Controller::Human],
        Mode::Pvai => match human_player {
            Player::X => [Controller::Human, Controller::Engine(engine())],
            Player::O => [Controller::Engine(engine()), Controller::Human],
        },
        Mode::Aivai => [Controller::Engine(engine()), Controller::Engine(engine())],
    };

    if args.mode != Mode::Aivai {
        println!("Cells are numbered like this:");
        println!("0|1|2\n-+-+-\n3|4|5\n-+-+-\n6|7|8");
    }

    let mut scores = Scores::default();
    let mut round = 0;

    loop {
        round += 1;
        println!();
        println!("Round {}", round);

        let status = play_round(&mut controllers, args.delay_ms);

        match args.mode {
            Mode::Pvai => match status {
                GameStatus::Won(winner) if winner == human_player => println!("You won :)"),
                GameStatus::Won(_) => println!("You lost :("),
                GameStatus::Draw => println!("You drew :|"),
                GameStatus::InProgress => unreachable!(),
            },
            _ => match status {
                GameStatus::Won(winner) => println!("{} wins!", winner),
                GameStatus::Draw => println!("It's a draw!"),
                GameStatus::InProgress => unreachable!(),
            },
        }

        match status {
            GameStatus::Won(Player::X) => scores.x += 1,
            GameStatus::Won(Player::O) => scores.o += 1,
            GameStatus::Draw => scores.ties += 1,
            GameStatus::InProgress => unreachable!(),
        }
        println!("Score: X {} | O {} | ties {}", scores.x, scores.o, scores.ties);

        let again = match args.mode {
            Mode::Aivai => round < args.rounds,
            _ => ask_play_again(),
        };
        if !again {
            break;
        }
    }
}

#[derive(Debug, Default)]
struct Scores {
    x: u32,
    o: u32,
    ties: u32,
}

/// Play one game from the empty board and return how it ended.
fn play_round(controllers: &mut [Controller; 2], delay_ms: u64) -> GameStatus {
    let mut board = Board::empty();
    let mut player = Player::X;

    println!("{}", board);

    loop {
        let status = board.evaluate();
        if status.is_done() {
            return status;
        }

        let seat = match player {
            Player::X => 0,
            Player::O => 1,
        };
        board = match &mut controllers[seat] {
            Controller::Human => human_move(board, player),
            Controller::Engine(bot) => engine_move(board, player, bot.as_mut(), delay_ms),
        };

        println!("{}", board);
        player = player.other();
    }
}

/// Prompt until the human enters a playable cell, then return the new board.
fn human_move(board: Board, player: Player) -> Board {
    let mut line = String::new();

    loop {
        print!("{} to play (0-8): ", player);
        io::stdout().flush().expect("could not flush stdout");

        line.clear();
        let read = io::stdin().read_line(&mut line).expect("could not read stdin");
        if read == 0 {
            println!();
            std::process::exit(0);
        }

        let index: usize = match line.trim().parse() {
            Ok(index) => index,
            Err(_) => {
                eprintln!("enter a cell index between 0 and 8");
                continue;
            }
        };

        let cell = match Coord::from_index(index) {
            Ok(cell) => cell,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        match board.apply_move(cell, player) {
            Ok(next) => return next,
            Err(err) => eprintln!("{}", err),
        }
    }
}

fn engine_move(board: Board, player: Player, bot: &mut dyn Bot, delay_ms: u64) -> Board {
    if delay_ms > 0 {
        thread::sleep(Duration::from_millis(delay_ms));
    }

    let mv = bot
        .select_move(&board, player)
        .expect("bot didn't return a move in an unfinished game");
    println!("{} plays {}", player, mv);

    board.apply_move(mv, player).expect("bots must return a legal move")
}

fn ask_play_again() -> bool {
    let mut line = String::new();

    loop {
        print!("Play again? (y/n): ");
        io::stdout().flush().expect("could not flush stdout");

        line.clear();
        let read = io::stdin().read_line(&mut line).expect("could not read stdin");
        if read == 0 {
            println!();
            return false;
        }

        match line.trim() {
            "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => eprintln!("answer y or n"),
        }
    }
}
