use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use ttt::ai::minimax::MiniMaxBot;
use ttt::ai::simple::RandomBot;
use ttt::util::bot_game::{self, BotGameResult};

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
enum BotKind {
    /// random moves
    Easy,
    /// perfect play
    Hard,
}

#[derive(Debug, clap::Parser)]
struct Args {
    /// the bot in the left seat
    #[clap(value_enum)]
    left: BotKind,

    /// the bot in the right seat
    #[clap(value_enum)]
    right: BotKind,

    #[clap(short, long, default_value_t = 1000)]
    games: u32,

    /// give both bots an equal share of games as X
    #[clap(short, long)]
    shuffle: bool,

    #[clap(short, long)]
    print_progress_every: Option<u32>,
}

fn main() {
    let args = Args::parse();

    let result = run_duel(args.left, args.right, args.games, args.shuffle, args.print_progress_every);
    println!("{:#?}", result);
}

fn run_duel(left: BotKind, right: BotKind, games: u32, shuffle: bool, progress: Option<u32>) -> BotGameResult {
    match (left, right) {
        (BotKind::Easy, BotKind::Easy) => bot_game::run(easy_bot, easy_bot, games, shuffle, progress),
        (BotKind::Easy, BotKind::Hard) => bot_game::run(easy_bot, hard_bot, games, shuffle, progress),
        (BotKind::Hard, BotKind::Easy) => bot_game::run(hard_bot, easy_bot, games, shuffle, progress),
        (BotKind::Hard, BotKind::Hard) => bot_game::run(hard_bot, hard_bot, games, shuffle, progress),
    }
}

fn easy_bot() -> RandomBot<SmallRng> {
    RandomBot::new(SmallRng::from_entropy())
}

fn hard_bot() -> MiniMaxBot {
    MiniMaxBot
}
