use backgammon_rules::{
    backgammon::{BearOffRule, GameEngine},
    config::EngineConfig,
    engine::{BackgammonEngine, play_turn},
};
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Plays a game of backgammon between two players picking random legal turns.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Seed for the dice and for the players' choices.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "White")]
    white: String,

    #[arg(long, default_value = "Black")]
    black: String,

    /// Allow bearing off before all checkers are home.
    #[arg(long)]
    permissive_bear_off: bool,

    /// Stop after this many turns even if nobody has won.
    #[arg(long, default_value_t = 1000)]
    max_turns: u32,

    /// Print the board after every turn.
    #[arg(long)]
    verbose: bool,

    /// Print the final game state as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = EngineConfig {
        white_name: args.white.clone(),
        black_name: args.black.clone(),
        bear_off_rule: if args.permissive_bear_off {
            BearOffRule::Permissive
        } else {
            BearOffRule::RequireHomeBoard
        },
        seed: args.seed,
    };

    let mut game = GameEngine::new(&config);
    let mut chooser = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    run(&mut game, &mut chooser, &args);

    if args.json {
        match game.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => error!(%err, "could not serialize the game"),
        }
    }
}

fn run(engine: &mut dyn BackgammonEngine, chooser: &mut StdRng, args: &Args) {
    for _ in 0..args.max_turns {
        if engine.is_game_over() {
            break;
        }
        let player = engine.current_player().name().to_string();
        match play_turn(engine, |turns| chooser.random_range(0..turns.len())) {
            Ok(records) => {
                let played: Vec<String> = records.iter().map(|r| format!("{}/{}", r.from, r.to)).collect();
                info!(%player, moves = %played.join(" "), "turn played");
            }
            Err(err) => {
                error!(%err, %player, "turn failed");
                break;
            }
        }
        if args.verbose {
            println!("{}\n", engine.render_board());
        }
    }

    println!("{}", engine.render_board());
    let stats = engine.stats();
    match stats.winner_name {
        Some(name) => println!(
            "{name} wins ({:?}) after {} moves in {} turns",
            stats.outcome, stats.move_count, stats.turn_count
        ),
        None => println!("No winner after {} turns", stats.turn_count),
    }
}
