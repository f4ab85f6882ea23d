use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use broadside::{
    init_logging, strategy_for, DensityStrategy, Difficulty, FireOutcome, GameApi, GameConfig,
    GameEngine, GameError, GameHost, Player, RandomStrategy, Strategy,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyKind {
    Random,
    Density,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "JSON file with match settings")]
    config: Option<PathBuf>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,
    /// Targeting policy for both sides; overrides the difficulty tier.
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,
}

impl MatchArgs {
    fn load_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                GameConfig::from_json(&text)?
            }
            None => GameConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }

    fn strategy(&self, config: &GameConfig) -> Box<dyn Strategy> {
        match self.strategy {
            Some(StrategyKind::Random) => Box::new(RandomStrategy::new()),
            Some(StrategyKind::Density) => Box::new(DensityStrategy::default()),
            None => strategy_for(config.difficulty),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play computer-vs-computer matches directly on the engine.
    Sim {
        #[command(flatten)]
        args: MatchArgs,
        #[arg(long, default_value_t = 1)]
        games: u64,
    },
    /// Play one computer-vs-computer match through the two-seat host.
    Hosted {
        #[command(flatten)]
        args: MatchArgs,
    },
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim { args, games } => {
            let config = args.load_config()?;
            for game in 0..games {
                let report = run_local(&args, &config, game)?;
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        Commands::Hosted { args } => {
            let config = args.load_config()?;
            let report = run_hosted(&args, &config).await?;
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}

fn run_local(args: &MatchArgs, config: &GameConfig, game: u64) -> anyhow::Result<Value> {
    let mut rng = seeded_rng(config.seed.map(|s| s.wrapping_add(game)));
    let p1 = Player::with_strategy("Player 1", config.new_board()?, args.strategy(config));
    let p2 = Player::with_strategy("Player 2", config.new_board()?, args.strategy(config));
    let mut engine = GameEngine::with_config(p1, p2, config);
    engine.auto_place_ai_fleets(&mut rng)?;

    let max_turns = 2 * config.rows * config.cols;
    let mut turns = 0;
    while engine.winner().is_none() {
        if turns >= max_turns {
            anyhow::bail!("match did not finish within {} turns", max_turns);
        }
        engine
            .ai_take_turn(&mut rng)?
            .ok_or_else(|| anyhow!("current player is not computer-controlled"))?;
        turns += 1;
    }
    Ok(report(&engine, json!(game), turns))
}

async fn run_hosted(args: &MatchArgs, config: &GameConfig) -> anyhow::Result<Value> {
    let seed = config.seed;
    let engine = GameEngine::with_config(
        Player::new("Seat 1", config.new_board()?),
        Player::new("Seat 2", config.new_board()?),
        config,
    );
    let (host, [seat1, seat2]) = GameHost::new(engine, seeded_rng(seed));
    let host = tokio::spawn(host.run());
    let first = tokio::spawn(drive_seat(
        seat1,
        args.strategy(config),
        seeded_rng(seed.map(|s| s.wrapping_add(1))),
    ));
    let second = tokio::spawn(drive_seat(
        seat2,
        args.strategy(config),
        seeded_rng(seed.map(|s| s.wrapping_add(2))),
    ));
    let turns = first.await?? + second.await??;
    let engine = host.await?;
    Ok(report(&engine, json!("hosted"), turns))
}

/// Play one seat to the end of the match. Returns the number of shots fired.
async fn drive_seat(
    mut seat: impl GameApi,
    mut strategy: Box<dyn Strategy>,
    mut rng: SmallRng,
) -> anyhow::Result<usize> {
    seat.auto_place().await?;
    let mut shots = 0;
    loop {
        let state = seat.wait_for_turn().await?;
        if state.is_over() {
            break;
        }
        let snapshot = seat.snapshot().await?;
        let target = snapshot.opponent().board.target_view();
        let (row, col) = strategy
            .choose_shot(&mut rng, &target)
            .ok_or(GameError::NoShotAvailable)?;
        let outcome = seat.fire(row, col).await?;
        strategy.handle_shot_result((row, col), &outcome);
        shots += 1;
        if outcome == FireOutcome::Win {
            break;
        }
    }
    Ok(shots)
}

fn report(engine: &GameEngine, game: Value, turns: usize) -> Value {
    let players = engine.players();
    let sides: Vec<Value> = (0..2)
        .map(|i| {
            json!({
                "name": players[i].name(),
                "shots": players[1 - i].board().shot_count(),
                "ships_left": players[i].remaining_ships().len(),
            })
        })
        .collect();
    json!({
        "game": game,
        "winner": engine.winner().map(|w| players[w].name()),
        "turns": turns,
        "players": sides,
    })
}
