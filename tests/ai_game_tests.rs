use broadside::{
    Board, DensityStrategy, Difficulty, FireOutcome, GameEngine, GameStatus, Player, Strategy,
    NUM_SHIPS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn play_out(mut engine: GameEngine, seed: u64) -> (GameEngine, usize) {
    let mut rng = SmallRng::seed_from_u64(seed);
    engine.auto_place_ai_fleets(&mut rng).unwrap();
    assert!(engine.players().iter().all(|p| p.ships().len() == NUM_SHIPS));

    let mut turns = 0;
    loop {
        turns += 1;
        let (coord, outcome) = engine.ai_take_turn(&mut rng).unwrap().unwrap();
        assert!(coord.0 < 10 && coord.1 < 10);
        if outcome == FireOutcome::Win {
            break;
        }
        if turns > 200 {
            panic!("game took too many turns");
        }
    }
    (engine, turns)
}

#[test]
fn test_random_ai_vs_ai_game() {
    let engine = GameEngine::new(
        Player::computer("CPU 1", Board::standard(), Difficulty::Easy),
        Player::computer("CPU 2", Board::standard(), Difficulty::Medium),
    );
    let (engine, _) = play_out(engine, 123);
    let winner = engine.winner().unwrap();
    assert_eq!(engine.status(), GameStatus::GameOver { winner });
    assert!(engine.players()[1 - winner].has_lost());
    assert!(!engine.players()[winner].has_lost());
}

#[test]
fn test_density_ai_game() {
    let density = |name: &str| {
        let strategy: Box<dyn Strategy> = Box::new(DensityStrategy::default());
        Player::with_strategy(name, Board::standard(), strategy)
    };
    let (engine, turns) = play_out(GameEngine::new(density("D1"), density("D2")), 7);
    assert!(engine.winner().is_some());
    // Both sides together need at least the 17 hits of one fleet.
    assert!(turns >= 17);
}

#[test]
fn test_same_seed_same_game() {
    let run = || {
        let engine = GameEngine::new(
            Player::computer("CPU 1", Board::standard(), Difficulty::Hard),
            Player::computer("CPU 2", Board::standard(), Difficulty::Hard),
        );
        let (engine, turns) = play_out(engine, 99);
        (engine.winner(), turns)
    };
    assert_eq!(run(), run());
}
