use broadside::{
    standard_fleet, Board, Difficulty, GameError, Orientation, Player, RandomStrategy, Ship,
    ShotOutcome, NUM_SHIPS, PLACEMENT_ATTEMPTS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_add_ship_and_remaining() {
    let mut player = Player::new("Alice", Board::standard());
    assert!(!player.is_ai());
    player
        .add_ship(Ship::new("Destroyer", 2), (0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(player.ships().len(), 1);
    assert_eq!(player.remaining_ships().len(), 1);
    assert!(!player.has_lost());

    let err = player
        .add_ship(Ship::new("Cruiser", 3), (0, 1), Orientation::Vertical)
        .unwrap_err();
    assert_eq!(err.reason(), &GameError::ShipOverlaps);
    assert_eq!(player.ships().len(), 1);
}

#[test]
fn test_fire_at_touches_only_opponent() {
    let shooter = Player::new("Alice", Board::standard());
    let mut target = Player::new("Bob", Board::standard());
    target
        .add_ship(Ship::new("Destroyer", 2), (4, 4), Orientation::Vertical)
        .unwrap();

    let mut board = target.board().clone();
    assert_eq!(shooter.fire_at(&mut board, (4, 4)), ShotOutcome::Hit);
    assert_eq!(shooter.fire_at(&mut board, (5, 4)), ShotOutcome::Sunk("Destroyer"));
    assert_eq!(shooter.board().shot_count(), 0);
    assert!(board.all_ships_sunk());
}

#[test]
fn test_empty_player_has_not_lost() {
    let player = Player::new("Nobody", Board::standard());
    assert!(!player.has_lost());
}

#[test]
fn test_auto_place_for_computer_only() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut human = Player::new("Alice", Board::standard());
    assert_eq!(
        human.auto_place(&mut rng, standard_fleet(), PLACEMENT_ATTEMPTS),
        Ok(false)
    );
    assert!(human.ships().is_empty());

    let mut cpu = Player::computer("CPU", Board::standard(), Difficulty::Hard);
    assert!(cpu.is_ai());
    assert_eq!(
        cpu.auto_place(&mut rng, standard_fleet(), PLACEMENT_ATTEMPTS),
        Ok(true)
    );
    assert_eq!(cpu.ships().len(), NUM_SHIPS);
}

#[test]
fn test_take_ai_shot_until_defeat() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut cpu = Player::with_strategy("CPU", Board::standard(), Box::new(RandomStrategy::new()));
    let mut target = Player::new("Bob", Board::standard());
    target
        .add_ship(Ship::new("Submarine", 3), (9, 0), Orientation::Horizontal)
        .unwrap();

    let mut shots = 0;
    while !target.has_lost() {
        let (coord, outcome) = cpu.take_ai_shot(&mut rng, &mut target).unwrap().unwrap();
        assert!(coord.0 < 10 && coord.1 < 10);
        assert!(outcome.is_resolved(), "random strategy repeated {:?}", coord);
        shots += 1;
        assert!(shots <= 100);
    }
    assert_eq!(target.board().shot_count(), shots);

    // Human players have no strategy to shoot with.
    let mut human = Player::new("Alice", Board::standard());
    assert_eq!(human.take_ai_shot(&mut rng, &mut target), Ok(None));
}

#[test]
fn test_take_ai_shot_exhausted() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut cpu = Player::with_strategy("CPU", Board::standard(), Box::new(RandomStrategy::new()));
    let mut target = Player::new("Bob", Board::new(1, 2).unwrap());
    for _ in 0..2 {
        cpu.take_ai_shot(&mut rng, &mut target).unwrap();
    }
    assert_eq!(
        cpu.take_ai_shot(&mut rng, &mut target),
        Err(GameError::NoShotAvailable)
    );
}
