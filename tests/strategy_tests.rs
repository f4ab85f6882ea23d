use std::collections::HashSet;

use broadside::{
    calc_pdf, place_fleet, sample_pdf, standard_fleet, strategy_for, Board, DensityStrategy,
    Difficulty, GameError, Orientation, RandomStrategy, Ship, Strategy, NUM_SHIPS,
    PLACEMENT_ATTEMPTS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_random_strategy_never_repeats() {
    let mut rng = SmallRng::seed_from_u64(17);
    let mut strategy = RandomStrategy::new();
    let view = Board::standard().target_view();

    let mut seen = HashSet::new();
    for _ in 0..100 {
        let coord = strategy.choose_shot(&mut rng, &view).unwrap();
        assert!(coord.0 < 10 && coord.1 < 10);
        assert!(seen.insert(coord), "repeated {:?}", coord);
    }
    assert_eq!(strategy.previous_shots().len(), 100);
    assert_eq!(strategy.choose_shot(&mut rng, &view), None);
}

#[test]
fn test_random_strategy_memory_is_per_instance() {
    let mut rng = SmallRng::seed_from_u64(1);
    let view = Board::new(1, 1).unwrap().target_view();
    let mut first = RandomStrategy::new();
    let mut second = RandomStrategy::new();
    assert_eq!(first.choose_shot(&mut rng, &view), Some((0, 0)));
    assert_eq!(second.choose_shot(&mut rng, &view), Some((0, 0)));
    assert_eq!(first.choose_shot(&mut rng, &view), None);
}

#[test]
fn test_place_fleet_standard_board() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut board = Board::standard();
    place_fleet(&mut rng, &mut board, standard_fleet(), PLACEMENT_ATTEMPTS).unwrap();
    assert_eq!(board.ships().len(), NUM_SHIPS);
    assert!(board.ships().iter().all(Ship::is_placed));
}

#[test]
fn test_place_fleet_exhausted_on_tiny_board() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut board = Board::new(3, 3).unwrap();
    let err = place_fleet(&mut rng, &mut board, standard_fleet(), PLACEMENT_ATTEMPTS).unwrap_err();
    assert_eq!(err, GameError::PlacementExhausted { ship: "Carrier" });
    assert!(board.ships().is_empty());
}

#[test]
fn test_place_fleet_failure_leaves_board_untouched() {
    // The Carrier fits on a 1x5 strip, the Battleship after it does not.
    let mut rng = SmallRng::seed_from_u64(3);
    let mut board = Board::new(1, 5).unwrap();
    let err = place_fleet(&mut rng, &mut board, standard_fleet(), PLACEMENT_ATTEMPTS).unwrap_err();
    assert_eq!(err, GameError::PlacementExhausted { ship: "Battleship" });
    assert!(board.ships().is_empty());
    assert!(board.ship_map().is_empty());

    // The same board still takes ships afterwards.
    place_fleet(&mut rng, &mut board, vec![Ship::new("Carrier", 5)], PLACEMENT_ATTEMPTS).unwrap();
    assert_eq!(board.ships().len(), 1);
}

#[test]
fn test_strategy_places_ships() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut board = Board::standard();
    let mut strategy = strategy_for(Difficulty::Hard);
    assert_eq!(strategy.name(), "random");
    strategy
        .place_ships(&mut rng, &mut board, standard_fleet(), PLACEMENT_ATTEMPTS)
        .unwrap();
    assert_eq!(board.ships().len(), NUM_SHIPS);
}

#[test]
fn test_pdf_ignores_fired_cells() {
    let mut board = Board::standard();
    board
        .place_ship(Ship::new("Destroyer", 2), (4, 4), Orientation::Horizontal)
        .unwrap();
    board.take_shot((0, 0));
    board.take_shot((4, 4));
    let pdf = calc_pdf(&board.target_view());

    assert_eq!(pdf.get((0, 0)), 0.0);
    assert_eq!(pdf.get((4, 4)), 0.0);
    let total: f64 = pdf.cells.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    // Neighbours of the open hit outweigh a far corner.
    assert!(pdf.get((4, 5)) > pdf.get((9, 9)));
}

#[test]
fn test_density_strategy_targets_unfired_cells() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut board = Board::standard();
    board
        .place_ship(Ship::new("Cruiser", 3), (2, 2), Orientation::Vertical)
        .unwrap();
    let mut strategy = DensityStrategy::default();
    for _ in 0..100 {
        if board.all_ships_sunk() {
            break;
        }
        let coord = strategy.choose_shot(&mut rng, &board.target_view()).unwrap();
        assert!(!board.is_fired(coord), "density picked fired cell {:?}", coord);
        board.take_shot(coord);
    }
    assert!(board.all_ships_sunk());
}

#[test]
fn test_sample_pdf_all_zero() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut board = Board::new(1, 1).unwrap();
    board.take_shot((0, 0));
    let pdf = calc_pdf(&board.target_view());
    assert_eq!(sample_pdf(&pdf, 1.0, &mut rng), None);
}
