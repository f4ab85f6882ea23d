use broadside::{
    standard_fleet, Board, Cell, GameError, Orientation, RepeatPolicy, Ship, ShotOutcome,
    TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn board_with_destroyer() -> Board {
    let mut board = Board::standard();
    board
        .place_ship(Ship::new("Destroyer", 2), (0, 0), Orientation::Horizontal)
        .unwrap();
    board
}

#[test]
fn test_manual_place_and_sink() {
    let mut board = board_with_destroyer();
    assert_eq!(board.take_shot((0, 0)), ShotOutcome::Hit);
    assert_eq!(board.take_shot((0, 1)), ShotOutcome::Sunk("Destroyer"));
    assert!(board.all_ships_sunk());

    assert_eq!(board.take_shot((0, 1)), ShotOutcome::Repeat);
    assert_eq!(board.take_shot((9, 9)), ShotOutcome::Miss);
    assert_eq!(board.cell(9, 9), Some(Cell::Miss));
    assert_eq!(board.cell(0, 0), Some(Cell::Hit));
    assert_eq!(board.shot_count(), 3);
}

#[test]
fn test_out_of_bounds_placement_leaves_board_untouched() {
    let mut board = Board::standard();
    let err = board
        .place_ship(Ship::new("Carrier", 5), (0, 6), Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(err.reason(), &GameError::ShipOutOfBounds);
    assert_eq!(err.ship().name(), "Carrier");
    assert!(!err.ship().is_placed());
    assert!(board.ships().is_empty());
    assert!(board.ship_map().is_empty());

    // The same ship fits one column further left.
    let (ship, _) = err.into_inner();
    board.place_ship(ship, (0, 5), Orientation::Horizontal).unwrap();
    assert_eq!(board.ship_map().count_ones(), 5);
}

#[test]
fn test_overlap_rejected() {
    let mut board = board_with_destroyer();
    let submarine = Ship::new("Submarine", 3);
    assert!(!board.can_place(&submarine, (0, 1), Orientation::Vertical));
    assert!(board.can_place(&submarine, (1, 0), Orientation::Vertical));
    let err = board
        .place_ship(submarine, (0, 1), Orientation::Vertical)
        .unwrap_err();
    assert_eq!(err.reason(), &GameError::ShipOverlaps);
    assert_eq!(board.ships().len(), 1);
}

#[test]
fn test_invalid_shot_changes_nothing() {
    let mut board = board_with_destroyer();
    assert_eq!(board.take_shot((10, 0)), ShotOutcome::Invalid);
    assert_eq!(board.take_shot((0, 10)), ShotOutcome::Invalid);
    assert_eq!(board.shot_count(), 0);
}

#[test]
fn test_repeat_policy_count_as_miss() {
    let mut board = board_with_destroyer().with_repeat_policy(RepeatPolicy::CountAsMiss);
    assert_eq!(board.take_shot((0, 0)), ShotOutcome::Hit);
    assert_eq!(board.take_shot((0, 0)), ShotOutcome::Miss);
    assert_eq!(board.cell(0, 0), Some(Cell::Hit));
    assert_eq!(board.ships()[0].hit_count(), 1);
}

#[test]
fn test_empty_board_is_not_defeated() {
    let board = Board::standard();
    assert!(!board.all_ships_sunk());
}

#[test]
fn test_two_ships_sink_both() {
    let mut board = Board::standard();
    board
        .place_ship(Ship::new("Destroyer", 2), (0, 0), Orientation::Horizontal)
        .unwrap();
    board
        .place_ship(Ship::new("Cruiser", 3), (2, 0), Orientation::Vertical)
        .unwrap();
    for coord in [(0, 0), (0, 1), (2, 0), (3, 0)] {
        board.take_shot(coord);
        assert!(!board.all_ships_sunk());
    }
    assert_eq!(board.remaining_ship_lengths(), vec![3]);
    assert_eq!(board.take_shot((4, 0)), ShotOutcome::Sunk("Cruiser"));
    assert!(board.all_ships_sunk());
    assert_eq!(board.remaining_ships().count(), 0);
}

#[test]
fn test_random_fleet_no_overlap() {
    let mut board = Board::standard();
    let mut rng = SmallRng::seed_from_u64(42);
    for ship in standard_fleet() {
        let (start, orient) = board.random_placement(&mut rng, &ship, 100).unwrap();
        board.place_ship(ship, start, orient).unwrap();
    }
    assert_eq!(board.ship_map().count_ones(), TOTAL_SHIP_CELLS);
    let ship_cells = board
        .grid()
        .iter()
        .flatten()
        .filter(|&&cell| cell == Cell::Ship)
        .count();
    assert_eq!(ship_cells, TOTAL_SHIP_CELLS);
}

#[test]
fn test_random_placement_exhausted() {
    let mut board = Board::new(2, 2).unwrap();
    board
        .place_ship(Ship::new("Destroyer", 2), (0, 0), Orientation::Horizontal)
        .unwrap();
    board
        .place_ship(Ship::new("Patrol", 2), (1, 0), Orientation::Horizontal)
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    let err = board
        .random_placement(&mut rng, &Ship::new("Tug", 1), 10)
        .unwrap_err();
    assert_eq!(err, GameError::PlacementExhausted { ship: "Tug" });
}

#[test]
fn test_legal_placements_fallback() {
    // A 1x3 board has a single slot for a length-3 ship.
    let board = Board::new(1, 3).unwrap();
    let ship = Ship::new("Cruiser", 3);
    assert_eq!(
        board.legal_placements(&ship),
        vec![((0, 0), Orientation::Horizontal)]
    );
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        board.random_placement(&mut rng, &ship, 0),
        Ok(((0, 0), Orientation::Horizontal))
    );
}

#[test]
fn test_board_too_large() {
    assert!(matches!(Board::new(12, 12), Err(GameError::BitBoard(_))));
    assert!(matches!(Board::new(0, 5), Err(GameError::BitBoard(_))));
    let board = Board::new(11, 11).unwrap();
    assert_eq!((board.rows(), board.cols()), (11, 11));
    assert!(Board::new(8, 16).is_ok());
}

#[test]
fn test_target_view_hides_intact_ships() {
    let mut board = board_with_destroyer();
    board.take_shot((0, 0));
    board.take_shot((5, 5));
    let view = board.target_view();
    assert!(view.is_hit((0, 0)));
    assert!(view.is_fired((5, 5)));
    assert!(!view.is_hit((5, 5)));
    assert!(!view.is_fired((0, 1)));
    assert!(!view.is_sunk_cell((0, 0)));
    assert_eq!(view.remaining_ship_lengths(), &[2]);
    assert_eq!(view.unfired_cells().count(), 98);

    board.take_shot((0, 1));
    let view = board.target_view();
    assert!(view.is_sunk_cell((0, 0)));
    assert!(view.remaining_ship_lengths().is_empty());
}
