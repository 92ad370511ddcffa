use path_game_core::{
    BoardLayout, BoardSize, Cell, CellCoord, Command, Direction, Event, GameStatus,
    MoveRejection, MoveResult, Seed,
};
use path_game_world::{self as world, query, World};

/// Builds a 7x7 board where every intersection scores one point unless overridden.
fn crafted(overrides: &[(u32, u32, Cell)]) -> World {
    let size = BoardSize::new(7).expect("valid size");
    let mut layout = BoardLayout::lattice(size);
    for coord in size.intersections() {
        layout.set(coord, Cell::Scored(1));
    }
    layout.set(size.start(), Cell::Start);
    layout.set(size.goal(), Cell::Goal);
    for &(column, row, cell) in overrides {
        layout.set(CellCoord::new(column, row), cell);
    }
    World::from_board(layout.finish(Seed::new(0)))
}

fn walk(world: &mut World, directions: &[Direction]) -> Vec<Event> {
    let mut events = Vec::new();
    for &direction in directions {
        world::apply(world, Command::AttemptMove { direction }, &mut events);
    }
    events
}

#[test]
fn first_move_right_consumes_the_passage() {
    let mut world = World::new(BoardSize::new(9).expect("valid size"), Seed::new(12_345));
    let mut events = Vec::new();

    let result = world.attempt_move(Direction::Right, &mut events);

    assert!(result.is_accepted());
    assert_eq!(query::player(&world), CellCoord::new(3, 1));
    assert_eq!(
        query::visited_view(&world).iter().collect::<Vec<_>>(),
        vec![
            CellCoord::new(1, 1),
            CellCoord::new(2, 1),
            CellCoord::new(3, 1)
        ]
    );
    assert_eq!(
        events.first(),
        Some(&Event::PlayerMoved {
            from: CellCoord::new(1, 1),
            passage: CellCoord::new(2, 1),
            to: CellCoord::new(3, 1),
        })
    );
}

#[test]
fn moving_off_the_board_is_rejected_without_side_effects() {
    let mut world = World::new(BoardSize::new(9).expect("valid size"), Seed::new(12_345));
    let mut events = Vec::new();

    let result = world.attempt_move(Direction::Up, &mut events);

    assert_eq!(result, MoveResult::Rejected(MoveRejection::OutOfBounds));
    assert_eq!(query::player(&world), CellCoord::new(1, 1));
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::visited_view(&world).len(), 1);
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            direction: Direction::Up,
            reason: MoveRejection::OutOfBounds,
        }]
    );
}

#[test]
fn wall_destination_is_rejected() {
    let mut world = crafted(&[(3, 1, Cell::Wall)]);
    let mut events = Vec::new();

    let result = world.attempt_move(Direction::Right, &mut events);

    assert_eq!(result, MoveResult::Rejected(MoveRejection::Wall));
    assert!(!query::valid_moves(&world).contains(Direction::Right));
}

#[test]
fn multiplier_scales_the_running_total() {
    let mut world = crafted(&[
        (3, 1, Cell::Scored(2)),
        (3, 3, Cell::Scored(3)),
        (1, 3, Cell::Scored(3)),
        (1, 5, Cell::Multiplier(2)),
    ]);

    let _ = walk(&mut world, &[Direction::Right, Direction::Down]);
    assert_eq!(query::score(&world), 5);

    let _ = walk(&mut world, &[Direction::Left]);
    assert_eq!(query::score(&world), 8);

    let events = walk(&mut world, &[Direction::Down]);
    assert_eq!(query::score(&world), 16);
    assert!(events.contains(&Event::ScoreMultiplied {
        cell: CellCoord::new(1, 5),
        factor: 2,
        score: 16,
    }));
}

#[test]
fn multiplier_applies_once_when_revisited() {
    let mut world = crafted(&[(3, 3, Cell::Multiplier(2))]);

    let _ = walk(
        &mut world,
        &[
            Direction::Down,
            Direction::Right,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ],
    );
    assert_eq!(query::score(&world), 5);
    assert!(query::multiplier_consumed(&world, CellCoord::new(3, 3)));

    let events = walk(&mut world, &[Direction::Left]);
    assert_eq!(query::player(&world), CellCoord::new(3, 3));
    assert_eq!(query::score(&world), 5);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ScoreMultiplied { .. })));
}

#[test]
fn travelled_passage_blocks_backtracking() {
    let mut world = crafted(&[]);

    let _ = walk(&mut world, &[Direction::Right]);
    let mut events = Vec::new();
    let result = world.attempt_move(Direction::Left, &mut events);

    assert_eq!(result, MoveResult::Rejected(MoveRejection::PassageVisited));
    assert_eq!(query::player(&world), CellCoord::new(3, 1));
}

#[test]
fn reaching_the_goal_wins_even_with_moves_left() {
    let mut world = crafted(&[]);

    let events = walk(
        &mut world,
        &[
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ],
    );

    assert_eq!(query::status(&world), GameStatus::Won);
    assert!(query::valid_moves(&world).contains(Direction::Left));
    assert_eq!(events.last(), Some(&Event::GameWon { score: 3 }));

    let mut after = Vec::new();
    assert_eq!(
        world.attempt_move(Direction::Left, &mut after),
        MoveResult::Rejected(MoveRejection::GameOver)
    );
    assert_eq!(query::player(&world), CellCoord::new(5, 5));
}

#[test]
fn closing_the_loop_at_start_leaves_the_player_stuck() {
    let mut world = crafted(&[]);

    let events = walk(
        &mut world,
        &[
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ],
    );

    assert_eq!(query::player(&world), CellCoord::new(1, 1));
    assert!(query::valid_moves(&world).is_empty());
    assert_eq!(query::status(&world), GameStatus::Stuck);
    assert_eq!(events.last(), Some(&Event::GameStuck { score: 3 }));
}

#[test]
fn valid_moves_is_a_pure_query() {
    let mut world = crafted(&[]);
    let _ = walk(&mut world, &[Direction::Down]);

    let first = query::valid_moves(&world);
    let second = query::valid_moves(&world);

    assert_eq!(first, second);
    assert_eq!(query::player(&world), CellCoord::new(1, 3));
    assert_eq!(query::visited_view(&world).len(), 3);
}

#[test]
fn visited_set_only_grows() {
    let mut world = World::new(BoardSize::new(11).expect("valid size"), Seed::new(7));
    let script = [
        Direction::Right,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    let mut previous: Vec<CellCoord> = query::visited_view(&world).iter().collect();
    for direction in script {
        let mut events = Vec::new();
        let _ = world.attempt_move(direction, &mut events);
        let current: Vec<CellCoord> = query::visited_view(&world).iter().collect();
        assert!(previous.iter().all(|cell| current.contains(cell)));
        previous = current;
    }
}

#[test]
fn restart_after_win_reuses_the_board() {
    let mut world = crafted(&[(3, 1, Cell::Scored(3))]);
    let board_before = query::board(&world).clone();
    let _ = walk(
        &mut world,
        &[
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ],
    );

    let mut events = Vec::new();
    world::apply(&mut world, Command::Restart { seed: None }, &mut events);

    assert_eq!(query::board(&world), &board_before);
    assert_eq!(query::status(&world), GameStatus::Playing);
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::player(&world), CellCoord::new(1, 1));
    assert_eq!(query::moves_made(&world), 0);
    assert!(!query::visited_view(&world).contains(CellCoord::new(2, 1)));
}

#[test]
fn restart_with_new_seed_regenerates() {
    let size = BoardSize::new(9).expect("valid size");
    let mut world = World::new(size, Seed::new(1));
    let _ = walk(
        &mut world,
        &[
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ],
    );
    assert_eq!(query::status(&world), GameStatus::Stuck);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Restart {
            seed: Some(Seed::new(2)),
        },
        &mut events,
    );

    assert_eq!(query::seed(&world), Seed::new(2));
    let expected = World::new(size, Seed::new(2));
    assert_eq!(query::board(&world), query::board(&expected));
}
