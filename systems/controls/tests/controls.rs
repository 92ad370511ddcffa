use path_game_core::{BoardSize, Command, Direction, Event, GameStatus, Seed};
use path_game_system_controls::{ControlInput, Controls};
use path_game_world::{self as world, query, World};

#[test]
fn direction_press_emits_move_while_playing() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();

    controls.handle(
        &[],
        ControlInput::pressed(Direction::Right),
        || None,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::AttemptMove {
            direction: Direction::Right,
        }],
        "a direction press should become a move command",
    );
}

#[test]
fn simultaneous_presses_honour_priority() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();

    controls.handle(
        &[],
        ControlInput {
            down: true,
            right: true,
            ..ControlInput::default()
        },
        || None,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::AttemptMove {
            direction: Direction::Down,
        }],
        "only the highest-priority direction is honoured per frame",
    );
}

#[test]
fn restart_ignored_while_playing() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();
    let mut seed_requested = false;

    controls.handle(
        &[],
        ControlInput::restart(),
        || {
            seed_requested = true;
            None
        },
        &mut commands,
    );

    assert!(commands.is_empty(), "restart must wait for a terminal state");
    assert!(!seed_requested, "seed source should not be consulted");
}

#[test]
fn terminal_state_routes_only_restart() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();

    controls.handle(
        &[Event::GameWon { score: 12 }],
        ControlInput {
            up: true,
            restart: true,
            ..ControlInput::default()
        },
        || Some(Seed::new(20_240_101)),
        &mut commands,
    );

    assert_eq!(controls.status(), GameStatus::Won);
    assert_eq!(
        commands,
        vec![Command::Restart {
            seed: Some(Seed::new(20_240_101)),
        }],
        "moves are dropped once the game ended",
    );
}

#[test]
fn session_start_reopens_move_input() {
    let mut controls = Controls::default();
    let mut commands = Vec::new();
    let size = BoardSize::new(9).expect("valid size");

    controls.handle(
        &[Event::GameStuck { score: 4 }],
        ControlInput::default(),
        || None,
        &mut commands,
    );
    controls.handle(
        &[Event::SessionStarted {
            seed: Seed::new(1),
            size,
        }],
        ControlInput::pressed(Direction::Left),
        || None,
        &mut commands,
    );

    assert_eq!(controls.status(), GameStatus::Playing);
    assert_eq!(
        commands,
        vec![Command::AttemptMove {
            direction: Direction::Left,
        }]
    );
}

#[test]
fn frame_loop_plays_to_stuck_and_restarts() {
    let mut world = World::new(BoardSize::new(9).expect("valid size"), Seed::new(5));
    let mut controls = Controls::new();
    let mut pending = Vec::new();
    let frames = [
        ControlInput::pressed(Direction::Right),
        ControlInput::pressed(Direction::Down),
        ControlInput::pressed(Direction::Left),
        ControlInput::pressed(Direction::Up),
        ControlInput::pressed(Direction::Right),
        ControlInput::restart(),
    ];

    let mut statuses = Vec::new();
    for input in frames {
        let mut commands = Vec::new();
        controls.handle(&pending, input, || None, &mut commands);
        pending.clear();
        for command in commands {
            world::apply(&mut world, command, &mut pending);
        }
        statuses.push(query::status(&world));
    }

    assert_eq!(
        statuses,
        vec![
            GameStatus::Playing,
            GameStatus::Playing,
            GameStatus::Playing,
            GameStatus::Stuck,
            GameStatus::Stuck,
            GameStatus::Playing,
        ]
    );
    assert_eq!(query::seed(&world), Seed::new(5));
    assert_eq!(query::moves_made(&world), 0);
}
