use path_game_core::{
    BoardLayout, BoardSize, Cell, Command, Direction, Event, GameStatus, Seed,
};
use path_game_system_score_share::{ScoreReport, ScoreShare, ScoreSink, ScoreSinkError};
use path_game_world::{self as world, query, World};

struct BrokenChannel {
    attempts: u32,
}

impl ScoreSink for BrokenChannel {
    fn send(&mut self, _report: ScoreReport) -> Result<(), ScoreSinkError> {
        self.attempts += 1;
        Err(ScoreSinkError::Unavailable)
    }
}

#[derive(Default)]
struct Inbox {
    reports: Vec<ScoreReport>,
}

impl ScoreSink for Inbox {
    fn send(&mut self, report: ScoreReport) -> Result<(), ScoreSinkError> {
        self.reports.push(report);
        Ok(())
    }
}

fn straight_board() -> World {
    let size = BoardSize::new(7).expect("valid size");
    let mut layout = BoardLayout::lattice(size);
    for coord in size.intersections() {
        layout.set(coord, Cell::Scored(2));
    }
    layout.set(size.start(), Cell::Start);
    layout.set(size.goal(), Cell::Goal);
    World::from_board(layout.finish(Seed::new(77)))
}

fn play_to_goal(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    for direction in [
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
    ] {
        world::apply(world, Command::AttemptMove { direction }, &mut events);
    }
    events
}

#[test]
fn failing_sink_never_touches_game_state() {
    let mut world = straight_board();
    let mut share = ScoreShare::new(query::seed(&world), query::board(&world).size());
    let mut channel = BrokenChannel { attempts: 0 };

    let events = play_to_goal(&mut world);
    share.handle(&events, Some(&mut channel));

    assert_eq!(channel.attempts, 1);
    assert_eq!(share.failed(), 1);
    assert_eq!(query::status(&world), GameStatus::Won);
    assert_eq!(query::score(&world), 6);
}

#[test]
fn each_won_session_is_reported() {
    let mut world = straight_board();
    let mut share = ScoreShare::new(query::seed(&world), query::board(&world).size());
    let mut inbox = Inbox::default();

    let events = play_to_goal(&mut world);
    share.handle(&events, Some(&mut inbox));

    let mut restart = Vec::new();
    world::apply(&mut world, Command::Restart { seed: None }, &mut restart);
    share.handle(&restart, Some(&mut inbox));

    let events = play_to_goal(&mut world);
    share.handle(&events, Some(&mut inbox));

    let scores: Vec<u64> = inbox.reports.iter().map(|report| report.score).collect();
    assert_eq!(scores, vec![6, 6]);
    assert!(inbox
        .reports
        .iter()
        .all(|report| report.seed == Seed::new(77)));
}
