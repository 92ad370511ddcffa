use path_game_core::Event;
use path_game_system_controls::{ControlInput, Controls};
use path_game_system_score_share::ScoreShare;
use path_game_world::{self as world, query, World};

use crate::{seed::SeedSource, share::StdoutSink};

/// Drives one frame at a time: input, commands, world, then observers.
#[derive(Debug)]
pub(crate) struct GameLoop {
    world: World,
    controls: Controls,
    share: ScoreShare,
    sink: Option<StdoutSink>,
    seed_source: SeedSource,
    verbose: bool,
    pending: Vec<Event>,
}

impl GameLoop {
    pub(crate) fn new(
        world: World,
        seed_source: SeedSource,
        sink: Option<StdoutSink>,
        verbose: bool,
    ) -> Self {
        let share = ScoreShare::new(query::seed(&world), query::board(&world).size());
        Self {
            world,
            controls: Controls::new(),
            share,
            sink,
            seed_source,
            verbose,
            pending: Vec::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn sink(&self) -> Option<&StdoutSink> {
        self.sink.as_ref()
    }

    /// Runs a single frame. Returns whether the world reported anything.
    pub(crate) fn step(&mut self, input: ControlInput) -> bool {
        let seed_source = self.seed_source;
        let mut commands = Vec::new();
        self.controls.handle(
            &self.pending,
            input,
            || seed_source.restart_seed(),
            &mut commands,
        );

        self.pending.clear();
        for command in commands {
            world::apply(&mut self.world, command, &mut self.pending);
        }

        self.share.handle(&self.pending, self.sink.as_mut());
        if self.verbose {
            for event in &self.pending {
                eprintln!("[path-game] {event:?}");
            }
        }

        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_game_core::{BoardSize, Direction, GameStatus, Seed};

    fn game(sink: Option<StdoutSink>) -> GameLoop {
        let world = World::new(BoardSize::new(7).expect("valid size"), Seed::new(9));
        GameLoop::new(world, SeedSource::Fixed(Seed::new(9)), sink, false)
    }

    #[test]
    fn rejected_moves_still_report_events() {
        let mut game = game(None);
        assert!(game.step(ControlInput::pressed(Direction::Up)));
        assert_eq!(query::moves_made(game.world()), 0);
    }

    #[test]
    fn idle_frames_are_quiet() {
        let mut game = game(None);
        assert!(!game.step(ControlInput::default()));
    }

    #[test]
    fn winning_prints_one_share_string() {
        let mut game = game(Some(StdoutSink::default()));
        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ] {
            let _ = game.step(ControlInput::pressed(direction));
        }

        assert_eq!(query::status(game.world()), GameStatus::Won);
        assert_eq!(game.sink().map(|sink| sink.printed().len()), Some(1));
    }
}
