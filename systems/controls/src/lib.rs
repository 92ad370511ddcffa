#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input-mapping system that turns per-frame presses into world commands.

use path_game_core::{Command, Direction, Event, GameStatus, Seed};

/// Edge-triggered presses distilled from adapter-provided frame input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Up was pressed on this frame.
    pub up: bool,
    /// Down was pressed on this frame.
    pub down: bool,
    /// Left was pressed on this frame.
    pub left: bool,
    /// Right was pressed on this frame.
    pub right: bool,
    /// Restart was pressed on this frame.
    pub restart: bool,
}

impl ControlInput {
    /// Input holding a single direction press.
    #[must_use]
    pub const fn pressed(direction: Direction) -> Self {
        let mut input = Self {
            up: false,
            down: false,
            left: false,
            right: false,
            restart: false,
        };
        match direction {
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
        }
        input
    }

    /// Input holding only a restart press.
    #[must_use]
    pub const fn restart() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            restart: true,
        }
    }

    /// Highest-priority direction pressed, honouring Up > Down > Left > Right.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|direction| match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        })
    }
}

/// System that routes input to moves while playing and to restarts once the game ends.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    status: GameStatus,
}

impl Controls {
    /// Creates a new controls system expecting a session in progress.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: GameStatus::Playing,
        }
    }

    /// Status last observed through world events.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Consumes world events and frame input to emit at most one command.
    ///
    /// `restart_seed` is only called when a restart is emitted, so adapters
    /// can resolve the seed for the next board lazily (for example from the
    /// current date).
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: ControlInput,
        restart_seed: F,
        out: &mut Vec<Command>,
    ) where
        F: FnOnce() -> Option<Seed>,
    {
        for event in events {
            match event {
                Event::SessionStarted { .. } => self.status = GameStatus::Playing,
                Event::GameWon { .. } => self.status = GameStatus::Won,
                Event::GameStuck { .. } => self.status = GameStatus::Stuck,
                _ => {}
            }
        }

        if self.status.is_terminal() {
            if input.restart {
                out.push(Command::Restart {
                    seed: restart_seed(),
                });
            }
            return;
        }

        if let Some(direction) = input.direction() {
            out.push(Command::AttemptMove { direction });
        }
    }
}
