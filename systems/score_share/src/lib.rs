#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Optional hand-off of winning scores to an external channel.
//!
//! The sink is a capability injected by the adapter. It is offered each
//! winning score exactly once per session, and nothing it does, including
//! failing or being absent, can reach back into the game.

use path_game_core::{BoardSize, Event, Seed};
use thiserror::Error;

/// Score delivered to a sink when a session is won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScoreReport {
    /// Seed of the board the score was earned on.
    pub seed: Seed,
    /// Side length of that board.
    pub size: BoardSize,
    /// Final score of the session.
    pub score: u64,
}

/// Failures a sink may report. They are counted and otherwise ignored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScoreSinkError {
    /// The external channel is not reachable right now.
    #[error("score channel is unavailable")]
    Unavailable,
    /// The external channel refused the report.
    #[error("score channel rejected the report: {0}")]
    Rejected(String),
}

/// External channel able to receive winning scores.
pub trait ScoreSink {
    /// Delivers a single report.
    fn send(&mut self, report: ScoreReport) -> Result<(), ScoreSinkError>;
}

/// System that forwards each won session's score to an optional sink.
#[derive(Debug, Clone)]
pub struct ScoreShare {
    seed: Seed,
    size: BoardSize,
    sent_this_session: bool,
    delivered: u32,
    failed: u32,
}

impl ScoreShare {
    /// Creates the system for the session that is already running.
    #[must_use]
    pub const fn new(seed: Seed, size: BoardSize) -> Self {
        Self {
            seed,
            size,
            sent_this_session: false,
            delivered: 0,
            failed: 0,
        }
    }

    /// Consumes world events, sending the score on every Won transition.
    pub fn handle<S>(&mut self, events: &[Event], mut sink: Option<&mut S>)
    where
        S: ScoreSink + ?Sized,
    {
        for event in events {
            match *event {
                Event::SessionStarted { seed, size } => {
                    self.seed = seed;
                    self.size = size;
                    self.sent_this_session = false;
                }
                Event::GameWon { score } if !self.sent_this_session => {
                    self.sent_this_session = true;
                    let Some(sink) = sink.as_deref_mut() else {
                        continue;
                    };
                    let report = ScoreReport {
                        seed: self.seed,
                        size: self.size,
                        score,
                    };
                    match sink.send(report) {
                        Ok(()) => self.delivered = self.delivered.saturating_add(1),
                        Err(_) => self.failed = self.failed.saturating_add(1),
                    }
                }
                _ => {}
            }
        }
    }

    /// Number of reports the sink accepted.
    #[must_use]
    pub const fn delivered(&self) -> u32 {
        self.delivered
    }

    /// Number of reports the sink failed to accept.
    #[must_use]
    pub const fn failed(&self) -> u32 {
        self.failed
    }
}
