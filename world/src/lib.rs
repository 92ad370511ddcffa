#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Path Game.
//!
//! The world owns the immutable board and the mutable session laid on top of
//! it: player position, visited cells, score, consumed multipliers and the
//! terminal status. Every mutation flows through [`apply`] (or the
//! [`World::attempt_move`] / [`World::restart`] entry points it dispatches to)
//! and is reported back as [`Event`] values.

use path_game_core::{
    Board, BoardSize, Cell, CellCoord, Command, Direction, DirectionSet, Event, GameStatus,
    MoveRejection, MoveResult, Seed,
};
use path_game_system_generation::MazeGenerator;

/// Represents the authoritative Path Game world state.
#[derive(Clone, Debug)]
pub struct World {
    generator: MazeGenerator,
    board: Board,
    session: Session,
}

impl World {
    /// Generates a board and opens a fresh session on it.
    #[must_use]
    pub fn new(size: BoardSize, seed: Seed) -> Self {
        let generator = MazeGenerator::new();
        let board = generator.generate_board(size, seed);
        Self::with_generator(generator, board)
    }

    /// Opens a fresh session on an existing board.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self::with_generator(MazeGenerator::new(), board)
    }

    fn with_generator(generator: MazeGenerator, board: Board) -> Self {
        let session = Session::begin(&board);
        Self {
            generator,
            board,
            session,
        }
    }

    /// Moves the player two cells in `direction` when the move is legal.
    ///
    /// Rejected moves leave the session untouched. Accepted moves mark the
    /// passage and destination visited, apply the destination's scoring
    /// effect, and then resolve the terminal status.
    pub fn attempt_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) -> MoveResult {
        let step = if self.session.status.is_terminal() {
            Err(MoveRejection::GameOver)
        } else {
            self.check_move(direction)
        };

        let (passage, to) = match step {
            Ok(step) => step,
            Err(reason) => {
                out_events.push(Event::MoveRejected { direction, reason });
                return MoveResult::Rejected(reason);
            }
        };

        let from = self.session.player;
        self.session.visit(passage);
        self.session.visit(to);
        self.session.player = to;
        self.session.moves = self.session.moves.saturating_add(1);
        out_events.push(Event::PlayerMoved { from, passage, to });

        self.score_arrival(to, out_events);

        let score = self.session.score;
        self.session.status = if to == self.board.goal() {
            out_events.push(Event::GameWon { score });
            GameStatus::Won
        } else if self.valid_moves().is_empty() {
            out_events.push(Event::GameStuck { score });
            GameStatus::Stuck
        } else {
            GameStatus::Playing
        };

        MoveResult::Accepted {
            to,
            score,
            status: self.session.status,
        }
    }

    /// Replaces the session with a fresh one.
    ///
    /// A restart is honoured once the session ended, or before the first
    /// move. The board is regenerated only when `seed` differs from the seed
    /// of the current board. Returns whether the restart happened.
    pub fn restart(&mut self, seed: Option<Seed>, out_events: &mut Vec<Event>) -> bool {
        if !self.session.status.is_terminal() && self.session.moves > 0 {
            out_events.push(Event::RestartIgnored);
            return false;
        }

        if let Some(seed) = seed.filter(|seed| *seed != self.board.seed()) {
            self.board = self.generator.generate_board(self.board.size(), seed);
        }
        self.session = Session::begin(&self.board);
        out_events.push(Event::SessionStarted {
            seed: self.board.seed(),
            size: self.board.size(),
        });
        true
    }

    /// Directions the player may currently travel in.
    #[must_use]
    pub fn valid_moves(&self) -> DirectionSet {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.check_move(*direction).is_ok())
            .collect()
    }

    /// Resolves the passage and destination of a move without applying it.
    fn check_move(&self, direction: Direction) -> Result<(CellCoord, CellCoord), MoveRejection> {
        let from = self.session.player;
        let to = from
            .offset(direction, 2)
            .filter(|to| self.board.contains(*to))
            .ok_or(MoveRejection::OutOfBounds)?;
        let passage = from
            .offset(direction, 1)
            .ok_or(MoveRejection::OutOfBounds)?;

        if self.board.cell(to).map_or(true, |cell| cell.is_wall()) {
            return Err(MoveRejection::Wall);
        }
        if self.session.is_visited(passage) {
            return Err(MoveRejection::PassageVisited);
        }

        Ok((passage, to))
    }

    fn score_arrival(&mut self, to: CellCoord, out_events: &mut Vec<Event>) {
        let Some(cell) = self.board.cell(to) else {
            return;
        };

        match cell {
            Cell::Scored(points) => {
                self.session.score = self.session.score.saturating_add(u64::from(points));
                out_events.push(Event::ScoreAdded {
                    cell: to,
                    points,
                    score: self.session.score,
                });
            }
            Cell::Multiplier(factor) => {
                if self.session.consume_multiplier(to) {
                    self.session.score = self.session.score.saturating_mul(u64::from(factor));
                    out_events.push(Event::ScoreMultiplied {
                        cell: to,
                        factor,
                        score: self.session.score,
                    });
                }
            }
            Cell::Wall | Cell::Passage | Cell::Start | Cell::Goal => {}
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AttemptMove { direction } => {
            let _ = world.attempt_move(direction, out_events);
        }
        Command::Restart { seed } => {
            let _ = world.restart(seed, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use path_game_core::{Board, CellCoord, DirectionSet, GameStatus, Seed, VisitedView};

    use super::World;

    /// Provides read-only access to the active board.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Seed that generated the active board.
    #[must_use]
    pub fn seed(world: &World) -> Seed {
        world.board.seed()
    }

    /// Intersection the player currently occupies.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.session.player
    }

    /// Running score of the session.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.session.score
    }

    /// Lifecycle status of the session.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.session.status
    }

    /// Number of accepted moves in the session.
    #[must_use]
    pub fn moves_made(world: &World) -> u32 {
        world.session.moves
    }

    /// Exposes a read-only view of the visited grid.
    #[must_use]
    pub fn visited_view(world: &World) -> VisitedView<'_> {
        VisitedView::new(&world.session.visited, world.board.size())
    }

    /// Reports whether the multiplier at `cell` already scaled the score.
    #[must_use]
    pub fn multiplier_consumed(world: &World, cell: CellCoord) -> bool {
        world.session.is_consumed(cell)
    }

    /// Directions the player may currently travel in.
    #[must_use]
    pub fn valid_moves(world: &World) -> DirectionSet {
        world.valid_moves()
    }
}

#[derive(Clone, Debug)]
struct Session {
    size: BoardSize,
    player: CellCoord,
    visited: Vec<bool>,
    consumed: Vec<bool>,
    score: u64,
    status: GameStatus,
    moves: u32,
}

impl Session {
    fn begin(board: &Board) -> Self {
        let size = board.size();
        let mut session = Self {
            size,
            player: board.start(),
            visited: vec![false; size.cell_count()],
            consumed: vec![false; size.cell_count()],
            score: 0,
            status: GameStatus::Playing,
            moves: 0,
        };
        session.visit(board.start());
        session
    }

    fn is_visited(&self, cell: CellCoord) -> bool {
        self.size
            .index(cell)
            .and_then(|index| self.visited.get(index).copied())
            .unwrap_or(false)
    }

    fn visit(&mut self, cell: CellCoord) {
        if let Some(slot) = self
            .size
            .index(cell)
            .and_then(|index| self.visited.get_mut(index))
        {
            *slot = true;
        }
    }

    fn is_consumed(&self, cell: CellCoord) -> bool {
        self.size
            .index(cell)
            .and_then(|index| self.consumed.get(index).copied())
            .unwrap_or(false)
    }

    /// Marks the multiplier consumed, returning `true` on first use.
    fn consume_multiplier(&mut self, cell: CellCoord) -> bool {
        match self
            .size
            .index(cell)
            .and_then(|index| self.consumed.get_mut(index))
        {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nine_by_nine() -> World {
        World::new(BoardSize::new(9).expect("valid size"), Seed::new(12_345))
    }

    #[test]
    fn session_starts_on_visited_start_cell() {
        let world = nine_by_nine();

        assert_eq!(query::player(&world), CellCoord::new(1, 1));
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::status(&world), GameStatus::Playing);
        assert_eq!(
            query::visited_view(&world).iter().collect::<Vec<_>>(),
            vec![CellCoord::new(1, 1)]
        );
    }

    #[test]
    fn start_offers_down_and_right_only() {
        let world = nine_by_nine();
        let moves = query::valid_moves(&world);

        assert_eq!(
            moves.iter().collect::<Vec<_>>(),
            vec![Direction::Down, Direction::Right]
        );
    }

    #[test]
    fn restart_mid_session_is_ignored() {
        let mut world = nine_by_nine();
        let mut events = Vec::new();
        let _ = world.attempt_move(Direction::Right, &mut events);
        events.clear();

        assert!(!world.restart(None, &mut events));
        assert_eq!(events, vec![Event::RestartIgnored]);
        assert_eq!(query::moves_made(&world), 1);
    }

    #[test]
    fn restart_before_first_move_swaps_board() {
        let mut world = nine_by_nine();
        let mut events = Vec::new();

        assert!(world.restart(Some(Seed::new(1)), &mut events));
        assert_eq!(query::seed(&world), Seed::new(1));
        assert_eq!(
            events,
            vec![Event::SessionStarted {
                seed: Seed::new(1),
                size: BoardSize::new(9).expect("valid size"),
            }]
        );
    }

    #[test]
    fn consume_multiplier_reports_first_use_only() {
        let board = MazeGenerator::new()
            .generate(7, Seed::new(3))
            .expect("valid board");
        let mut session = Session::begin(&board);
        let cell = CellCoord::new(3, 3);

        assert!(session.consume_multiplier(cell));
        assert!(!session.consume_multiplier(cell));
        assert!(session.is_consumed(cell));
    }
}
