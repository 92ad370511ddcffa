#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Path Game engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Boards are produced once per session by the
//! generation system and stay immutable while the world walks them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title shown by adapters when the game boots.
pub const GAME_TITLE: &str = "Path Game";

/// Side length used when no explicit board size is configured.
pub const DEFAULT_BOARD_SIZE: u32 = 9;

/// Smallest side length accepted before intersection capacity is considered.
pub const MIN_BOARD_SIZE: u32 = 5;

/// Largest side length that still fits a single screen.
pub const MAX_BOARD_SIZE: u32 = 101;

/// Point values an intersection may carry.
pub const SCORE_VALUES: [u8; 3] = [1, 2, 3];

/// Multiplier factors placed on every board, listed before shuffling.
pub const MULTIPLIER_FACTORS: [u8; 3] = [2, 2, 3];

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that the player travel to the adjacent intersection.
    AttemptMove {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
    /// Requests a fresh session, regenerating the board when the seed changes.
    Restart {
        /// Seed for the next board. `None` keeps the current board.
        seed: Option<Seed>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Announces that a fresh session began on the described board.
    SessionStarted {
        /// Seed that generated the active board.
        seed: Seed,
        /// Side length of the active board.
        size: BoardSize,
    },
    /// Confirms that the player travelled between two intersections.
    PlayerMoved {
        /// Intersection occupied before the move.
        from: CellCoord,
        /// Passage midpoint consumed by the move.
        passage: CellCoord,
        /// Intersection occupied after the move.
        to: CellCoord,
    },
    /// Reports that a move request left the session untouched.
    MoveRejected {
        /// Direction requested by the command.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Reports that a scored intersection added points to the total.
    ScoreAdded {
        /// Intersection that awarded the points.
        cell: CellCoord,
        /// Points added by the intersection.
        points: u8,
        /// Running score after the addition.
        score: u64,
    },
    /// Reports that a multiplier intersection scaled the running total.
    ScoreMultiplied {
        /// Intersection holding the multiplier.
        cell: CellCoord,
        /// Factor applied to the score.
        factor: u8,
        /// Running score after multiplication.
        score: u64,
    },
    /// Announces that the player reached the goal.
    GameWon {
        /// Final score of the session.
        score: u64,
    },
    /// Announces that the player ran out of legal moves before the goal.
    GameStuck {
        /// Final score of the session.
        score: u64,
    },
    /// Reports that a restart was requested while a session was still in progress.
    RestartIgnored,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction, in the order moves are tried and input is prioritised.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Down => 0b0010,
            Self::Left => 0b0100,
            Self::Right => 0b1000,
        }
    }
}

/// Compact set of directions, iterated in [`Direction::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet {
    bits: u8,
}

impl DirectionSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Adds a direction to the set.
    pub fn insert(&mut self, direction: Direction) {
        self.bits |= direction.bit();
    }

    /// Reports whether the set holds the direction.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        self.bits & direction.bit() != 0
    }

    /// Reports whether the set holds no directions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of directions in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterator over the contained directions in probing order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::empty();
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cell reached by travelling `distance` cells in `direction`.
    ///
    /// Returns `None` when the walk would leave the non-negative quadrant.
    /// Upper bounds are the board's concern.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: u32) -> Option<CellCoord> {
        match direction {
            Direction::Up => self
                .row
                .checked_sub(distance)
                .map(|row| Self::new(self.column, row)),
            Direction::Down => self
                .row
                .checked_add(distance)
                .map(|row| Self::new(self.column, row)),
            Direction::Left => self
                .column
                .checked_sub(distance)
                .map(|column| Self::new(column, self.row)),
            Direction::Right => self
                .column
                .checked_add(distance)
                .map(|column| Self::new(column, self.row)),
        }
    }

    /// Reports whether both coordinates are odd, which marks an intersection.
    #[must_use]
    pub const fn is_intersection(&self) -> bool {
        self.column % 2 == 1 && self.row % 2 == 1
    }

    /// Reports whether exactly one coordinate is odd, which marks a passage midpoint.
    #[must_use]
    pub const fn is_passage(&self) -> bool {
        (self.column % 2 == 1) != (self.row % 2 == 1)
    }
}

/// Contents of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable cell on the outer ring or the inner even/even lattice.
    Wall,
    /// Open passage midpoint connecting two intersections.
    Passage,
    /// Intersection where every session begins.
    Start,
    /// Intersection that ends the session when reached.
    Goal,
    /// Intersection that adds its value to the score on arrival.
    Scored(u8),
    /// Intersection that multiplies the score by its factor, once.
    Multiplier(u8),
}

impl Cell {
    /// Reports whether the cell blocks movement.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Validated side length of a square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardSize(u32);

impl BoardSize {
    /// Validates a side length.
    ///
    /// The side must be odd, between [`MIN_BOARD_SIZE`] and [`MAX_BOARD_SIZE`],
    /// and leave room for every multiplier on an intersection other than
    /// Start and Goal.
    pub fn new(side: u32) -> Result<Self, GenerationError> {
        if side % 2 == 0 {
            return Err(GenerationError::EvenBoardSize { side });
        }
        if side < MIN_BOARD_SIZE {
            return Err(GenerationError::BoardTooSmall {
                side,
                minimum: MIN_BOARD_SIZE,
            });
        }
        if side > MAX_BOARD_SIZE {
            return Err(GenerationError::BoardTooLarge {
                side,
                maximum: MAX_BOARD_SIZE,
            });
        }

        let per_axis = u64::from((side - 1) / 2);
        let available = (per_axis * per_axis).saturating_sub(2);
        let required = MULTIPLIER_FACTORS.len() as u64;
        if available < required {
            return Err(GenerationError::NotEnoughIntersections {
                side,
                available,
                required,
            });
        }

        Ok(Self(side))
    }

    /// Number of cells along each edge.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.0
    }

    /// Number of intersections along each edge.
    #[must_use]
    pub const fn intersections_per_axis(&self) -> u32 {
        (self.0 - 1) / 2
    }

    /// Maps the `index`-th intersection along an axis onto its odd coordinate.
    #[must_use]
    pub const fn odd_coordinate(index: u32) -> u32 {
        index * 2 + 1
    }

    /// Intersection where every session begins.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        CellCoord::new(1, 1)
    }

    /// Intersection that ends the session when reached.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        CellCoord::new(self.0 - 2, self.0 - 2)
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let side = self.0 as usize;
        side * side
    }

    /// Reports whether the coordinate lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.0 && cell.row() < self.0
    }

    /// Row-major index of the coordinate, if it lies on the board.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.0).ok()?;
        Some(row * width + column)
    }

    /// Reports whether the coordinate belongs to the outer ring or inner lattice.
    #[must_use]
    pub const fn is_wall_position(&self, cell: CellCoord) -> bool {
        let edge = self.0 - 1;
        let column = cell.column();
        let row = cell.row();
        column == 0
            || row == 0
            || column == edge
            || row == edge
            || (column % 2 == 0 && row % 2 == 0)
    }

    /// Iterator over every intersection in row-major order.
    pub fn intersections(&self) -> impl Iterator<Item = CellCoord> {
        let per_axis = self.intersections_per_axis();
        (0..per_axis).flat_map(move |row| {
            (0..per_axis).map(move |column| {
                CellCoord::new(Self::odd_coordinate(column), Self::odd_coordinate(row))
            })
        })
    }
}

/// Seed that drives board generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seed(u64);

impl Seed {
    /// Wraps an explicit seed value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Daily-puzzle seed for a calendar date, encoded as `YYYYMMDD`.
    #[must_use]
    pub const fn from_date(year: u32, month: u32, day: u32) -> Self {
        Self(year as u64 * 10_000 + month as u64 * 100 + day as u64)
    }

    /// Retrieves the numeric seed value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutable cell grid used while a board is being laid out.
///
/// A layout starts with the wall lattice already in place and every other
/// cell open. Generators overwrite intersections and then seal the layout
/// into an immutable [`Board`].
#[derive(Clone, Debug)]
pub struct BoardLayout {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl BoardLayout {
    /// Creates a layout containing only the wall lattice.
    #[must_use]
    pub fn lattice(size: BoardSize) -> Self {
        let side = size.side();
        let mut cells = Vec::with_capacity(size.cell_count());
        for row in 0..side {
            for column in 0..side {
                let cell = if size.is_wall_position(CellCoord::new(column, row)) {
                    Cell::Wall
                } else {
                    Cell::Passage
                };
                cells.push(cell);
            }
        }
        Self { size, cells }
    }

    /// Side length of the layout.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Current contents of a cell, if it lies on the board.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.size
            .index(coord)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites a cell. Coordinates off the board are ignored.
    pub fn set(&mut self, coord: CellCoord, cell: Cell) {
        if let Some(slot) = self
            .size
            .index(coord)
            .and_then(|index| self.cells.get_mut(index))
        {
            *slot = cell;
        }
    }

    /// Seals the layout into an immutable board.
    #[must_use]
    pub fn finish(self, seed: Seed) -> Board {
        Board {
            size: self.size,
            seed,
            cells: self.cells,
        }
    }
}

/// Immutable square board walked by the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    seed: Seed,
    cells: Vec<Cell>,
}

impl Board {
    /// Side length of the board.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Seed that generated the board.
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }

    /// Intersection where every session begins.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.size.start()
    }

    /// Intersection that ends the session when reached.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.size.goal()
    }

    /// Reports whether the coordinate lies on the board.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        self.size.contains(coord)
    }

    /// Contents of a cell, if it lies on the board.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.size
            .index(coord)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Dense cells stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterator over every cell paired with its coordinate, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let side = self.size.side();
        (0..side).flat_map(move |row| {
            (0..side).filter_map(move |column| {
                let coord = CellCoord::new(column, row);
                self.cell(coord).map(|cell| (coord, cell))
            })
        })
    }

    /// Iterator over multiplier intersections and their factors.
    pub fn multipliers(&self) -> impl Iterator<Item = (CellCoord, u8)> + '_ {
        self.iter().filter_map(|(coord, cell)| match cell {
            Cell::Multiplier(factor) => Some((coord, factor)),
            _ => None,
        })
    }
}

/// Lifecycle state of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted.
    #[default]
    Playing,
    /// The player reached the goal.
    Won,
    /// No legal move remains from the player's position.
    Stuck,
}

impl GameStatus {
    /// Reports whether the session stopped accepting moves.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Stuck)
    }
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination lies outside the board.
    OutOfBounds,
    /// The destination is a wall.
    Wall,
    /// The passage toward the destination was already travelled.
    PassageVisited,
    /// The session already ended; only a restart is accepted.
    GameOver,
}

/// Outcome of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// The player moved.
    Accepted {
        /// Intersection occupied after the move.
        to: CellCoord,
        /// Score after arrival effects were applied.
        score: u64,
        /// Session status after the move resolved.
        status: GameStatus,
    },
    /// The session was left untouched.
    Rejected(MoveRejection),
}

impl MoveResult {
    /// Reports whether the move was applied.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Read-only view into the dense visited grid.
#[derive(Clone, Copy, Debug)]
pub struct VisitedView<'a> {
    cells: &'a [bool],
    size: BoardSize,
}

impl<'a> VisitedView<'a> {
    /// Captures a new visited view backed by the provided cell slice.
    #[must_use]
    pub fn new(cells: &'a [bool], size: BoardSize) -> Self {
        Self { cells, size }
    }

    /// Reports whether the player passed through or occupies the cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.size
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(false)
    }

    /// Number of visited cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|visited| **visited).count()
    }

    /// Reports whether no cell was visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterator over visited coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + 'a {
        let side = self.size.side();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, visited)| **visited)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index % side, index / side))
            })
    }
}

/// Board configurations that cannot be generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The side length is even, so intersections would not line up with the walls.
    #[error("invalid board configuration: side length {side} must be odd")]
    EvenBoardSize {
        /// Rejected side length.
        side: u32,
    },
    /// The side length is below the supported minimum.
    #[error("invalid board configuration: side length {side} is below the minimum of {minimum}")]
    BoardTooSmall {
        /// Rejected side length.
        side: u32,
        /// Smallest accepted side length.
        minimum: u32,
    },
    /// The side length is above the supported maximum.
    #[error("invalid board configuration: side length {side} is above the maximum of {maximum}")]
    BoardTooLarge {
        /// Rejected side length.
        side: u32,
        /// Largest accepted side length.
        maximum: u32,
    },
    /// The board cannot host every multiplier on a distinct intersection.
    #[error(
        "invalid board configuration: side length {side} leaves {available} free intersections \
         but {required} multipliers must be placed"
    )]
    NotEnoughIntersections {
        /// Rejected side length.
        side: u32,
        /// Intersections other than Start and Goal.
        available: u64,
        /// Multipliers that must be placed.
        required: u64,
    },
}
