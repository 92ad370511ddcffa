#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic board generation for Path Game.
//!
//! A single seeded [`ChaCha8Rng`] stream drives every random draw in a fixed
//! order: all intersection scores first, then one shuffle of the multiplier
//! factors, then rejection sampling for each multiplier position. Identical
//! `(size, seed)` pairs therefore always yield identical boards, which is what
//! lets every player share the same daily layout.

use path_game_core::{
    Board, BoardLayout, BoardSize, Cell, CellCoord, GenerationError, Seed, MULTIPLIER_FACTORS,
    SCORE_VALUES,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pure system that lays out boards from a size and a seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct MazeGenerator;

impl MazeGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a raw side length and generates the matching board.
    pub fn generate(&self, side: u32, seed: Seed) -> Result<Board, GenerationError> {
        let size = BoardSize::new(side)?;
        Ok(self.generate_board(size, seed))
    }

    /// Generates a board for an already validated size.
    #[must_use]
    pub fn generate_board(&self, size: BoardSize, seed: Seed) -> Board {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.get());
        let mut layout = BoardLayout::lattice(size);
        let start = size.start();
        let goal = size.goal();

        for coord in size.intersections() {
            if coord == start || coord == goal {
                continue;
            }
            let points = SCORE_VALUES[rng.gen_range(0..SCORE_VALUES.len())];
            layout.set(coord, Cell::Scored(points));
        }

        let mut factors = MULTIPLIER_FACTORS;
        factors.shuffle(&mut rng);
        for factor in factors {
            let coord = sample_scored_intersection(&layout, &mut rng);
            layout.set(coord, Cell::Multiplier(factor));
        }

        layout.set(start, Cell::Start);
        layout.set(goal, Cell::Goal);
        layout.finish(seed)
    }
}

/// Draws odd coordinates until one lands on a scored intersection.
///
/// `BoardSize` guarantees more scored intersections than multipliers, so the
/// loop terminates with probability one.
fn sample_scored_intersection(layout: &BoardLayout, rng: &mut ChaCha8Rng) -> CellCoord {
    let size = layout.size();
    let per_axis = size.intersections_per_axis();
    loop {
        let column = BoardSize::odd_coordinate(rng.gen_range(0..per_axis));
        let row = BoardSize::odd_coordinate(rng.gen_range(0..per_axis));
        let coord = CellCoord::new(column, row);
        if coord == size.start() || coord == size.goal() {
            continue;
        }
        if matches!(layout.cell(coord), Some(Cell::Scored(_))) {
            return coord;
        }
    }
}
