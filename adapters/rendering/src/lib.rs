#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Path Game adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use path_game_core::{CellCoord, DirectionSet, GameStatus, Seed};
use std::{error::Error, fmt};

/// Prompt shown in the game-over window.
pub const RESTART_PROMPT: &str = "Press space key to restart";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used to draw a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Fill for wall cells.
    pub wall: Color,
    /// Fill for open cells.
    pub open: Color,
    /// Labels drawn on open cells.
    pub label: Color,
    /// Player square, trail marks and Start/Goal labels.
    pub accent: Color,
    /// Background of the game-over window.
    pub overlay: Color,
    /// Hint marks on passages the player may take next.
    pub hint: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let accent = Color::from_rgb_u8(0xff, 0x00, 0x4d);
        Self {
            wall: Color::from_rgb_u8(0x00, 0x00, 0x00),
            open: Color::from_rgb_u8(0xff, 0xff, 0xff),
            label: Color::from_rgb_u8(0x00, 0x00, 0x00),
            accent,
            overlay: Color::from_rgb_u8(0x29, 0xad, 0xff),
            hint: accent.lighten(0.6),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
///
/// Every flag is edge-triggered: it is set only on the frame the key went down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Up arrow pressed.
    pub up: bool,
    /// Down arrow pressed.
    pub down: bool,
    /// Left arrow pressed.
    pub left: bool,
    /// Right arrow pressed.
    pub right: bool,
    /// Restart key pressed.
    pub restart: bool,
}

/// Describes the square cell grid that adapters lay out on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of cells along each edge.
    pub side: u32,
    /// Side length of a single cell expressed in world units.
    pub cell_length: f32,
}

impl BoardPresentation {
    /// Creates a new board descriptor.
    ///
    /// Returns an error when the board is empty or the cell length is not positive.
    pub fn new(side: u32, cell_length: f32) -> Result<Self, RenderingError> {
        if side == 0 {
            return Err(RenderingError::EmptyBoard);
        }
        if !(cell_length > 0.0) {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self { side, cell_length })
    }

    /// Total width (and height) of the board in world units.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.side as f32 * self.cell_length
    }

    /// Upper-left corner of a cell in world units.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * self.cell_length,
            cell.row() as f32 * self.cell_length,
        )
    }

    /// Center of a cell in world units.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }
}

/// Visual category of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellVisual {
    /// Impassable cell.
    Wall,
    /// Open passage midpoint.
    Passage,
    /// Start intersection.
    Start,
    /// Goal intersection.
    Goal,
    /// Intersection worth the given number of points.
    Points(u8),
    /// Multiplier intersection.
    Multiplier {
        /// Factor applied on arrival.
        factor: u8,
        /// Whether the factor was already applied this session.
        consumed: bool,
    },
}

impl CellVisual {
    /// Text drawn centred on the cell, if any.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Wall | Self::Passage => None,
            Self::Start => Some("Start".to_owned()),
            Self::Goal => Some("Goal".to_owned()),
            Self::Points(points) => Some(points.to_string()),
            Self::Multiplier { factor, .. } => Some(format!("x{factor}")),
        }
    }

    /// Reports whether the label uses the accent color.
    #[must_use]
    pub const fn is_landmark(&self) -> bool {
        matches!(self, Self::Start | Self::Goal)
    }
}

/// Immutable snapshot of one cell within the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneCell {
    /// Location of the cell on the board.
    pub coord: CellCoord,
    /// How the cell should be drawn.
    pub visual: CellVisual,
    /// Whether the player passed through or occupies the cell.
    pub visited: bool,
}

/// Scene description consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Layout of the board in world units.
    pub board: BoardPresentation,
    /// Cells in row-major order.
    pub cells: Vec<SceneCell>,
    /// Intersection occupied by the player.
    pub player: CellCoord,
    /// Running score.
    pub score: u64,
    /// Session status.
    pub status: GameStatus,
    /// Directions the player may take next.
    pub valid_moves: DirectionSet,
    /// Seed of the board on display.
    pub seed: Seed,
    /// Colors used to draw the scene.
    pub palette: Palette,
}

impl Scene {
    /// Creates a new scene descriptor using the default palette.
    #[must_use]
    pub fn new(
        board: BoardPresentation,
        cells: Vec<SceneCell>,
        player: CellCoord,
        score: u64,
        status: GameStatus,
        valid_moves: DirectionSet,
        seed: Seed,
    ) -> Self {
        Self {
            board,
            cells,
            player,
            score,
            status,
            valid_moves,
            seed,
            palette: Palette::default(),
        }
    }

    /// Visited passage midpoints, which form the player's trail.
    pub fn trail(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.visited && cell.visual == CellVisual::Passage)
            .map(|cell| cell.coord)
    }

    /// Passage midpoints leading to the moves still available.
    pub fn hint_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let player = self.player;
        self.valid_moves
            .iter()
            .filter_map(move |direction| player.offset(direction, 1))
    }

    /// Caption naming the puzzle on display, drawn beside the score.
    #[must_use]
    pub fn puzzle_label(&self) -> String {
        format!("Puzzle {}", self.seed)
    }

    /// Headline for the game-over window, if the session ended.
    #[must_use]
    pub const fn status_message(&self) -> Option<&'static str> {
        match self.status {
            GameStatus::Playing => None,
            GameStatus::Won => Some("Goal reached"),
            GameStatus::Stuck => Some("No moves left"),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Path Game scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the per-frame input
    /// captured by the adapter and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// A board must contain at least one cell.
    EmptyBoard,
    /// Cells must have a positive side length.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBoard => write!(f, "board must contain at least one cell"),
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}
