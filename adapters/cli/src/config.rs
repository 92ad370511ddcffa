use std::{fs, path::Path};

use anyhow::{Context, Result};
use path_game_core::DEFAULT_BOARD_SIZE;
use serde::Deserialize;

const DEFAULT_CELL_LENGTH: f32 = 28.0;

/// Settings read from an optional TOML file. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Side length of the board.
    pub(crate) board_size: u32,
    /// Fixed seed. The daily seed is used when absent.
    pub(crate) seed: Option<u64>,
    /// Window settings.
    pub(crate) window: WindowConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            seed: None,
            window: WindowConfig::default(),
        }
    }
}

/// Window settings for the macroquad backend.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    /// Pixels per cell when the window opens.
    pub(crate) cell_length: f32,
    /// Synchronise presentation with the display refresh rate.
    pub(crate) vsync: bool,
    /// Print frame rate once per second.
    pub(crate) show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            cell_length: DEFAULT_CELL_LENGTH,
            vsync: true,
            show_fps: false,
        }
    }
}

impl GameConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse game config toml contents")
    }
}
