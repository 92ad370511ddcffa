#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Path Game experience.

mod config;
mod game;
mod headless;
mod scene;
mod seed;
mod share;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use path_game_core::{BoardSize, Seed, GAME_TITLE};
use path_game_rendering::{BoardPresentation, Color, FrameInput, Presentation, RenderingBackend};
use path_game_rendering_macroquad::MacroquadBackend;
use path_game_system_controls::ControlInput;
use path_game_world::{query, World};

use crate::{
    config::{GameConfig, WindowConfig},
    game::GameLoop,
    seed::SeedSource,
    share::{ShareCode, StdoutSink},
};

#[derive(Debug, Parser)]
#[command(name = "path-game")]
#[command(version, about = "Single-screen maze traversal puzzle", long_about = None)]
struct CliArgs {
    /// Side length of the board (odd).
    #[arg(long, value_name = "N")]
    size: Option<u32>,
    /// Fixed seed. Today's date is used when no seed is given.
    #[arg(long, conflicts_with = "date")]
    seed: Option<u64>,
    /// Plays the daily board of another day.
    #[arg(long, value_name = "YYYYMMDD")]
    date: Option<String>,
    /// TOML file with game and window settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Plays a scripted sequence (U, D, L, R, S) without opening a window.
    #[arg(long, value_name = "MOVES")]
    moves: Option<String>,
    /// Prints a share string whenever a session is won.
    #[arg(long)]
    share: bool,
    /// Decodes a share string and exits.
    #[arg(long, value_name = "CODE")]
    decode_share: Option<String>,
    /// Echoes every game event to stderr.
    #[arg(short, long)]
    verbose: bool,
    /// Synchronises presentation with the display refresh rate.
    #[arg(long, conflicts_with = "no_vsync")]
    vsync: bool,
    /// Renders frames as fast as possible.
    #[arg(long)]
    no_vsync: bool,
    /// Prints the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

impl CliArgs {
    fn seed_source(&self, config: &GameConfig) -> Result<SeedSource> {
        if let Some(seed) = self.seed {
            return Ok(SeedSource::Fixed(Seed::new(seed)));
        }
        if let Some(date) = &self.date {
            return Ok(SeedSource::Fixed(seed::parse_date(date)?));
        }
        Ok(config
            .seed
            .map_or(SeedSource::Daily, |seed| SeedSource::Fixed(Seed::new(seed))))
    }

    fn window(&self, config: &GameConfig) -> WindowConfig {
        let mut window = config.window;
        if self.vsync {
            window.vsync = true;
        } else if self.no_vsync {
            window.vsync = false;
        }
        window.show_fps |= self.show_fps;
        window
    }
}

/// Entry point for the Path Game command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();

    if let Some(code) = &args.decode_share {
        let decoded = ShareCode::decode(code).context("failed to decode share string")?;
        println!("{decoded}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let size = BoardSize::new(args.size.unwrap_or(config.board_size))?;
    let seed_source = args.seed_source(&config)?;
    let seed = seed_source.resolve()?;

    let world = World::new(size, seed);
    if args.verbose {
        eprintln!("[path-game] session started with seed {seed} on a {0}x{0} board", size.side());
    }
    let sink = args.share.then(StdoutSink::default);
    let mut game = GameLoop::new(world, seed_source, sink, args.verbose);

    match &args.moves {
        Some(script) => {
            let steps = headless::parse_script(script)?;
            headless::play(&mut game, &steps);
            print!("{}", headless::render_board(game.world()));
            println!("{}", headless::summary(game.world()));
            if game.sink().is_some_and(|sink| sink.printed().is_empty()) {
                eprintln!("no session was won, nothing to share");
            }
            Ok(())
        }
        None => run_window(game, args.window(&config)),
    }
}

fn run_window(mut game: GameLoop, window: WindowConfig) -> Result<()> {
    let side = query::board(game.world()).size().side();
    let board = BoardPresentation::new(side, window.cell_length)
        .context("invalid window configuration")?;
    let presentation = Presentation::new(
        GAME_TITLE,
        Color::from_rgb_u8(0, 0, 0),
        scene::build_scene(game.world(), board),
    );
    let backend = MacroquadBackend::new()
        .with_vsync(window.vsync)
        .with_show_fps(window.show_fps)
        .with_window_length(board.length().round() as i32);

    backend.run(presentation, move |input, scene| {
        if game.step(control_input(input)) {
            *scene = scene::build_scene(game.world(), board);
        }
    })
}

fn control_input(input: FrameInput) -> ControlInput {
    ControlInput {
        up: input.up,
        down: input.down,
        left: input.left,
        right: input.right,
        restart: input.restart,
    }
}
