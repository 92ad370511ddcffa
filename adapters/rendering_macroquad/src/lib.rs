#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Path Game.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use path_game_core::{CellCoord, GameStatus};
use path_game_rendering::{
    CellVisual, Color, FrameInput, Presentation, RenderingBackend, Scene, RESTART_PROMPT,
};
use std::time::Duration;

const DEFAULT_WINDOW_LENGTH: i32 = 512;
const OVERLAY_WIDTH_RATIO: f32 = 0.6;
const OVERLAY_HEIGHT_RATIO: f32 = 0.2;

/// Snapshot of edge-triggered keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// `Space` restarts a finished game.
    restart: bool,
    /// `Q` or `Escape` quits the game loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            up: is_key_pressed(KeyCode::Up),
            down: is_key_pressed(KeyCode::Down),
            left: is_key_pressed(KeyCode::Left),
            right: is_key_pressed(KeyCode::Right),
            restart: is_key_pressed(KeyCode::Space),
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            restart: self.restart,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_length: i32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_length: DEFAULT_WINDOW_LENGTH,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Sizes the square window in pixels.
    #[must_use]
    pub fn with_window_length(mut self, length: i32) -> Self {
        self.window_length = length.max(1);
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average frame rate once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_length,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_length,
            window_height: window_length,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                update_scene(keyboard.frame_input(), &mut scene);

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );

                draw_cells(&scene, &metrics);
                draw_trail(&scene, &metrics);
                if scene.status == GameStatus::Playing {
                    draw_hints(&scene, &metrics);
                }
                draw_labels(&scene, &metrics);
                draw_player(&scene, &metrics);
                draw_score(&scene, &metrics);
                if let Some(headline) = scene.status_message() {
                    draw_game_over(&scene, &metrics, headline);
                }

                let frame_seconds = macroquad::time::get_frame_time().max(0.0);
                if let Some(per_second) =
                    fps_counter.record_frame(Duration::from_secs_f32(frame_seconds))
                {
                    if show_fps {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Screen-space placement of the board for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    offset_x: f32,
    offset_y: f32,
    cell_step: f32,
    board_length: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_length = scene.board.length();
        let scale = if world_length <= f32::EPSILON {
            1.0
        } else {
            screen_width.min(screen_height) / world_length
        };

        let board_length = world_length * scale;
        Self {
            offset_x: ((screen_width - board_length) * 0.5).max(0.0),
            offset_y: ((screen_height - board_length) * 0.5).max(0.0),
            cell_step: scene.board.cell_length * scale,
            board_length,
        }
    }

    fn cell_origin(&self, scene: &Scene, cell: CellCoord) -> Vec2 {
        let world = scene.board.cell_origin(cell);
        let scale = self.cell_step / scene.board.cell_length;
        Vec2::new(self.offset_x, self.offset_y) + world * scale
    }

    fn cell_center(&self, scene: &Scene, cell: CellCoord) -> Vec2 {
        self.cell_origin(scene, cell) + Vec2::splat(self.cell_step * 0.5)
    }
}

fn draw_cells(scene: &Scene, metrics: &SceneMetrics) {
    let palette = scene.palette;
    for cell in &scene.cells {
        let color = if cell.visual == CellVisual::Wall {
            palette.wall
        } else {
            palette.open
        };
        let origin = metrics.cell_origin(scene, cell.coord);
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.cell_step,
            metrics.cell_step,
            to_macroquad_color(color),
        );
    }
}

fn draw_trail(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.palette.accent);
    let mark = (metrics.cell_step * 0.2).max(2.0);
    for cell in scene.trail() {
        let center = metrics.cell_center(scene, cell);
        macroquad::shapes::draw_rectangle(
            center.x - mark * 0.5,
            center.y - mark * 0.5,
            mark,
            mark,
            color,
        );
    }
}

fn draw_hints(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.palette.hint);
    let radius = (metrics.cell_step * 0.12).max(1.5);
    for cell in scene.hint_cells() {
        let center = metrics.cell_center(scene, cell);
        macroquad::shapes::draw_circle(center.x, center.y, radius, color);
    }
}

fn draw_labels(scene: &Scene, metrics: &SceneMetrics) {
    let palette = scene.palette;
    for cell in &scene.cells {
        let Some(label) = cell.visual.label() else {
            continue;
        };

        let (color, font_scale) = if cell.visual.is_landmark() {
            (palette.accent, 0.3)
        } else if let CellVisual::Multiplier { consumed: true, .. } = cell.visual {
            (palette.label.lighten(0.6), 0.45)
        } else {
            (palette.label, 0.45)
        };
        let center = metrics.cell_center(scene, cell.coord);
        draw_centered_text(&label, center, metrics.cell_step * font_scale, color);
    }
}

fn draw_player(scene: &Scene, metrics: &SceneMetrics) {
    let origin = metrics.cell_origin(scene, scene.player);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        metrics.cell_step,
        metrics.cell_step,
        to_macroquad_color(scene.palette.accent),
    );
}

fn draw_score(scene: &Scene, metrics: &SceneMetrics) {
    let font_size = (metrics.cell_step * 0.4).max(10.0);
    let color = to_macroquad_color(scene.palette.open);
    let baseline = metrics.offset_y + font_size;
    macroquad::text::draw_text(
        &format!("Score: {}", scene.score),
        metrics.offset_x + 5.0,
        baseline,
        font_size,
        color,
    );

    let label = scene.puzzle_label();
    let width = macroquad::text::measure_text(&label, None, font_size as u16, 1.0).width;
    macroquad::text::draw_text(
        &label,
        metrics.offset_x + metrics.board_length - width - 5.0,
        baseline,
        font_size,
        color,
    );
}

fn draw_game_over(scene: &Scene, metrics: &SceneMetrics, headline: &str) {
    let width = metrics.board_length * OVERLAY_WIDTH_RATIO;
    let height = metrics.board_length * OVERLAY_HEIGHT_RATIO;
    let x = metrics.offset_x + (metrics.board_length - width) * 0.5;
    let y = metrics.offset_y + (metrics.board_length - height) * 0.5;
    macroquad::shapes::draw_rectangle(x, y, width, height, to_macroquad_color(scene.palette.overlay));

    let font_size = (height / 5.0).max(10.0);
    let text_color = scene.palette.label;
    let center_x = x + width * 0.5;
    let lines = [
        headline.to_owned(),
        format!("Score: {}", scene.score),
        RESTART_PROMPT.to_owned(),
    ];
    for (index, line) in lines.iter().enumerate() {
        let center_y = y + height * (index as f32 + 1.0) / (lines.len() as f32 + 1.0);
        draw_centered_text(line, Vec2::new(center_x, center_y), font_size, text_color);
    }
}

fn draw_centered_text(text: &str, center: Vec2, font_size: f32, color: Color) {
    let font_size = font_size.max(1.0);
    let dimensions = macroquad::text::measure_text(text, None, font_size as u16, 1.0);
    macroquad::text::draw_text(
        text,
        center.x - dimensions.width * 0.5,
        center.y + dimensions.height * 0.5,
        font_size,
        to_macroquad_color(color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
