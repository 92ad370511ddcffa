use anyhow::{bail, Result};
use path_game_core::{Cell, Direction, GameStatus};
use path_game_system_controls::ControlInput;
use path_game_world::{query, World};

use crate::game::GameLoop;

/// One scripted key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScriptStep {
    /// Arrow key.
    Move(Direction),
    /// Space key.
    Restart,
}

impl ScriptStep {
    fn input(self) -> ControlInput {
        match self {
            Self::Move(direction) => ControlInput::pressed(direction),
            Self::Restart => ControlInput::restart(),
        }
    }
}

/// Parses `U D L R` (and `S` for restart), ignoring case, whitespace and commas.
pub(crate) fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .chars()
        .filter(|symbol| !symbol.is_whitespace() && *symbol != ',')
        .map(|symbol| {
            Ok(match symbol.to_ascii_uppercase() {
                'U' => ScriptStep::Move(Direction::Up),
                'D' => ScriptStep::Move(Direction::Down),
                'L' => ScriptStep::Move(Direction::Left),
                'R' => ScriptStep::Move(Direction::Right),
                'S' => ScriptStep::Restart,
                other => bail!("unknown move '{other}'; expected one of U, D, L, R or S"),
            })
        })
        .collect()
}

/// Feeds every step through the game loop, one frame per step.
pub(crate) fn play(game: &mut GameLoop, steps: &[ScriptStep]) {
    for step in steps {
        let _ = game.step(step.input());
    }
}

/// Draws the board as text, three characters per cell.
pub(crate) fn render_board(world: &World) -> String {
    let board = query::board(world);
    let player = query::player(world);
    let visited = query::visited_view(world);
    let side = board.size().side();

    let mut out = String::with_capacity((side as usize * 3 + 1) * side as usize);
    for (coord, cell) in board.iter() {
        let glyph = if coord == player {
            " @ ".to_owned()
        } else {
            match cell {
                Cell::Wall => "###".to_owned(),
                Cell::Passage if visited.contains(coord) => " . ".to_owned(),
                Cell::Passage => "   ".to_owned(),
                Cell::Start => " S ".to_owned(),
                Cell::Goal => " G ".to_owned(),
                Cell::Scored(points) => format!(" {points} "),
                Cell::Multiplier(factor) if query::multiplier_consumed(world, coord) => {
                    format!("x{factor}'")
                }
                Cell::Multiplier(factor) => format!("x{factor} "),
            }
        };
        out.push_str(&glyph);
        if coord.column() + 1 == side {
            out.push('\n');
        }
    }
    out
}

/// One-line outcome of the session.
pub(crate) fn summary(world: &World) -> String {
    let status = match query::status(world) {
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::Stuck => "stuck",
    };
    let player = query::player(world);
    format!(
        "status: {status}, score: {}, position: ({}, {}), moves: {}, seed: {}",
        query::score(world),
        player.column(),
        player.row(),
        query::moves_made(world),
        query::seed(world),
    )
}
