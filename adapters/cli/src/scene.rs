use path_game_core::{Cell, CellCoord};
use path_game_rendering::{BoardPresentation, CellVisual, Scene, SceneCell};
use path_game_world::{query, World};

/// Snapshots the world into a scene the rendering backends understand.
pub(crate) fn build_scene(world: &World, board: BoardPresentation) -> Scene {
    let visited = query::visited_view(world);
    let cells = query::board(world)
        .iter()
        .map(|(coord, cell)| SceneCell {
            coord,
            visual: visual_for(world, coord, cell),
            visited: visited.contains(coord),
        })
        .collect();

    Scene::new(
        board,
        cells,
        query::player(world),
        query::score(world),
        query::status(world),
        query::valid_moves(world),
        query::seed(world),
    )
}

fn visual_for(world: &World, coord: CellCoord, cell: Cell) -> CellVisual {
    match cell {
        Cell::Wall => CellVisual::Wall,
        Cell::Passage => CellVisual::Passage,
        Cell::Start => CellVisual::Start,
        Cell::Goal => CellVisual::Goal,
        Cell::Scored(points) => CellVisual::Points(points),
        Cell::Multiplier(factor) => CellVisual::Multiplier {
            factor,
            consumed: query::multiplier_consumed(world, coord),
        },
    }
}
