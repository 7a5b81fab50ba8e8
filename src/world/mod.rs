//! World domain — the farm map, its farmable region, and world objects.
//!
//! Map setup is the point where the soil grid learns its dimensions and
//! farmable coordinates; after that the Farmable flags never change.

use bevy::prelude::*;

use crate::shared::*;

pub mod maps;
pub mod trees;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, setup_farm.run_if(in_state(GameState::Loading)))
            .add_systems(
                Update,
                (trees::handle_axe_tool_use, trees::replenish_fruit)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Build the farm: spawn ground tile sprites, fill the walkability map,
/// size the soil grid and mark its farmable region, and plant the trees.
/// Transitions to Playing when done.
fn setup_farm(
    mut commands: Commands,
    mut world_map: ResMut<WorldMap>,
    mut grid: ResMut<FarmGrid>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let map = maps::generate_farm();

    for y in 0..map.height {
        for x in 0..map.width {
            let kind = map.get_tile(x, y);
            commands.spawn((
                Sprite {
                    color: maps::tile_color(kind),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(
                    x as f32 * TILE_SIZE,
                    y as f32 * TILE_SIZE,
                    Z_GROUND,
                )),
            ));
        }
    }

    world_map.width = map.width;
    world_map.height = map.height;
    world_map.tiles = map.tiles.clone();

    *grid = FarmGrid::new(map.width, map.height);
    let farmable = map.farmable_cells();
    for &(x, y) in &farmable {
        grid.mark_farmable(x, y);
    }

    trees::spawn_trees(&mut commands, &mut world_map);

    info!(
        "[World] Farm ready: {}×{} tiles, {} farmable",
        map.width,
        map.height,
        farmable.len()
    );
    next_state.set(GameState::Playing);
}
