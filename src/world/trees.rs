//! Fruit trees — axe interaction and overnight fruit regrowth.

use bevy::prelude::*;

use crate::shared::*;

pub const TREE_MAX_FRUIT: u8 = 3;
pub const TREE_HEALTH: u8 = 5;
/// Wood dropped when a trunk comes down.
pub const TREE_WOOD_YIELD: u32 = 3;

/// Grass spots the farm's trees stand on.
pub const TREE_SPOTS: &[(i32, i32)] = &[(3, 19), (4, 4), (28, 8), (26, 20), (9, 21)];

#[derive(Component, Debug, Clone)]
pub struct Tree {
    pub cell: (i32, i32),
    pub fruit: u8,
    pub health: u8,
}

/// Spawn the farm's trees and mark their tiles solid.
pub fn spawn_trees(commands: &mut Commands, world_map: &mut WorldMap) {
    for &(x, y) in TREE_SPOTS {
        commands.spawn((
            Tree {
                cell: (x, y),
                fruit: TREE_MAX_FRUIT,
                health: TREE_HEALTH,
            },
            Sprite {
                color: Color::srgb(0.2, 0.42, 0.18),
                custom_size: Some(Vec2::new(TILE_SIZE * 1.2, TILE_SIZE * 1.8)),
                ..default()
            },
            Transform::from_translation(Vec3::new(
                x as f32 * TILE_SIZE,
                y as f32 * TILE_SIZE + TILE_SIZE * 0.4,
                Z_TREE,
            )),
        ));
        world_map.solid_tiles.insert((x, y));
    }
}

/// Axe use on a tree tile: shake a fruit loose while any remain, then chop
/// at the trunk. A felled tree yields wood and frees its tile.
pub fn handle_axe_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut trees: Query<(Entity, &mut Tree)>,
    mut world_map: ResMut<WorldMap>,
    mut commands: Commands,
    mut pickup_events: EventWriter<ItemPickupEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::Axe {
            continue;
        }
        let target_cell = (
            (event.target.x / TILE_SIZE).round() as i32,
            (event.target.y / TILE_SIZE).round() as i32,
        );

        for (entity, mut tree) in trees.iter_mut() {
            if tree.cell != target_cell {
                continue;
            }

            if tree.fruit > 0 {
                tree.fruit -= 1;
                pickup_events.send(ItemPickupEvent {
                    item_id: "apple".to_string(),
                    quantity: 1,
                });
                sfx_events.send(PlaySfxEvent {
                    sfx_id: "success".to_string(),
                });
            } else {
                tree.health = tree.health.saturating_sub(1);
                sfx_events.send(PlaySfxEvent {
                    sfx_id: "axe".to_string(),
                });
                if tree.health == 0 {
                    world_map.solid_tiles.remove(&tree.cell);
                    pickup_events.send(ItemPickupEvent {
                        item_id: "wood".to_string(),
                        quantity: TREE_WOOD_YIELD,
                    });
                    commands.entity(entity).despawn();
                    info!("[World] Tree felled at {:?}", tree.cell);
                }
            }
            break;
        }
    }
}

/// Fruit grows back overnight.
pub fn replenish_fruit(mut day_events: EventReader<DayEndEvent>, mut trees: Query<&mut Tree>) {
    for _ in day_events.read() {
        for mut tree in trees.iter_mut() {
            tree.fruit = (tree.fruit + 1).min(TREE_MAX_FRUIT);
        }
    }
}
