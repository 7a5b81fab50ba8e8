//! Core movement system — continuous pixel motion with tile collision.

use bevy::prelude::*;

use super::{player_hitbox, world_to_grid};
use crate::shared::*;

/// Reads WASD / arrow keys, applies velocity, updates facing, snaps the
/// grid position, and checks collisions against the map and against
/// sprouted plants' inset hitboxes.
pub fn player_movement(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    world_map: Res<WorldMap>,
    plant_query: Query<(&Plant, &Transform), Without<Player>>,
    mut query: Query<(&mut Transform, &mut PlayerMovement, &mut GridPosition), With<Player>>,
) {
    let Ok((mut transform, mut movement, mut grid_pos)) = query.get_single_mut() else {
        return;
    };

    let mut dir = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        dir.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        dir.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir == Vec2::ZERO {
        movement.is_moving = false;
        return;
    }
    movement.is_moving = true;

    // Vertical bias on diagonals — feels more natural for a top-down
    // farming game (approaching plots).
    if dir.y.abs() >= dir.x.abs() {
        movement.facing = if dir.y > 0.0 { Facing::Up } else { Facing::Down };
    } else {
        movement.facing = if dir.x > 0.0 { Facing::Right } else { Facing::Left };
    }

    let delta = dir.normalize() * movement.speed * time.delta_secs();

    // Axis-separated moves so the player slides along obstacles.
    let mut pos = transform.translation.truncate();
    for step in [Vec2::new(delta.x, 0.0), Vec2::new(0.0, delta.y)] {
        if step == Vec2::ZERO {
            continue;
        }
        let candidate = pos + step;
        if walkable_at(candidate, &world_map, &plant_query) {
            pos = candidate;
        }
    }

    transform.translation.x = pos.x;
    transform.translation.y = pos.y;

    let (gx, gy) = world_to_grid(pos.x, pos.y);
    grid_pos.x = gx;
    grid_pos.y = gy;
}

/// Whether the player hitbox fits at `pos` without clipping a solid tile
/// or a sprouted plant.
fn walkable_at(
    pos: Vec2,
    world_map: &WorldMap,
    plant_query: &Query<(&Plant, &Transform), Without<Player>>,
) -> bool {
    let hitbox = player_hitbox(pos);

    let corners = [
        hitbox.min,
        Vec2::new(hitbox.max.x, hitbox.min.y),
        Vec2::new(hitbox.min.x, hitbox.max.y),
        hitbox.max,
    ];
    for corner in corners {
        let (gx, gy) = world_to_grid(corner.x, corner.y);
        if !world_map.is_walkable(gx, gy) {
            return false;
        }
    }

    for (plant, plant_tf) in plant_query.iter() {
        if let Some(plant_box) = plant.hitbox(plant_tf.translation.truncate()) {
            if !plant_box.intersect(hitbox).is_empty() {
                return false;
            }
        }
    }

    true
}
