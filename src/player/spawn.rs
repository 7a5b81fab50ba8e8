use bevy::prelude::*;

use crate::shared::*;

/// Starting grid position on the farm (edge of the field, by the path).
const SPAWN_GRID_X: i32 = 15;
const SPAWN_GRID_Y: i32 = 16;

/// Spawn the player entity with all necessary components.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(mut commands: Commands, existing: Query<Entity, With<Player>>) {
    // Guard: don't double-spawn if returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    commands.spawn((
        Player,
        PlayerMovement::default(),
        GridPosition::new(SPAWN_GRID_X, SPAWN_GRID_Y),
        // Placeholder sprite — a blue rectangle
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(Vec2::new(TILE_SIZE * 0.8, TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(Vec3::new(
            SPAWN_GRID_X as f32 * TILE_SIZE,
            SPAWN_GRID_Y as f32 * TILE_SIZE,
            Z_PLAYER,
        )),
        Visibility::default(),
    ));
}
