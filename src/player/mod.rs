//! Player domain — avatar spawn, movement, tool/seed use, and the
//! harvest-by-collision contract with the soil layer.

pub mod camera;
pub mod interaction;
pub mod movement;
pub mod spawn;
pub mod tools;

use bevy::prelude::*;

use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ToolCooldown>();

        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        app.add_systems(
            Update,
            (
                tools::tool_use.before(movement::player_movement),
                tools::seed_use.before(movement::player_movement),
                movement::player_movement,
                tools::tool_cycle,
                tools::seed_cycle,
                interaction::plant_collision,
                interaction::add_items_to_inventory,
                camera::camera_follow_player,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Local resources
// ═══════════════════════════════════════════════════════════════════════════

/// Cooldown timer to prevent tool spam.
#[derive(Resource)]
pub struct ToolCooldown {
    pub timer: Timer,
}

impl Default for ToolCooldown {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.3, TimerMode::Once),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers shared across sub-modules
// ═══════════════════════════════════════════════════════════════════════════

/// The ordered list of tools for cycling with Q/E.
pub const TOOL_ORDER: [ToolKind; 3] = [ToolKind::Hoe, ToolKind::WateringCan, ToolKind::Axe];

/// Get the facing-direction offset as a grid delta.
pub fn facing_offset(facing: &Facing) -> (i32, i32) {
    match facing {
        Facing::Up => (0, 1),
        Facing::Down => (0, -1),
        Facing::Left => (-1, 0),
        Facing::Right => (1, 0),
    }
}

pub fn world_to_grid(wx: f32, wy: f32) -> (i32, i32) {
    (
        (wx / TILE_SIZE).round() as i32,
        (wy / TILE_SIZE).round() as i32,
    )
}

/// The player's collision/harvest hitbox, inset from the sprite so the
/// avatar can stand close to obstacles.
pub fn player_hitbox(center: Vec2) -> Rect {
    Rect::from_center_size(center, Vec2::new(TILE_SIZE * 0.6, TILE_SIZE * 0.5))
}
