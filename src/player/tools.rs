//! Tool and seed handling — turning input into world-space target points.

use bevy::prelude::*;

use super::{facing_offset, ToolCooldown, TOOL_ORDER};
use crate::shared::*;

/// Cycle the equipped tool forward (E) or backward (Q).
pub fn tool_cycle(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_state: ResMut<PlayerState>,
) {
    let current_idx = TOOL_ORDER
        .iter()
        .position(|t| *t == player_state.equipped_tool)
        .unwrap_or(0);

    if keyboard.just_pressed(KeyCode::KeyE) {
        player_state.equipped_tool = TOOL_ORDER[(current_idx + 1) % TOOL_ORDER.len()];
    }
    if keyboard.just_pressed(KeyCode::KeyQ) {
        let prev = if current_idx == 0 {
            TOOL_ORDER.len() - 1
        } else {
            current_idx - 1
        };
        player_state.equipped_tool = TOOL_ORDER[prev];
    }
}

/// Cycle the selected seed with Tab.
pub fn seed_cycle(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<SpeciesRegistry>,
    mut player_state: ResMut<PlayerState>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) || registry.ordered_ids.is_empty() {
        return;
    }
    player_state.selected_seed = (player_state.selected_seed + 1) % registry.ordered_ids.len();
}

/// The world-space point a tool or seed acts on: one tile ahead of the
/// player in the facing direction. All soil operations hit-test this
/// point themselves.
fn target_point(transform: &Transform, movement: &PlayerMovement) -> Vec2 {
    let (dx, dy) = facing_offset(&movement.facing);
    transform.translation.truncate() + Vec2::new(dx as f32, dy as f32) * TILE_SIZE
}

/// Use the currently equipped tool on the tile the player is facing.
pub fn tool_use(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    player_state: Res<PlayerState>,
    mut cooldown: ResMut<ToolCooldown>,
    query: Query<(&Transform, &PlayerMovement), With<Player>>,
    mut tool_events: EventWriter<ToolUseEvent>,
) {
    cooldown.timer.tick(time.delta());

    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }
    if !cooldown.timer.finished() {
        return;
    }
    let Ok((transform, movement)) = query.get_single() else {
        return;
    };

    tool_events.send(ToolUseEvent {
        tool: player_state.equipped_tool,
        target: target_point(transform, movement),
    });
    cooldown.timer.reset();
}

/// Plant the selected seed on the tile the player is facing (F).
pub fn seed_use(
    keyboard: Res<ButtonInput<KeyCode>>,
    player_state: Res<PlayerState>,
    registry: Res<SpeciesRegistry>,
    query: Query<(&Transform, &PlayerMovement), With<Player>>,
    mut seed_events: EventWriter<SeedUseEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyF) {
        return;
    }
    let Ok((transform, movement)) = query.get_single() else {
        return;
    };
    let Some(def) = registry.seed_at(player_state.selected_seed) else {
        return;
    };

    seed_events.send(SeedUseEvent {
        species: def.id.clone(),
        target: target_point(transform, movement),
    });
}
