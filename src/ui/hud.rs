//! HUD — a single status panel in the top-left corner.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct HudStatusText;

pub fn spawn_hud(mut commands: Commands, existing: Query<Entity, With<HudStatusText>>) {
    if !existing.is_empty() {
        return;
    }

    commands.spawn((
        HudStatusText,
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

pub fn update_hud(
    calendar: Res<Calendar>,
    player_state: Res<PlayerState>,
    inventory: Res<Inventory>,
    registry: Res<SpeciesRegistry>,
    mut query: Query<&mut Text, With<HudStatusText>>,
) {
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };

    let seed_name = registry
        .seed_at(player_state.selected_seed)
        .map(|def| def.name.as_str())
        .unwrap_or("—");

    let mut items: Vec<(&String, &u32)> = inventory.items.iter().collect();
    items.sort_by(|a, b| a.0.cmp(b.0));
    let item_summary = if items.is_empty() {
        "empty".to_string()
    } else {
        items
            .iter()
            .map(|(id, count)| format!("{id}×{count}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    text.0 = format!(
        "Day {}  {:?}\n[Space] {:?}   [F] Plant: {}\nBag: {}",
        calendar.day, calendar.weather, player_state.equipped_tool, seed_name, item_summary
    );
}
