//! Irrigation — watering single cells, rain watering, and the daily reset.
//!
//! Watering never touches the autotile layer; water overlays are an
//! independent visual derived from the Watered flags by the render sync.

use bevy::prelude::*;

use crate::shared::*;

/// Water the tilled cell under `point`. Returns true if the cell newly
/// became watered. Watering an untilled or already-watered cell is a
/// silent no-op.
pub fn water_at(grid: &mut FarmGrid, point: Vec2) -> bool {
    let Some((x, y)) = grid.cell_at(point) else {
        return false;
    };
    if !grid.has_flag(x, y, CellFlag::Tilled) {
        return false;
    }
    if grid.has_flag(x, y, CellFlag::Watered) {
        return false;
    }
    grid.add_flag(x, y, CellFlag::Watered);
    true
}

/// Water the whole grid (rain).
///
/// The condition is `Tilled ∨ (Planted ∧ ¬Watered)`, preserved verbatim
/// from the long-standing behavior: a planted-but-untilled cell is only
/// watered while dry, a tilled cell unconditionally (re-setting the flag
/// is a no-op, so this is still idempotent).
pub fn water_all(grid: &mut FarmGrid) {
    for y in 0..grid.height {
        for x in 0..grid.width {
            let cell = grid.get(x, y);
            if cell.has(CellFlag::Tilled)
                || (cell.has(CellFlag::Planted) && !cell.has(CellFlag::Watered))
            {
                grid.add_flag(x, y, CellFlag::Watered);
            }
        }
    }
}

/// Remove the Watered flag from every cell, unconditionally. The render
/// sync despawns every water overlay in response. Runs once per day cycle.
pub fn clear_all(grid: &mut FarmGrid) {
    for y in 0..grid.height {
        for x in 0..grid.width {
            grid.remove_flag(x, y, CellFlag::Watered);
        }
    }
}

pub fn handle_watering_can_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut grid: ResMut<FarmGrid>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::WateringCan {
            continue;
        }
        if water_at(&mut grid, event.target) {
            sfx_events.send(PlaySfxEvent {
                sfx_id: "water".to_string(),
            });
        }
    }
}

/// A rainy morning waters everything before the player gets up.
pub fn on_day_started(
    mut day_events: EventReader<DayStartedEvent>,
    mut grid: ResMut<FarmGrid>,
) {
    for event in day_events.read() {
        if event.weather == Weather::Rainy {
            water_all(&mut grid);
            info!("[Soil] Rain watered the field on day {}", event.day);
        }
    }
}
