//! Hoe handling — preparing soil cells for planting.

use bevy::prelude::*;

use super::{irrigation, SoilVisuals};
use crate::shared::*;

/// Till the cell under `point`. Returns true if a new cell was tilled.
///
/// Tilling a non-farmable or already-tilled cell is a silent no-op. While
/// it rains, watering runs immediately after so that no dry tilled cell
/// exists mid-rain.
pub fn till_at(grid: &mut FarmGrid, visuals: &mut SoilVisuals, point: Vec2, raining: bool) -> bool {
    let Some((x, y)) = grid.cell_at(point) else {
        return false;
    };
    if grid.has_flag(x, y, CellFlag::Tilled) {
        return false;
    }

    grid.add_flag(x, y, CellFlag::Tilled);
    // Every tilling mutation invalidates the whole patch layer; the sync
    // system rebuilds it in one batch so neighbor variants stay consistent.
    visuals.patches_dirty = true;

    if raining {
        irrigation::water_all(grid);
    }
    true
}

pub fn handle_hoe_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut grid: ResMut<FarmGrid>,
    mut visuals: ResMut<SoilVisuals>,
    calendar: Res<Calendar>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::Hoe {
            continue;
        }
        if till_at(&mut grid, &mut visuals, event.target, calendar.is_raining()) {
            sfx_events.send(PlaySfxEvent {
                sfx_id: "hoe".to_string(),
            });
        }
    }
}
