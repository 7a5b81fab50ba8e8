//! Soil domain — tilling, autotiling, irrigation, planting, and growth.
//!
//! The `FarmGrid` resource (in crate::shared) is the single authoritative
//! store; everything visual here is derived from it by the PostUpdate sync
//! systems in `render`. Communicates with other domains exclusively through
//! crate::shared events/resources.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

pub mod autotile;
pub mod irrigation;
pub mod plants;
pub mod render;
pub mod tilling;

use autotile::PatchVariant;

/// Tagged visual entity marker: soil patches, water overlays, and plant
/// sprites all carry this, so the render layer consumes one shape.
#[derive(Component, Debug, Clone)]
pub struct FarmSprite {
    pub kind: FarmSpriteKind,
    pub cell: (i32, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmSpriteKind {
    SoilPatch(PatchVariant),
    WaterOverlay,
    Plant,
}

/// Bookkeeping for derived soil visuals, keyed by grid position.
///
/// `patches_dirty` is raised by any tilling mutation; the patch sync system
/// then destroys and regenerates every patch in one batch, which keeps the
/// autotile variants of all neighbors consistent.
#[derive(Resource, Debug, Default)]
pub struct SoilVisuals {
    /// (x, y) → soil patch entity.
    pub patches: HashMap<(i32, i32), Entity>,
    /// (x, y) → water overlay entity.
    pub overlays: HashMap<(i32, i32), Entity>,
    pub patches_dirty: bool,
}

pub struct SoilPlugin;

impl Plugin for SoilPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoilVisuals>()
            .init_resource::<render::SoilAtlases>()
            .add_systems(OnEnter(GameState::Playing), render::load_soil_atlases)
            // Tool responses and planting — grid mutation only; visuals are
            // reconciled afterwards in PostUpdate.
            .add_systems(
                Update,
                (
                    tilling::handle_hoe_tool_use,
                    irrigation::handle_watering_can_tool_use,
                    plants::handle_seed_use,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // Day-cycle processing. Chained: growth and the irrigation reset
            // must finish before a rainy new morning re-waters, or the reset
            // would wipe the rain.
            .add_systems(
                Update,
                (plants::on_day_end, irrigation::on_day_started)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                PostUpdate,
                (
                    render::sync_soil_patches,
                    render::sync_water_overlays,
                    render::sync_plant_sprites,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Convert a grid position to a world-space translation (centre of tile).
pub fn grid_to_world(x: i32, y: i32, z: f32) -> Vec3 {
    Vec3::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE, z)
}
