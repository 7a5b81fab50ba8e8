//! Visual synchronisation — derive soil patch, water overlay, and plant
//! sprites from the authoritative `FarmGrid` and `Plant` state.
//!
//! Runs in PostUpdate, after every grid mutation of the frame, so callers
//! never observe stale patches.

use bevy::prelude::*;
use rand::Rng;

use super::{autotile, grid_to_world, plants::plant_y_offset, FarmSprite, FarmSpriteKind, SoilVisuals};
use crate::shared::*;

/// Number of water overlay frames in the water tileset; one is picked at
/// random per overlay.
const WATER_FRAMES: usize = 3;

/// Holds the texture atlas handles for soil sprites. Loaded once on
/// entering Playing; until the handles exist the sync systems fall back to
/// flat placeholder colours.
#[derive(Resource, Default)]
pub struct SoilAtlases {
    pub loaded: bool,
    pub soil_image: Handle<Image>,
    pub soil_layout: Handle<TextureAtlasLayout>,
    pub water_image: Handle<Image>,
    pub water_layout: Handle<TextureAtlasLayout>,
    pub plants_image: Handle<Image>,
    pub plants_layout: Handle<TextureAtlasLayout>,
}

/// Loads the soil texture atlases once when the Playing state is entered.
///
/// Assets:
///   assets/tilesets/soil.png       — 256×16, 16×16 tiles, one column per
///                                    patch variant in `sprite_key` order
///   assets/tilesets/soil_water.png — 48×16, 3 overlay frames
///   assets/sprites/plants.png      — 128×64, 8 cols × 4 rows, one row per
///                                    species (`SpeciesDef::sprite_base`)
pub fn load_soil_atlases(
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut atlases: ResMut<SoilAtlases>,
) {
    if atlases.loaded {
        return;
    }

    atlases.soil_image = asset_server.load("tilesets/soil.png");
    atlases.soil_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(16, 16),
        16,
        1,
        None,
        None,
    ));

    atlases.water_image = asset_server.load("tilesets/soil_water.png");
    atlases.water_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(16, 16),
        WATER_FRAMES as u32,
        1,
        None,
        None,
    ));

    atlases.plants_image = asset_server.load("sprites/plants.png");
    atlases.plants_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(16, 16),
        8,
        4,
        None,
        None,
    ));

    atlases.loaded = true;
}

// ─────────────────────────────────────────────────────────────────────────────
// Soil patch sync — batch regeneration
// ─────────────────────────────────────────────────────────────────────────────

/// Rebuild the entire patch layer whenever tilling changed: despawn every
/// patch entity, recompute the autotile variant for every tilled cell, and
/// respawn. Patches exist only while their cell is tilled.
pub fn sync_soil_patches(
    mut commands: Commands,
    grid: Res<FarmGrid>,
    mut visuals: ResMut<SoilVisuals>,
    atlases: Res<SoilAtlases>,
) {
    if !visuals.patches_dirty {
        return;
    }
    visuals.patches_dirty = false;

    let stale: Vec<Entity> = visuals.patches.drain().map(|(_, e)| e).collect();
    for entity in stale {
        commands.entity(entity).despawn();
    }

    for (x, y) in grid.cells_with(CellFlag::Tilled) {
        let variant = autotile::variant_for_cell(&grid, x, y);
        let entity = commands
            .spawn((
                FarmSprite {
                    kind: FarmSpriteKind::SoilPatch(variant),
                    cell: (x, y),
                },
                patch_sprite(variant, &atlases),
                Transform::from_translation(grid_to_world(x, y, Z_SOIL)),
            ))
            .id();
        visuals.patches.insert((x, y), entity);
    }
}

fn patch_sprite(variant: autotile::PatchVariant, atlases: &SoilAtlases) -> Sprite {
    if atlases.loaded {
        Sprite {
            image: atlases.soil_image.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: atlases.soil_layout.clone(),
                index: variant.atlas_index(),
            }),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        }
    } else {
        Sprite {
            color: Color::srgb(0.45, 0.32, 0.20),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Water overlay sync
// ─────────────────────────────────────────────────────────────────────────────

/// Ensure exactly one overlay entity per watered cell: spawn missing ones
/// (with a random overlay frame) and despawn overlays whose cell dried up.
/// Watering is independent of the patch variant system.
pub fn sync_water_overlays(
    mut commands: Commands,
    grid: Res<FarmGrid>,
    mut visuals: ResMut<SoilVisuals>,
    atlases: Res<SoilAtlases>,
) {
    let mut rng = rand::thread_rng();

    for (x, y) in grid.cells_with(CellFlag::Watered) {
        if visuals.overlays.contains_key(&(x, y)) {
            continue;
        }
        let entity = commands
            .spawn((
                FarmSprite {
                    kind: FarmSpriteKind::WaterOverlay,
                    cell: (x, y),
                },
                overlay_sprite(&atlases, rng.gen_range(0..WATER_FRAMES)),
                Transform::from_translation(grid_to_world(x, y, Z_SOIL_WATER)),
            ))
            .id();
        visuals.overlays.insert((x, y), entity);
    }

    let stale: Vec<(i32, i32)> = visuals
        .overlays
        .keys()
        .filter(|&&(x, y)| !grid.has_flag(x, y, CellFlag::Watered))
        .cloned()
        .collect();
    for pos in stale {
        if let Some(entity) = visuals.overlays.remove(&pos) {
            commands.entity(entity).despawn();
        }
    }
}

fn overlay_sprite(atlases: &SoilAtlases, frame: usize) -> Sprite {
    if atlases.loaded {
        Sprite {
            image: atlases.water_image.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: atlases.water_layout.clone(),
                index: frame,
            }),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        }
    } else {
        Sprite {
            color: Color::srgba(0.25, 0.4, 0.75, 0.6),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plant sprite sync
// ─────────────────────────────────────────────────────────────────────────────

/// Keep every plant's sprite frame, anchor offset, and draw layer in sync
/// with its age. Sprouted plants are promoted to the main layer.
pub fn sync_plant_sprites(
    registry: Res<SpeciesRegistry>,
    atlases: Res<SoilAtlases>,
    mut query: Query<(&Plant, &mut Sprite, &mut Transform)>,
) {
    for (plant, mut sprite, mut transform) in query.iter_mut() {
        let (x, y) = plant.cell;
        let z = if plant.is_sprouted() { Z_MAIN } else { Z_GROUND_PLANT };
        let mut translation = grid_to_world(x, y, z);
        translation.y += plant_y_offset(plant.tall);
        transform.translation = translation;

        if atlases.loaded {
            if let Some(def) = registry.get(&plant.species) {
                sprite.image = atlases.plants_image.clone();
                sprite.texture_atlas = Some(TextureAtlas {
                    layout: atlases.plants_layout.clone(),
                    index: def.sprite_base + plant.frame(),
                });
                sprite.color = Color::WHITE;
            }
        } else {
            sprite.color = plant_stage_color(plant);
        }

        sprite.custom_size = Some(Vec2::splat(if plant.harvestable {
            TILE_SIZE * 0.95
        } else {
            TILE_SIZE * 0.8
        }));
    }
}

/// Placeholder colour per growth progress: pale seedling green shading
/// towards a ripe tone as the plant ages.
fn plant_stage_color(plant: &Plant) -> Color {
    let progress = if plant.max_age > 0.0 {
        (plant.age / plant.max_age).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let r = 0.5 * (1.0 - progress) + 0.2 * progress;
    let g = 0.65 + 0.15 * progress;
    let b = 0.2 * (1.0 - progress);
    Color::srgb(r, g, b)
}
