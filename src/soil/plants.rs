//! Seed planting and plant growth.
//!
//! Plants are ECS entities anchored to grid cells. Growth advances once per
//! day cycle and only while the anchoring cell is watered; the soil layer
//! never destroys a plant itself — harvest removal belongs to the player
//! domain, which uses `harvestable` and `FarmGrid::remove_flag`.

use bevy::prelude::*;

use super::{grid_to_world, irrigation, FarmSprite, FarmSpriteKind};
use crate::shared::*;

/// Vertical sprite anchor offsets: tall species (corn stalks) sit higher
/// above the tile centre than squat ones.
pub const PLANT_Y_OFFSET: f32 = 2.0;
pub const PLANT_TALL_Y_OFFSET: f32 = 6.0;

pub fn plant_y_offset(tall: bool) -> f32 {
    if tall {
        PLANT_TALL_Y_OFFSET
    } else {
        PLANT_Y_OFFSET
    }
}

/// Advance a plant by one growth tick. Gated on the cell's watered state:
/// a dry tick adds nothing, so a plant can sit at age 0 indefinitely.
/// Age is clamped at `max_age`, at which point the plant is harvestable.
pub fn grow_plant(plant: &mut Plant, watered: bool) {
    if !watered {
        return;
    }
    plant.age += plant.grow_speed;
    if plant.age >= plant.max_age {
        plant.age = plant.max_age;
        plant.harvestable = true;
    }
}

/// Plant the selected seed at the target point. Silent no-op when the cell
/// is untilled, already planted, or the species is unknown.
pub fn handle_seed_use(
    mut seed_events: EventReader<SeedUseEvent>,
    mut grid: ResMut<FarmGrid>,
    registry: Res<SpeciesRegistry>,
    mut commands: Commands,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in seed_events.read() {
        let Some((x, y)) = grid.cell_at(event.target) else {
            continue;
        };
        if !grid.has_flag(x, y, CellFlag::Tilled) || grid.has_flag(x, y, CellFlag::Planted) {
            continue;
        }
        let Some(def) = registry.get(&event.species) else {
            continue;
        };

        grid.add_flag(x, y, CellFlag::Planted);

        let plant = Plant {
            species: def.id.clone(),
            cell: (x, y),
            age: 0.0,
            max_age: (def.frames - 1) as f32,
            grow_speed: def.grow_speed,
            tall: def.tall,
            harvestable: false,
        };
        let mut translation = grid_to_world(x, y, Z_GROUND_PLANT);
        translation.y += plant_y_offset(def.tall);

        commands.spawn((
            FarmSprite {
                kind: FarmSpriteKind::Plant,
                cell: (x, y),
            },
            Sprite {
                color: Color::srgb(0.45, 0.68, 0.3),
                custom_size: Some(Vec2::splat(TILE_SIZE * 0.8)),
                ..default()
            },
            Transform::from_translation(translation),
            plant,
        ));

        sfx_events.send(PlaySfxEvent {
            sfx_id: "plant".to_string(),
        });
        info!("[Soil] Planted {} at ({x}, {y})", def.id);
    }
}

/// End-of-day processing: every live plant takes one growth tick against
/// the ended day's watered flags, then irrigation resets for the night.
pub fn on_day_end(
    mut day_events: EventReader<DayEndEvent>,
    mut grid: ResMut<FarmGrid>,
    mut plants: Query<&mut Plant>,
) {
    for event in day_events.read() {
        let mut grown = 0usize;
        for mut plant in plants.iter_mut() {
            let watered = grid.has_flag(plant.cell.0, plant.cell.1, CellFlag::Watered);
            if watered {
                grown += 1;
            }
            grow_plant(&mut plant, watered);
        }
        irrigation::clear_all(&mut grid);
        info!("[Soil] Day {} ended — {} plants advanced", event.day, grown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sapling(grow_speed: f32, max_age: f32) -> Plant {
        Plant {
            species: "tomato".to_string(),
            cell: (0, 0),
            age: 0.0,
            max_age,
            grow_speed,
            tall: false,
            harvestable: false,
        }
    }

    #[test]
    fn growth_accumulates_to_the_clamp() {
        let mut plant = sapling(1.0, 3.0);
        for ticks in 1..=5 {
            grow_plant(&mut plant, true);
            let expected = (ticks as f32).min(3.0);
            assert_eq!(plant.age, expected, "after {ticks} watered ticks");
        }
        assert!(plant.harvestable);
    }

    #[test]
    fn fractional_rates_accumulate_across_ticks() {
        let mut plant = sapling(0.7, 3.0);
        for _ in 0..4 {
            grow_plant(&mut plant, true);
        }
        assert!((plant.age - 2.8).abs() < 1e-5);
        assert_eq!(plant.frame(), 2);
        assert!(!plant.harvestable);

        grow_plant(&mut plant, true);
        assert_eq!(plant.age, 3.0, "age clamps at max_age");
        assert!(plant.harvestable);
    }

    #[test]
    fn harvestable_exactly_when_age_reaches_max() {
        let mut plant = sapling(1.0, 2.0);
        grow_plant(&mut plant, true);
        assert!(!plant.harvestable);
        grow_plant(&mut plant, true);
        assert!(plant.harvestable);
        assert_eq!(plant.age, 2.0);
    }

    #[test]
    fn dry_ticks_add_nothing() {
        let mut plant = sapling(1.0, 3.0);
        for _ in 0..10 {
            grow_plant(&mut plant, false);
        }
        assert_eq!(plant.age, 0.0);
        assert!(!plant.harvestable);

        // Alternating wet and dry days: only wet days count.
        grow_plant(&mut plant, true);
        grow_plant(&mut plant, false);
        grow_plant(&mut plant, true);
        assert_eq!(plant.age, 2.0);
    }

    #[test]
    fn growth_never_regresses() {
        let mut plant = sapling(0.5, 2.0);
        let mut last = plant.age;
        for tick in 0..8 {
            grow_plant(&mut plant, tick % 3 != 0);
            assert!(plant.age >= last);
            last = plant.age;
        }
    }
}
