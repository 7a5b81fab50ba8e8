//! Harvest-by-collision and item pickups.
//!
//! This is the consuming side of the soil layer's harvest contract: the
//! soil core exposes `Plant::harvestable` and `FarmGrid::remove_flag`;
//! detecting the collision and destroying the plant happens here.

use bevy::prelude::*;

use super::player_hitbox;
use crate::shared::*;

/// Collect every harvestable plant whose sprite rect overlaps the player
/// hitbox: produce goes to the inventory, the Planted flag is removed so
/// the (still tilled) cell can be replanted, and the entity despawns.
pub fn plant_collision(
    mut commands: Commands,
    mut grid: ResMut<FarmGrid>,
    player_query: Query<&Transform, With<Player>>,
    plant_query: Query<(Entity, &Plant, &Transform), Without<Player>>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
    mut harvested_events: EventWriter<CropHarvestedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    let Ok(player_tf) = player_query.get_single() else {
        return;
    };
    let hitbox = player_hitbox(player_tf.translation.truncate());

    for (entity, plant, plant_tf) in plant_query.iter() {
        if !plant.harvestable {
            continue;
        }
        let rect =
            Rect::from_center_size(plant_tf.translation.truncate(), Vec2::splat(TILE_SIZE));
        if rect.intersect(hitbox).is_empty() {
            continue;
        }

        pickup_events.send(ItemPickupEvent {
            item_id: plant.species.clone(),
            quantity: 1,
        });
        harvested_events.send(CropHarvestedEvent {
            item_id: plant.species.clone(),
            x: plant.cell.0,
            y: plant.cell.1,
        });
        sfx_events.send(PlaySfxEvent {
            sfx_id: "success".to_string(),
        });

        grid.remove_flag(plant.cell.0, plant.cell.1, CellFlag::Planted);
        commands.entity(entity).despawn();
    }
}

/// Route `ItemPickupEvent`s into the inventory.
pub fn add_items_to_inventory(
    mut events: EventReader<ItemPickupEvent>,
    mut inventory: ResMut<Inventory>,
) {
    for event in events.read() {
        inventory.add(&event.item_id, event.quantity);
        info!(
            "[Player] Picked up {}× {} (now {})",
            event.quantity,
            event.item_id,
            inventory.count(&event.item_id)
        );
    }
}
