//! Data domain — static species definitions loaded at startup.

use bevy::prelude::*;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_data);
    }
}

fn load_data(mut registry: ResMut<SpeciesRegistry>) {
    populate_species(&mut registry);
    info!(
        "[Data] Registered {} plant species",
        registry.ordered_ids.len()
    );
}

/// Populate the SpeciesRegistry with all plant species.
///
/// `frames` counts growth sprites; a plant is harvestable at frame
/// `frames - 1`. `grow_speed` is age gained per watered day, so corn
/// matures in 3 watered days while tomato takes about 5.
pub fn populate_species(registry: &mut SpeciesRegistry) {
    let species = vec![
        SpeciesDef {
            id: "corn".into(),
            name: "Corn".into(),
            frames: 4,
            grow_speed: 1.0,
            tall: true,
            sell_price: 50,
            sprite_base: 0,
        },
        SpeciesDef {
            id: "tomato".into(),
            name: "Tomato".into(),
            frames: 4,
            grow_speed: 0.7,
            tall: false,
            sell_price: 60,
            sprite_base: 8,
        },
        SpeciesDef {
            id: "radish".into(),
            name: "Radish".into(),
            frames: 3,
            grow_speed: 0.9,
            tall: false,
            sell_price: 35,
            sprite_base: 16,
        },
        SpeciesDef {
            id: "pumpkin".into(),
            name: "Pumpkin".into(),
            frames: 5,
            grow_speed: 0.5,
            tall: false,
            sell_price: 160,
            sprite_base: 24,
        },
    ];

    for def in species {
        registry.insert(def);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_table_is_well_formed() {
        let mut registry = SpeciesRegistry::default();
        populate_species(&mut registry);

        assert!(!registry.ordered_ids.is_empty());
        for id in &registry.ordered_ids {
            let def = registry.get(id).expect("ordered id resolves");
            assert!(def.frames >= 2, "{id} needs at least seed + ripe frames");
            assert!(def.grow_speed > 0.0, "{id} must be able to grow");
        }

        let corn = registry.get("corn").unwrap();
        assert!(corn.tall);
        assert_eq!(corn.grow_speed, 1.0);
        let tomato = registry.get("tomato").unwrap();
        assert_eq!(tomato.grow_speed, 0.7);
    }
}
