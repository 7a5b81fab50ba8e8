//! Headless integration tests for Ferncroft.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering backends — the sprite sync
//! systems still run, they just manage component data), and verify the
//! soil simulation end to end.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use ferncroft::calendar::process_day_end;
use ferncroft::data::populate_species;
use ferncroft::player::interaction::{add_items_to_inventory, plant_collision};
use ferncroft::shared::*;
use ferncroft::soil::autotile::PatchVariant;
use ferncroft::soil::render::SoilAtlases;
use ferncroft::soil::{irrigation, plants, render, tilling, FarmSprite, FarmSpriteKind, SoilVisuals};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems are added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<Calendar>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<FarmGrid>()
        .init_resource::<WorldMap>()
        .init_resource::<SpeciesRegistry>();

    // ── Soil-domain resources ────────────────────────────────────────────
    app.init_resource::<SoilVisuals>();
    app.init_resource::<SoilAtlases>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ToolUseEvent>()
        .add_event::<SeedUseEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<DayStartedEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<PlaySfxEvent>();

    app
}

/// Registers the full soil pipeline: tool handlers and day-cycle handlers
/// in Update, visual sync in PostUpdate — the same shape SoilPlugin uses.
fn add_soil_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            tilling::handle_hoe_tool_use,
            irrigation::handle_watering_can_tool_use,
            plants::handle_seed_use,
        ),
    );
    app.add_systems(
        Update,
        (plants::on_day_end, irrigation::on_day_started).chain(),
    );
    app.add_systems(
        PostUpdate,
        (
            render::sync_soil_patches,
            render::sync_water_overlays,
            render::sync_plant_sprites,
        ),
    );
}

/// Replace the FarmGrid with an all-farmable square grid.
fn setup_farmable_grid(app: &mut App, size: i32) {
    let mut grid = FarmGrid::new(size, size);
    for y in 0..size {
        for x in 0..size {
            grid.mark_farmable(x, y);
        }
    }
    app.insert_resource(grid);
}

/// World-space centre of a grid cell.
fn cell_point(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE)
}

fn send_tool(app: &mut App, tool: ToolKind, x: i32, y: i32) {
    app.world_mut().send_event(ToolUseEvent {
        tool,
        target: cell_point(x, y),
    });
}

fn patch_variant_at(app: &mut App, cell: (i32, i32)) -> Option<PatchVariant> {
    let mut query = app.world_mut().query::<&FarmSprite>();
    query.iter(app.world()).find_map(|sprite| match sprite.kind {
        FarmSpriteKind::SoilPatch(variant) if sprite.cell == cell => Some(variant),
        _ => None,
    })
}

fn count_sprites(app: &mut App, wanted: fn(&FarmSpriteKind) -> bool) -> usize {
    let mut query = app.world_mut().query::<&FarmSprite>();
    query
        .iter(app.world())
        .filter(|sprite| wanted(&sprite.kind))
        .count()
}

fn overlay_count(app: &mut App) -> usize {
    count_sprites(app, |kind| matches!(kind, FarmSpriteKind::WaterOverlay))
}

fn patch_count(app: &mut App) -> usize {
    count_sprites(app, |kind| matches!(kind, FarmSpriteKind::SoilPatch(_)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tilling and autotiling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_till_creates_isolated_patch() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);

    send_tool(&mut app, ToolKind::Hoe, 1, 1);
    app.update();

    let grid = app.world().resource::<FarmGrid>();
    assert!(grid.has_flag(1, 1, CellFlag::Tilled));

    assert_eq!(patch_count(&mut app), 1);
    assert_eq!(patch_variant_at(&mut app, (1, 1)), Some(PatchVariant::O));
}

#[test]
fn test_till_neighbor_updates_both_variants() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);

    send_tool(&mut app, ToolKind::Hoe, 1, 1);
    app.update();
    // Till the cell above the centre: the centre's only tilled neighbor is
    // now above it (variant `b`), and the new cell's is below (variant `t`).
    send_tool(&mut app, ToolKind::Hoe, 1, 2);
    app.update();

    assert_eq!(patch_count(&mut app), 2);
    assert_eq!(patch_variant_at(&mut app, (1, 1)), Some(PatchVariant::B));
    assert_eq!(patch_variant_at(&mut app, (1, 2)), Some(PatchVariant::T));
}

#[test]
fn test_till_non_farmable_is_a_no_op() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);

    let mut grid = FarmGrid::new(3, 3);
    grid.mark_farmable(0, 0);
    app.insert_resource(grid);

    send_tool(&mut app, ToolKind::Hoe, 2, 2);
    app.update();

    let grid = app.world().resource::<FarmGrid>();
    assert!(grid.cells_with(CellFlag::Tilled).is_empty());
    assert_eq!(patch_count(&mut app), 0, "no patch for a refused till");
}

#[test]
fn test_tilling_while_raining_waters_immediately() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);

    app.world_mut().resource_mut::<Calendar>().weather = Weather::Rainy;

    send_tool(&mut app, ToolKind::Hoe, 0, 0);
    app.update();

    let grid = app.world().resource::<FarmGrid>();
    assert!(
        grid.has_flag(0, 0, CellFlag::Watered),
        "no dry tilled cell may exist mid-rain"
    );
    assert_eq!(overlay_count(&mut app), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Irrigation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_water_spawns_overlay_and_clear_removes_it() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);

    send_tool(&mut app, ToolKind::Hoe, 1, 1);
    app.update();
    send_tool(&mut app, ToolKind::WateringCan, 1, 1);
    app.update();

    assert!(app
        .world()
        .resource::<FarmGrid>()
        .has_flag(1, 1, CellFlag::Watered));
    assert_eq!(overlay_count(&mut app), 1);

    // Watering the same cell again must not duplicate the overlay.
    send_tool(&mut app, ToolKind::WateringCan, 1, 1);
    app.update();
    assert_eq!(overlay_count(&mut app), 1);

    // Daily reset: every Watered flag and overlay goes away.
    {
        let mut grid = app.world_mut().resource_mut::<FarmGrid>();
        irrigation::clear_all(&mut grid);
    }
    app.update();

    assert_eq!(overlay_count(&mut app), 0);
    let grid = app.world().resource::<FarmGrid>();
    assert!(grid.cells_with(CellFlag::Watered).is_empty());
    assert!(
        grid.has_flag(1, 1, CellFlag::Tilled),
        "clearing water keeps the soil tilled"
    );
}

#[test]
fn test_water_all_twice_has_no_duplicate_overlays() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 4);

    for x in 0..3 {
        send_tool(&mut app, ToolKind::Hoe, x, 0);
    }
    app.update();

    {
        let mut grid = app.world_mut().resource_mut::<FarmGrid>();
        irrigation::water_all(&mut grid);
    }
    app.update();
    let first = overlay_count(&mut app);
    assert_eq!(first, 3);

    {
        let mut grid = app.world_mut().resource_mut::<FarmGrid>();
        irrigation::water_all(&mut grid);
    }
    app.update();
    assert_eq!(overlay_count(&mut app), first);
}

#[test]
fn test_rainy_day_start_waters_the_field() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);

    send_tool(&mut app, ToolKind::Hoe, 2, 2);
    app.update();

    app.world_mut().send_event(DayStartedEvent {
        day: 2,
        weather: Weather::Rainy,
    });
    app.update();

    assert!(app
        .world()
        .resource::<FarmGrid>()
        .has_flag(2, 2, CellFlag::Watered));
}

// ─────────────────────────────────────────────────────────────────────────────
// Planting and growth
// ─────────────────────────────────────────────────────────────────────────────

fn populate_registry(app: &mut App) {
    let mut registry = app.world_mut().resource_mut::<SpeciesRegistry>();
    populate_species(&mut registry);
}

fn send_seed(app: &mut App, species: &str, x: i32, y: i32) {
    app.world_mut().send_event(SeedUseEvent {
        species: species.to_string(),
        target: cell_point(x, y),
    });
}

fn single_plant(app: &mut App) -> Plant {
    let mut query = app.world_mut().query::<&Plant>();
    let mut iter = query.iter(app.world());
    let plant = iter.next().expect("one plant").clone();
    assert!(iter.next().is_none(), "exactly one plant expected");
    plant
}

#[test]
fn test_seed_needs_tilled_unplanted_soil() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);
    populate_registry(&mut app);

    // Untilled: silently refused.
    send_seed(&mut app, "corn", 1, 1);
    app.update();
    {
        let mut query = app.world_mut().query::<&Plant>();
        assert_eq!(query.iter(app.world()).count(), 0);
    }

    send_tool(&mut app, ToolKind::Hoe, 1, 1);
    app.update();
    send_seed(&mut app, "corn", 1, 1);
    app.update();

    let plant = single_plant(&mut app);
    assert_eq!(plant.age, 0.0);
    assert_eq!(plant.cell, (1, 1));
    assert!(app
        .world()
        .resource::<FarmGrid>()
        .has_flag(1, 1, CellFlag::Planted));

    // Double planting is silently refused.
    send_seed(&mut app, "tomato", 1, 1);
    app.update();
    let plant = single_plant(&mut app);
    assert_eq!(plant.species, "corn");
}

#[test]
fn test_growth_only_on_watered_days() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);
    populate_registry(&mut app);

    send_tool(&mut app, ToolKind::Hoe, 0, 0);
    app.update();
    send_seed(&mut app, "corn", 0, 0);
    app.update();

    // A dry day: no growth.
    app.world_mut().send_event(DayEndEvent { day: 1 });
    app.update();
    assert_eq!(single_plant(&mut app).age, 0.0);

    // A watered day: one tick of growth, then the water resets.
    send_tool(&mut app, ToolKind::WateringCan, 0, 0);
    app.update();
    app.world_mut().send_event(DayEndEvent { day: 2 });
    app.update();

    assert_eq!(single_plant(&mut app).age, 1.0);
    assert!(app
        .world()
        .resource::<FarmGrid>()
        .cells_with(CellFlag::Watered)
        .is_empty());
}

#[test]
fn test_corn_matures_in_three_watered_days() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);
    populate_registry(&mut app);

    send_tool(&mut app, ToolKind::Hoe, 1, 1);
    app.update();
    send_seed(&mut app, "corn", 1, 1);
    app.update();

    for day in 1..=3u32 {
        send_tool(&mut app, ToolKind::WateringCan, 1, 1);
        app.update();
        app.world_mut().send_event(DayEndEvent { day });
        app.update();

        let plant = single_plant(&mut app);
        assert_eq!(plant.age, day as f32);
        assert_eq!(
            plant.harvestable,
            day == 3,
            "corn (max_age 3) is harvestable exactly on day 3"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harvest by collision
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_collision_harvest_collects_and_frees_the_cell() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    app.add_systems(Update, (plant_collision, add_items_to_inventory).chain());
    setup_farmable_grid(&mut app, 3);
    populate_registry(&mut app);

    send_tool(&mut app, ToolKind::Hoe, 1, 1);
    app.update();
    send_seed(&mut app, "corn", 1, 1);
    app.update();

    // Grow to maturity.
    for day in 1..=3u32 {
        send_tool(&mut app, ToolKind::WateringCan, 1, 1);
        app.update();
        app.world_mut().send_event(DayEndEvent { day });
        app.update();
    }
    assert!(single_plant(&mut app).harvestable);

    // Walk the player onto the plant.
    app.world_mut().spawn((
        Player,
        PlayerMovement::default(),
        GridPosition::new(1, 1),
        Transform::from_translation(cell_point(1, 1).extend(Z_PLAYER)),
    ));
    app.update();

    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.count("corn"), 1);

    let grid = app.world().resource::<FarmGrid>();
    assert!(!grid.has_flag(1, 1, CellFlag::Planted));
    assert!(grid.has_flag(1, 1, CellFlag::Tilled), "soil stays tilled");

    let mut query = app.world_mut().query::<&Plant>();
    assert_eq!(query.iter(app.world()).count(), 0, "plant entity despawned");
}

// ─────────────────────────────────────────────────────────────────────────────
// Calendar
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_day_end_advances_calendar_and_starts_a_new_day() {
    let mut app = build_test_app();
    app.add_systems(Update, process_day_end);

    assert_eq!(app.world().resource::<Calendar>().day, 1);

    app.world_mut().send_event(DayEndEvent { day: 1 });
    app.update();

    let calendar = app.world().resource::<Calendar>();
    assert_eq!(calendar.day, 2);

    let started = app.world().resource::<Events<DayStartedEvent>>();
    let mut cursor = started.get_cursor();
    let events: Vec<_> = cursor.read(started).collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].day, 2);
    assert_eq!(events[0].weather, calendar.weather);
}

// ─────────────────────────────────────────────────────────────────────────────
// End-to-end: the 3×3 scenario
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_three_by_three_scenario() {
    let mut app = build_test_app();
    add_soil_systems(&mut app);
    setup_farmable_grid(&mut app, 3);
    populate_registry(&mut app);

    // Till centre only → isolated patch.
    send_tool(&mut app, ToolKind::Hoe, 1, 1);
    app.update();
    assert_eq!(patch_variant_at(&mut app, (1, 1)), Some(PatchVariant::O));

    // Till the cell above → centre `b`, above `t`.
    send_tool(&mut app, ToolKind::Hoe, 1, 2);
    app.update();
    assert_eq!(patch_variant_at(&mut app, (1, 1)), Some(PatchVariant::B));
    assert_eq!(patch_variant_at(&mut app, (1, 2)), Some(PatchVariant::T));

    // Plant corn (max_age 3, grow_speed 1) on the watered centre; after
    // three watered days it is harvestable with age exactly 3.
    send_seed(&mut app, "corn", 1, 1);
    app.update();
    for day in 1..=3u32 {
        send_tool(&mut app, ToolKind::WateringCan, 1, 1);
        app.update();
        app.world_mut().send_event(DayEndEvent { day });
        app.update();
    }

    let plant = single_plant(&mut app);
    assert!(plant.harvestable);
    assert_eq!(plant.age, 3.0);

    // The grid invariant holds after the whole scenario: every gameplay
    // flag sits on a farmable cell.
    let grid = app.world().resource::<FarmGrid>();
    for flag in [CellFlag::Tilled, CellFlag::Watered, CellFlag::Planted] {
        for (x, y) in grid.cells_with(flag) {
            assert!(grid.has_flag(x, y, CellFlag::Farmable));
        }
    }
}
