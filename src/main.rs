mod calendar;
mod data;
mod player;
mod shared;
mod soil;
mod ui;
mod world;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Ferncroft".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<Calendar>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<FarmGrid>()
        .init_resource::<WorldMap>()
        .init_resource::<SpeciesRegistry>()
        // Events
        .add_event::<ToolUseEvent>()
        .add_event::<SeedUseEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<DayStartedEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<PlaySfxEvent>()
        // Domain plugins
        .add_plugins(data::DataPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(soil::SoilPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXEL_SCALE)),
    ));
}
