//! UI domain — the HUD readout and audio-cue playback.

use bevy::prelude::*;

use crate::shared::*;

pub mod audio;
pub mod hud;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud)
            .add_systems(
                Update,
                (hud::update_hud, audio::handle_play_sfx).run_if(in_state(GameState::Playing)),
            );
    }
}
