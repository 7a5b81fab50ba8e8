//! Audio-cue playback — one-shot sound effects for PlaySfxEvent.

use bevy::prelude::*;

use crate::shared::*;

/// Maps SFX ids (sent by other domains) to audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "hoe" => Some("audio/hoe.ogg"),
        "water" => Some("audio/water.ogg"),
        "plant" => Some("audio/plant.ogg"),
        "success" => Some("audio/success.ogg"),
        "axe" => Some("audio/axe.ogg"),
        _ => None,
    }
}

/// Listen for PlaySfxEvent and spawn one-shot audio sources that
/// auto-despawn when playback finishes.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        let Some(path) = sfx_path(&event.sfx_id) else {
            warn!("[Ui] Unknown sfx id '{}'", event.sfx_id);
            continue;
        };
        commands.spawn((
            AudioPlayer::new(asset_server.load(path)),
            PlaybackSettings::DESPAWN,
        ));
    }
}
