use bevy::prelude::*;

use crate::shared::*;

/// Keep the camera centred on the player with a light smoothing factor.
pub fn camera_follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player_tf) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera_tf) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_tf.translation.truncate();
    let current = camera_tf.translation.truncate();
    let smoothed = current.lerp(target, (8.0 * time.delta_secs()).min(1.0));

    camera_tf.translation.x = smoothed.x;
    camera_tf.translation.y = smoothed.y;
}
