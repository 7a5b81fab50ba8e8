//! Calendar domain — the day cycle.
//!
//! Responsible for:
//! - The day counter and daily weather roll
//! - The sleep trigger (press B) that ends the day
//! - Fanning out DayEndEvent / DayStartedEvent to the other domains
//!
//! Growth and the irrigation reset consume DayEndEvent in the soil domain;
//! a rainy DayStartedEvent re-waters the field there too.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (trigger_sleep, process_day_end.after(trigger_sleep))
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// The player ends the day by pressing B. All other domains (soil growth,
/// tree fruit, irrigation reset) hang their end-of-day logic off the
/// resulting DayEndEvent.
pub fn trigger_sleep(
    keyboard: Res<ButtonInput<KeyCode>>,
    calendar: Res<Calendar>,
    mut day_end_events: EventWriter<DayEndEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyB) {
        return;
    }

    info!("[Calendar] Sleeping — day {} ends", calendar.day);
    day_end_events.send(DayEndEvent { day: calendar.day });
}

/// Advance the calendar when a day ends: bump the day counter, roll the
/// new day's weather, and announce the morning.
pub fn process_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut calendar: ResMut<Calendar>,
    mut day_started_events: EventWriter<DayStartedEvent>,
) {
    for _ in day_end_events.read() {
        calendar.day += 1;
        calendar.weather = if rand::thread_rng().gen_bool(RAIN_CHANCE) {
            Weather::Rainy
        } else {
            Weather::Sunny
        };

        info!(
            "[Calendar] Day {} begins — {:?}",
            calendar.day, calendar.weather
        );
        day_started_events.send(DayStartedEvent {
            day: calendar.day,
            weather: calendar.weather,
        });
    }
}
