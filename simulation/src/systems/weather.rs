//! Weather generation and scripted event application.

use rand::Rng;

use crate::scenario::{ScenarioEvent, VictoryPolicy, WeatherRanges};

/// Sample the day's weather from the current policy.
///
/// Sun and raw water are drawn uniformly from their inclusive ranges; the
/// water value is then scaled by the multiplier (floored back to an
/// integer level). Both replace, never accumulate into, the previous
/// day's levels.
pub fn generate_weather<R: Rng>(
    ranges: &WeatherRanges,
    water_multiplier: f64,
    rng: &mut R,
) -> (i32, i32) {
    let sun = rng.gen_range(ranges.sun[0]..=ranges.sun[1]);
    let raw_water = rng.gen_range(ranges.water[0]..=ranges.water[1]);
    let water = (f64::from(raw_water) * water_multiplier).floor() as i32;
    (sun, water)
}

/// Apply a scripted event's present fields as in-place policy overrides.
///
/// Absent fields leave the current policy untouched. Returns the event's
/// message, if any, for the driver to display.
pub fn apply_event(
    event: &ScenarioEvent,
    weather: &mut WeatherRanges,
    victory: &mut VictoryPolicy,
    water_multiplier: &mut f64,
) -> Option<String> {
    if let Some(sun_range) = event.sun_range {
        weather.sun = sun_range;
    }
    if let Some(water_range) = event.water_range {
        weather.water = water_range;
    }
    if let Some(multiplier) = event.water_multiplier {
        *water_multiplier = multiplier;
    }
    if let Some(required) = event.mature_plants_required {
        victory.mature_plants_required = required;
    }
    event.message.clone()
}
