//! The weather oracle: maps `(game_seed, legacy_mode)` to the 84-day
//! boolean rain calendar for year 1 (spring, summer, fall).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    hash::{location_weather_hash, summer_rain_chance_hash},
    lcg::{first_draw, next_double, next_int},
    mix::mix,
};

/// Number of days simulated per season.
pub const DAYS_PER_SEASON: u32 = 28;

/// Number of days in the year-1 calendar this oracle predicts.
pub const CALENDAR_DAYS: usize = 84;

/// Summer days, in order, eligible to be the single green-rain day of
/// the year.
const GREEN_RAIN_CANDIDATES: [u32; 8] = [5, 6, 7, 14, 15, 16, 18, 23];

/// A season within the year-1 calendar.
#[derive(
    Clone, Copy, Debug, Display, EnumString, Eq, PartialEq, Deserialize, Serialize, Hash,
)]
#[repr(u8)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Season {
    /// Days 1..=28 of the year.
    Spring = 0,
    /// Days 29..=56 of the year.
    Summer = 1,
    /// Days 57..=84 of the year.
    Fall = 2,
}

impl Season {
    /// The season containing `absolute_day` (1-indexed, `1..=84`).
    pub fn from_absolute_day(absolute_day: u32) -> Self {
        match (absolute_day - 1) / DAYS_PER_SEASON {
            0 => Season::Spring,
            1 => Season::Summer,
            _ => Season::Fall,
        }
    }

    /// This season's index (`Spring=0, Summer=1, Fall=2`), as used in
    /// `absolute_day = season * 28 + day`.
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// A single day's classification, richer than the plain rain boolean
/// stored in [`WeatherCalendar`]; used for reporting, not as a search
/// predicate — search conditions only ever test rain vs. not.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DayWeather {
    /// No rain.
    Clear,
    /// Ordinary or scripted rain.
    Rain,
    /// A festival day; always clear.
    Festival,
    /// The year's single green-rain day; counts as rain.
    GreenRain,
}

impl DayWeather {
    /// Whether this day counts as rainy for condition-evaluation purposes.
    pub const fn is_rain(self) -> bool {
        matches!(self, DayWeather::Rain | DayWeather::GreenRain)
    }
}

impl From<DayWeather> for bool {
    fn from(value: DayWeather) -> Self {
        value.is_rain()
    }
}

/// The 84-day year-1 rain calendar (spring, summer, fall) for a seed.
///
/// Indexed by absolute day, `1..=84`; every entry is populated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeatherCalendar {
    days: [bool; CALENDAR_DAYS],
}

impl WeatherCalendar {
    /// Whether `absolute_day` (`1..=84`) is rainy.
    ///
    /// Panics if `absolute_day` is out of range, as this would indicate
    /// an internal invariant violation (spec §7) rather than a
    /// recoverable condition.
    pub fn is_rain(&self, absolute_day: u32) -> bool {
        self.days[absolute_day as usize - 1]
    }

    /// Count rainy days in `[start, end]` inclusive (both `1..=84`).
    pub fn count_rain(&self, start: u32, end: u32) -> usize {
        (start..=end).filter(|&day| self.is_rain(day)).count()
    }

    /// Number of populated days; always [`CALENDAR_DAYS`].
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always `false`; kept for API symmetry with other collection types.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn green_rain_day(game_seed: i32, legacy: bool) -> u32 {
    const YEAR: i32 = 1;
    let g_seed = mix(YEAR * 777, game_seed, 0, 0, 0, legacy);
    let idx = next_int(first_draw(g_seed), GREEN_RAIN_CANDIDATES.len() as i32);
    GREEN_RAIN_CANDIDATES[idx as usize]
}

fn generic_rain(game_seed: i32, absolute_day: u32, legacy: bool) -> bool {
    let rng_seed = mix(
        location_weather_hash(),
        game_seed,
        (absolute_day - 1) as i32,
        0,
        0,
        legacy,
    );
    next_double(first_draw(rng_seed)) < 0.183
}

fn spring_day(game_seed: i32, day_of_month: u32, absolute_day: u32, legacy: bool) -> DayWeather {
    match day_of_month {
        1 | 2 | 4 => DayWeather::Clear,
        3 => DayWeather::Rain,
        13 | 24 => DayWeather::Festival,
        _ => {
            if generic_rain(game_seed, absolute_day, legacy) {
                DayWeather::Rain
            } else {
                DayWeather::Clear
            }
        }
    }
}

fn summer_day(
    game_seed: i32,
    day_of_month: u32,
    absolute_day: u32,
    green_rain_day: u32,
    legacy: bool,
) -> DayWeather {
    if day_of_month == green_rain_day {
        return DayWeather::GreenRain;
    }
    if day_of_month == 11 || day_of_month == 28 {
        return DayWeather::Festival;
    }
    if day_of_month % 13 == 0 {
        return DayWeather::Rain;
    }

    // `game_seed div 2` truncates toward zero, matching Rust's native
    // integer division for signed types.
    let rng_seed = mix(
        (absolute_day - 1) as i32,
        game_seed / 2,
        summer_rain_chance_hash(),
        0,
        0,
        legacy,
    );
    let p = 0.12 + 0.003 * (day_of_month as f64 - 1.0);
    if next_double(first_draw(rng_seed)) < p {
        DayWeather::Rain
    } else {
        DayWeather::Clear
    }
}

fn fall_day(game_seed: i32, day_of_month: u32, absolute_day: u32, legacy: bool) -> DayWeather {
    match day_of_month {
        16 | 27 => DayWeather::Festival,
        _ => {
            if generic_rain(game_seed, absolute_day, legacy) {
                DayWeather::Rain
            } else {
                DayWeather::Clear
            }
        }
    }
}

/// Classify a single absolute day (`1..=84`) given an already-computed
/// green-rain day, applying the spring, summer, or fall rule set in
/// order. Shared by [`classify_day`] and [`predict`] so the two never
/// drift apart.
fn classify_day_with_green_rain(
    game_seed: i32,
    absolute_day: u32,
    legacy: bool,
    grd: u32,
) -> DayWeather {
    let season = Season::from_absolute_day(absolute_day);
    let day_of_month = (absolute_day - 1) % DAYS_PER_SEASON + 1;

    match season {
        Season::Spring => spring_day(game_seed, day_of_month, absolute_day, legacy),
        Season::Summer => summer_day(game_seed, day_of_month, absolute_day, grd, legacy),
        Season::Fall => fall_day(game_seed, day_of_month, absolute_day, legacy),
    }
}

/// Classify a single absolute day (`1..=84`), applying the spring,
/// summer, or fall rule set in order.
///
/// Computes the seed's green-rain day itself, so repeated calls across
/// a whole calendar recompute it once per call; [`predict`] instead
/// computes it once and reuses it across all 84 days. Prefer `predict`
/// when classifying an entire calendar and this function for one-off
/// lookups, such as the CLI's per-match [`report`].
pub fn classify_day(game_seed: i32, absolute_day: u32, legacy: bool) -> DayWeather {
    let grd = green_rain_day(game_seed, legacy);
    classify_day_with_green_rain(game_seed, absolute_day, legacy, grd)
}

/// Predict the full year-1 rain calendar for `game_seed`.
///
/// The green-rain day is computed once per seed and reused across all
/// 28 summer days, per the performance note in spec §4.D.
pub fn predict(game_seed: i32, legacy: bool) -> WeatherCalendar {
    let grd = green_rain_day(game_seed, legacy);
    let mut days = [false; CALENDAR_DAYS];

    for (i, slot) in days.iter_mut().enumerate() {
        let absolute_day = (i + 1) as u32;
        *slot = classify_day_with_green_rain(game_seed, absolute_day, legacy, grd).is_rain();
    }

    WeatherCalendar { days }
}

/// Render a human-readable, per-season breakdown of `game_seed`'s
/// calendar, built on [`classify_day`]. Mirrors the teacher's
/// `Predictor::report` convention; used by the CLI to describe each
/// matched seed.
pub fn report(game_seed: i32, legacy: bool) -> String {
    let mut out = String::new();
    for season in [Season::Spring, Season::Summer, Season::Fall] {
        let rainy_days: Vec<u32> = (1..=DAYS_PER_SEASON)
            .filter(|&day_of_month| {
                let absolute_day = season.index() * DAYS_PER_SEASON + day_of_month;
                classify_day(game_seed, absolute_day, legacy).is_rain()
            })
            .collect();
        out.push_str(&format!("{season}: rain on {rainy_days:?}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_has_exactly_84_entries() {
        let calendar = predict(12345, false);
        assert_eq!(calendar.len(), CALENDAR_DAYS);
    }

    #[test]
    fn deterministic_across_calls() {
        for legacy in [true, false] {
            let a = predict(987_654, legacy);
            let b = predict(987_654, legacy);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn scripted_spring_days() {
        for seed in [0, 1, 59, 101, -42, i32::MAX, i32::MIN + 1] {
            for legacy in [true, false] {
                let calendar = predict(seed, legacy);
                assert!(!calendar.is_rain(1), "seed {seed} legacy {legacy}");
                assert!(!calendar.is_rain(2), "seed {seed} legacy {legacy}");
                assert!(calendar.is_rain(3), "seed {seed} legacy {legacy}");
                assert!(!calendar.is_rain(4), "seed {seed} legacy {legacy}");
                assert!(!calendar.is_rain(13), "seed {seed} legacy {legacy}");
                assert!(!calendar.is_rain(24), "seed {seed} legacy {legacy}");
            }
        }
    }

    #[test]
    fn scripted_summer_days() {
        for seed in [0, 1, 59, 101, -42, i32::MAX, i32::MIN + 1] {
            for legacy in [true, false] {
                let calendar = predict(seed, legacy);
                // absolute days: summer day 11 -> 28+11=39, day 13 -> 41,
                // day 26 -> 54, day 28 -> 56.
                assert!(!calendar.is_rain(39), "seed {seed} legacy {legacy}");
                assert!(calendar.is_rain(41), "seed {seed} legacy {legacy}");
                assert!(calendar.is_rain(54), "seed {seed} legacy {legacy}");
                assert!(!calendar.is_rain(56), "seed {seed} legacy {legacy}");
            }
        }
    }

    #[test]
    fn scripted_fall_days() {
        for seed in [0, 1, 59, 101, -42, i32::MAX, i32::MIN + 1] {
            for legacy in [true, false] {
                let calendar = predict(seed, legacy);
                // absolute days: fall day 16 -> 56+16=72, day 27 -> 83.
                assert!(!calendar.is_rain(72), "seed {seed} legacy {legacy}");
                assert!(!calendar.is_rain(83), "seed {seed} legacy {legacy}");
            }
        }
    }

    #[test]
    fn green_rain_day_is_disjoint_from_fixed_summer_days() {
        for day in GREEN_RAIN_CANDIDATES {
            assert!(day != 11 && day != 28 && day % 13 != 0);
        }
    }

    #[test]
    fn season_round_trips_through_display_and_parse() {
        use std::str::FromStr;
        assert_eq!(Season::Spring.to_string(), "Spring");
        assert_eq!(Season::from_str("Summer").unwrap(), Season::Summer);
    }

    #[test]
    fn season_serializes_to_capitalized_name() {
        let json = serde_json::to_string(&Season::Fall).unwrap();
        assert_eq!(json, "\"Fall\"");
    }

    #[test]
    fn classify_day_agrees_with_predict_for_every_day() {
        for seed in [0, 1, 59, 101, -42, i32::MAX, i32::MIN + 1] {
            for legacy in [true, false] {
                let calendar = predict(seed, legacy);
                for absolute_day in 1..=CALENDAR_DAYS as u32 {
                    assert_eq!(
                        classify_day(seed, absolute_day, legacy).is_rain(),
                        calendar.is_rain(absolute_day),
                        "seed {seed} legacy {legacy} day {absolute_day}"
                    );
                }
            }
        }
    }

    #[test]
    fn report_lists_rain_days_consistent_with_predict() {
        let seed = 59;
        let calendar = predict(seed, false);
        let report = report(seed, false);
        assert!(report.contains("Spring:"));
        assert!(report.contains("Summer:"));
        assert!(report.contains("Fall:"));
        // Day 3 is always scripted rain in spring.
        assert!(calendar.is_rain(3));
        assert!(report.lines().next().unwrap().contains('3'));
    }
}
