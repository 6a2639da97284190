//! Rainfall conditions and the evaluator that ANDs them against a
//! predicted [`WeatherCalendar`].

use serde::{Deserialize, Serialize};

use crate::{error::SearchError, oracle::WeatherCalendar, oracle::Season};

/// Wire-format configuration for a single [`WeatherCondition`].
///
/// ## Example JSON
/// ```text
/// { "season": "Spring", "startDay": 1, "endDay": 10, "minRainDays": 5 }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherConditionConfig {
    /// Season the day range falls within.
    pub season: Season,
    /// Starting day of the month (inclusive), `1..=28`.
    pub start_day: u32,
    /// Ending day of the month (inclusive), `start_day..=28`.
    pub end_day: u32,
    /// Minimum number of rainy days required in the range.
    pub min_rain_days: usize,
}

/// A validated rainfall condition over a `[start_day, end_day]` window
/// within a single season.
///
/// Immutable after construction; `absolute_start`/`absolute_end` are
/// precomputed so the evaluator never recomputes them per seed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeatherCondition {
    season: Season,
    start_day: u32,
    end_day: u32,
    min_rain_days: usize,
    absolute_start: u32,
    absolute_end: u32,
}

impl WeatherCondition {
    /// Validate and construct a [`WeatherCondition`] from its wire
    /// configuration.
    ///
    /// Rejects out-of-range days, an inverted range, and a
    /// `min_rain_days` that could never be satisfied.
    pub fn new(config: &WeatherConditionConfig) -> Result<Self, SearchError> {
        let WeatherConditionConfig {
            season,
            start_day,
            end_day,
            min_rain_days,
        } = *config;

        if !(1..=28).contains(&start_day) {
            return Err(SearchError::InvalidRequest(format!(
                "start_day {start_day} out of range [1,28]"
            )));
        }
        if end_day < start_day || end_day > 28 {
            return Err(SearchError::InvalidRequest(format!(
                "end_day {end_day} must be in [{start_day},28]"
            )));
        }
        let window = (end_day - start_day + 1) as usize;
        if min_rain_days > window {
            return Err(SearchError::InvalidRequest(format!(
                "min_rain_days {min_rain_days} exceeds window size {window}"
            )));
        }

        let absolute_start = season.index() * 28 + start_day;
        let absolute_end = season.index() * 28 + end_day;

        Ok(Self {
            season,
            start_day,
            end_day,
            min_rain_days,
            absolute_start,
            absolute_end,
        })
    }

    /// The condition's season.
    pub fn season(&self) -> Season {
        self.season
    }

    /// Starting day of the month.
    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    /// Ending day of the month.
    pub fn end_day(&self) -> u32 {
        self.end_day
    }

    /// Minimum rainy days required.
    pub fn min_rain_days(&self) -> usize {
        self.min_rain_days
    }

    /// Absolute start day (`1..=84`) of the window.
    pub fn absolute_start(&self) -> u32 {
        self.absolute_start
    }

    /// Absolute end day (`1..=84`) of the window.
    pub fn absolute_end(&self) -> u32 {
        self.absolute_end
    }
}

/// Evaluate every condition against `calendar`, ANDing the results.
///
/// An empty `conditions` slice is the identity predicate and returns
/// `true` unconditionally. Short-circuits on the first failing
/// condition.
pub fn matches(calendar: &WeatherCalendar, conditions: &[WeatherCondition]) -> bool {
    conditions.iter().all(|condition| {
        let rain_days = calendar.count_rain(condition.absolute_start(), condition.absolute_end());
        rain_days >= condition.min_rain_days()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::predict;

    fn condition(season: Season, start_day: u32, end_day: u32, min_rain_days: usize) -> WeatherCondition {
        WeatherCondition::new(&WeatherConditionConfig {
            season,
            start_day,
            end_day,
            min_rain_days,
        })
        .unwrap()
    }

    #[test]
    fn empty_conditions_always_match() {
        let calendar = predict(1, false);
        assert!(matches(&calendar, &[]));
    }

    #[test]
    fn absolute_days_derived_correctly() {
        let c = condition(Season::Summer, 5, 10, 0);
        assert_eq!(c.absolute_start(), 28 + 5);
        assert_eq!(c.absolute_end(), 28 + 10);
    }

    #[test]
    fn min_rain_days_zero_is_always_true() {
        let calendar = predict(42, false);
        let c = condition(Season::Fall, 1, 28, 0);
        assert!(matches(&calendar, &[c]));
    }

    #[test]
    fn rejects_out_of_range_start_day() {
        let err = WeatherCondition::new(&WeatherConditionConfig {
            season: Season::Spring,
            start_day: 0,
            end_day: 5,
            min_rain_days: 0,
        });
        assert!(err.is_err());
    }

    #[test]
    fn rejects_end_before_start() {
        let err = WeatherCondition::new(&WeatherConditionConfig {
            season: Season::Spring,
            start_day: 10,
            end_day: 5,
            min_rain_days: 0,
        });
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unsatisfiable_min_rain_days() {
        let err = WeatherCondition::new(&WeatherConditionConfig {
            season: Season::Spring,
            start_day: 1,
            end_day: 10,
            min_rain_days: 11,
        });
        assert!(err.is_err());
    }

    #[test]
    fn conditions_are_anded() {
        let calendar = predict(59, false);
        let impossible = condition(Season::Spring, 1, 28, 28);
        let trivial = condition(Season::Spring, 1, 28, 0);
        assert!(!matches(&calendar, &[trivial, impossible]));
    }
}
