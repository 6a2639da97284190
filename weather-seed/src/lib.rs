//! # Weather Seed
//!
//! An offline search engine that enumerates candidate 32-bit game seeds
//! and keeps those whose deterministically simulated first-year weather
//! calendar satisfies a conjunction of rainfall conditions.
//!
//! `weather-seed` is broken down into:
//!
//! * [`hash`]: the xxHash32-based hash primitive the reference platform
//!   uses to seed its RNG.
//! * [`mix`]: the seed-mixer combining up to five integers and a mode
//!   flag into an RNG seed.
//! * [`lcg`]: the single linear-congruential draw the oracle ever needs
//!   from a freshly seeded generator.
//! * [`oracle`]: [`oracle::predict`] maps `(game_seed, legacy_mode)` to
//!   an 84-day [`oracle::WeatherCalendar`].
//! * [`condition`]: [`condition::WeatherCondition`] and
//!   [`condition::matches`] evaluate a calendar against rainfall
//!   thresholds.
//! * [`search`]: the parallel search driver, [`search::search`], and its
//!   [`sink::Sink`] event contract.
//!
//! ## Example
//! ```
//! use weather_seed::{
//!     oracle::Season,
//!     search::{CancelToken, SearchRequest, SearchRequestConfig, search},
//!     condition::WeatherConditionConfig,
//!     sink::NullSink,
//! };
//!
//! let config = SearchRequestConfig {
//!     start_seed: 0,
//!     end_seed: 1000,
//!     use_legacy_random: false,
//!     weather_conditions: vec![WeatherConditionConfig {
//!         season: Season::Spring,
//!         start_day: 1,
//!         end_day: 10,
//!         min_rain_days: 5,
//!     }],
//!     output_limit: 100,
//! };
//! let request = SearchRequest::new(&config).unwrap();
//! let summary = search(&request, &NullSink, &CancelToken::new());
//! assert_eq!(summary.matches, vec![58, 59, 73, 101, 142, 648, 659, 932, 938]);
//! ```

#![deny(missing_docs)]

pub mod condition;
pub mod error;
pub mod hash;
pub mod lcg;
pub mod mix;
pub mod oracle;
pub mod search;
pub mod sink;

pub use condition::{matches, WeatherCondition, WeatherConditionConfig};
pub use error::SearchError;
pub use mix::mix as mix_seed;
pub use oracle::{classify_day, predict, report, DayWeather, Season, WeatherCalendar};
pub use search::{
    check, search, CancelToken, Evaluator, SearchRequest, SearchRequestConfig, Summary,
};
pub use sink::{ChannelSink, Event, NullSink, Sink};
