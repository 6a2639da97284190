//! The parallel search driver: shards a seed range across worker
//! threads, streams matches to a [`Sink`], and honors an output cap
//! with cooperative early stop (spec §4.F, §5).

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    condition::{matches, WeatherCondition, WeatherConditionConfig},
    error::SearchError,
    oracle::predict,
    sink::Sink,
};

/// Largest valid seed, the positive signed-32-bit range's upper bound.
pub const MAX_SEED: i32 = i32::MAX;

/// A pure per-worker predicate: `(game_seed) -> bool`, closing over the
/// legacy-mode flag and the condition set, matching spec §1's
/// `check(seed, legacy) -> bool` and §4.F's "per-worker pure evaluator
/// instance". Holds no mutable state; every call re-derives the 84-day
/// calendar on the stack, so no scratch buffer needs to be threaded
/// through explicitly.
#[derive(Clone, Debug)]
pub struct Evaluator {
    conditions: Vec<WeatherCondition>,
    legacy: bool,
}

impl Evaluator {
    /// Build an evaluator bound to a fixed condition set and RNG mode.
    pub fn new(conditions: Vec<WeatherCondition>, legacy: bool) -> Self {
        Self { conditions, legacy }
    }

    /// Predict `seed`'s calendar and test it against this evaluator's
    /// conditions.
    pub fn check(&self, seed: i32) -> bool {
        let calendar = predict(seed, self.legacy);
        matches(&calendar, &self.conditions)
    }
}

/// Free-function form of [`Evaluator::check`] for simple one-off checks.
pub fn check(seed: i32, legacy: bool, conditions: &[WeatherCondition]) -> bool {
    matches(&predict(seed, legacy), conditions)
}

/// Wire-format configuration for a [`SearchRequest`] (spec §6).
///
/// ## Example JSON
/// ```text
/// {
///   "startSeed": 0, "endSeed": 1000000, "useLegacyRandom": false,
///   "weatherConditions": [
///     { "season": "Spring", "startDay": 1, "endDay": 10, "minRainDays": 5 }
///   ],
///   "outputLimit": 20
/// }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestConfig {
    /// First seed to scan, inclusive.
    pub start_seed: i32,
    /// Last seed to scan, inclusive.
    pub end_seed: i32,
    /// Use the legacy additive seed-mixing path instead of xxHash32.
    pub use_legacy_random: bool,
    /// Conditions ANDed together; empty means "accept all".
    #[serde(default)]
    pub weather_conditions: Vec<WeatherConditionConfig>,
    /// Maximum number of seeds to return.
    pub output_limit: usize,
}

/// A validated search request.
///
/// Invariant: `0 <= start_seed <= end_seed <= i32::MAX`. Constructing one
/// is the fail-fast validation gate spec §7 requires; [`search`] never
/// sees an unvalidated request.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    start_seed: i32,
    end_seed: i32,
    use_legacy_random: bool,
    conditions: Vec<WeatherCondition>,
    output_limit: usize,
}

impl SearchRequest {
    /// Validate and construct a [`SearchRequest`] from its wire
    /// configuration.
    pub fn new(config: &SearchRequestConfig) -> Result<Self, SearchError> {
        if config.start_seed < 0 {
            return Err(SearchError::InvalidRequest(format!(
                "start_seed {} must be non-negative",
                config.start_seed
            )));
        }
        if config.start_seed > config.end_seed {
            return Err(SearchError::InvalidRequest(format!(
                "start_seed {} must not exceed end_seed {}",
                config.start_seed, config.end_seed
            )));
        }
        if config.output_limit < 1 {
            return Err(SearchError::InvalidRequest(
                "output_limit must be at least 1".to_string(),
            ));
        }

        let conditions = config
            .weather_conditions
            .iter()
            .map(WeatherCondition::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            start_seed: config.start_seed,
            end_seed: config.end_seed,
            use_legacy_random: config.use_legacy_random,
            conditions,
            output_limit: config.output_limit,
        })
    }

    /// First seed to scan, inclusive.
    pub fn start_seed(&self) -> i32 {
        self.start_seed
    }

    /// Last seed to scan, inclusive.
    pub fn end_seed(&self) -> i32 {
        self.end_seed
    }

    /// Whether the legacy additive seed-mixing path is used.
    pub fn use_legacy_random(&self) -> bool {
        self.use_legacy_random
    }

    /// The conditions this request ANDs together.
    pub fn conditions(&self) -> &[WeatherCondition] {
        &self.conditions
    }

    /// Maximum number of seeds to return.
    pub fn output_limit(&self) -> usize {
        self.output_limit
    }

    fn range_size(&self) -> u64 {
        (self.end_seed as i64 - self.start_seed as i64 + 1) as u64
    }
}

/// An external cancellation handle shared between a caller and a running
/// [`search`] (spec §5: "an external canceler signals" the shared stop
/// flag). Cloning a token shares the same underlying flag, so a caller
/// can hold one end while passing the other into [`search`].
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signal cancellation. Safe to call from any thread, at any time.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The outcome of a completed (or cancelled) search.
#[derive(Clone, Debug)]
pub struct Summary {
    /// Matching seeds, sorted ascending. Independent of worker count and
    /// scheduling (spec §5).
    pub matches: Vec<i32>,
    /// Total number of seeds actually checked before the search stopped.
    pub total_checked: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// Choose a worker count from the range size and available parallelism,
/// per the policy table in spec §4.F.
fn worker_count(range_size: u64, ncpu: usize) -> usize {
    let w = if range_size < 10_000 {
        1
    } else if range_size < 100_000 {
        2.min(ncpu / 2)
    } else if range_size < 1_000_000 {
        4.min(ncpu / 2)
    } else {
        8.min(ncpu)
    };
    w.max(1)
}

/// Partition `[start, end]` into up to `workers` contiguous, roughly
/// equal sub-ranges; the last absorbs any remainder. Never returns more
/// partitions than there are seeds.
fn partition_range(start: i32, end: i32, workers: usize) -> Vec<(i32, i32)> {
    let total = (end as i64 - start as i64 + 1) as u64;
    let workers = workers.min(total.max(1) as usize).max(1);
    let chunk = total / workers as u64;

    let mut ranges = Vec::with_capacity(workers);
    let mut cursor = start as i64;
    for i in 0..workers {
        let is_last = i == workers - 1;
        let this_len: i64 = if is_last {
            end as i64 - cursor + 1
        } else {
            chunk as i64
        };
        if this_len <= 0 {
            continue;
        }
        let lo = cursor;
        let hi = cursor + this_len - 1;
        ranges.push((lo as i32, hi as i32));
        cursor = hi + 1;
    }
    ranges
}

/// How often (in checked seeds) a worker attempts to report progress.
fn report_interval(range_size: u64) -> u64 {
    if range_size < 100_000 {
        1_000
    } else {
        5_000
    }
}

/// Run a validated search, sharding `request`'s seed range across
/// worker threads and streaming events to `sink`.
///
/// `cancel` lets an external caller stop the search early (spec §5); it
/// is ORed with the driver's own internal stop flag (set once the
/// output cap is reached), so either source ends the search. Workers
/// still join before this function returns, and results found before
/// cancellation are kept and returned, sorted, via `complete` (spec §7's
/// `CancellationRequested` semantics: graceful stop, partial results).
///
/// The returned [`Summary::matches`] is sorted ascending and identical
/// across runs for the same inputs, regardless of worker count (spec
/// §5's parallel-equivalence invariant).
pub fn search(request: &SearchRequest, sink: &(dyn Sink), cancel: &CancelToken) -> Summary {
    let ncpu = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let workers = worker_count(request.range_size(), ncpu);
    search_with_workers(request, sink, cancel, workers)
}

/// [`search`], with the worker count forced rather than derived from
/// `worker_count`. Lets tests exercise the spec §5 parallel-equivalence
/// invariant (sorted results identical regardless of worker count) at
/// W=8 without needing a range large enough for the policy in
/// `worker_count` to pick W=8 on its own.
fn search_with_workers(
    request: &SearchRequest,
    sink: &(dyn Sink),
    cancel: &CancelToken,
    workers: usize,
) -> Summary {
    let total = request.range_size();
    sink.start(total);

    let ranges = partition_range(request.start_seed, request.end_seed, workers);
    let report_every = report_interval(total);

    log::info!(
        "search starting: [{}, {}] across {} worker(s)",
        request.start_seed,
        request.end_seed,
        ranges.len()
    );

    let stop = AtomicBool::new(false);
    let checked = AtomicU64::new(0);
    let last_reported = AtomicU64::new(0);
    let results: Mutex<Vec<i32>> = Mutex::new(Vec::new());
    let start_time = Instant::now();

    let conditions = request.conditions.clone();
    let legacy = request.use_legacy_random;
    let limit = request.output_limit;

    rayon::scope(|scope| {
        for (lo, hi) in ranges {
            let stop = &stop;
            let checked = &checked;
            let last_reported = &last_reported;
            let results = &results;
            let conditions = conditions.clone();
            scope.spawn(move |_| {
                let evaluator = Evaluator::new(conditions, legacy);
                let mut seed = lo;
                loop {
                    if stop.load(Ordering::Relaxed) || cancel.is_cancelled() {
                        return;
                    }

                    if evaluator.check(seed) {
                        let mut guard = results.lock().expect("results mutex poisoned");
                        if guard.len() < limit {
                            guard.push(seed);
                            let count = guard.len();
                            drop(guard);
                            sink.found(seed);
                            if count >= limit {
                                stop.store(true, Ordering::Relaxed);
                                return;
                            }
                        }
                    }

                    let n = checked.fetch_add(1, Ordering::Relaxed) + 1;
                    if n % report_every == 0 {
                        let prev = last_reported.load(Ordering::Relaxed);
                        if n > prev
                            && last_reported
                                .compare_exchange(prev, n, Ordering::Relaxed, Ordering::Relaxed)
                                .is_ok()
                        {
                            let elapsed = start_time.elapsed().as_secs_f64();
                            let percent = n as f64 / total as f64 * 100.0;
                            let speed = if elapsed > 0.0 { n as f64 / elapsed } else { 0.0 };
                            sink.progress(n, total, percent, speed, elapsed);
                        }
                    }

                    if seed == hi {
                        break;
                    }
                    seed += 1;
                }
            });
        }
    });

    let mut matches = results.into_inner().expect("results mutex poisoned");
    matches.sort_unstable();

    let total_checked = checked.load(Ordering::Relaxed);
    let elapsed = start_time.elapsed();
    let elapsed_secs = elapsed.as_secs_f64();
    sink.progress(
        total_checked,
        total,
        total_checked as f64 / total as f64 * 100.0,
        if elapsed_secs > 0.0 {
            total_checked as f64 / elapsed_secs
        } else {
            0.0
        },
        elapsed_secs,
    );
    sink.complete(matches.len(), elapsed_secs);

    log::info!(
        "search finished: {} match(es), {} checked in {:.3}s",
        matches.len(),
        total_checked,
        elapsed_secs
    );

    Summary {
        matches,
        total_checked,
        elapsed,
    }
}
