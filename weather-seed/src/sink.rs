//! The sink contract the search driver reports through (spec §4.F, §6).

use std::sync::mpsc::{self, Receiver, Sender};

/// Events emitted by [`crate::search::search`], mirroring the JSON frames
/// in spec §6 one-to-one.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Emitted once before workers begin.
    Start {
        /// Total number of seeds in the requested range.
        total: u64,
    },
    /// A periodic progress report.
    Progress {
        /// Seeds checked so far across all workers.
        checked: u64,
        /// Total seeds in the requested range.
        total: u64,
        /// `checked / total * 100`.
        percent: f64,
        /// Seeds checked per second so far.
        speed: f64,
        /// Seconds elapsed since the search began.
        elapsed_secs: f64,
    },
    /// A matching seed was found.
    Found {
        /// The matching seed.
        seed: i32,
    },
    /// The search has finished.
    Complete {
        /// Total number of matches returned.
        total_found: usize,
        /// Seconds elapsed since the search began.
        elapsed_secs: f64,
    },
}

/// Receives [`Event`]s from a running search.
///
/// Implementations must be safe to call from multiple worker threads
/// concurrently, or must serialize calls internally (spec §4.F).
pub trait Sink: Send + Sync {
    /// Emitted once before workers begin scanning.
    fn start(&self, total: u64) {
        let _ = total;
    }

    /// A periodic progress report; `percent` is `checked / total * 100`.
    fn progress(&self, checked: u64, total: u64, percent: f64, speed: f64, elapsed_secs: f64) {
        let _ = (checked, total, percent, speed, elapsed_secs);
    }

    /// A matching seed was found. May be called out of seed order across
    /// workers; each worker's own calls are seed-ordered.
    fn found(&self, seed: i32) {
        let _ = seed;
    }

    /// The search has finished; `total_found` matches the length of the
    /// sorted result vector returned by [`crate::search::search`].
    fn complete(&self, total_found: usize, elapsed_secs: f64) {
        let _ = (total_found, elapsed_secs);
    }
}

/// A [`Sink`] that discards every event. Useful for tests and for
/// benchmarking the driver without I/O overhead.
#[derive(Default)]
pub struct NullSink;

impl Sink for NullSink {}

/// A [`Sink`] that forwards every event across an `mpsc` channel,
/// generalizing the teacher's `find_seeds_async` / `Progress` channel
/// pattern to the full event set.
pub struct ChannelSink {
    tx: Sender<Event>,
}

impl ChannelSink {
    /// Create a connected `(ChannelSink, Receiver<Event>)` pair.
    pub fn new() -> (Self, Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Sink for ChannelSink {
    fn start(&self, total: u64) {
        let _ = self.tx.send(Event::Start { total });
    }

    fn progress(&self, checked: u64, total: u64, percent: f64, speed: f64, elapsed_secs: f64) {
        let _ = self.tx.send(Event::Progress {
            checked,
            total,
            percent,
            speed,
            elapsed_secs,
        });
    }

    fn found(&self, seed: i32) {
        let _ = self.tx.send(Event::Found { seed });
    }

    fn complete(&self, total_found: usize, elapsed_secs: f64) {
        let _ = self.tx.send(Event::Complete {
            total_found,
            elapsed_secs,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_accepts_all_events_without_panicking() {
        let sink = NullSink;
        sink.start(10);
        sink.progress(5, 10, 50.0, 1.0, 5.0);
        sink.found(42);
        sink.complete(1, 5.0);
    }

    #[test]
    fn channel_sink_forwards_events_in_order() {
        let (sink, rx) = ChannelSink::new();
        sink.start(10);
        sink.found(42);
        sink.complete(1, 0.5);

        assert_eq!(rx.recv().unwrap(), Event::Start { total: 10 });
        assert_eq!(rx.recv().unwrap(), Event::Found { seed: 42 });
        assert_eq!(
            rx.recv().unwrap(),
            Event::Complete {
                total_found: 1,
                elapsed_secs: 0.5
            }
        );
    }
}
