//! Observers that receive battle events.
//!
//! The battle loop never prints. It reports every event to a
//! `BattleObserver`, and the observer decides what to do with it:
//! - `EventLog`: keep every event in order
//! - `TracingNarrator`: forward to `tracing`
//! - `TextNarrator`: write narration lines to any `io::Write`
//! - `NullObserver`: discard

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::event::{BattleEvent, EventLevel};

/// How much narration to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Only the final result.
    Quiet,
    /// Play-by-play narration.
    #[default]
    Normal,
    /// Narration plus diagnostics.
    Detailed,
}

impl Verbosity {
    /// Whether events at `level` should be reported.
    #[must_use]
    pub fn allows(self, level: EventLevel) -> bool {
        match self {
            Verbosity::Quiet => level == EventLevel::Outcome,
            Verbosity::Normal => level != EventLevel::Detail,
            Verbosity::Detailed => true,
        }
    }

    /// Map a `-v`/`-q` count pair to a verbosity.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, _) => Verbosity::Detailed,
        }
    }
}

/// Receives battle events in the order they happen.
pub trait BattleObserver {
    /// Handle one event.
    fn on_event(&mut self, event: &BattleEvent);
}

impl<O: BattleObserver + ?Sized> BattleObserver for &mut O {
    fn on_event(&mut self, event: &BattleEvent) {
        (**self).on_event(event);
    }
}

impl<O: BattleObserver + ?Sized> BattleObserver for Box<O> {
    fn on_event(&mut self, event: &BattleEvent) {
        (**self).on_event(event);
    }
}

/// Observer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {
    fn on_event(&mut self, _event: &BattleEvent) {}
}

/// Observer that records every event.
///
/// ```
/// use rust_duel::events::{BattleEvent, BattleObserver, EventLog};
///
/// let mut log = EventLog::new();
/// log.on_event(&BattleEvent::RoundStarted { round: 1 });
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.lines(), vec!["== ROUND 1 ==".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Narration lines for all recorded events.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// Iterate over events.
    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    /// Get number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }
}

impl BattleObserver for EventLog {
    fn on_event(&mut self, event: &BattleEvent) {
        self.events.push(event.clone());
    }
}

/// Observer that forwards narration to `tracing`.
///
/// Outcome and narration events log at `INFO`, diagnostics at `DEBUG`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNarrator {
    verbosity: Verbosity,
}

impl TracingNarrator {
    /// Create a narrator with the given verbosity.
    #[must_use]
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl BattleObserver for TracingNarrator {
    fn on_event(&mut self, event: &BattleEvent) {
        let level = event.level();
        if !self.verbosity.allows(level) {
            return;
        }
        match level {
            EventLevel::Outcome | EventLevel::Narration => info!(target: "rust_duel::narration", "{event}"),
            EventLevel::Detail => debug!(target: "rust_duel::narration", "{event}"),
        }
    }
}

/// Observer that writes narration lines to a writer.
#[derive(Debug)]
pub struct TextNarrator<W: Write> {
    writer: W,
    verbosity: Verbosity,
    failed: bool,
}

impl<W: Write> TextNarrator<W> {
    /// Create a narrator writing to `writer`.
    pub fn new(writer: W, verbosity: Verbosity) -> Self {
        Self {
            writer,
            verbosity,
            failed: false,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BattleObserver for TextNarrator<W> {
    fn on_event(&mut self, event: &BattleEvent) {
        if self.failed || !self.verbosity.allows(event.level()) {
            return;
        }
        // Narration is best-effort; after the first write failure we go quiet.
        if let Err(err) = writeln!(self.writer, "{event}") {
            warn!(error = %err, "narration output failed, further narration suppressed");
            self.failed = true;
        }
    }
}
