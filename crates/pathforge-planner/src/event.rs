//! Event system for planner monitoring and extensibility.
//!
//! Listeners registered on a [`PlannerEventSupport`] are notified when a
//! `solve` call starts and ends, and whenever a level of the hierarchy is
//! solved.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use pathforge_core::Path;
//! use pathforge_planner::event::{PlannerEventListener, PlannerEventSupport};
//!
//! #[derive(Debug)]
//! struct MyListener;
//! impl PlannerEventListener for MyListener {
//!     fn on_level_solved(&self, level: usize, path: &Path) {
//!         println!("Level {} solved with {} states", level, path.len());
//!     }
//! }
//!
//! let mut support = PlannerEventSupport::new();
//! support.add_listener(Arc::new(MyListener));
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pathforge_core::Path;
use tracing::info;

use crate::status::PlannerStatus;

/// Listener for planner events.
pub trait PlannerEventListener: Send + Sync + Debug {
    /// Called when a level obtains its solution path.
    fn on_level_solved(&self, level: usize, path: &Path);

    /// Called when a `solve` call starts, with the level it resumes from.
    fn on_solving_started(&self, _current_level: usize) {}

    /// Called when a `solve` call returns.
    fn on_solving_ended(&self, _status: PlannerStatus) {}
}

/// Central event broadcaster for planner events.
///
/// All listener methods are called synchronously in registration order.
#[derive(Default)]
pub struct PlannerEventSupport {
    listeners: Vec<Arc<dyn PlannerEventListener>>,
}

impl PlannerEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn PlannerEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire_level_solved(&self, level: usize, path: &Path) {
        for listener in &self.listeners {
            listener.on_level_solved(level, path);
        }
    }

    pub fn fire_solving_started(&self, current_level: usize) {
        for listener in &self.listeners {
            listener.on_solving_started(current_level);
        }
    }

    pub fn fire_solving_ended(&self, status: PlannerStatus) {
        for listener in &self.listeners {
            listener.on_solving_ended(status);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Debug for PlannerEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A listener that reports events through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging listener with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl PlannerEventListener for LoggingEventListener {
    fn on_level_solved(&self, level: usize, path: &Path) {
        info!(
            "{}[Event] Level {} solved: {} states, length {:.3}",
            self.prefix,
            level,
            path.len(),
            path.length()
        );
    }

    fn on_solving_started(&self, current_level: usize) {
        info!("{}[Event] Solving started at level {}", self.prefix, current_level);
    }

    fn on_solving_ended(&self, status: PlannerStatus) {
        info!("{}[Event] Solving ended: {}", self.prefix, status);
    }
}

/// A counting listener that tracks event occurrences.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    level_solved_count: AtomicUsize,
    solving_started_count: AtomicUsize,
    solving_ended_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_solved_count(&self) -> usize {
        self.level_solved_count.load(Ordering::SeqCst)
    }

    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn solving_ended_count(&self) -> usize {
        self.solving_ended_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.level_solved_count.store(0, Ordering::SeqCst);
        self.solving_started_count.store(0, Ordering::SeqCst);
        self.solving_ended_count.store(0, Ordering::SeqCst);
    }
}

impl PlannerEventListener for CountingEventListener {
    fn on_level_solved(&self, _level: usize, _path: &Path) {
        self.level_solved_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self, _current_level: usize) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _status: PlannerStatus) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
