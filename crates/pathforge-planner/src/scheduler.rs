//! Priority selection over the unsolved levels of a hierarchy.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use smallvec::SmallVec;
use tracing::warn;

/// A level index with the importance it reported when it was queued.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerEntry {
    pub level: usize,
    pub importance: f64,
}

impl PartialEq for SchedulerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SchedulerEntry {}

impl PartialOrd for SchedulerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap order: higher importance first, then lower level index.
impl Ord for SchedulerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.importance
            .total_cmp(&other.importance)
            .then_with(|| other.level.cmp(&self.level))
    }
}

/// Priority queue of levels keyed by importance.
///
/// Holds at most one entry per level. Entries are snapshots: a level is
/// popped, expanded, and pushed again with its fresh importance.
#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<SchedulerEntry>,
    queued: SmallVec<[bool; 8]>,
}

impl Scheduler {
    pub fn new(level_count: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(level_count),
            queued: SmallVec::from_elem(false, level_count),
        }
    }

    /// Queues `level` with `importance`.
    ///
    /// Returns false if the level is already queued. A NaN importance ranks
    /// below every real score.
    pub fn push(&mut self, level: usize, importance: f64) -> bool {
        if level >= self.queued.len() {
            self.queued.resize(level + 1, false);
        }
        if self.queued[level] {
            return false;
        }
        let importance = if importance.is_nan() {
            warn!(event = "nan_importance", level, "Level reported NaN importance");
            f64::NEG_INFINITY
        } else {
            importance
        };
        self.queued[level] = true;
        self.heap.push(SchedulerEntry { level, importance });
        true
    }

    /// Removes the most important entry.
    pub fn pop(&mut self) -> Option<SchedulerEntry> {
        let entry = self.heap.pop()?;
        self.queued[entry.level] = false;
        Some(entry)
    }

    pub fn peek(&self) -> Option<&SchedulerEntry> {
        self.heap.peek()
    }

    pub fn contains(&self, level: usize) -> bool {
        self.queued.get(level).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.queued.iter_mut().for_each(|q| *q = false);
    }
}
