use std::time::{Duration, Instant};

/// Work deferred to a later frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    RebuildChart,
    RemoveRipple(u64),
}

/// Fire-and-forget timer queue drained once per frame.
///
/// Tasks cannot be cancelled. Ties on the due time run in insertion order.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<(Instant, u64, Deferred)>,
    seq: u64,
}

impl Scheduler {
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: Deferred) {
        self.queue.push((now + delay, self.seq, task));
        self.seq += 1;
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<Deferred> {
        let mut due: Vec<(Instant, u64, Deferred)> = Vec::new();
        self.queue.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, seq, _)| (*at, *seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.iter().map(|(at, _, _)| *at).min()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
