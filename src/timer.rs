use std::time::{Duration, Instant};

/// Converts wall-clock time into discrete ticks for a gated repeating timer.
///
/// The ticker arms on the first poll where it is allowed to run and counts
/// whole periods from that moment. Any poll while gated off disarms it, so a
/// resume starts a fresh period and paused time is never credited.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    armed_at: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            armed_at: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn poll(&mut self, now: Instant, running: bool) -> u32 {
        if !running {
            self.armed_at = None;
            return 0;
        }
        let Some(armed_at) = self.armed_at else {
            self.armed_at = Some(now);
            return 0;
        };
        let elapsed = now.saturating_duration_since(armed_at);
        let ticks = (elapsed.as_nanos() / self.period.as_nanos()) as u32;
        if ticks > 0 {
            self.armed_at = Some(armed_at + self.period * ticks);
        }
        ticks
    }

    pub fn disarm(&mut self) {
        self.armed_at = None;
    }
}

/// One-shot actions that fire once their delay has passed. Items cannot be
/// withdrawn individually; whoever applies them decides whether they still
/// matter.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    pending: Vec<(Instant, u64, T)>,
    seq: u64,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            seq: 0,
        }
    }
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, item: T) {
        self.pending.push((now + delay, self.seq, item));
        self.seq += 1;
    }

    /// Removes and returns every due item, earliest deadline first.
    pub fn due(&mut self, now: Instant) -> Vec<T> {
        let mut ready = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                ready.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        ready.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        ready.into_iter().map(|(_, _, item)| item).collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(at, _, _)| *at).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
