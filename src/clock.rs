use std::time::{Duration, Instant};

/// A single one-shot deadline. Arming it again replaces the pending one, so
/// there is never more than one tick scheduled.
#[derive(Debug)]
pub struct Clock {
    deadline: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Clock { deadline: None }
    }

    pub fn arm(&mut self, now: Instant, interval: Duration) {
        self.deadline = Some(now + interval);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// Time left until the deadline, zero once it has passed. An unarmed
    /// clock never fires, so callers get `None` and may wait indefinitely.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}
