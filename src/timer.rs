// Re-arming tick timer polled from the window loop.
// Nothing runs on another thread: the window loop asks "is a tick due?" and,
// when it is, runs the tick and the timer arms itself for `interval` later.

use std::time::{Duration, Instant};

pub struct TickTimer {
    interval: Duration,
    next_due: Option<Instant>, // None until the first tick fires
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    /// True when a tick should run now. Firing re-arms the timer relative to
    /// `now`, so a slow tick pushes the next one back instead of bunching up.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS30: Duration = Duration::from_millis(30);

    #[test]
    fn first_poll_fires_immediately() {
        let mut t = TickTimer::new(MS30);
        assert!(t.poll(Instant::now()));
    }

    #[test]
    fn does_not_fire_before_interval() {
        let start = Instant::now();
        let mut t = TickTimer::new(MS30);
        assert!(t.poll(start));
        assert!(!t.poll(start + Duration::from_millis(29)));
        assert!(t.poll(start + MS30));
    }

    #[test]
    fn rearms_from_fire_time() {
        let start = Instant::now();
        let mut t = TickTimer::new(MS30);
        t.poll(start);
        // Late by 20ms: next tick is 30ms after this one, not after `start`.
        let late = start + Duration::from_millis(50);
        assert!(t.poll(late));
        assert!(!t.poll(late + Duration::from_millis(29)));
        assert!(t.poll(late + MS30));
    }
}
