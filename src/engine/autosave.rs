use std::time::{Duration, Instant};

/// Debounce timer for autosave.
///
/// A single pending deadline: every edit supersedes the previous one, never
/// queues behind it, so a burst of edits collapses into one fire after the
/// quiet period. The engine owns the timer and polls it from the host loop.
#[derive(Debug)]
pub struct AutosaveTimer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl AutosaveTimer {
    pub fn new(quiet: Duration) -> AutosaveTimer {
        AutosaveTimer {
            quiet,
            deadline: None,
        }
    }

    /// Push the pending fire out to one quiet period from now.
    pub fn reset(&mut self) {
        self.deadline = Some(Instant::now() + self.quiet);
    }

    /// Drop the pending fire without saving.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has elapsed. Returns true at most once per
    /// `reset`.
    pub fn fire_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn does_not_fire_before_the_quiet_period() {
        let mut timer = AutosaveTimer::new(Duration::from_millis(50));
        timer.reset();
        assert!(!timer.fire_due());
        assert!(timer.is_pending());
    }

    #[test]
    fn fires_once_after_the_quiet_period() {
        let mut timer = AutosaveTimer::new(Duration::from_millis(10));
        timer.reset();
        thread::sleep(Duration::from_millis(20));
        assert!(timer.fire_due());
        assert!(!timer.fire_due());
        assert!(!timer.is_pending());
    }

    #[test]
    fn reset_supersedes_a_pending_fire() {
        let mut timer = AutosaveTimer::new(Duration::from_millis(30));
        timer.reset();
        thread::sleep(Duration::from_millis(20));
        timer.reset();
        // The original deadline has passed; the superseding one has not.
        thread::sleep(Duration::from_millis(15));
        assert!(!timer.fire_due());
        thread::sleep(Duration::from_millis(20));
        assert!(timer.fire_due());
    }

    #[test]
    fn cancel_stops_a_pending_fire() {
        let mut timer = AutosaveTimer::new(Duration::from_millis(10));
        timer.reset();
        timer.cancel();
        thread::sleep(Duration::from_millis(20));
        assert!(!timer.fire_due());
    }
}
