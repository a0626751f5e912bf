//! Background execution of store operations.
//!
//! One short-lived thread per load/save/list job; results come back as
//! `Outcome` messages on an mpsc channel. Jobs never touch engine state:
//! the engine applies outcomes on its own thread, which is the only place
//! shared state mutates.

use std::sync::mpsc;
use std::thread;

use crate::io::store::StoreError;
use crate::model::entry::Entry;

/// Completion message for a background store operation.
#[derive(Debug)]
pub enum Outcome {
    /// A load finished; `result` carries the decrypted content. A load
    /// issued by create carries `edit_on_load` so the new entry opens
    /// straight into the editor.
    Loaded {
        entry: Entry,
        result: Result<String, StoreError>,
        edit_on_load: bool,
    },
    /// A save finished; `content` is what was written, kept for the
    /// staleness check at completion time.
    Saved {
        entry: Entry,
        content: String,
        result: Result<(), StoreError>,
    },
    /// A directory listing finished.
    Listed {
        result: Result<Vec<Entry>, StoreError>,
    },
}

/// Spawns background jobs and collects their outcomes.
pub struct Runner {
    tx: mpsc::Sender<Outcome>,
    rx: mpsc::Receiver<Outcome>,
    pending: usize,
}

impl Runner {
    pub fn new() -> Runner {
        let (tx, rx) = mpsc::channel();
        Runner { tx, rx, pending: 0 }
    }

    /// Run `job` on its own thread; the outcome is delivered to
    /// `try_recv`/`recv`. In-flight jobs are never cancelled.
    pub fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        let tx = self.tx.clone();
        self.pending += 1;
        thread::spawn(move || {
            let _ = tx.send(job());
        });
    }

    /// Non-blocking poll for one finished job.
    pub fn try_recv(&mut self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.pending -= 1;
                Some(outcome)
            }
            Err(_) => None,
        }
    }

    /// Block until one in-flight job finishes. None when nothing is pending.
    pub fn recv(&mut self) -> Option<Outcome> {
        if self.pending == 0 {
            return None;
        }
        match self.rx.recv() {
            Ok(outcome) => {
                self.pending -= 1;
                Some(outcome)
            }
            Err(_) => None,
        }
    }

    /// Number of jobs spawned but not yet collected.
    pub fn pending(&self) -> usize {
        self.pending
    }
}

impl Default for Runner {
    fn default() -> Runner {
        Runner::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_arrive_and_pending_counts_down() {
        let mut runner = Runner::new();
        assert_eq!(runner.pending(), 0);

        runner.spawn(|| Outcome::Listed { result: Ok(vec![]) });
        assert_eq!(runner.pending(), 1);

        let outcome = runner.recv().unwrap();
        assert!(matches!(outcome, Outcome::Listed { result: Ok(ref v) } if v.is_empty()));
        assert_eq!(runner.pending(), 0);
    }

    #[test]
    fn recv_with_nothing_pending_returns_none() {
        let mut runner = Runner::new();
        assert!(runner.recv().is_none());
        assert!(runner.try_recv().is_none());
    }

    #[test]
    fn jobs_drain_in_any_order() {
        let mut runner = Runner::new();
        for _ in 0..3 {
            runner.spawn(|| Outcome::Listed { result: Ok(vec![]) });
        }
        let mut seen = 0;
        while runner.recv().is_some() {
            seen += 1;
        }
        assert_eq!(seen, 3);
    }
}
