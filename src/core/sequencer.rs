//! # Job queue and flushing flag.
//!
//! [`Sequencer`] is the FIFO every queued job goes through, plus the `flushing`
//! flag that says whether a drain loop is alive.
//!
//! ## Rules
//! - `start()` flips idle → flushing and reports whether the caller must spawn the loop;
//!   it returns `false` while a loop is already alive.
//! - `next()` pops the next job; on an empty queue it clears `flushing` in the same
//!   step, so a job pushed afterwards always sees an idle sequencer.
//! - Jobs leave in push order; `push_front` is the single exception.

use std::collections::VecDeque;

/// FIFO job queue with the drain-loop flag.
pub(crate) struct Sequencer<J> {
    queue: VecDeque<J>,
    flushing: bool,
}

impl<J> Sequencer<J> {
    /// Creates an idle, empty sequencer.
    pub(crate) fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            flushing: false,
        }
    }

    /// Appends a job.
    pub(crate) fn push_back(&mut self, job: J) {
        self.queue.push_back(job);
    }

    /// Inserts a job ahead of everything already queued.
    pub(crate) fn push_front(&mut self, job: J) {
        self.queue.push_front(job);
    }

    /// Marks the sequencer as flushing; `true` if it was idle.
    pub(crate) fn start(&mut self) -> bool {
        if self.flushing {
            return false;
        }
        self.flushing = true;
        true
    }

    /// Pops the next job, going idle when none is left.
    pub(crate) fn next(&mut self) -> Option<J> {
        let job = self.queue.pop_front();
        if job.is_none() {
            self.flushing = false;
        }
        job
    }

    pub(crate) fn is_flushing(&self) -> bool {
        self.flushing
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}
