//! Admission control: caps the number of jobs resident in the system.

use std::collections::VecDeque;

use crate::os::job::JobRef;

/// Counts jobs admitted into memory/processor contention and queues the
/// ones that arrive while the configured limit is reached.
///
/// The count is signed on purpose: the completion-time drain hands a
/// queued job straight to the memory request path without going through
/// `run`, so `finish` can outnumber `run` over a whole run.
pub struct MultiprogrammingController {
    limit: i64,
    concurrent_jobs: i64,
    queue: VecDeque<JobRef>,
}

impl MultiprogrammingController {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: i64::from(limit),
            concurrent_jobs: 0,
            queue: VecDeque::new(),
        }
    }

    /// Whether another job may be admitted right now.
    pub fn can_run(&self) -> bool {
        self.concurrent_jobs < self.limit
    }

    /// Admits one job; call exactly once per job entering the system.
    pub fn run(&mut self) {
        self.concurrent_jobs += 1;
    }

    /// Retires one job whose memory and processor have been released.
    pub fn finish(&mut self) {
        self.concurrent_jobs -= 1;
    }

    pub fn concurrent_jobs(&self) -> i64 {
        self.concurrent_jobs
    }

    pub fn has_empty_queue(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn enqueue(&mut self, job: JobRef) {
        self.queue.push_back(job);
    }

    pub fn dequeue(&mut self) -> Option<JobRef> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_stops_at_limit() {
        let mut controller = MultiprogrammingController::new(2);
        assert!(controller.can_run());
        controller.run();
        assert_eq!(controller.concurrent_jobs(), 1);
        assert!(controller.can_run());
        controller.run();
        assert_eq!(controller.concurrent_jobs(), 2);
        assert!(!controller.can_run());
        controller.finish();
        assert_eq!(controller.concurrent_jobs(), 1);
        assert!(controller.can_run());
    }

    #[test]
    fn count_may_go_negative_when_finishes_outnumber_runs() {
        // A drained job reaches completion without ever passing through
        // run(), so its finish() pushes the count below zero.
        let mut controller = MultiprogrammingController::new(1);
        controller.run();
        controller.finish();
        controller.finish();
        assert_eq!(controller.concurrent_jobs(), -1);
        assert!(controller.can_run());
    }

    #[test]
    fn queue_is_fifo() {
        let mut controller = MultiprogrammingController::new(1);
        controller.enqueue(JobRef(1));
        controller.enqueue(JobRef(0));
        assert_eq!(controller.dequeue(), Some(JobRef(1)));
        assert_eq!(controller.dequeue(), Some(JobRef(0)));
        assert!(controller.has_empty_queue());
    }
}
