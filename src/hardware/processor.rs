//! Single-server processor with a fixed quantum and a FIFO ready queue.

use std::collections::VecDeque;

use crate::os::job::JobRef;

pub struct Processor {
    busy: bool,
    quantum: f64,
    overhead_time: f64,
    queue: VecDeque<JobRef>,
}

impl Processor {
    pub fn new(quantum: f64, overhead_time: f64) -> Self {
        Self {
            busy: false,
            quantum,
            overhead_time,
            queue: VecDeque::new(),
        }
    }

    pub fn is_free(&self) -> bool {
        !self.busy
    }

    /// Maximum contiguous service time per scheduling decision.
    pub fn quantum(&self) -> f64 {
        self.quantum
    }

    /// Context-switch cost added when a waiting job is dispatched.
    pub fn overhead_time(&self) -> f64 {
        self.overhead_time
    }

    pub fn assign(&mut self) {
        self.busy = true;
    }

    pub fn release(&mut self) {
        self.busy = false;
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
