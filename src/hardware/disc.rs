//! Single-server disc with a FIFO wait queue.
//!
//! Service time is a fixed function of the record length being
//! transferred; the disc itself only tracks busy/free and its queue.

use std::collections::VecDeque;

use crate::os::job::JobRef;

pub struct Disc {
    busy: bool,
    positioning_time: f64,
    latency_time: f64,
    transfer_rate: f64,
    queue: VecDeque<JobRef>,
}

impl Disc {
    pub fn new(positioning_time: f64, latency_time: f64, transfer_rate: f64) -> Self {
        Self {
            busy: false,
            positioning_time,
            latency_time,
            transfer_rate,
            queue: VecDeque::new(),
        }
    }

    pub fn is_free(&self) -> bool {
        !self.busy
    }

    /// Time taken to serve one I/O request for a record of `record_length`.
    pub fn service_time(&self, record_length: f64) -> f64 {
        self.positioning_time + self.latency_time + self.transfer_rate * record_length
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
