//! The job entity: one workload's remaining-time bookkeeping.

use crate::os::segment::Segment;

/// Stable handle into the scheduler's job arena.
///
/// Events and resource queues carry `JobRef`s; only the simulation engine
/// dereferences one into the actual `Job`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRef(pub(crate) usize);

/// A batch job with a known processing/I-O profile.
///
/// Remaining processing time and the time to the next processor release
/// only ever decrease; they both reach zero exactly at the job's
/// completion. The inter-request interval is fixed at creation:
/// `processing / (io_requests + 1)` when the job performs I/O at all.
#[derive(Debug, Clone)]
pub struct Job {
    id: u32,
    memory_space: u64,
    processing_time: f64,
    io_requests: u32,
    interrequest_time: f64,
    record_length: f64,
    time_to_next_release: f64,
    segments: Vec<Segment>,
    files: Vec<String>,
}

impl Job {
    pub fn new(
        id: u32,
        processing_time: f64,
        io_requests: u32,
        record_length: f64,
        segment_sizes: &[u64],
        files: Vec<String>,
    ) -> Self {
        let segments: Vec<Segment> = segment_sizes
            .iter()
            .map(|&size| Segment::new(size, id))
            .collect();
        let memory_space = segment_sizes.iter().sum();

        let (interrequest_time, time_to_next_release) = if io_requests > 0 {
            let interval = processing_time / (io_requests + 1) as f64;
            (interval, interval)
        } else {
            (0.0, processing_time)
        };

        Self {
            id,
            memory_space,
            processing_time,
            io_requests,
            interrequest_time,
            record_length,
            time_to_next_release,
            segments,
            files,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Total memory demand: the sum of all segment sizes.
    pub fn size(&self) -> u64 {
        self.memory_space
    }

    pub fn processing_time(&self) -> f64 {
        self.processing_time
    }

    pub fn io_requests(&self) -> u32 {
        self.io_requests
    }

    pub fn interrequest_time(&self) -> f64 {
        self.interrequest_time
    }

    pub fn record_length(&self) -> f64 {
        self.record_length
    }

    /// Time until the job must next surrender the processor, either to
    /// issue an I/O request or to complete.
    pub fn time_to_next_release(&self) -> f64 {
        self.time_to_next_release
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// One I/O request has been handed to the disc; the clock to the next
    /// release restarts at the fixed inter-request interval.
    pub fn record_io_issued(&mut self) {
        self.io_requests = self.io_requests.saturating_sub(1);
        self.time_to_next_release = self.interrequest_time;
    }

    /// Consumes `time` units of processor service, e.g. a full quantum
    /// that expired before the next natural release point.
    pub fn consume_processor_time(&mut self, time: f64) {
        self.processing_time = (self.processing_time - time).max(0.0);
        self.time_to_next_release = (self.time_to_next_release - time).max(0.0);
    }

    /// The job runs to its end within the current dispatch.
    pub fn consume_to_completion(&mut self) {
        self.processing_time = 0.0;
        self.time_to_next_release = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrequest_interval_splits_processing_time() {
        let job = Job::new(1, 90.0, 2, 100.0, &[50], vec![]);
        assert_eq!(job.interrequest_time(), 30.0);
        assert_eq!(job.time_to_next_release(), 30.0);
        assert_eq!(job.size(), 50);
    }

    #[test]
    fn no_io_means_release_at_completion() {
        let job = Job::new(1, 100.0, 0, 100.0, &[50, 20], vec![]);
        assert_eq!(job.interrequest_time(), 0.0);
        assert_eq!(job.time_to_next_release(), 100.0);
        assert_eq!(job.size(), 70);
    }

    #[test]
    fn counters_are_monotonic_and_reach_zero() {
        let mut job = Job::new(1, 90.0, 2, 100.0, &[50], vec![]);
        job.consume_processor_time(30.0);
        assert_eq!(job.processing_time(), 60.0);
        assert_eq!(job.time_to_next_release(), 0.0);

        job.record_io_issued();
        assert_eq!(job.io_requests(), 1);
        assert_eq!(job.time_to_next_release(), 30.0);

        job.consume_processor_time(30.0);
        job.record_io_issued();
        assert_eq!(job.io_requests(), 0);

        job.consume_to_completion();
        assert_eq!(job.processing_time(), 0.0);
        assert_eq!(job.time_to_next_release(), 0.0);
    }

    #[test]
    fn consumption_never_goes_negative() {
        let mut job = Job::new(1, 10.0, 0, 100.0, &[50], vec![]);
        job.consume_processor_time(25.0);
        assert_eq!(job.processing_time(), 0.0);
        assert_eq!(job.time_to_next_release(), 0.0);
    }
}
