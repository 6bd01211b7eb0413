//! The simulation engine: pops the earliest event, mutates the job and
//! the resource managers, and pushes the follow-up events.

use tracing::{debug, error, info};

use crate::config::SimSettings;
use crate::hardware::{Disc, Memory, Processor};
use crate::input::Workload;
use crate::os::event::{Event, EventKind, Timeline};
use crate::os::job::{Job, JobRef};
use crate::os::multiprogramming::MultiprogrammingController;
use crate::report::{JobSummaryRow, RunReport};

/// How a transition resolved for its job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The requested resource was granted (or the job was admitted).
    Granted,
    /// The resource was busy; the job joined its FIFO queue.
    Queued,
    /// The job gave a resource back.
    Released,
    /// The quantum expired and the job was preempted.
    Preempted,
    /// The job finished and left the system.
    Completed,
    /// Unrecognized event kind; should never happen.
    Invalid,
}

/// One processed event, as seen by an external observer. The engine
/// emits these instead of formatting any output itself.
#[derive(Debug, Clone, Copy)]
pub struct TraceRecord {
    pub time: f64,
    pub kind: EventKind,
    pub job_id: u32,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default)]
struct JobStats {
    arrival_time: Option<f64>,
    processor_period: f64,
    end_time: Option<f64>,
}

pub struct Scheduler {
    initial_time: f64,
    final_time: f64,
    memory: Memory,
    processor: Processor,
    disc: Disc,
    multiprogramming: MultiprogrammingController,
    timeline: Timeline,
    jobs: Vec<Job>,
    stats: Vec<JobStats>,
    trace: Vec<TraceRecord>,
}

impl Scheduler {
    pub fn new(settings: &SimSettings, workload: Workload) -> Self {
        let Workload {
            initial_time,
            final_time,
            jobs,
            arrivals,
            ..
        } = workload;

        let mut timeline = Timeline::new();
        for (job, time) in arrivals {
            timeline.insert(Event::new(job, time, EventKind::Arrival));
        }

        let stats = vec![JobStats::default(); jobs.len()];

        Self {
            initial_time,
            final_time,
            memory: Memory::new(settings.memory.size, settings.memory.relocating_time),
            processor: Processor::new(
                settings.processor.quantum,
                settings.processor.overhead_time,
            ),
            disc: Disc::new(
                settings.disc.positioning_time,
                settings.disc.latency_time,
                settings.disc.transfer_rate,
            ),
            multiprogramming: MultiprogrammingController::new(settings.multiprogramming.limit),
            timeline,
            jobs,
            stats,
            trace: Vec::new(),
        }
    }

    /// Executes events in time order until the timeline drains or the
    /// run horizon is exceeded, then returns the per-job summary.
    ///
    /// An event past the horizon is still consumed, but not processed.
    pub fn run(&mut self) -> RunReport {
        info!(time = self.initial_time, "starting simulation");

        while let Some(event) = self.timeline.pop_earliest() {
            if event.time > self.final_time {
                info!(
                    time = event.time,
                    horizon = self.final_time,
                    "run horizon exceeded, stopping"
                );
                break;
            }
            self.dispatch(event);
        }

        info!("no more events to simulate");
        self.report()
    }

    /// Every transition processed so far, in execution order.
    pub fn trace(&self) -> &[TraceRecord] {
        &self.trace
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    fn dispatch(&mut self, event: Event) {
        let outcome = match event.kind {
            EventKind::Arrival => self.handle_arrival(event.job, event.time),
            EventKind::RequestMemory => self.handle_request_memory(event.job, event.time),
            EventKind::RequestProcessor => self.handle_request_processor(event.job, event.time),
            EventKind::IssueIo => self.handle_issue_io(event.job, event.time),
            EventKind::RequestIo => self.handle_request_io(event.job, event.time),
            EventKind::ReleaseIo => self.handle_release_io(event.job, event.time),
            EventKind::Completion => self.handle_completion(event.job, event.time),
            EventKind::TimeOut => self.handle_time_out(event.job, event.time),
            EventKind::Invalid => {
                error!(time = event.time, "invalid event kind reached the engine");
                Outcome::Invalid
            }
        };

        let job_id = self.jobs[event.job.0].id();
        info!(
            time = event.time,
            event = %event.kind,
            job = job_id,
            "{}",
            describe(event.kind, outcome)
        );
        self.trace.push(TraceRecord {
            time: event.time,
            kind: event.kind,
            job_id,
            outcome,
        });
    }

    fn handle_arrival(&mut self, job: JobRef, time: f64) -> Outcome {
        let stats = &mut self.stats[job.0];
        stats.arrival_time = Some(time);
        stats.processor_period = 0.0;

        if self.multiprogramming.can_run() {
            self.multiprogramming.run();
            self.timeline
                .insert(Event::new(job, time, EventKind::RequestMemory));
            Outcome::Granted
        } else {
            self.multiprogramming.enqueue(job);
            Outcome::Queued
        }
    }

    fn handle_request_memory(&mut self, job: JobRef, time: f64) -> Outcome {
        let allocated = self.memory.allocate(self.jobs[job.0].segments_mut());
        let outcome = if allocated {
            let ready_at = time + self.memory.relocating_time();
            self.timeline
                .insert(Event::new(job, ready_at, EventKind::RequestProcessor));
            Outcome::Granted
        } else {
            self.memory.enqueue(job);
            Outcome::Queued
        };
        debug!(segment_map = ?self.memory.resident_segments(), "memory segment map");
        outcome
    }

    fn handle_request_processor(&mut self, job_ref: JobRef, time: f64) -> Outcome {
        if !self.processor.is_free() {
            self.processor.enqueue(job_ref);
            return Outcome::Queued;
        }
        self.processor.assign();

        let quantum = self.processor.quantum();
        let job = &mut self.jobs[job_ref.0];
        if job.time_to_next_release() <= quantum {
            if job.io_requests() > 0 {
                // Runs until its next I/O issue within this quantum.
                let granted = job.time_to_next_release();
                job.consume_processor_time(granted);
                self.stats[job_ref.0].processor_period += granted;
                self.timeline
                    .insert(Event::new(job_ref, time + granted, EventKind::IssueIo));
            } else {
                // Runs to completion within this quantum.
                let granted = job.processing_time();
                job.consume_to_completion();
                self.stats[job_ref.0].processor_period += granted;
                self.timeline
                    .insert(Event::new(job_ref, time + granted, EventKind::Completion));
            }
        } else {
            job.consume_processor_time(quantum);
            self.stats[job_ref.0].processor_period += quantum;
            self.timeline
                .insert(Event::new(job_ref, time + quantum, EventKind::TimeOut));
        }
        Outcome::Granted
    }

    fn handle_issue_io(&mut self, job: JobRef, time: f64) -> Outcome {
        self.processor.release();
        self.timeline
            .insert(Event::new(job, time, EventKind::RequestIo));

        if let Some(waiting) = self.processor.dequeue() {
            let dispatch_at = time + self.processor.overhead_time();
            self.timeline
                .insert(Event::new(waiting, dispatch_at, EventKind::RequestProcessor));
        }
        Outcome::Released
    }

    fn handle_request_io(&mut self, job_ref: JobRef, time: f64) -> Outcome {
        if !self.disc.is_free() {
            self.disc.enqueue(job_ref);
            return Outcome::Queued;
        }
        self.disc.assign();

        let job = &mut self.jobs[job_ref.0];
        job.record_io_issued();
        let done_at = time + self.disc.service_time(job.record_length());
        self.timeline
            .insert(Event::new(job_ref, done_at, EventKind::ReleaseIo));
        Outcome::Granted
    }

    fn handle_release_io(&mut self, job: JobRef, time: f64) -> Outcome {
        self.disc.release();
        self.timeline
            .insert(Event::new(job, time, EventKind::RequestProcessor));

        // The next waiter re-enters the request state, which computes its
        // own service time once the disc is assigned.
        if let Some(waiting) = self.disc.dequeue() {
            self.timeline
                .insert(Event::new(waiting, time, EventKind::RequestIo));
        }
        Outcome::Released
    }

    fn handle_time_out(&mut self, job: JobRef, time: f64) -> Outcome {
        self.processor.release();

        // The waiting job's re-request is inserted first, the preempted
        // job's second: with zero overhead both land at the same time and
        // the timeline's tie-break keeps the queue head ahead.
        if let Some(waiting) = self.processor.dequeue() {
            let dispatch_at = time + self.processor.overhead_time();
            self.timeline
                .insert(Event::new(waiting, dispatch_at, EventKind::RequestProcessor));
        }
        self.timeline
            .insert(Event::new(job, time, EventKind::RequestProcessor));
        Outcome::Preempted
    }

    fn handle_completion(&mut self, job: JobRef, time: f64) -> Outcome {
        self.processor.release();
        self.memory.release(self.jobs[job.0].segments_mut());
        self.multiprogramming.finish();
        self.stats[job.0].end_time = Some(time);
        debug!(segment_map = ?self.memory.resident_segments(), "memory segment map");

        if let Some(waiting) = self.processor.dequeue() {
            let dispatch_at = time + self.processor.overhead_time();
            self.timeline
                .insert(Event::new(waiting, dispatch_at, EventKind::RequestProcessor));
        }

        // Feasibility probe for the memory queue head: a real allocation
        // immediately undone, leaving the map unchanged either way. Only
        // on success is the job dequeued and sent back to request memory.
        if let Some(waiting) = self.memory.peek_queue() {
            if self.memory.allocate(self.jobs[waiting.0].segments_mut()) {
                self.memory.release(self.jobs[waiting.0].segments_mut());
                let _ = self.memory.dequeue();
                self.timeline
                    .insert(Event::new(waiting, time, EventKind::RequestMemory));
            }
        }

        // An admission-queued job goes straight to the memory request
        // path; the controller's resident count is not incremented here.
        if let Some(waiting) = self.multiprogramming.dequeue() {
            self.timeline
                .insert(Event::new(waiting, time, EventKind::RequestMemory));
        }
        Outcome::Completed
    }

    fn report(&self) -> RunReport {
        let mut rows = Vec::new();
        let mut unfinished = Vec::new();
        for (job, stats) in self.jobs.iter().zip(&self.stats) {
            match (stats.arrival_time, stats.end_time) {
                (Some(arrival), Some(end)) => {
                    let turnaround = end - arrival;
                    rows.push(JobSummaryRow {
                        job_id: job.id(),
                        arrival_time: arrival,
                        end_time: end,
                        processor_period: stats.processor_period,
                        turnaround,
                        wait_ratio: turnaround / stats.processor_period,
                    });
                }
                _ => unfinished.push(job.id()),
            }
        }
        RunReport::new(rows, unfinished)
    }
}

fn describe(kind: EventKind, outcome: Outcome) -> &'static str {
    match (kind, outcome) {
        (EventKind::Arrival, Outcome::Granted) => "job arrived at the system",
        (EventKind::Arrival, Outcome::Queued) => "job entered multiprogramming queue",
        (EventKind::RequestMemory, Outcome::Granted) => "memory allocated to the job",
        (EventKind::RequestMemory, Outcome::Queued) => "job entered memory queue",
        (EventKind::RequestProcessor, Outcome::Granted) => "processor assigned to the job",
        (EventKind::RequestProcessor, Outcome::Queued) => "job entered processor queue",
        (EventKind::IssueIo, _) => "job released the processor and issued the disc",
        (EventKind::RequestIo, Outcome::Granted) => "disc assigned to the job",
        (EventKind::RequestIo, Outcome::Queued) => "job entered disc queue",
        (EventKind::ReleaseIo, _) => "job released the disc",
        (EventKind::Completion, _) => "job released processor and memory",
        (EventKind::TimeOut, _) => "job released processor at end of quantum",
        (EventKind::Invalid, _) => "invalid event",
        _ => "event processed",
    }
}
