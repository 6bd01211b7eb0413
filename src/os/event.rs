//! Events and the time-ordered timeline that drives the simulation.

use std::collections::VecDeque;
use std::fmt;

use crate::os::job::JobRef;

/// The closed set of simulation event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Unreachable in a well-formed run; logged and ignored if it fires.
    Invalid,
    Arrival,
    RequestMemory,
    RequestProcessor,
    /// Job surrenders the processor to issue an I/O request.
    IssueIo,
    RequestIo,
    /// I/O request finished; the disc is released.
    ReleaseIo,
    Completion,
    /// Quantum expired before the job's next natural release point.
    TimeOut,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Invalid => "INVALID",
            EventKind::Arrival => "Arrival",
            EventKind::RequestMemory => "Request Memory",
            EventKind::RequestProcessor => "Request Processor",
            EventKind::IssueIo => "Release Processor (Issue I/O)",
            EventKind::RequestIo => "Request I/O",
            EventKind::ReleaseIo => "Complete I/O",
            EventKind::Completion => "Completion",
            EventKind::TimeOut => "Time-out",
        };
        f.write_str(label)
    }
}

/// A scheduled state transition for one job. Immutable once created;
/// consumed exactly once when it becomes the earliest pending event.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub job: JobRef,
    pub time: f64,
    pub kind: EventKind,
}

impl Event {
    pub fn new(job: JobRef, time: f64, kind: EventKind) -> Self {
        Self { job, time, kind }
    }
}

/// Pending events kept sorted by non-decreasing time.
///
/// Insertion places a new event immediately before the first existing
/// event with a strictly greater time, so events scheduled for the same
/// instant pop in insertion order. The quantum-expiry handler depends on
/// that tie-break for FIFO fairness; a plain `BinaryHeap` keyed on time
/// would not preserve it.
#[derive(Debug, Default)]
pub struct Timeline {
    events: VecDeque<Event>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: Event) {
        let index = self
            .events
            .iter()
            .position(|pending| pending.time > event.time)
            .unwrap_or(self.events.len());
        self.events.insert(index, event);
    }

    pub fn pop_earliest(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(slot: usize, time: f64) -> Event {
        Event::new(JobRef(slot), time, EventKind::Arrival)
    }

    #[test]
    fn pops_in_non_decreasing_time_order() {
        let mut timeline = Timeline::new();
        for &time in &[30.0, 10.0, 20.0, 5.0, 25.0] {
            timeline.insert(event(0, time));
        }
        let mut previous = f64::NEG_INFINITY;
        while let Some(event) = timeline.pop_earliest() {
            assert!(event.time >= previous);
            previous = event.time;
        }
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.insert(event(0, 10.0));
        timeline.insert(event(1, 10.0));
        timeline.insert(event(2, 5.0));
        timeline.insert(event(3, 10.0));

        assert_eq!(timeline.pop_earliest().unwrap().job, JobRef(2));
        assert_eq!(timeline.pop_earliest().unwrap().job, JobRef(0));
        assert_eq!(timeline.pop_earliest().unwrap().job, JobRef(1));
        assert_eq!(timeline.pop_earliest().unwrap().job, JobRef(3));
        assert!(timeline.is_empty());
    }

    #[test]
    fn insert_goes_before_first_strictly_later_event() {
        let mut timeline = Timeline::new();
        timeline.insert(event(0, 10.0));
        timeline.insert(event(1, 20.0));
        timeline.insert(event(2, 10.0));

        assert_eq!(timeline.pop_earliest().unwrap().job, JobRef(0));
        assert_eq!(timeline.pop_earliest().unwrap().job, JobRef(2));
        assert_eq!(timeline.pop_earliest().unwrap().job, JobRef(1));
    }

    #[test]
    fn empty_timeline_pops_none() {
        let mut timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert!(timeline.pop_earliest().is_none());
    }
}
