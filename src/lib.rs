//! batchsim: discrete-event simulator of a multiprogrammed batch OS.
//!
//! A workload of jobs with known processing/I-O profiles flows through
//! admission control, variable-partition memory, a round-robin processor
//! and a single disc, all driven by one time-ordered event timeline. The
//! run ends when the timeline drains or the configured horizon passes,
//! and yields per-job turnaround and wait-ratio statistics.

pub mod config;
pub mod hardware;
pub mod input;
pub mod os;
pub mod report;

pub use config::{ConfigError, SimSettings, load_settings};
pub use input::{InputError, Workload, parse_workload, read_workload};
pub use os::event::EventKind;
pub use os::job::{Job, JobRef};
pub use os::scheduler::{Outcome, Scheduler, TraceRecord};
pub use report::RunReport;
