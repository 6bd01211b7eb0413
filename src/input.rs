//! Workload-description parser.
//!
//! The description file is line-oriented and position-based:
//!
//! ```text
//! line 0   title (ignored)
//! line 1   simulation start time
//! line 2   simulation horizon
//! line 3   number of jobs N
//! lines 4-5   separators (ignored)
//! lines 6..6+N    one job each:
//!     id processing_time n_segments seg_1.. seg_n io_requests n_files file_1..
//! lines 6+N..9+N  separators (ignored)
//! lines 9+N..9+2N one arrival each: id arrival_time
//! ```

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

use crate::os::files::FileCatalog;
use crate::os::job::{Job, JobRef};

/// Every simulated record transfers this many units.
pub const JOB_RECORD_LENGTH: f64 = 100.0;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("workload file ended early (expected line {0})")]
    Truncated(usize),
    #[error("missing field {field} on line {line}")]
    MissingField { line: usize, field: usize },
    #[error("malformed number {value:?} on line {line}")]
    Number { line: usize, value: String },
}

/// Everything the engine consumes: the timing bounds, the job arena,
/// the arrival schedule, and the (never simulated) file catalog.
#[derive(Debug)]
pub struct Workload {
    pub initial_time: f64,
    pub final_time: f64,
    pub(crate) jobs: Vec<Job>,
    pub(crate) arrivals: Vec<(JobRef, f64)>,
    pub files: FileCatalog,
}

impl Workload {
    pub fn new(initial_time: f64, final_time: f64) -> Self {
        Self {
            initial_time,
            final_time,
            jobs: Vec::new(),
            arrivals: Vec::new(),
            files: FileCatalog::standard(),
        }
    }

    pub fn push_job(&mut self, job: Job) -> JobRef {
        self.jobs.push(job);
        JobRef(self.jobs.len() - 1)
    }

    /// Schedules an arrival; ties at the same time keep push order.
    pub fn push_arrival(&mut self, job: JobRef, time: f64) {
        self.arrivals.push((job, time));
    }

    pub fn find_job(&self, id: u32) -> Option<JobRef> {
        self.jobs.iter().position(|job| job.id() == id).map(JobRef)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn arrivals(&self) -> &[(JobRef, f64)] {
        &self.arrivals
    }
}

/// Reads and parses a workload-description file.
pub fn read_workload(path: impl AsRef<Path>) -> Result<Workload, InputError> {
    let text = std::fs::read_to_string(path)?;
    parse_workload(&text)
}

/// Parses the workload description from text. Arrivals naming unknown
/// job ids are reported and skipped, not fatal.
pub fn parse_workload(text: &str) -> Result<Workload, InputError> {
    let lines: Vec<&str> = text.lines().collect();

    let initial_time: f64 = line_number(&lines, 1)?;
    let final_time: f64 = line_number(&lines, 2)?;
    let num_jobs: usize = line_number(&lines, 3)?;

    let mut workload = Workload::new(initial_time, final_time);

    for line in 6..6 + num_jobs {
        let fields: Vec<&str> = get_line(&lines, line)?.split_whitespace().collect();

        let id: u32 = field(&fields, line, 0)?;
        let processing_time: f64 = field(&fields, line, 1)?;
        let num_segments: usize = field(&fields, line, 2)?;

        let mut segment_sizes = Vec::with_capacity(num_segments);
        for index in 0..num_segments {
            segment_sizes.push(field(&fields, line, 3 + index)?);
        }

        let io_requests: u32 = field(&fields, line, 3 + num_segments)?;
        let num_files: usize = field(&fields, line, 4 + num_segments)?;

        let mut file_names = Vec::with_capacity(num_files);
        for index in 0..num_files {
            let name: String = field(&fields, line, 5 + num_segments + index)?;
            file_names.push(name);
        }

        info!(
            job = id,
            processing_time,
            segments = num_segments,
            io_requests,
            files = num_files,
            "job defined"
        );

        for name in &file_names {
            match workload.files.get_mut(name) {
                Some(file) => file.add_owner(id),
                None => warn!(job = id, file = %name, "job references unknown file"),
            }
        }

        let job = Job::new(
            id,
            processing_time,
            io_requests,
            JOB_RECORD_LENGTH,
            &segment_sizes,
            file_names,
        );
        workload.push_job(job);
    }

    for line in (9 + num_jobs)..(9 + 2 * num_jobs) {
        let fields: Vec<&str> = get_line(&lines, line)?.split_whitespace().collect();
        let id: u32 = field(&fields, line, 0)?;
        let arrival_time: f64 = field(&fields, line, 1)?;

        match workload.find_job(id) {
            Some(job) => {
                info!(job = id, arrival_time, "arrival scheduled");
                workload.push_arrival(job, arrival_time);
            }
            None => warn!(job = id, "arrival references undefined job, skipping"),
        }
    }

    Ok(workload)
}

fn get_line<'a>(lines: &[&'a str], index: usize) -> Result<&'a str, InputError> {
    lines.get(index).copied().ok_or(InputError::Truncated(index))
}

fn line_number<T: FromStr>(lines: &[&str], index: usize) -> Result<T, InputError> {
    let text = get_line(lines, index)?.trim();
    text.parse().map_err(|_| InputError::Number {
        line: index,
        value: text.to_string(),
    })
}

fn field<T: FromStr>(fields: &[&str], line: usize, index: usize) -> Result<T, InputError> {
    let text = fields
        .get(index)
        .copied()
        .ok_or(InputError::MissingField { line, field: index })?;
    text.parse().map_err(|_| InputError::Number {
        line,
        value: text.to_string(),
    })
}
