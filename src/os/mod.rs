//! Operating-system entities: jobs, events, admission control, and the
//! simulation engine itself.

pub mod event;
pub mod files;
pub mod job;
pub mod multiprogramming;
pub mod scheduler;
pub mod segment;
