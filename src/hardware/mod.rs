//! Simulated hardware resources driven by the engine.

pub mod disc;
pub mod memory;
pub mod processor;

pub use disc::Disc;
pub use memory::Memory;
pub use processor::Processor;
