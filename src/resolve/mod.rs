pub mod aggregator;
pub mod batch;
pub mod engine;
pub mod record;

pub use aggregator::{ActivityLog, Aggregator, Counters, LogEntry, LogLevel, LOG_CAPACITY};
pub use batch::{BatchController, BatchState, BatchStatus, Tick};
pub use engine::{Attempt, Resolution, ResolutionEngine};
pub use record::{RecordStatus, ResolutionRecord};
