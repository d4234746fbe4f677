use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

use crate::{
    config::Config,
    error::{ResolverError, Result},
    lookup::{CandidateGenerator, HttpLookupClient, LookupClient, LookupOutcome, PhoneNumber},
    resolve::{
        aggregator::{Aggregator, Counters, LogLevel},
        engine::ResolutionEngine,
        record::{RecordStatus, ResolutionRecord},
    },
    utils::RateLimiter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BatchStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Idle => write!(f, "idle"),
            BatchStatus::Running => write!(f, "running"),
            BatchStatus::Paused => write!(f, "paused"),
            BatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Everything one batch run owns. Replaced wholesale on load and reset.
#[derive(Debug, Clone, Default)]
pub struct BatchState {
    numbers: Vec<PhoneNumber>,
    current_index: usize,
    status: BatchStatus,
    aggregator: Aggregator,
    started_at: Option<DateTime<Local>>,
}

impl BatchState {
    fn with_numbers(numbers: Vec<PhoneNumber>) -> Self {
        Self {
            numbers,
            ..Self::default()
        }
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn numbers(&self) -> &[PhoneNumber] {
        &self.numbers
    }

    /// The number the next tick will resolve.
    pub fn current_number(&self) -> Option<&PhoneNumber> {
        self.numbers.get(self.current_index)
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn results(&self) -> &[ResolutionRecord] {
        self.aggregator.results()
    }

    pub fn counters(&self) -> Counters {
        self.aggregator.counters()
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    pub fn progress(&self) -> f64 {
        if self.numbers.is_empty() {
            0.0
        } else {
            self.current_index as f64 / self.numbers.len() as f64
        }
    }

    /// Seconds since the first start, stopped and paused periods included.
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.started_at
            .map(|start| (Local::now() - start).num_milliseconds().max(0) as f64 / 1000.0)
    }

    /// Numbers per second since the first start.
    pub fn throughput(&self) -> Option<f64> {
        match self.elapsed_secs() {
            Some(elapsed) if elapsed > 0.0 => {
                Some(self.counters().total_processed as f64 / elapsed)
            }
            _ => None,
        }
    }

    pub fn avg_secs_per_number(&self) -> Option<f64> {
        let processed = self.counters().total_processed;
        match self.elapsed_secs() {
            Some(elapsed) if processed > 0 => Some(elapsed / processed as f64),
            _ => None,
        }
    }
}

/// What a single `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to do in this state.
    Skipped(BatchStatus),
    Processed { index: usize, status: RecordStatus },
}

/// Drives the resolution engine over a loaded list, one number per tick.
pub struct BatchController<L> {
    engine: ResolutionEngine<L>,
    state: BatchState,
    limiter: RateLimiter,
}

impl BatchController<HttpLookupClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpLookupClient::new(&config.lookup.url_template, config.timeout())?;
        let generator = CandidateGenerator::new(config.lookup.handles.clone());
        Ok(Self::new(
            ResolutionEngine::new(generator, client),
            Duration::from_millis(config.batch.delay_ms),
        ))
    }
}

impl<L: LookupClient> BatchController<L> {
    pub fn new(engine: ResolutionEngine<L>, delay: Duration) -> Self {
        Self {
            engine,
            state: BatchState::default(),
            limiter: RateLimiter::new(delay),
        }
    }

    pub fn snapshot(&self) -> &BatchState {
        &self.state
    }

    pub fn engine(&self) -> &ResolutionEngine<L> {
        &self.engine
    }

    /// Replace the number list and clear every derived value.
    pub fn load(&mut self, numbers: Vec<PhoneNumber>) {
        let count = numbers.len();
        self.state = BatchState::with_numbers(numbers);
        self.limiter.reset();
        self.state
            .aggregator
            .log(format!("Loaded {} phone numbers", count), LogLevel::Info);
        info!("Loaded {} phone numbers", count);
    }

    pub fn start(&mut self) -> Result<()> {
        match self.state.status {
            BatchStatus::Idle | BatchStatus::Paused => {}
            status => {
                return Err(ResolverError::InvalidTransition {
                    command: "start",
                    status,
                })
            }
        }
        if self.state.is_empty() {
            return Err(ResolverError::EmptyBatch);
        }

        let resumed = self.state.started_at.is_some();
        self.state.started_at.get_or_insert_with(Local::now);
        self.state.status = BatchStatus::Running;

        let message = if resumed {
            format!(
                "Processing resumed at {}/{}",
                self.state.current_index,
                self.state.len()
            )
        } else {
            "Processing started!".to_string()
        };
        info!("{}", message);
        self.state.aggregator.log(message, LogLevel::Info);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        if self.state.status != BatchStatus::Running {
            return Err(ResolverError::InvalidTransition {
                command: "pause",
                status: self.state.status,
            });
        }

        self.state.status = BatchStatus::Paused;
        self.state
            .aggregator
            .log("Processing paused", LogLevel::Warning);
        info!("Paused at {}/{}", self.state.current_index, self.state.len());
        Ok(())
    }

    /// Halt without losing the cursor; a later `start` resumes from it.
    pub fn stop(&mut self) -> Result<()> {
        match self.state.status {
            BatchStatus::Running | BatchStatus::Paused => {}
            status => {
                return Err(ResolverError::InvalidTransition {
                    command: "stop",
                    status,
                })
            }
        }

        self.state.status = BatchStatus::Idle;
        self.state
            .aggregator
            .log("Processing stopped by user", LogLevel::Warning);
        warn!("Stopped at {}/{}", self.state.current_index, self.state.len());
        Ok(())
    }

    /// Back to a clean, empty batch from any state.
    pub fn reset(&mut self) {
        self.state = BatchState::default();
        self.limiter.reset();
        info!("Batch state reset");
    }

    /// Resolve the number under the cursor if running.
    ///
    /// Waits out the inter-number delay first. Reaching the end of the list moves the
    /// batch to `Completed`.
    pub async fn tick(&mut self) -> Tick {
        if self.state.status != BatchStatus::Running {
            return Tick::Skipped(self.state.status);
        }

        let number = match self.state.current_number() {
            Some(number) => number.clone(),
            None => {
                self.complete();
                return Tick::Skipped(self.state.status);
            }
        };

        self.limiter.wait().await;

        self.state
            .aggregator
            .log(format!("Processing {}...", number), LogLevel::Info);
        let resolution = self.engine.resolve(&number).await;

        for attempt in &resolution.attempts {
            match &attempt.outcome {
                LookupOutcome::Valid(_) => {}
                LookupOutcome::Invalid => self.state.aggregator.log(
                    format!("No valid data for {}", attempt.candidate),
                    LogLevel::Warning,
                ),
                LookupOutcome::TransportError(e) => self
                    .state
                    .aggregator
                    .log(format!("{}: {}", attempt.candidate, e), LogLevel::Warning),
            }
        }

        let record = resolution.record;
        let status = record.status;
        match status {
            RecordStatus::Success => self.state.aggregator.log(
                format!(
                    "{}{} → {} ({})",
                    record.mobile,
                    record.upi_handle.as_deref().unwrap_or_default(),
                    record.name,
                    record.bank
                ),
                LogLevel::Success,
            ),
            RecordStatus::Failed => self.state.aggregator.log(
                format!(
                    "{} → {}",
                    record.mobile,
                    record.error.as_deref().unwrap_or_default()
                ),
                LogLevel::Error,
            ),
        }

        let index = self.state.current_index;
        self.state.aggregator.record(record);
        self.state.current_index += 1;

        if self.state.current_index >= self.state.len() {
            self.complete();
        }

        Tick::Processed { index, status }
    }

    fn complete(&mut self) {
        self.state.status = BatchStatus::Completed;
        let counters = self.state.counters();
        self.state
            .aggregator
            .log("Processing completed!", LogLevel::Success);
        info!(
            "Batch complete: {} processed, {} successful, {} failed",
            counters.total_processed, counters.successful, counters.failed
        );
    }
}
