use chrono::{DateTime, Local};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::resolve::record::ResolutionRecord;

pub const LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Success => write!(f, "success"),
            LogLevel::Warning => write!(f, "warning"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Ring of the most recent activity entries; the oldest go first.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, level: LogLevel) {
        self.entries.push_back(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(LOG_CAPACITY)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
}

impl Counters {
    /// Counts an arbitrary slice of records, e.g. a filtered view.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a ResolutionRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut counters, record| {
            counters.total_processed += 1;
            if record.is_success() {
                counters.successful += 1;
            } else {
                counters.failed += 1;
            }
            counters
        })
    }

    pub fn success_rate(&self) -> Option<f64> {
        if self.total_processed == 0 {
            None
        } else {
            Some(self.successful as f64 / self.total_processed as f64 * 100.0)
        }
    }
}

/// Accumulates records, counters, the bank histogram and the per-bank index.
///
/// `record` is the only writer of all four, so they never disagree.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    results: Vec<ResolutionRecord>,
    counters: Counters,
    bank_distribution: BTreeMap<String, usize>,
    bank_index: BTreeMap<String, Vec<usize>>,
    activity: ActivityLog,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: ResolutionRecord) {
        let position = self.results.len();
        self.counters.total_processed += 1;

        if record.is_success() {
            self.counters.successful += 1;
            *self.bank_distribution.entry(record.bank.clone()).or_insert(0) += 1;
            self.bank_index
                .entry(record.bank.clone())
                .or_default()
                .push(position);
        } else {
            self.counters.failed += 1;
        }

        self.results.push(record);
    }

    pub fn log(&mut self, message: impl Into<String>, level: LogLevel) {
        self.activity.push(message, level);
    }

    pub fn results(&self) -> &[ResolutionRecord] {
        &self.results
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn bank_distribution(&self) -> &BTreeMap<String, usize> {
        &self.bank_distribution
    }

    /// Banks by descending count, ties broken by name.
    pub fn ranked_banks(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .bank_distribution
            .iter()
            .map(|(bank, count)| (bank.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn banks(&self) -> impl Iterator<Item = &str> {
        self.bank_index.keys().map(String::as_str)
    }

    /// Successful records for one bank, in processing order.
    pub fn records_for_bank<'a>(&'a self, bank: &str) -> impl Iterator<Item = &'a ResolutionRecord> {
        self.bank_index
            .get(bank)
            .into_iter()
            .flatten()
            .map(move |&i| &self.results[i])
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{Identity, PhoneNumber};

    fn success(number: &str, bank: &str) -> ResolutionRecord {
        ResolutionRecord::success(
            PhoneNumber::parse(number).unwrap(),
            Identity {
                name: "HOLDER".to_string(),
                bank: bank.to_string(),
                vpa: format!("{}@ybl", number),
                ifsc: "N/A".to_string(),
            },
            "@ybl",
        )
    }

    fn failure(number: &str) -> ResolutionRecord {
        ResolutionRecord::failed(PhoneNumber::parse(number).unwrap(), "timeout".to_string())
    }

    #[test]
    fn counters_stay_consistent_after_every_record() {
        let mut aggregator = Aggregator::new();
        let records = vec![
            success("9000000001", "STATE BANK"),
            failure("9000000002"),
            success("9000000003", "AXIS BANK"),
            success("9000000004", "STATE BANK"),
            failure("9000000005"),
        ];

        for record in records {
            aggregator.record(record);
            let c = aggregator.counters();
            assert_eq!(c.successful + c.failed, c.total_processed);
            assert_eq!(c.total_processed, aggregator.results().len());
            let histogram_total: usize = aggregator.bank_distribution().values().sum();
            assert_eq!(histogram_total, c.successful);
        }

        assert_eq!(aggregator.bank_distribution().get("STATE BANK"), Some(&2));
        assert_eq!(aggregator.bank_distribution().get("AXIS BANK"), Some(&1));
    }

    #[test]
    fn bank_index_follows_results() {
        let mut aggregator = Aggregator::new();
        aggregator.record(success("9000000001", "STATE BANK"));
        aggregator.record(failure("9000000002"));
        aggregator.record(success("9000000003", "STATE BANK"));

        let mobiles: Vec<&str> = aggregator
            .records_for_bank("STATE BANK")
            .map(|r| r.mobile.as_str())
            .collect();
        assert_eq!(mobiles, vec!["9000000001", "9000000003"]);
        assert_eq!(aggregator.records_for_bank("NOWHERE").count(), 0);
    }

    #[test]
    fn failed_records_leave_histogram_untouched() {
        let mut aggregator = Aggregator::new();
        aggregator.record(failure("9000000002"));
        assert!(aggregator.bank_distribution().is_empty());
        assert_eq!(aggregator.banks().count(), 0);
    }

    #[test]
    fn ranking_orders_by_count_then_name() {
        let mut aggregator = Aggregator::new();
        aggregator.record(success("9000000001", "YES BANK"));
        aggregator.record(success("9000000002", "AXIS BANK"));
        aggregator.record(success("9000000003", "STATE BANK"));
        aggregator.record(success("9000000004", "STATE BANK"));

        assert_eq!(
            aggregator.ranked_banks(),
            vec![("STATE BANK", 2), ("AXIS BANK", 1), ("YES BANK", 1)]
        );
    }

    #[test]
    fn activity_log_evicts_oldest_first() {
        let mut log = ActivityLog::default();
        for i in 0..150 {
            log.push(format!("entry {}", i), LogLevel::Info);
            assert!(log.len() <= LOG_CAPACITY);
        }

        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.iter().next().unwrap().message, "entry 50");
        assert_eq!(log.iter().last().unwrap().message, "entry 149");
    }

    #[test]
    fn success_rate_is_undefined_before_any_record() {
        assert_eq!(Counters::default().success_rate(), None);
        let counters = Counters {
            total_processed: 4,
            successful: 1,
            failed: 3,
        };
        assert_eq!(counters.success_rate(), Some(25.0));
    }

    #[test]
    fn tally_matches_running_counters() {
        let records = vec![
            success("9000000001", "STATE BANK"),
            failure("9000000002"),
            success("9000000003", "AXIS BANK"),
        ];
        let mut aggregator = Aggregator::new();
        for record in records.clone() {
            aggregator.record(record);
        }

        assert_eq!(Counters::tally(&records), aggregator.counters());
        let axis: Vec<&ResolutionRecord> = records.iter().filter(|r| r.bank == "AXIS BANK").collect();
        let counters = Counters::tally(axis);
        assert_eq!((counters.total_processed, counters.successful, counters.failed), (1, 1, 0));
        assert_eq!(Counters::tally(std::iter::empty()), Counters::default());
    }
}
