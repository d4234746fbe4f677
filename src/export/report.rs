use chrono::{DateTime, Local};

use crate::resolve::{record::TIMESTAMP_FORMAT, BatchState};

const SAMPLE_SIZE: usize = 10;

/// Plain-text summary of a batch: counters, timing, bank distribution and a
/// sample of successful extractions.
pub fn summary_report(state: &BatchState, generated: DateTime<Local>) -> String {
    let counters = state.counters();
    let aggregator = state.aggregator();
    let mut out = vec![
        "UPI DETAILS EXTRACTION SUMMARY REPORT".to_string(),
        "=".repeat(50),
        format!("Generated: {}", generated.format(TIMESTAMP_FORMAT)),
        String::new(),
        "OVERALL STATISTICS:".to_string(),
        format!("Total Numbers Processed: {}", counters.total_processed),
        format!("Successful Extractions: {}", counters.successful),
        format!("Failed Attempts: {}", counters.failed),
    ];
    if let Some(rate) = counters.success_rate() {
        out.push(format!("Success Rate: {:.2}%", rate));
    }
    out.push(String::new());

    if let Some(elapsed) = state.elapsed_secs() {
        out.push(format!("Processing Time: {:.2} seconds", elapsed));
        if let Some(speed) = state.throughput() {
            out.push(format!("Average Speed: {:.2} requests/second", speed));
        }
        out.push(String::new());
    }

    let ranked = aggregator.ranked_banks();
    if !ranked.is_empty() {
        out.push("BANK DISTRIBUTION:".to_string());
        for (bank, count) in ranked {
            let share = count as f64 / counters.successful as f64 * 100.0;
            out.push(format!("{}: {} ({:.1}%)", bank, count, share));
        }
        out.push(String::new());
    }

    let successes: Vec<_> = state
        .results()
        .iter()
        .filter(|r| r.is_success())
        .take(SAMPLE_SIZE)
        .collect();
    if !successes.is_empty() {
        out.push(format!("SAMPLE SUCCESSFUL EXTRACTIONS (First {}):", SAMPLE_SIZE));
        for (i, record) in successes.iter().enumerate() {
            out.push(format!(
                "{:2}. {} -> {} ({})",
                i + 1,
                record.mobile,
                record.name,
                record.bank
            ));
        }
        out.push(String::new());
    }

    out.join("\n")
}
