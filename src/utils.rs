use colored::Colorize;
use std::time::Duration;
use tokio::time::Instant;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a success rate with colour by band.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r >= 50.0 => format!("{:.1}%", r).green().to_string(),
        Some(r) => format!("{:.1}%", r).yellow().to_string(),
        None => "-".dimmed().to_string(),
    }
}

/// Format an optional seconds value, `-` when unknown.
pub fn format_secs(secs: Option<f64>) -> String {
    secs.map(|s| format!("{:.2}s", s))
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate to a display width, appending `…` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Minimum spacing between outbound requests.
pub struct RateLimiter {
    delay: Duration,
    last_call: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        self.last_call = Some(Instant::now());
    }

    pub fn reset(&mut self) {
        self.last_call = None;
    }
}

/// Prompt user for yes/no confirmation
pub fn confirm_action(prompt: &str) -> bool {
    use std::io::{self, Write};

    print!("{} (y/N): ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (col, width) in columns.iter().zip(widths) {
        let cell = truncate(col, *width);
        let pad = width.saturating_sub(cell.width());
        row.push_str(&cell);
        row.push_str(&" ".repeat(pad + 2));
    }
    println!("{}", row.trim_end());
}
