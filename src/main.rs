mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};
use upi_resolver::{
    config::Config,
    error,
    export::{self, ExportFormat, RecordFilter},
    ingest::{self, LoadReport},
    logging::LogTarget,
    lookup::PhoneNumber,
    resolve::{BatchController, BatchState, BatchStatus, RecordStatus, Tick},
    tui, utils,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let log_target = LogTarget::for_command(matches!(cli.command, Commands::Tui { .. }));
    log_target.init();

    if let Commands::Init { force } = cli.command {
        if let Err(e) = initialize(&cli.config, force) {
            fail(&log_target, &e.to_string());
        }
        return;
    }

    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => fail(&log_target, &format!("Failed to load configuration: {}", e)),
    };

    let result = match cli.command {
        Commands::Tui { input } => tui::run_tui(config, input).await,

        Commands::Run {
            input,
            output_dir,
            format,
        } => {
            info!("Running batch from {}", input.display());
            run_batch(&config, &input, output_dir, format).await
        }

        Commands::Check { file } => check_file(&file),

        Commands::Resolve { number, json } => resolve_single(&config, &number, json).await,

        Commands::Sample { path } => write_sample(&path),

        Commands::Init { .. } => Ok(()),
    };

    if let Err(e) = result {
        fail(&log_target, &e.to_string());
    }
}

/// Report a fatal error once and exit.
fn fail(target: &LogTarget, message: &str) -> ! {
    error!("{}", message);
    if target.needs_terminal_echo() {
        eprintln!("{}", format!("Error: {}", message).red());
    }
    std::process::exit(1);
}

async fn run_batch(
    config: &Config,
    input: &Path,
    output_dir: Option<PathBuf>,
    format: ExportFormat,
) -> error::Result<()> {
    let report = LoadReport::from_path(input)?;
    print_load_summary(&report);

    if report.numbers.is_empty() {
        println!("{}", "No valid phone numbers to process".yellow());
        return Ok(());
    }

    let mut controller = BatchController::from_config(config)?;
    controller.load(report.numbers);
    controller.start()?;

    let stop_requested = Arc::new(AtomicBool::new(false));
    {
        let flag = stop_requested.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    let progress = ProgressBar::new(controller.snapshot().len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );

    loop {
        if stop_requested.load(Ordering::SeqCst)
            && controller.snapshot().status() == BatchStatus::Running
        {
            controller.stop()?;
            progress.abandon_with_message("stopped");
            warn!("Batch stopped by Ctrl-C");
            break;
        }

        match controller.tick().await {
            Tick::Processed { index, status } => {
                let state = controller.snapshot();
                progress.set_position((index + 1) as u64);
                let last = &state.results()[index];
                let message = match status {
                    RecordStatus::Success => format!("{} → {}", last.mobile, last.bank).green(),
                    RecordStatus::Failed => format!("{} → failed", last.mobile).red(),
                };
                progress.set_message(message.to_string());
            }
            Tick::Skipped(_) => break,
        }
    }

    if controller.snapshot().status() == BatchStatus::Completed {
        progress.finish_with_message("done");
    }

    let state = controller.snapshot();
    print_summary(state);

    let dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
    match export::export(state, &RecordFilter::default(), &dir, format) {
        Ok(files) => {
            println!("\n{}", "Exported:".cyan());
            for file in files {
                println!("  {}", file.display());
            }
        }
        Err(e) => {
            // results are still on screen; a failed export does not fail the run
            warn!("Export failed: {}", e);
            println!("{} {}", "Export failed:".red(), e);
        }
    }

    Ok(())
}

fn check_file(path: &Path) -> error::Result<()> {
    let report = LoadReport::from_path(path)?;
    print_load_summary(&report);

    if !report.invalid.is_empty() {
        println!("\n{}", "Invalid Entries:".yellow());
        utils::print_table_border(40);
        utils::print_table_row(&["Line", "Content"], &[8, 30]);
        utils::print_table_border(40);
        for entry in &report.invalid {
            utils::print_table_row(&[&entry.line.to_string(), &entry.content], &[8, 30]);
        }
        utils::print_table_border(40);
    }

    Ok(())
}

async fn resolve_single(config: &Config, number: &str, json: bool) -> error::Result<()> {
    let number = PhoneNumber::parse(number)?;
    let controller = BatchController::from_config(config)?;

    println!("{}", format!("Resolving {}...", number).cyan());
    let resolution = controller.engine().resolve(&number).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution.record)?);
        return Ok(());
    }

    for attempt in &resolution.attempts {
        let verdict = match attempt.outcome.failure_reason() {
            None => "match".green(),
            Some(reason) => reason.yellow(),
        };
        println!("  {:<28} {}", attempt.candidate.address(), verdict);
    }

    let record = resolution.record;
    println!();
    match record.status {
        RecordStatus::Success => {
            println!("Name:       {}", record.name.green().bold());
            println!("Bank:       {}", record.bank);
            println!("VPA:        {}", record.vpa);
            println!("IFSC:       {}", record.ifsc);
            println!(
                "UPI Handle: {}",
                record.upi_handle.as_deref().unwrap_or_default()
            );
        }
        RecordStatus::Failed => {
            println!(
                "{} {}",
                "✗".red(),
                record.error.as_deref().unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn write_sample(path: &Path) -> error::Result<()> {
    std::fs::write(path, ingest::sample_file_content())?;
    println!(
        "{} {}",
        "✓ Sample numbers written to".green(),
        path.display()
    );
    Ok(())
}

fn initialize(path: &str, force: bool) -> error::Result<()> {
    let path = Path::new(path);
    if path.exists() && !force {
        if !utils::confirm_action(&format!("{} exists. Overwrite?", path.display())) {
            println!("Cancelled");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let text = Config::default().to_toml()?;
    std::fs::write(path, text)?;

    println!("{} {}", "✓ Configuration written to".green(), path.display());
    println!("\n{}", "Ready to use! Try running:".cyan());
    println!("  {} to write a sample file", "upi-resolver sample".yellow());
    println!(
        "  {} to resolve it headless",
        "upi-resolver run --input sample_numbers.txt".yellow()
    );
    println!(
        "  {} to launch the dashboard",
        "upi-resolver tui --input sample_numbers.txt".yellow()
    );
    Ok(())
}

fn print_load_summary(report: &LoadReport) {
    println!("{}", "=== File Information ===".cyan().bold());
    println!("Total lines:          {}", report.total_lines);
    println!(
        "Valid phone numbers:  {}",
        report.numbers.len().to_string().green()
    );
    println!(
        "Invalid entries:      {}",
        report.invalid.len().to_string().yellow()
    );
}

fn print_summary(state: &BatchState) {
    let counters = state.counters();

    println!("\n{}", "=== Resolution Summary ===".cyan().bold());
    println!("Processed:     {}/{}", state.current_index(), state.len());
    println!("Successful:    {} ✓", counters.successful.to_string().green());
    println!("Failed:        {} ✗", counters.failed.to_string().red());
    println!("Success Rate:  {}", utils::format_rate(counters.success_rate()));
    println!("Elapsed:       {}", utils::format_secs(state.elapsed_secs()));
    println!("Avg/Number:    {}", utils::format_secs(state.avg_secs_per_number()));

    let ranked = state.aggregator().ranked_banks();
    if !ranked.is_empty() {
        println!("\n{}", "Bank Distribution:".yellow());
        utils::print_table_border(60);
        utils::print_table_row(&["Bank", "Count", "Share"], &[36, 8, 8]);
        utils::print_table_border(60);
        for (bank, count) in ranked {
            let share = count as f64 / counters.successful as f64 * 100.0;
            utils::print_table_row(
                &[bank, &count.to_string(), &format!("{:.1}%", share)],
                &[36, 8, 8],
            );
        }
        utils::print_table_border(60);
    }
}
