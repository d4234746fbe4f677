use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const CLI_LOG_FILTER: &str = "upi_resolver=info,warn";
pub const TUI_LOG_FILTER: &str = "upi_resolver=debug,info";
pub const TUI_LOG_PATH: &str = "logs/upi-resolver.log";

/// Where the tracing subscriber writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// The dashboard owns the terminal, so it logs to a file.
    pub fn for_command(tui: bool) -> Self {
        if tui {
            LogTarget::File(PathBuf::from(TUI_LOG_PATH))
        } else {
            LogTarget::Stderr
        }
    }

    pub fn default_filter(&self) -> &'static str {
        match self {
            LogTarget::Stderr => CLI_LOG_FILTER,
            LogTarget::File(_) => TUI_LOG_FILTER,
        }
    }

    /// Whether a fatal error logged through tracing would be invisible on the terminal.
    pub fn needs_terminal_echo(&self) -> bool {
        matches!(self, LogTarget::File(_))
    }

    /// Install the global subscriber. `RUST_LOG` overrides the default filter.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_filter()));

        let path = match self {
            LogTarget::Stderr => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
                return;
            }
            LogTarget::File(path) => path,
        };

        match open_log_file(path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init(),
            Err(_) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init(),
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::File::create(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_commands_report_through_stderr_only() {
        let target = LogTarget::for_command(false);
        assert_eq!(target, LogTarget::Stderr);
        assert_eq!(target.default_filter(), CLI_LOG_FILTER);
        assert!(!target.needs_terminal_echo());
    }

    #[test]
    fn dashboard_logs_to_file_and_echoes_fatal_errors() {
        let target = LogTarget::for_command(true);
        assert_eq!(target, LogTarget::File(PathBuf::from(TUI_LOG_PATH)));
        assert_eq!(target.default_filter(), TUI_LOG_FILTER);
        assert!(target.needs_terminal_echo());
    }

    #[test]
    fn log_file_parent_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
