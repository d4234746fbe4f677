use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use tracing::{info, warn};
use tui_input::{backend::crossterm::EventHandler as _, Input};

use crate::{
    config::Config,
    error::Result,
    export::{self, ExportFormat, RecordFilter},
    ingest::LoadReport,
    lookup::HttpLookupClient,
    resolve::{BatchController, BatchState, BatchStatus, LogLevel, ResolutionRecord, Tick},
    tui::theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Results,
    Statistics,
    Settings,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Results => "Results",
            Screen::Statistics => "Statistics",
            Screen::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    // UI State
    pub current_screen: Screen,
    pub should_quit: bool,
    pub show_help: bool,
    pub selected_index: usize,
    pub status_message: String,
    pub input_mode: InputMode,
    pub search: Input,
    pub bank_filter: Option<String>,
    pub theme: Theme,

    pub config: Config,
    pub input_path: Option<PathBuf>,
    controller: BatchController<HttpLookupClient>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let controller = BatchController::from_config(&config)?;

        Ok(Self {
            current_screen: Screen::Dashboard,
            should_quit: false,
            show_help: false,
            selected_index: 0,
            status_message: "Ready".to_string(),
            input_mode: InputMode::Normal,
            search: Input::default(),
            bank_filter: None,
            theme: Theme::default(),
            config,
            input_path: None,
            controller,
        })
    }

    pub fn batch(&self) -> &BatchState {
        self.controller.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.batch().status() == BatchStatus::Running
    }

    /// Replace the batch with the valid numbers of `report`.
    pub fn load(&mut self, report: LoadReport, source: Option<PathBuf>) {
        let valid = report.numbers.len();
        let invalid = report.invalid.len();
        self.controller.load(report.numbers);
        self.input_path = source;
        self.selected_index = 0;
        self.status_message = format!("Loaded {} numbers ({} invalid lines skipped)", valid, invalid);
    }

    /// Re-read the numbers file the dashboard was started with.
    pub fn reload(&mut self) {
        let path = match self.input_path.clone() {
            Some(path) => path,
            None => {
                self.status_message = "No input file to reload".to_string();
                return;
            }
        };

        match LoadReport::from_path(&path) {
            Ok(report) => {
                info!("Reloaded {}", path.display());
                self.bank_filter = None;
                self.load(report, Some(path));
            }
            Err(e) => {
                warn!("Reload of {} failed: {}", path.display(), e);
                self.status_message = format!("Reload failed: {}", e);
            }
        }
    }

    // Navigation
    pub fn next_screen(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Dashboard => Screen::Results,
            Screen::Results => Screen::Statistics,
            Screen::Statistics => Screen::Settings,
            Screen::Settings => Screen::Dashboard,
        };
    }

    pub fn previous_screen(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Dashboard => Screen::Settings,
            Screen::Settings => Screen::Statistics,
            Screen::Statistics => Screen::Results,
            Screen::Results => Screen::Dashboard,
        };
    }

    pub fn next_item(&mut self) {
        let len = self.visible_results().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    pub fn previous_item(&mut self) {
        let len = self.visible_results().len();
        if len > 0 {
            if self.selected_index == 0 {
                self.selected_index = len - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    pub fn filter(&self) -> RecordFilter {
        let query = self.search.value().trim();
        RecordFilter {
            search: (!query.is_empty()).then(|| query.to_string()),
            bank: self.bank_filter.clone(),
        }
    }

    pub fn visible_results(&self) -> Vec<&ResolutionRecord> {
        self.filter().apply(self.batch().results())
    }

    /// Step through `None` then every bank seen so far.
    pub fn cycle_bank_filter(&mut self) {
        let banks: Vec<&str> = self.batch().aggregator().banks().collect();
        let next = match &self.bank_filter {
            None => banks.first().map(|b| b.to_string()),
            Some(current) => banks
                .iter()
                .position(|b| *b == current.as_str())
                .and_then(|i| banks.get(i + 1))
                .map(|b| b.to_string()),
        };

        self.status_message = match &next {
            Some(bank) => format!("Bank filter: {}", bank),
            None => "Bank filter cleared".to_string(),
        };
        self.bank_filter = next;
        self.selected_index = 0;
    }

    // Actions
    pub fn start(&mut self) {
        self.status_message = match self.controller.start() {
            Ok(()) => "Processing...".to_string(),
            Err(e) => e.to_string(),
        };
    }

    pub fn pause(&mut self) {
        self.status_message = match self.controller.pause() {
            Ok(()) => "Paused".to_string(),
            Err(e) => e.to_string(),
        };
    }

    pub fn stop(&mut self) {
        self.status_message = match self.controller.stop() {
            Ok(()) => "Stopped".to_string(),
            Err(e) => e.to_string(),
        };
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.bank_filter = None;
        self.search.reset();
        self.selected_index = 0;
        self.status_message = "Reset".to_string();
    }

    pub fn export(&mut self) {
        if self.batch().results().is_empty() {
            self.status_message = "Nothing to export yet".to_string();
            return;
        }

        let filter = self.filter();
        match export::export(
            self.batch(),
            &filter,
            &self.config.export.output_dir,
            ExportFormat::All,
        ) {
            Ok(files) => {
                info!("Exported {} files", files.len());
                self.status_message = format!(
                    "Exported {} files to {}",
                    files.len(),
                    self.config.export.output_dir.display()
                );
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.status_message = format!("Export failed: {}", e);
            }
        }
    }

    /// Resolve one number if the batch is running.
    pub async fn tick(&mut self) {
        if let Tick::Processed { index, .. } = self.controller.tick().await {
            self.status_message = format!("Processed {}/{}", index + 1, self.batch().len());
            if self.batch().status() == BatchStatus::Completed {
                let counters = self.batch().counters();
                self.status_message = format!(
                    "Completed: {} successful, {} failed",
                    counters.successful, counters.failed
                );
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.status_message = match self.search.value() {
                    "" => "Search cleared".to_string(),
                    query => format!("Search: {}", query),
                };
            }
            _ => {
                self.search.handle_event(&CrosstermEvent::Key(key));
                self.selected_index = 0;
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc if self.show_help => self.show_help = false,
            KeyCode::Tab => self.next_screen(),
            KeyCode::BackTab => self.previous_screen(),
            KeyCode::Down | KeyCode::Char('j') => self.next_item(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_item(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('s') => self.start(),
            KeyCode::Char('p') => self.pause(),
            KeyCode::Char('x') => self.stop(),
            KeyCode::Char('R') => self.reset(),
            KeyCode::Char('l') => self.reload(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('b') => self.cycle_bank_filter(),
            KeyCode::Char('/') => {
                self.current_screen = Screen::Results;
                self.input_mode = InputMode::Search;
                self.status_message = "Type to search, Enter to apply".to_string();
            }
            _ => {}
        }
    }

    pub fn log_level_color(&self, level: LogLevel) -> ratatui::style::Color {
        match level {
            LogLevel::Info => self.theme.info,
            LogLevel::Success => self.theme.success,
            LogLevel::Warning => self.theme.warning,
            LogLevel::Error => self.theme.error,
        }
    }
}
