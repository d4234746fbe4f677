use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::Result,
    ingest::LoadReport,
    tui::{
        app::{App, InputMode, Screen},
        components,
        event::{Event, EventHandler},
        screens,
    },
};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the dashboard until the user quits, optionally preloading a numbers file.
pub async fn run_tui(config: Config, input: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    if let Some(path) = input {
        let report = LoadReport::from_path(&path)?;
        app.load(report, Some(path));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    info!("TUI started");
    let result = run_loop(&mut terminal, &mut app).await;

    // restore the terminal before reporting any loop error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("TUI exited");

    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE);

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;
        if app.should_quit {
            return Ok(());
        }

        if app.is_running() {
            // one number per pass; keys queued meanwhile apply before the next one
            app.tick().await;
            while let Some(event) = events.try_next() {
                handle_event(app, event);
            }
        } else {
            match events.next().await {
                Some(event) => handle_event(app, event),
                None => return Ok(()),
            }
        }
    }
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => app.handle_key(key),
        Event::Resize(width, height) => debug!("Terminal resized to {}x{}", width, height),
        Event::Tick => {}
    }
}

pub fn render_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.size());

    components::header::render(frame, chunks[0], app);

    match app.current_screen {
        Screen::Dashboard => screens::dashboard::render(frame, chunks[1], app),
        Screen::Results => screens::results::render(frame, chunks[1], app),
        Screen::Statistics => screens::statistics::render(frame, chunks[1], app),
        Screen::Settings => screens::settings::render(frame, chunks[1], app),
    }

    render_status_bar(frame, chunks[2], app);

    if app.show_help {
        let area = centered_rect(60, 60, frame.size());
        frame.render_widget(Clear, area);
        components::help::render(frame, area, app);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hint = match app.input_mode {
        InputMode::Search => "Enter/Esc: Done",
        InputMode::Normal => "Tab: Next Screen | ?: Help",
    };

    let text = Line::from(vec![
        Span::styled(
            format!(" {} ", app.current_screen.title()),
            Style::default()
                .fg(Color::Black)
                .bg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.status_message.as_str(), Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled(hint, Style::default().fg(app.theme.warning)),
        Span::raw(" | "),
        Span::styled("q: Quit", Style::default().fg(app.theme.error)),
    ]);

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
