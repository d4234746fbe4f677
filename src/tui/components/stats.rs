use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let batch = app.batch();
    let counters = batch.counters();
    let theme = &app.theme;

    render_stat(frame, chunks[0], "Loaded", batch.len().to_string(), theme.primary);
    render_stat(
        frame,
        chunks[1],
        "Processed",
        counters.total_processed.to_string(),
        theme.info,
    );
    render_stat(
        frame,
        chunks[2],
        "Successful",
        counters.successful.to_string(),
        theme.success,
    );
    render_stat(frame, chunks[3], "Failed", counters.failed.to_string(), theme.error);
    render_stat(
        frame,
        chunks[4],
        "Success Rate",
        counters
            .success_rate()
            .map(|rate| format!("{:.1}%", rate))
            .unwrap_or_else(|| "-".to_string()),
        theme.warning,
    );
}

fn render_stat(frame: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
    let text = vec![
        Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
