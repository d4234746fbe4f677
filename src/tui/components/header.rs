use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{resolve::BatchStatus, tui::app::App};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status = app.batch().status();
    let status_color = match status {
        BatchStatus::Idle => Color::Gray,
        BatchStatus::Running => app.theme.success,
        BatchStatus::Paused => app.theme.warning,
        BatchStatus::Completed => app.theme.primary,
    };

    let source = app
        .input_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "no file".to_string());

    let title = vec![
        Span::styled("₹ ", Style::default().fg(app.theme.warning)),
        Span::styled(
            "UPI Resolver",
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            status.to_string().to_uppercase(),
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(source, Style::default().fg(Color::Gray)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.primary));

    let paragraph = Paragraph::new(Line::from(title))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
