use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::{resolve::LogLevel, tui::app::App};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = app
        .batch()
        .aggregator()
        .activity()
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let icon = match entry.level {
                LogLevel::Info => "ℹ",
                LogLevel::Success => "✓",
                LogLevel::Warning => "⚠",
                LogLevel::Error => "✗",
            };
            let color = app.log_level_color(entry.level);

            let content = vec![
                Span::styled(format!("{} ", icon), Style::default().fg(color)),
                Span::styled(
                    entry.timestamp.format("[%H:%M:%S]").to_string(),
                    Style::default().fg(app.theme.muted),
                ),
                Span::raw(" "),
                Span::styled(entry.message.as_str(), Style::default().fg(color)),
            ];

            ListItem::new(Line::from(content))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Activity")
            .border_style(Style::default().fg(app.theme.primary)),
    );

    frame.render_widget(list, area);
}
