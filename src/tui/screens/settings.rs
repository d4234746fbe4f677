use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::{tui::app::App, utils::truncate};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let config = &app.config;
    let value_width = area.width.saturating_sub(26) as usize;

    let settings = vec![
        ("Lookup URL", config.lookup.url_template.clone()),
        ("Timeout", format!("{}s", config.lookup.timeout_secs)),
        ("Handles", config.lookup.handles.join(" ")),
        ("Delay Between Numbers", format!("{}ms", config.batch.delay_ms)),
        ("Output Directory", config.export.output_dir.display().to_string()),
        (
            "Input File",
            app.input_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];

    let items: Vec<ListItem> = settings
        .iter()
        .map(|(key, value)| {
            let content = vec![
                Span::styled(format!("{:22}", key), Style::default().fg(app.theme.warning)),
                Span::raw(": "),
                Span::styled(truncate(value, value_width), Style::default().fg(Color::White)),
            ];
            ListItem::new(Line::from(content))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Configuration")
            .border_style(Style::default().fg(app.theme.primary)),
    );

    frame.render_widget(list, area);
}
