use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::tui::app::App;

const KEYBINDINGS: [(&str, &str); 14] = [
    ("Tab / Shift+Tab", "Next / Previous screen"),
    ("↑ / ↓", "Navigate results"),
    ("s", "Start or resume"),
    ("p", "Pause"),
    ("x", "Stop (keeps position)"),
    ("R", "Reset everything"),
    ("l", "Reload numbers file"),
    ("e", "Export CSV, JSON, xlsx, bank files and report"),
    ("/", "Search results"),
    ("b", "Cycle bank filter"),
    ("h / ?", "Toggle help"),
    ("Esc", "Close help / Leave search"),
    ("q", "Quit"),
    ("Ctrl+C", "Quit"),
];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = KEYBINDINGS
        .iter()
        .map(|(key, desc)| {
            let content = vec![
                Span::styled(
                    format!("{:15}", key),
                    Style::default()
                        .fg(app.theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" - "),
                Span::styled(*desc, Style::default().fg(Color::White)),
            ];
            ListItem::new(Line::from(content))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Keybindings")
            .border_style(Style::default().fg(app.theme.primary)),
    );

    frame.render_widget(list, area);
}
