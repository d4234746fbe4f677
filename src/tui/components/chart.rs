use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

use crate::{tui::app::App, utils::truncate};

const BAR_WIDTH: u16 = 9;

/// Bar per bank, most successful first.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled(
            "Bank Distribution",
            Style::default().fg(app.theme.primary),
        ))
        .borders(Borders::ALL);

    let ranked = app.batch().aggregator().ranked_banks();
    if ranked.is_empty() {
        let empty = Paragraph::new("No successful resolutions yet")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let fits = (area.width.saturating_sub(2) / (BAR_WIDTH + 1)).max(1) as usize;
    let labels: Vec<String> = ranked
        .iter()
        .take(fits)
        .map(|(bank, _)| truncate(bank, BAR_WIDTH as usize))
        .collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(&ranked)
        .map(|(label, (_, count))| (label.as_str(), *count as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(bars.as_slice())
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .bar_style(Style::default().fg(app.theme.primary))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(app.theme.warning));

    frame.render_widget(chart, area);
}
