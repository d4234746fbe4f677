use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    resolve::Counters,
    tui::{
        app::{App, InputMode},
        components,
    },
};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[0]);

    render_search(frame, top[0], app);
    render_bank_filter(frame, top[1], app);

    let records = app.visible_results();
    let counters = Counters::tally(records.iter().copied());
    let summary = Paragraph::new(summary_line(&counters)).style(Style::default().fg(app.theme.info));
    frame.render_widget(summary, chunks[1]);

    components::results_table::render(frame, chunks[2], app, &records);
}

/// One-line tally of the filtered records.
fn summary_line(counters: &Counters) -> String {
    let rate = counters
        .success_rate()
        .map_or_else(|| "-".to_string(), |r| format!("{:.1}%", r));
    format!(
        " Total: {} | Successful: {} | Failed: {} | Success Rate: {}",
        counters.total_processed, counters.successful, counters.failed, rate
    )
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Search;
    // borders plus one cell for the cursor
    let width = area.width.max(3) - 3;
    let scroll = app.search.visual_scroll(width as usize);

    let border = if editing { app.theme.warning } else { app.theme.primary };
    let input = Paragraph::new(app.search.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search (/)")
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor(
            area.x + (app.search.visual_cursor().max(scroll) - scroll) as u16 + 1,
            area.y + 1,
        );
    }
}

fn render_bank_filter(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.bank_filter {
        Some(bank) => Span::styled(bank.as_str(), Style::default().fg(app.theme.success)),
        None => Span::styled("All banks", Style::default().fg(app.theme.muted)),
    };

    let paragraph = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Bank (b)")
            .border_style(Style::default().fg(app.theme.primary)),
    );
    frame.render_widget(paragraph, area);
}
