use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::{
    tui::{app::App, components},
    utils::format_secs,
};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    components::chart::render(frame, chunks[0], app);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(chunks[1]);

    render_timing(frame, side[0], app);
    render_ranking(frame, side[1], app);
}

fn render_timing(frame: &mut Frame, area: Rect, app: &App) {
    let batch = app.batch();
    let started = batch
        .started_at()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let throughput = batch
        .throughput()
        .map(|rate| format!("{:.2} numbers/s", rate))
        .unwrap_or_else(|| "-".to_string());

    let rows = [
        ("Started", started),
        ("Elapsed", format_secs(batch.elapsed_secs())),
        ("Throughput", throughput),
        ("Avg / number", format_secs(batch.avg_secs_per_number())),
        ("Banks seen", batch.aggregator().bank_distribution().len().to_string()),
    ];

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:14}", label), Style::default().fg(app.theme.warning)),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Timing")
            .border_style(Style::default().fg(app.theme.primary)),
    );
    frame.render_widget(paragraph, area);
}

fn render_ranking(frame: &mut Frame, area: Rect, app: &App) {
    let aggregator = app.batch().aggregator();
    let successful = app.batch().counters().successful.max(1) as f64;

    let header = Row::new(["#", "Bank", "Count", "Share"].map(|h| {
        Cell::from(h).style(Style::default().fg(app.theme.warning))
    }))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows = aggregator
        .ranked_banks()
        .into_iter()
        .enumerate()
        .map(|(i, (bank, count))| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(bank),
                Cell::from(count.to_string()),
                Cell::from(format!("{:.1}%", count as f64 / successful * 100.0)),
            ])
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Ranking")
            .border_style(Style::default().fg(app.theme.primary)),
    );

    frame.render_widget(table, area);
}
