use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::{
    resolve::{RecordStatus, ResolutionRecord},
    tui::app::App,
    utils::truncate,
};

const HEADERS: [&str; 7] = ["Mobile", "Name", "Bank", "VPA", "IFSC", "Handle", "Status"];

pub fn render(frame: &mut Frame, area: Rect, app: &App, records: &[&ResolutionRecord]) {
    let header_cells = HEADERS
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(app.theme.warning)));

    let header = Row::new(header_cells)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1)
        .bottom_margin(1);

    let rows = records.iter().map(|record| {
        let status_color = match record.status {
            RecordStatus::Success => app.theme.success,
            RecordStatus::Failed => app.theme.error,
        };

        let cells = vec![
            Cell::from(record.mobile.to_string()),
            Cell::from(truncate(&record.name, 24)),
            Cell::from(truncate(&record.bank, 24)),
            Cell::from(truncate(&record.vpa, 24)),
            Cell::from(record.ifsc.clone()),
            Cell::from(record.upi_handle.clone().unwrap_or_default()),
            Cell::from(record.status.to_string()).style(Style::default().fg(status_color)),
        ];

        Row::new(cells).height(1)
    });

    let title = format!("Results ({}/{})", records.len(), app.batch().results().len());

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(app.theme.primary)),
    )
    .highlight_style(
        Style::default()
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ");

    let mut state = TableState::default();
    if !records.is_empty() {
        state.select(Some(app.selected_index.min(records.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
