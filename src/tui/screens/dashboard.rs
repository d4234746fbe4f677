use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::tui::{app::App, components};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Counters
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Activity + distribution
        ])
        .split(area);

    components::stats::render(frame, chunks[0], app);
    components::progress::render(frame, chunks[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    components::logs::render(frame, bottom[0], app);
    components::chart::render(frame, bottom[1], app);
}
