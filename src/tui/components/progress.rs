use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::{resolve::BatchStatus, tui::app::App};

/// Progress gauge labelled with the cursor and the number up next.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let batch = app.batch();

    let next = match (batch.status(), batch.current_number()) {
        (BatchStatus::Completed, _) => "done".to_string(),
        (_, Some(number)) => format!("next {}", number),
        (_, None) => "nothing loaded".to_string(),
    };
    let label = format!(
        "{}/{} ({:.0}%) | {}",
        batch.current_index(),
        batch.len(),
        batch.progress() * 100.0,
        next
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Progress")
                .border_style(Style::default().fg(app.theme.primary)),
        )
        .gauge_style(
            Style::default()
                .fg(app.theme.success)
                .add_modifier(Modifier::BOLD),
        )
        .ratio(batch.progress().clamp(0.0, 1.0))
        .label(label);

    frame.render_widget(gauge, area);
}
