pub mod graph;
pub mod header;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::app::{App, Page};
use crate::ui::theme::Theme;

pub fn draw(frame: &mut Frame, app: &mut App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], app.report(), app.page, theme);

    let content_area = chunks[1];
    match (app.page, app.report().is_some()) {
        (_, false) => {
            let waiting = Paragraph::new("Collecting first sample\u{2026}")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.text_secondary));
            frame.render_widget(waiting, content_area);
        }
        (Page::Home, true) => {
            if let Some(report) = app.report() {
                graph::render(frame, content_area, report, theme);
            }
        }
        (Page::Tasks, true) => {
            let (rows, state) = app.table_view();
            table::render(frame, content_area, rows, state, theme);
        }
    }

    statusbar::render(
        frame,
        chunks[2],
        app.sort_mode,
        app.rows().len(),
        app.stale(),
        theme,
    );
}

#[cfg(test)]
mod tests;
