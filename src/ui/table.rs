use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use crate::format::{format_percent, row_label, truncate_unicode};
use crate::system::process::AggregatedRow;
use crate::ui::theme::Theme;

const HEADERS: [&str; 5] = ["Name", "PID", "CPU", "Memory", "Status"];
const NAME_WIDTH: u16 = 32;

/// Tasks page: one line per aggregated row, in the order given.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[AggregatedRow],
    state: &mut TableState,
    theme: &Theme,
) {
    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(truncate_unicode(&row_label(row), NAME_WIDTH as usize)),
            Cell::from(row.representative_pid.to_string()),
            Cell::from(format_percent(row.cpu_percent)),
            Cell::from(format_percent(row.memory_percent)),
            Cell::from(row.status.clone()),
        ])
        .style(Style::default().fg(theme.text_primary))
    });

    let widths = [
        Constraint::Length(NAME_WIDTH),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(8),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border)),
        )
        .row_highlight_style(
            Style::default()
                .bg(theme.row_highlight_bg)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, state);
}
