use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

use crate::system::history::SeriesPoint;
use crate::system::snapshot::TickReport;
use crate::ui::theme::Theme;

/// Home page: rolling CPU and memory graphs, one above the other.
pub fn render(frame: &mut Frame, area: Rect, report: &TickReport, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_series(
        frame,
        chunks[0],
        &format!(" CPU Usage ({:.1}%) ", report.system.cpu_percent),
        &report.cpu_series,
        theme.cpu_line,
        theme,
    );
    render_series(
        frame,
        chunks[1],
        &format!(" RAM Usage ({:.1}%) ", report.system.memory_percent),
        &report.mem_series,
        theme.mem_line,
        theme,
    );
}

/// X bounds spanning the series; never zero-width.
pub fn x_bounds(series: &[SeriesPoint]) -> [f64; 2] {
    match (series.first(), series.last()) {
        (Some(&(first, _)), Some(&(last, _))) => {
            let first = first as f64;
            [first, (last as f64).max(first + 1.0)]
        }
        _ => [0.0, 1.0],
    }
}

fn render_series(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[SeriesPoint],
    color: Color,
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = series.iter().map(|&(i, v)| (i as f64, v)).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .style(Style::default().bg(theme.background))
        .x_axis(Axis::default().bounds(x_bounds(series)))
        .y_axis(
            Axis::default()
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"])
                .style(Style::default().fg(theme.text_secondary)),
        );

    frame.render_widget(chart, area);
}
