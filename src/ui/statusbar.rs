use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::SortMode;
use crate::system::snapshot::TickError;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    sort_mode: SortMode,
    row_count: usize,
    stale: Option<&TickError>,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = Vec::new();
    if let Some(err) = stale {
        spans.push(Span::styled(
            format!(" STALE (tick {}): {} ", err.tick_index, err.reason),
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        format!(" Sort: {}  Rows: {} ", sort_mode.label(), row_count),
        Style::default().fg(theme.text_secondary),
    ));
    spans.extend(pill_spans("q", "Quit", theme));
    spans.extend(pill_spans("Tab", "Page", theme));
    spans.extend(pill_spans("s", "Sort", theme));
    spans.extend(pill_spans("\u{2191}\u{2193}", "Nav", theme));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {desc}"), Style::default().fg(theme.pill_desc_fg)),
    ]
}
