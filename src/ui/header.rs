use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::app::Page;
use crate::system::snapshot::TickReport;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    report: Option<&TickReport>,
    page: Page,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled(
            " taskmancer ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            page.label(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    match report {
        Some(report) => spans.extend([
            Span::raw("  "),
            Span::styled(
                format!("CPU Usage: {:.1}%", report.system.cpu_percent),
                Style::default().fg(theme.text_primary),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Memory Usage: {:.1}%", report.system.memory_percent),
                Style::default().fg(theme.text_primary),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Tick #{}", report.tick_index),
                Style::default().fg(theme.text_secondary),
            ),
        ]),
        None => spans.extend([
            Span::raw("  "),
            Span::styled(
                "Waiting for first sample\u{2026}",
                Style::default().fg(theme.text_secondary),
            ),
        ]),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
