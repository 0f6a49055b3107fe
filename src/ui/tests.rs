use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::system::process::AggregatedRow;
use crate::system::snapshot::{SystemSample, TickError, TickEvent, TickReport};
use crate::ui::graph::x_bounds;
use crate::ui::theme::Theme;

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_app(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = Theme::default();
    terminal
        .draw(|frame| crate::ui::draw(frame, app, &theme))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn make_row(name: &str, pid: u32, cpu: f64, mem: f64, status: &str, count: usize) -> AggregatedRow {
    AggregatedRow {
        name: name.to_string(),
        representative_pid: pid,
        cpu_percent: cpu,
        memory_percent: mem,
        status: status.to_string(),
        member_count: count,
    }
}

fn make_event() -> Arc<TickEvent> {
    Arc::new(TickEvent::Sample(TickReport {
        tick_index: 7,
        rows: vec![
            make_row("SYSTEM", 1, 0.5, 0.1, "running", 1),
            make_row("chrome", 2000, 25.0, 11.0, "sleeping", 2),
        ],
        system: SystemSample {
            cpu_percent: 12.5,
            memory_percent: 41.0,
            tick_index: 7,
        },
        cpu_series: (0..=7).map(|i| (i, i as f64 * 10.0)).collect(),
        mem_series: (0..=7).map(|i| (i, 41.0)).collect(),
    }))
}

#[test]
fn waiting_screen_before_first_tick() {
    let mut app = App::new(&Config::default());
    let out = render_app(&mut app, 100, 20);
    assert!(out.contains("taskmancer"));
    assert!(out.contains("Collecting first sample"));
}

#[test]
fn home_page_shows_host_readings() {
    let mut app = App::new(&Config::default());
    app.apply(make_event());
    let out = render_app(&mut app, 120, 30);
    assert!(out.contains("CPU Usage: 12.5%"));
    assert!(out.contains("Memory Usage: 41.0%"));
    assert!(out.contains("Tick #7"));
    assert!(out.contains("RAM Usage (41.0%)"));
}

#[test]
fn tasks_page_shows_aggregated_rows() {
    let mut app = App::new(&Config::default());
    app.apply(make_event());
    app.dispatch(Action::TogglePage);
    let out = render_app(&mut app, 120, 20);
    assert!(out.contains("Name"));
    assert!(out.contains("chrome (2)"));
    assert!(out.contains("25.00%"));
    assert!(out.contains("11.00%"));
    assert!(out.contains("sleeping"));
    assert!(out.contains("SYSTEM (1)"));

    // CPU sort puts chrome first.
    let chrome_at = out.find("chrome (2)").unwrap();
    let system_at = out.find("SYSTEM (1)").unwrap();
    assert!(chrome_at < system_at);
}

#[test]
fn stale_marker_after_error_tick() {
    let mut app = App::new(&Config::default());
    app.apply(make_event());
    app.apply(Arc::new(TickEvent::Error(TickError {
        tick_index: 8,
        reason: "provider down".to_string(),
    })));
    app.dispatch(Action::TogglePage);
    let out = render_app(&mut app, 140, 20);
    assert!(out.contains("STALE"));
    assert!(out.contains("provider down"));
    // Last known rows stay visible.
    assert!(out.contains("chrome (2)"));
}

#[test]
fn x_bounds_never_collapse() {
    assert_eq!(x_bounds(&[]), [0.0, 1.0]);
    assert_eq!(x_bounds(&[(5, 1.0)]), [5.0, 6.0]);
    assert_eq!(x_bounds(&[(3, 1.0), (9, 2.0)]), [3.0, 9.0]);
}
