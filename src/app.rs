use std::cmp::Ordering;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

use crate::action::{Action, Direction};
use crate::config::Config;
use crate::system::process::AggregatedRow;
use crate::system::snapshot::{TickError, TickEvent, TickReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Tasks,
}

impl Page {
    pub fn toggle(self) -> Self {
        match self {
            Page::Home => Page::Tasks,
            Page::Tasks => Page::Home,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Tasks => "Tasks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Memory,
    Name,
    Count,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Cpu => SortMode::Memory,
            SortMode::Memory => SortMode::Name,
            SortMode::Name => SortMode::Count,
            SortMode::Count => SortMode::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Cpu => "CPU",
            SortMode::Memory => "Memory",
            SortMode::Name => "Name",
            SortMode::Count => "Count",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => SortMode::Memory,
            "name" => SortMode::Name,
            "count" => SortMode::Count,
            _ => SortMode::Cpu,
        }
    }

    fn compare(self, a: &AggregatedRow, b: &AggregatedRow) -> Ordering {
        let primary = match self {
            SortMode::Cpu => b.cpu_percent.total_cmp(&a.cpu_percent),
            SortMode::Memory => b.memory_percent.total_cmp(&a.memory_percent),
            SortMode::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortMode::Count => b.member_count.cmp(&a.member_count),
        };
        primary.then_with(|| a.name.cmp(&b.name))
    }
}

/// Presentation state. Holds its own sorted copy of the last good tick and
/// never touches the engine.
pub struct App {
    pub running: bool,
    pub page: Page,
    pub sort_mode: SortMode,
    pub table_state: TableState,
    pub max_rows: usize,
    latest: Option<Arc<TickEvent>>,
    stale: Option<TickError>,
    rows: Vec<AggregatedRow>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            running: true,
            page: Page::default(),
            sort_mode: SortMode::from_str_config(&config.display.default_sort),
            table_state: TableState::default(),
            max_rows: config.display.max_rows,
            latest: None,
            stale: None,
            rows: Vec::new(),
        }
    }

    /// Take in a published event. Error ticks keep the last good data on
    /// screen and only mark it stale.
    pub fn apply(&mut self, event: Arc<TickEvent>) {
        match &*event {
            TickEvent::Sample(report) => {
                self.rows = report.rows.clone();
                self.stale = None;
                self.latest = Some(event);
                self.sort_rows();
            }
            TickEvent::Error(err) => {
                self.stale = Some(err.clone());
            }
        }
    }

    pub fn report(&self) -> Option<&TickReport> {
        match self.latest.as_deref() {
            Some(TickEvent::Sample(report)) => Some(report),
            _ => None,
        }
    }

    pub fn stale(&self) -> Option<&TickError> {
        self.stale.as_ref()
    }

    /// Rows in display order, capped at `max_rows` when set.
    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows[..self.visible_len()]
    }

    /// Visible rows together with the selection state, for rendering.
    pub fn table_view(&mut self) -> (&[AggregatedRow], &mut TableState) {
        let end = self.visible_len();
        (&self.rows[..end], &mut self.table_state)
    }

    fn visible_len(&self) -> usize {
        if self.max_rows > 0 {
            self.rows.len().min(self.max_rows)
        } else {
            self.rows.len()
        }
    }

    fn sort_rows(&mut self) {
        let mode = self.sort_mode;
        self.rows.sort_by(|a, b| mode.compare(a, b));
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('s') => Action::CycleSortMode,
            KeyCode::Tab => Action::TogglePage,
            KeyCode::Up | KeyCode::Char('k') => Action::Navigate(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => Action::Navigate(Direction::Down),
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::CycleSortMode => {
                self.sort_mode = self.sort_mode.next();
                self.sort_rows();
            }
            Action::TogglePage => self.page = self.page.toggle(),
            Action::Navigate(direction) => self.navigate(direction),
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = match direction {
            Direction::Up => current.saturating_sub(1),
            Direction::Down => (current + 1).min(len - 1),
        };
        self.table_state.select(Some(next));
    }
}
