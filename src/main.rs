use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::KeyEventKind;
use taskmancer::app::App;
use taskmancer::config::{Config, load_config, load_config_from_path};
use taskmancer::engine::Engine;
use taskmancer::engine::scheduler::{SampleScheduler, TickReceiver};
use taskmancer::engine::ticker::IntervalTicker;
use taskmancer::event::{Event, EventHandler};
use taskmancer::logging::{self, LogSink};
use taskmancer::system::collector::{HostCollector, ProcessCollector};
use taskmancer::ui;
use taskmancer::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "taskmancer",
    about = "Live process and host resource monitor"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Number of points kept in the CPU and memory history
    #[arg(long)]
    history: Option<usize>,

    /// Stream every tick as a JSON line on stdout instead of starting the UI.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Exit after this many published events (JSON mode).
    #[arg(long)]
    ticks: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    let sink = if cli.json {
        LogSink::FileOrStderr
    } else {
        LogSink::FileOnly
    };
    logging::init(&config.logging, sink)?;

    let host = HostCollector::new();
    let warmup = host.warmup();
    let engine = Engine::new(
        ProcessCollector::new(),
        host,
        config.sampling.history_capacity,
    )
    .wrap_err("cannot start sampling engine")?;

    let mut scheduler = SampleScheduler::new(engine);
    let ticks = scheduler.subscribe();
    // Tick 0 waits until the primed CPU counters give a usable delta.
    let ticker = IntervalTicker::new(Duration::from_millis(config.sampling.interval_ms))
        .first_tick_after(warmup);
    scheduler.start_with(ticker)?;

    let result = if cli.json {
        run_json(ticks, cli.ticks).await
    } else {
        run_tui(ticks, &config).await
    };

    scheduler.stop().await?;
    result
}

async fn run_tui(ticks: TickReceiver, config: &Config) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, ticks, config).await;
    ratatui::restore();
    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    ticks: TickReceiver,
    config: &Config,
) -> Result<()> {
    let theme = Theme::default();
    let mut app = App::new(config);
    let mut events = EventHandler::new(ticks);

    terminal.draw(|frame| ui::draw(frame, &mut app, &theme))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = app.map_key(key);
                app.dispatch(action);
            }
            Event::Tick(tick) => app.apply(tick),
            Event::Resize => {}
        }
        terminal.draw(|frame| ui::draw(frame, &mut app, &theme))?;
    }

    Ok(())
}

async fn run_json(mut ticks: TickReceiver, limit: Option<u64>) -> Result<()> {
    let mut published = 0u64;
    while limit.is_none_or(|limit| published < limit) {
        if ticks.changed().await.is_err() {
            break;
        }
        let latest = ticks.borrow_and_update().clone();
        let Some(event) = latest else {
            continue;
        };
        let line = serde_json::to_string(&*event)?;
        writeln!(std::io::stdout(), "{line}")?;
        published += 1;
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(interval) = cli.interval_ms {
        config.sampling.interval_ms = interval;
    }
    if let Some(capacity) = cli.history {
        config.sampling.history_capacity = capacity;
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    config
}
