mod app;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quiz_practice::error::Result;
use quiz_practice::store::{JsonFileResultStore, MemoryResultStore, ResultStore};
use quiz_practice::types::{DifficultyFilter, Mode, UnitFilter};
use quiz_practice::{Catalog, EngineConfig, SessionEngine, SessionTick, TokioClock};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "quiz-practice", version, about = "Multiple-choice practice tests in the terminal")]
struct Cli {
    /// Initial mode: practice or timed (any prefix works)
    #[arg(long, default_value = "practice", value_parser = parse_mode)]
    mode: Mode,

    /// Initial unit filter, e.g. "Unit I", or "all"
    #[arg(long, default_value = "all", value_parser = parse_unit)]
    unit: UnitFilter,

    /// Initial difficulty filter: easy, medium, hard or all
    #[arg(long, default_value = "all", value_parser = parse_difficulty)]
    difficulty: DifficultyFilter,

    /// JSON question catalog; the bundled course questions are used if omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Where finished test results are kept
    #[arg(long, default_value = "quiz_results.json")]
    results: PathBuf,

    /// Fixed seed for question shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn parse_mode(arg: &str) -> std::result::Result<Mode, String> {
    arg.parse::<Mode>().map_err(|e| e.to_string())
}

fn parse_unit(arg: &str) -> std::result::Result<UnitFilter, String> {
    arg.parse::<UnitFilter>().map_err(|e| e.to_string())
}

fn parse_difficulty(arg: &str) -> std::result::Result<DifficultyFilter, String> {
    arg.parse::<DifficultyFilter>().map_err(|e| e.to_string())
}

fn setup_logging(log_dir: &Path) -> Result<()> {
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "quiz_practice.log");

    // RUST_LOG wins; otherwise debug builds log debug and release builds info
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .init();

    info!("Logging system initialized");
    debug!("Debug logging {}", if cfg!(debug_assertions) { "enabled" } else { "disabled" });

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path),
        None => Ok(Catalog::builtin()),
    }
}

fn open_store(path: &Path) -> Box<dyn ResultStore> {
    match JsonFileResultStore::open(path) {
        Ok(store) => {
            info!(path = %store.path().display(), "Using result history file");
            Box::new(store)
        }
        Err(e) => {
            warn!("Failed to load result history, keeping results in memory: {}", e);
            Box::new(MemoryResultStore::new())
        }
    }
}

/// Forwards key presses from the blocking crossterm reader to the event loop.
fn spawn_key_reader(tx: UnboundedSender<KeyEvent>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read terminal event: {}", e);
                break;
            }
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_dir)?;
    info!("Starting quiz practice application");
    info!(
        mode = ?cli.mode,
        unit = %cli.unit,
        difficulty = %cli.difficulty,
        "Initial test configuration from arguments"
    );

    let catalog = Arc::new(load_catalog(cli.catalog.as_deref())?);
    info!(questions = catalog.len(), units = ?catalog.units(), "Catalog ready");

    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<SessionTick>();
    let mut engine = SessionEngine::new(
        catalog,
        open_store(&cli.results),
        Box::new(TokioClock::new(tick_tx)),
        EngineConfig::default(),
    );
    if let Some(seed) = cli.seed {
        debug!(seed, "Using fixed shuffle seed");
        engine = engine.with_seed(seed);
    }

    let mut app = App::new(engine, cli.mode, cli.unit, cli.difficulty);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    spawn_key_reader(key_tx);

    let res = run_app(&mut terminal, &mut app, &mut key_rx, &mut tick_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {}", err);
        println!("Error: {}", err);
    }

    info!("Application terminated");
    Ok(())
}

/// Single-threaded event loop: each key press or tick is applied in full
/// before the next one is taken.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keys: &mut UnboundedReceiver<KeyEvent>,
    ticks: &mut UnboundedReceiver<SessionTick>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        tokio::select! {
            Some(key) = keys.recv() => app.handle_key(key.code)?,
            Some(tick) = ticks.recv() => app.handle_tick(tick)?,
            else => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
