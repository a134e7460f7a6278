use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, ExecutableCommand};
use flappy::assets::{AssetProvider, DirAssetProvider, HttpAssetProvider, Images, Sounds};
use flappy::core::constants::{ASSET_FETCH_TIMEOUT_SECONDS, LOG_FILE};
use flappy::core::{AppConfig, Game, GameLoop, Pacer, SystemPacer};
use flappy::input::TerminalInput;
use flappy::telemetry::{
    start_metrics_server, Gauges, HttpLatencyProbe, ProcNetDev, TelemetryError, TelemetryRuntime,
    TelemetrySampler,
};
use flappy::ui::TerminalRenderer;
use flappy::utils::persistence::open_append;
use flappy::utils::{version_line, HttpScoreSink, LogScoreSink, ScoreSink};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

fn main() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Flappy - terminal side-scroller with Prometheus telemetry\n");
                println!("Usage: flappy [--version | --help]\n");
                println!("Controls: Space/Up/left click to flap, Esc or Ctrl+C to quit.\n");
                println!("Metrics are served at http://0.0.0.0:8000/metrics.\n");
                println!("Settings are read from ~/.flappy/config.json and these variables:");
                println!("  FLAPPY_FPS            Frame rate (default 30)");
                println!("  FLAPPY_METRICS_PORT   Metrics port (default 8000)");
                println!("  FLAPPY_PROBE_URL      Latency probe target");
                println!("  FLAPPY_SCORE_URL      Score submission endpoint");
                println!("  FLAPPY_ASSET_URL      Asset store base URL");
                println!("  FLAPPY_ASSET_DIR      Local asset directory");
                println!("\nLogs go to ~/.flappy/flappy.log (RUST_LOG sets the filter).");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'flappy --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_tracing();
    let config = AppConfig::load();
    info!(version = %version_line(), ?config, "flappy_starting");

    let runtime = TelemetryRuntime::start()?;
    let gauges = Gauges::new();
    match start_metrics_server(&runtime.handle(), config.metrics_port, gauges.clone()) {
        Ok(addr) => info!(%addr, "metrics_endpoint_ready"),
        Err(error) => warn!(%error, "metrics_endpoint_unavailable"),
    }

    let mut rng = StdRng::from_entropy();
    let provider = asset_provider(&config);
    let images = Images::load(provider.as_ref(), &mut rng);
    let sounds = Sounds::load(provider.as_ref());

    let sink: Arc<dyn ScoreSink> = match &config.score_url {
        Some(url) => Arc::new(HttpScoreSink::new(url.clone(), runtime.handle())),
        None => Arc::new(LogScoreSink),
    };

    let pacer = SystemPacer;
    let start = pacer.now();
    let probe = HttpLatencyProbe::new(config.probe_url.clone(), config.probe_timeout());
    let sampler = TelemetrySampler::new(
        gauges,
        runtime.handle(),
        Arc::new(probe),
        Box::new(ProcNetDev::default()),
        start,
    )
    .with_intervals(config.latency_interval(), config.bandwidth_interval(), start);

    let game = Game::new(
        config.game_config(),
        images,
        sink,
        StdRng::seed_from_u64(rng.gen()),
    );

    let terminal = setup_terminal()?;
    let renderer = TerminalRenderer::new(terminal).with_bell(io::stdout());
    let mut game_loop = GameLoop::new(game, TerminalInput, renderer, pacer, sampler, sounds);
    let frames = game_loop.run();

    let restored = restore_terminal();
    runtime.shutdown();
    restored?;
    info!(frames, "flappy_exiting");
    std::process::exit(0)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_ansi(false)
        .compact();
    // The terminal is in raw mode, so logs go to a file
    match open_append(LOG_FILE) {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(_) => builder.with_writer(io::sink).init(),
    }
}

fn asset_provider(config: &AppConfig) -> Box<dyn AssetProvider> {
    match &config.asset_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "assets_from_directory");
            Box::new(DirAssetProvider::new(dir))
        }
        None => {
            info!(url = %config.asset_base_url, "assets_from_url");
            Box::new(HttpAssetProvider::new(
                &config.asset_base_url,
                Duration::from_secs(ASSET_FETCH_TIMEOUT_SECONDS),
            ))
        }
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(cursor::Show)?;
    Ok(())
}
