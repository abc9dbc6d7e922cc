use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use human_panic::setup_panic;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use neonbox::app::cli::Args;
use neonbox::app::config::AppConfig;
use neonbox::app::events::AppEvent;
use neonbox::app::{input_handler, App};
use neonbox::assets::{AssetRoot, Platform};
use neonbox::audio::{FftSpectrum, SampleBuffer};
use neonbox::player::{self, Clip, PlaybackController, Playlist};
use neonbox::{logging, ui};

/// Longest frame step fed to the animations, so a stalled terminal
/// doesn't make everything jump.
const MAX_FRAME_STEP: f32 = 0.25;

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic!();

    let args = Args::parse();

    if args.generate_config {
        println!("{}", AppConfig::generate()?);
        return Ok(());
    }

    let _log_guard = match logging::init(&AppConfig::get_config_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let mut config = AppConfig::load(args.config.as_deref());
    AppConfig::apply_args(&mut config, &args);
    info!(music = %config.music_directory, "starting");

    let playlist = match Playlist::scan(Path::new(&config.music_directory)) {
        Ok(playlist) => playlist,
        Err(e) => {
            warn!(error = %e, "no playlist");
            Playlist::new(Vec::new())
        }
    };
    info!(tracks = playlist.len(), "playlist ready");

    // Audio: one voice for the playlist (tapped for the visualizer) and
    // one for the intro clip
    let tap = SampleBuffer::new();
    let (device, output) = player::open_output(Some(tap.clone()));
    let controller = PlaybackController::new(playlist, output);
    let mut app = App::new(&config, controller, Box::new(FftSpectrum::new(tap)));

    if let (Some(device), Some(name)) = (&device, &config.intro.clip) {
        if app.in_intro() {
            let assets = AssetRoot::new(
                config
                    .assets_directory
                    .as_ref()
                    .map(PathBuf::from)
                    .unwrap_or_else(AssetRoot::default_dir),
                Platform::current(),
            );
            info!(url = %assets.url(name), "intro clip");
            match Clip::from_path(&assets.resolve(name)) {
                Ok(clip) => app.attach_intro_voice(Box::new(device.output(None)), &clip),
                Err(e) => warn!(error = %e, "intro clip unavailable"),
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("bye");
    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Animation Tick Task ⚡
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        // 60 FPS Update Rate (approx 16ms)
        let mut interval = tokio::time::interval(Duration::from_millis(16));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Some(event) = rx.recv().await {
            match event {
                AppEvent::Input(event) => input_handler::handle_event(app, event),
                AppEvent::Tick => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_tick).as_secs_f32().min(MAX_FRAME_STEP);
                    last_tick = now;
                    app.on_tick(dt);
                }
            }
        }

        if !app.is_running {
            break;
        }
    }

    Ok(())
}
