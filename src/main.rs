//! Blockfall terminal runner (default binary).
//!
//! Drives a [`GameSession`] from crossterm key events and a fixed-rate tick,
//! and draws it with the framebuffer renderer.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{
    GameConfig, GameSession, GameSnapshot, HighScoreEntry, Leaderboard, SessionEvent,
};
use blockfall::input::{map_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;
use blockfall::{load_config, HighScoreStore};

#[derive(Debug, Parser)]
#[command(name = "blockfall", about = "Falling-block puzzle game for the terminal")]
struct Cli {
    #[arg(long, default_value = "player", help = "Player name shown in the panel and leaderboard")]
    name: String,

    #[arg(long, help = "Seed for piece selection (defaults to the current time)")]
    seed: Option<u32>,

    #[arg(long, help = "Path to a JSON game config")]
    config: Option<PathBuf>,

    #[arg(long, default_value = "blockfall-scores.json", help = "Leaderboard file")]
    scores: PathBuf,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = WARN, -vv = INFO, -vvv = DEBUG, -vvvv = TRACE)")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(seed, rows = config.rows, cols = config.cols, "starting");

    let store = HighScoreStore::new(&cli.scores);
    let scores = store.load()?;
    info!(
        path = %store.path().display(),
        entries = scores.entries().len(),
        "leaderboard loaded"
    );

    let mut session = GameSession::new(config, seed);
    session.set_player_name(cli.name.clone());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &store, scores);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    // The renderer owns the terminal; without a file there is nowhere to log.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;

    let level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    info!("logging initialized at level {}", level);
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut GameSession,
    store: &HighScoreStore,
    mut scores: Leaderboard,
) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_size = (0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            term.invalidate();
            last_size = (w, h);
        }
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Some(&scores), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(intent) = map_key(key, session.state()) {
                        session.apply_intent(intent);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time so slow frames don't slow the game.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        for event in session.take_events() {
            if let SessionEvent::GameOver {
                player, elapsed_ms, ..
            } = event
            {
                let entry = HighScoreEntry::new(player, elapsed_ms / 1000);
                match store.record(&mut scores, entry) {
                    Ok(Some(rank)) => info!(rank, "new leaderboard entry"),
                    Ok(None) => {}
                    Err(e) => warn!("failed to save leaderboard: {e:#}"),
                }
            }
        }
    }
}
