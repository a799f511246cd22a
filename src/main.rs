//! Terminal runner (default binary).
//!
//! Polls crossterm for keys until the next frame is due, applies each action
//! immediately, then runs one controller tick into the framebuffer canvas.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::prelude::*;

use blockfall::core::{GameController, SimpleRng, SystemClock};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::settings::RunSettings;
use blockfall::term::{FrameCanvas, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let settings = RunSettings::from_env()?;
    init_logging(&settings)?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seed = settings.seed_or(nanos);
    info!(seed, "starting session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only; the terminal is the game screen.
fn init_logging(settings: &RunSettings) -> Result<()> {
    let Some(path) = &settings.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            settings.log_level,
        ))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut game = GameController::new(SystemClock::new(), SimpleRng::new(seed));

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut canvas = FrameCanvas::new(Viewport::new(w, h));

    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        // Input with timeout until next frame.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = game.score(), lines = game.lines(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action, &mut canvas);
                    }
                }
                Event::Resize(w, h) => {
                    canvas.resize(Viewport::new(w, h));
                    term.invalidate();
                }
                _ => {}
            }
        }

        if last_tick.elapsed() < tick_duration {
            continue;
        }
        last_tick = Instant::now();

        game.tick(&mut canvas);
        canvas.finish_frame();

        term.draw_swap(canvas.framebuffer_mut())?;
    }
}
