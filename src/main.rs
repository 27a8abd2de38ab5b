//! Terminal word tetris runner (default binary).
//!
//! Polls crossterm for input, feeds real elapsed time to the fixed-step
//! driver and redraws through the framebuffer renderer. The round summary is
//! written as JSON once the terminal has been restored.

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;

use word_tetris::config::{AppConfig, ENV_DICT};
use word_tetris::core::{FixedStepDriver, Round, RoundSnapshot, RoundSummary};
use word_tetris::input::{handle_key_event, should_quit};
use word_tetris::loader::spawn_dictionary_load;
use word_tetris::logging::init_file_logger;
use word_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use word_tetris::types::POLL_INTERVAL_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if !config.dict_path.is_file() {
        bail!(
            "word list not found at {} (set {ENV_DICT})",
            config.dict_path.display()
        );
    }

    let runtime = Runtime::new().context("failed to start tokio runtime")?;
    if let Some(path) = &config.log_path {
        init_file_logger(runtime.handle(), path.clone(), config.log_level())?;
    }
    log::info!("starting with seed {}", config.engine.seed);

    let dictionary = spawn_dictionary_load(runtime.handle(), config.dict_path.clone());
    let mut round = Round::new(config.engine, dictionary);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut round);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    emit_summary(&config, &round.summary())?;
    runtime.shutdown_timeout(Duration::from_millis(200));
    Ok(())
}

fn run(term: &mut TerminalRenderer, round: &mut Round) -> Result<()> {
    let view = GameView::default();
    let mut driver = FixedStepDriver::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = RoundSnapshot::default();

    let poll_timeout = Duration::from_millis(POLL_INTERVAL_MS as u64);
    let mut last = Instant::now();

    loop {
        if event::poll(poll_timeout)? {
            // Drain everything already queued so a burst lands in one step.
            loop {
                match event::read()? {
                    Event::Key(key) => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = handle_key_event(key) {
                            driver.queue(action);
                        }
                    }
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        // Whole milliseconds only; the remainder stays on `last`.
        let elapsed_ms = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(elapsed_ms as u64);
        driver.advance(elapsed_ms, round);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        round.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

fn emit_summary(config: &AppConfig, summary: &RoundSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    match &config.summary_path {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write summary to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
