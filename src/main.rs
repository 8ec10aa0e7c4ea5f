//! Terminal platformer runner (default binary).
//!
//! Runs every level in order on a single-threaded tokio runtime, drawing
//! through the framebuffer renderer. `q`, `Esc` or `Ctrl-C` quits.

use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};

use tui_platformer::core::{Level, State};
use tui_platformer::engine::{LevelRunner, SystemClock};
use tui_platformer::term::{SpriteSheet, TerminalRenderer};
use tui_platformer::{logging, Config, IntervalFrames, QuitRequested, TerminalInput, TerminalScreen};

fn main() -> Result<()> {
    let config = Config::from_env();
    if let Some(path) = &config.log_path {
        logging::init_file_logging(path)?;
    }

    let levels = config.load_levels()?;
    let sheet = Rc::new(SpriteSheet::builtin().context("load sprite atlases")?);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build runtime")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = runtime.block_on(run(&mut term, &config, &levels, sheet));

    // Always try to restore terminal state.
    let _ = term.exit();

    match result {
        Ok(()) => {
            println!("You won!");
            Ok(())
        }
        Err(err) if err.downcast_ref::<QuitRequested>().is_some() => {
            log::info!("quit by player");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

async fn run(
    term: &mut TerminalRenderer,
    config: &Config,
    levels: &[Rc<Level>],
    sheet: Rc<SpriteSheet>,
) -> Result<()> {
    let input = TerminalInput::new(term.key_release_events(), config.key_release_ms);
    let frames = IntervalFrames::new(Duration::from_millis(config.frame_ms));
    let screen = TerminalScreen::new(term, sheet);

    let mut runner = LevelRunner::new(frames, screen, input, SystemClock)
        .with_display_config(config.display_config());
    let outcomes = runner.run_game::<State>(levels).await?;

    log::info!("all levels complete after {} attempts", outcomes.len());
    Ok(())
}
