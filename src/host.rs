//! Terminal host: real ticks, a real screen and real keys for the game loop.

use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::engine::{FrameSource, InputSource, Screen};
use crate::input::{should_quit, KeyTracker};
use crate::term::{Canvas, FrameBuffer, SpriteSheet, TerminalRenderer};
use crate::types::Keys;

/// Refresh ticks from a tokio interval.
pub struct IntervalFrames {
    interval: Interval,
    origin: Instant,
}

impl IntervalFrames {
    /// Must be called inside a tokio runtime.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            origin: Instant::now(),
        }
    }
}

impl FrameSource for IntervalFrames {
    async fn next_frame(&mut self) -> Result<f64> {
        let at = self.interval.tick().await;
        Ok(at.duration_since(self.origin).as_secs_f64() * 1000.0)
    }
}

/// Presents level canvases through the terminal renderer.
pub struct TerminalScreen<'a> {
    renderer: &'a mut TerminalRenderer,
    fb: FrameBuffer,
    sheet: Rc<SpriteSheet>,
    term_size: Option<(u16, u16)>,
}

impl<'a> TerminalScreen<'a> {
    pub fn new(renderer: &'a mut TerminalRenderer, sheet: Rc<SpriteSheet>) -> Self {
        Self {
            renderer,
            fb: FrameBuffer::new(0, 0),
            sheet,
            term_size: None,
        }
    }

    fn check_term_size(&mut self, needed: (u16, u16)) {
        let size = crossterm::terminal::size().ok();
        if size == self.term_size {
            return;
        }
        self.term_size = size;
        self.renderer.invalidate();
        if let Some((cols, rows)) = size {
            if cols < needed.0 || rows < needed.1 {
                log::warn!(
                    "terminal is {cols}x{rows}, game needs {}x{}; output will be cut off",
                    needed.0,
                    needed.1
                );
            }
        }
    }
}

impl Screen for TerminalScreen<'_> {
    type Surface = Canvas;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<Canvas> {
        anyhow::ensure!(width > 0 && height > 0, "empty surface {width}x{height}");
        let canvas = Canvas::new(width, height, Rc::clone(&self.sheet));
        self.term_size = None;
        self.check_term_size(canvas.cell_size());
        Ok(canvas)
    }

    fn present(&mut self, surface: &Canvas) -> Result<()> {
        self.check_term_size(surface.cell_size());
        surface.present_into(&mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn release(&mut self, surface: Canvas) -> Result<()> {
        drop(surface);
        self.renderer.clear()
    }
}

/// The player asked to leave the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("quit requested")]
pub struct QuitRequested;

/// Keys from crossterm, drained without blocking at the start of each tick.
pub struct TerminalInput {
    tracker: KeyTracker,
    origin: std::time::Instant,
}

impl TerminalInput {
    /// `key_release_events` says whether the terminal reports releases; when
    /// it does not, keys expire after `release_timeout_ms`.
    pub fn new(key_release_events: bool, release_timeout_ms: u64) -> Self {
        let tracker = if key_release_events {
            KeyTracker::new()
        } else {
            KeyTracker::with_release_timeout_ms(release_timeout_ms)
        };
        Self {
            tracker,
            origin: std::time::Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl InputSource for TerminalInput {
    fn keys(&mut self) -> Result<Keys> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    let now = self.elapsed_ms();
                    if self.tracker.handle_key_event(key, now) {
                        continue;
                    }
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Err(QuitRequested.into());
                    }
                }
                Event::FocusLost => self.tracker.release_all(),
                _ => {}
            }
        }
        self.tracker.expire(self.elapsed_ms());
        Ok(self.tracker.keys())
    }
}
