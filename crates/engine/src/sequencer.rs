//! Level sequencing: one animation loop per level, retried on loss.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::animation::{run_animation, Flow, FrameSource};
use crate::core::{Level, Simulation};
use crate::term::{Display, DisplayConfig, Surface};
use crate::types::{Keys, Status, ENDING_DELAY_SECS};

/// Where level surfaces come from and go back to.
pub trait Screen {
    type Surface: Surface;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<Self::Surface>;

    /// Show the surface's current contents.
    fn present(&mut self, surface: &Self::Surface) -> Result<()>;

    fn release(&mut self, surface: Self::Surface) -> Result<()>;
}

/// Live key state, sampled once at the start of every tick.
pub trait InputSource {
    fn keys(&mut self) -> Result<Keys>;
}

/// Wall-clock milliseconds used for sprite animation.
pub trait WallClock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Result of one run through a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    /// Position of the level in the list passed to [`LevelRunner::run_game`].
    pub index: usize,
    pub status: Status,
}

/// One attempt at a level, advanced a tick at a time.
///
/// Each [`step`](Self::step) reads the keys, advances the simulation,
/// renders and presents. Once the level is decided the display keeps
/// running for [`ENDING_DELAY_SECS`], then the surface goes back to the
/// screen and the step returns [`Flow::Stop`].
pub struct LevelPlay<'a, Sim, C: Screen, I, W> {
    screen: &'a mut C,
    input: &'a mut I,
    clock: &'a W,
    display: Option<Display<C::Surface>>,
    state: Sim,
    ending: f64,
    outcome: Option<Status>,
}

impl<'a, Sim, C, I, W> LevelPlay<'a, Sim, C, I, W>
where
    Sim: Simulation,
    C: Screen,
    I: InputSource,
    W: WallClock,
{
    /// Acquire a surface sized for `level` and start the simulation.
    pub fn start(
        screen: &'a mut C,
        input: &'a mut I,
        clock: &'a W,
        level: Rc<Level>,
        config: DisplayConfig,
    ) -> Result<Self> {
        let (width, height) = config.surface_size(&level);
        let surface = screen
            .create_surface(width, height)
            .context("create level surface")?;
        log::debug!("surface created ({width}x{height} px)");

        Ok(Self {
            screen,
            input,
            clock,
            display: Some(Display::with_config(surface, config)),
            state: Sim::start(level),
            ending: ENDING_DELAY_SECS,
            outcome: None,
        })
    }

    pub fn step(&mut self, dt: f64) -> Result<Flow> {
        let Some(display) = self.display.as_mut() else {
            return Ok(Flow::Stop);
        };

        let keys = self.input.keys()?;
        let previous = self.state.status();
        self.state = self.state.update(dt, keys);
        let status = self.state.status();
        if status != previous {
            log::debug!("status changed to {status}");
        }

        display.sync_state(&self.state, self.clock.now_ms());
        self.screen.present(display.surface())?;

        if status.is_playing() {
            return Ok(Flow::Continue);
        }
        self.ending -= dt;
        if self.ending > 0.0 {
            return Ok(Flow::Continue);
        }

        if let Some(done) = self.display.take() {
            self.screen.release(done.clear())?;
            log::debug!("surface released");
        }
        self.outcome = Some(status);
        Ok(Flow::Stop)
    }

    /// Final status, once the level has ended.
    pub fn outcome(&self) -> Option<Status> {
        self.outcome
    }

    /// Hand the surface back without finishing the level. Used when a tick
    /// fails; a no-op once the surface has already been released.
    pub fn abort(&mut self) -> Result<()> {
        if let Some(display) = self.display.take() {
            self.screen.release(display.clear())?;
            log::debug!("surface released after an error");
        }
        Ok(())
    }

    /// Seconds left before the level ends.
    pub fn ending(&self) -> f64 {
        self.ending
    }
}

pub struct LevelRunner<F, C, I, W> {
    frames: F,
    screen: C,
    input: I,
    clock: W,
    display_config: DisplayConfig,
}

impl<F, C, I, W> LevelRunner<F, C, I, W>
where
    F: FrameSource,
    C: Screen,
    I: InputSource,
    W: WallClock,
{
    pub fn new(frames: F, screen: C, input: I, clock: W) -> Self {
        Self {
            frames,
            screen,
            input,
            clock,
            display_config: DisplayConfig::default(),
        }
    }

    pub fn with_display_config(mut self, config: DisplayConfig) -> Self {
        self.display_config = config;
        self
    }

    pub fn into_parts(self) -> (F, C, I, W) {
        (self.frames, self.screen, self.input, self.clock)
    }

    /// Play one level until it is won or lost and the ending delay has run out.
    pub async fn run_level<Sim: Simulation>(&mut self, level: Rc<Level>) -> Result<Status> {
        let Self {
            frames,
            screen,
            input,
            clock,
            display_config,
        } = self;

        let mut play =
            LevelPlay::<Sim, _, _, _>::start(screen, input, clock, level, *display_config)?;
        if let Err(err) = run_animation(frames, |dt| play.step(dt)).await {
            if let Err(release) = play.abort() {
                log::warn!("failed to release level surface: {release:#}");
            }
            return Err(err);
        }
        play.outcome().context("animation stopped before the level ended")
    }

    /// Play `levels` in order, advancing on a win and retrying on a loss.
    ///
    /// Every attempt is recorded, so a level lost three times before it is
    /// won contributes four outcomes.
    pub async fn run_game<Sim: Simulation>(
        &mut self,
        levels: &[Rc<Level>],
    ) -> Result<Vec<LevelOutcome>> {
        let mut outcomes = Vec::new();
        let mut index = 0;
        while let Some(level) = levels.get(index) {
            log::info!("level {} of {} started", index + 1, levels.len());
            let status = self
                .run_level::<Sim>(Rc::clone(level))
                .await
                .with_context(|| format!("level {}", index + 1))?;
            log::info!("level {} {status}", index + 1);

            outcomes.push(LevelOutcome { index, status });
            if status == Status::Won {
                index += 1;
            }
        }
        Ok(outcomes)
    }
}
