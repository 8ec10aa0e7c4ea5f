use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::Result;
use tui_platformer::core::{Level, Simulation, Spawn};
use tui_platformer::engine::{
    Flow, FrameSource, InputSource, LevelOutcome, LevelPlay, LevelRunner, Screen, WallClock,
};
use tui_platformer::term::{DisplayConfig, Rect, Rgb, Sprite, Surface};
use tui_platformer::types::{Actor, ActorKind, Keys, Status, Vec2};

thread_local! {
    /// Status each new run switches to on its first update.
    static SCRIPT: RefCell<VecDeque<Status>> = RefCell::new(VecDeque::new());
    /// Everything the loop did, in order.
    static EVENTS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn script(statuses: &[Status]) {
    SCRIPT.with(|s| *s.borrow_mut() = statuses.iter().copied().collect());
    EVENTS.with(|e| e.borrow_mut().clear());
}

fn record(event: impl Into<String>) {
    EVENTS.with(|e| e.borrow_mut().push(event.into()));
}

fn events() -> Vec<String> {
    EVENTS.with(|e| e.borrow().clone())
}

fn count(prefix: &str) -> usize {
    events().iter().filter(|e| e.starts_with(prefix)).count()
}

#[derive(Clone)]
struct Scripted {
    level: Rc<Level>,
    player: Actor,
    outcome: Status,
    status: Status,
}

impl Simulation for Scripted {
    fn start(level: Rc<Level>) -> Self {
        record(format!("start {}", level.width()));
        let pos = level
            .spawns()
            .iter()
            .find_map(|s| match *s {
                Spawn::Player { pos } => Some(pos),
                _ => None,
            })
            .unwrap();
        let outcome = SCRIPT.with(|s| s.borrow_mut().pop_front().unwrap_or(Status::Won));
        Self {
            level,
            player: Actor::new(ActorKind::Player, pos, Vec2::new(0.8, 1.5)),
            outcome,
            status: Status::Playing,
        }
    }

    fn update(&self, _dt: f64, keys: Keys) -> Self {
        record(format!("update right={}", keys.right));
        Self {
            status: self.outcome,
            ..self.clone()
        }
    }

    fn level(&self) -> &Level {
        &self.level
    }

    fn status(&self) -> Status {
        self.status
    }

    fn player(&self) -> &Actor {
        &self.player
    }

    fn actors(&self) -> &[Actor] {
        std::slice::from_ref(&self.player)
    }
}

struct NullSurface {
    width: u32,
    height: u32,
}

impl Surface for NullSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, _color: Rgb) {}

    fn draw_sprite(&mut self, _sprite: Sprite, _src: Rect, _dst: Rect, _flip_x: bool) {}
}

#[derive(Default)]
struct FakeScreen {
    live: usize,
}

impl Screen for FakeScreen {
    type Surface = NullSurface;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<NullSurface> {
        assert_eq!(self.live, 0, "previous surface not released");
        self.live += 1;
        record(format!("create {width}x{height}"));
        Ok(NullSurface { width, height })
    }

    fn present(&mut self, _surface: &NullSurface) -> Result<()> {
        record("present");
        Ok(())
    }

    fn release(&mut self, _surface: NullSurface) -> Result<()> {
        self.live -= 1;
        record("release");
        Ok(())
    }
}

struct FailingScreen;

impl Screen for FailingScreen {
    type Surface = NullSurface;

    fn create_surface(&mut self, _width: u32, _height: u32) -> Result<NullSurface> {
        anyhow::bail!("no display")
    }

    fn present(&mut self, _surface: &NullSurface) -> Result<()> {
        Ok(())
    }

    fn release(&mut self, _surface: NullSurface) -> Result<()> {
        Ok(())
    }
}

struct HeldRight;

impl InputSource for HeldRight {
    fn keys(&mut self) -> Result<Keys> {
        record("keys");
        Ok(Keys {
            right: true,
            ..Keys::default()
        })
    }
}

struct FixedClock;

impl WallClock for FixedClock {
    fn now_ms(&self) -> u64 {
        0
    }
}

/// 16 ms ticks, forever.
#[derive(Default)]
struct SteadyFrames {
    now: f64,
}

impl FrameSource for SteadyFrames {
    async fn next_frame(&mut self) -> Result<f64> {
        self.now += 16.0;
        Ok(self.now)
    }
}

fn level(width: usize) -> Rc<Level> {
    let plan = format!("@{}\n{}", ".".repeat(width - 1), "#".repeat(width));
    Rc::new(Level::parse(&plan).unwrap())
}

#[test]
fn ending_delay_renders_three_times_at_point_four_seconds() {
    script(&[Status::Won]);
    let mut screen = FakeScreen::default();
    let mut input = HeldRight;

    let mut play = LevelPlay::<Scripted, _, _, _>::start(
        &mut screen,
        &mut input,
        &FixedClock,
        level(4),
        DisplayConfig::default(),
    )
    .unwrap();

    assert_eq!(play.step(0.4).unwrap(), Flow::Continue);
    assert_eq!(play.step(0.4).unwrap(), Flow::Continue);
    assert_eq!(play.outcome(), None);
    assert_eq!(play.step(0.4).unwrap(), Flow::Stop);
    assert_eq!(play.outcome(), Some(Status::Won));
    drop(play);

    assert_eq!(count("present"), 3);
    assert_eq!(count("release"), 1);
    assert_eq!(screen.live, 0);
}

#[test]
fn each_tick_reads_keys_then_updates_then_presents() {
    script(&[Status::Playing]);
    let mut screen = FakeScreen::default();
    let mut input = HeldRight;

    let mut play = LevelPlay::<Scripted, _, _, _>::start(
        &mut screen,
        &mut input,
        &FixedClock,
        level(4),
        DisplayConfig::default(),
    )
    .unwrap();
    assert_eq!(play.step(0.016).unwrap(), Flow::Continue);
    assert_eq!(play.ending(), 1.0);
    drop(play);

    assert_eq!(
        events(),
        vec!["create 20x10", "start 4", "keys", "update right=true", "present"]
    );
}

#[test]
fn won_levels_advance_and_lost_levels_restart() {
    script(&[Status::Lost, Status::Won, Status::Won]);
    let mut runner = LevelRunner::new(
        SteadyFrames::default(),
        FakeScreen::default(),
        HeldRight,
        FixedClock,
    );
    let levels = [level(4), level(6)];

    let outcomes = tokio_test::block_on(runner.run_game::<Scripted>(&levels)).unwrap();
    assert_eq!(
        outcomes,
        vec![
            LevelOutcome {
                index: 0,
                status: Status::Lost
            },
            LevelOutcome {
                index: 0,
                status: Status::Won
            },
            LevelOutcome {
                index: 1,
                status: Status::Won
            },
        ]
    );

    let starts: Vec<_> = events()
        .into_iter()
        .filter(|e| e.starts_with("start"))
        .collect();
    assert_eq!(starts, vec!["start 4", "start 4", "start 6"]);
    assert_eq!(count("create"), 3);
    assert_eq!(count("release"), 3);

    let (_, screen, _, _) = runner.into_parts();
    assert_eq!(screen.live, 0);
}

#[test]
fn level_ends_after_about_a_second_of_ticks() {
    script(&[Status::Lost]);
    let mut runner = LevelRunner::new(
        SteadyFrames::default(),
        FakeScreen::default(),
        HeldRight,
        FixedClock,
    );

    let status = tokio_test::block_on(runner.run_level::<Scripted>(level(4))).unwrap();
    assert_eq!(status, Status::Lost);
    // 1.0 s of 16 ms steps: 62 keep going, the 63rd ends the level.
    assert_eq!(count("present"), 63);
}

#[test]
fn surface_failure_is_fatal_before_the_loop_starts() {
    script(&[Status::Won]);
    let mut runner = LevelRunner::new(SteadyFrames::default(), FailingScreen, HeldRight, FixedClock);

    let err = tokio_test::block_on(runner.run_game::<Scripted>(&[level(4)])).unwrap_err();
    assert!(format!("{err:#}").contains("no display"));
    assert_eq!(count("start"), 0);
    assert_eq!(count("keys"), 0);
}

#[test]
fn surface_is_capped_at_the_maximum_size() {
    script(&[Status::Won]);
    let mut runner = LevelRunner::new(
        SteadyFrames::default(),
        FakeScreen::default(),
        HeldRight,
        FixedClock,
    )
    .with_display_config(DisplayConfig {
        max_width: 30,
        ..DisplayConfig::default()
    });

    tokio_test::block_on(runner.run_level::<Scripted>(level(10))).unwrap();
    assert!(events().contains(&"create 30x10".to_string()));
}

/// Presents fine until the `fail_on`th frame.
struct FlakyScreen {
    inner: FakeScreen,
    presents: usize,
    fail_on: usize,
}

impl Screen for FlakyScreen {
    type Surface = NullSurface;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<NullSurface> {
        self.inner.create_surface(width, height)
    }

    fn present(&mut self, surface: &NullSurface) -> Result<()> {
        self.presents += 1;
        if self.presents == self.fail_on {
            anyhow::bail!("terminal went away");
        }
        self.inner.present(surface)
    }

    fn release(&mut self, surface: NullSurface) -> Result<()> {
        self.inner.release(surface)
    }
}

/// Fails on the first read, like a quit key.
struct QuitImmediately;

impl InputSource for QuitImmediately {
    fn keys(&mut self) -> Result<Keys> {
        anyhow::bail!("quit requested")
    }
}

#[test]
fn surface_is_released_when_present_fails() {
    script(&[Status::Playing]);
    let screen = FlakyScreen {
        inner: FakeScreen::default(),
        presents: 0,
        fail_on: 3,
    };
    let mut runner = LevelRunner::new(SteadyFrames::default(), screen, HeldRight, FixedClock);

    let err = tokio_test::block_on(runner.run_level::<Scripted>(level(4))).unwrap_err();
    assert!(format!("{err:#}").contains("terminal went away"));

    let (_, screen, _, _) = runner.into_parts();
    assert_eq!(screen.inner.live, 0);
    assert_eq!(count("release"), 1);
}

#[test]
fn surface_is_released_when_input_fails() {
    script(&[Status::Playing]);
    let mut runner = LevelRunner::new(
        SteadyFrames::default(),
        FakeScreen::default(),
        QuitImmediately,
        FixedClock,
    );

    let err = tokio_test::block_on(runner.run_game::<Scripted>(&[level(4)])).unwrap_err();
    assert!(format!("{err:#}").contains("quit requested"));
    assert_eq!(count("present"), 0);

    let (_, screen, _, _) = runner.into_parts();
    assert_eq!(screen.live, 0);
    assert_eq!(count("release"), 1);
}

#[test]
fn abort_after_the_level_ended_is_a_no_op() {
    script(&[Status::Won]);
    let mut screen = FakeScreen::default();
    let mut input = HeldRight;

    let mut play = LevelPlay::<Scripted, _, _, _>::start(
        &mut screen,
        &mut input,
        &FixedClock,
        level(4),
        DisplayConfig::default(),
    )
    .unwrap();
    while play.step(0.1).unwrap() == Flow::Continue {}
    play.abort().unwrap();
    drop(play);

    assert_eq!(count("release"), 1);
    assert_eq!(screen.live, 0);
}
