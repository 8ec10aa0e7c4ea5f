use std::collections::VecDeque;

use anyhow::Result;
use tui_platformer::engine::{run_animation, Flow, FrameSource};

/// Replays fixed timestamps and counts how many ticks were awaited.
struct ScriptedFrames {
    ticks: VecDeque<f64>,
    awaited: usize,
}

impl ScriptedFrames {
    fn new(ticks: &[f64]) -> Self {
        Self {
            ticks: ticks.iter().copied().collect(),
            awaited: 0,
        }
    }
}

impl FrameSource for ScriptedFrames {
    async fn next_frame(&mut self) -> Result<f64> {
        self.awaited += 1;
        match self.ticks.pop_front() {
            Some(t) => Ok(t),
            None => anyhow::bail!("no more frames"),
        }
    }
}

#[tokio::test]
async fn long_stall_is_clamped_to_a_tenth_of_a_second() {
    let mut frames = ScriptedFrames::new(&[0.0, 5000.0]);
    let mut seen = Vec::new();
    run_animation(&mut frames, |dt| {
        seen.push(dt);
        Ok(Flow::Stop)
    })
    .await
    .unwrap();
    assert_eq!(seen, vec![0.1]);
}

#[tokio::test]
async fn first_tick_only_primes_the_timestamp() {
    let mut frames = ScriptedFrames::new(&[1000.0, 1016.0, 1048.0]);
    let mut seen = Vec::new();
    run_animation(&mut frames, |dt| {
        seen.push(dt);
        Ok(if seen.len() == 2 {
            Flow::Stop
        } else {
            Flow::Continue
        })
    })
    .await
    .unwrap();
    assert_eq!(seen, vec![0.016, 0.032]);
    assert_eq!(frames.awaited, 3);
}

#[test]
fn no_tick_is_awaited_after_stop() {
    let mut frames = ScriptedFrames::new(&[0.0, 16.0, 32.0, 48.0]);
    let mut steps = 0;
    tokio_test::block_on(run_animation(&mut frames, |_| {
        steps += 1;
        Ok(Flow::Stop)
    }))
    .unwrap();
    assert_eq!(steps, 1);
    assert_eq!(frames.awaited, 2);
    assert_eq!(frames.ticks.len(), 2);
}

#[test]
fn clock_going_backwards_steps_by_zero() {
    let mut frames = ScriptedFrames::new(&[500.0, 450.0]);
    let mut seen = Vec::new();
    tokio_test::block_on(run_animation(&mut frames, |dt| {
        seen.push(dt);
        Ok(Flow::Stop)
    }))
    .unwrap();
    assert_eq!(seen, vec![0.0]);
}

#[test]
fn frame_source_errors_end_the_loop() {
    let mut frames = ScriptedFrames::new(&[0.0, 16.0]);
    let mut steps = 0;
    let result = tokio_test::block_on(run_animation(&mut frames, |_| {
        steps += 1;
        Ok(Flow::Continue)
    }));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("no more frames"));
    assert_eq!(steps, 1);
}
