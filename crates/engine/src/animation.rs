//! Frame-driven animation pump.
//!
//! The pump awaits refresh ticks from a [`FrameSource`] and hands the step
//! callback the elapsed time in seconds. The step decides when the loop ends
//! by returning [`Flow::Stop`]; nothing else cancels it.

use std::future::Future;

use anyhow::Result;

use crate::types::MAX_STEP_MS;

/// What the pump does after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Source of refresh ticks.
///
/// `next_frame` suspends until the next tick and resolves to its timestamp
/// in milliseconds.
pub trait FrameSource {
    fn next_frame(&mut self) -> impl Future<Output = Result<f64>>;
}

/// Seconds between two tick timestamps, clamped to `[0, MAX_STEP_MS]` ms.
pub fn frame_delta(previous_ms: f64, now_ms: f64) -> f64 {
    (now_ms - previous_ms).clamp(0.0, MAX_STEP_MS) / 1000.0
}

/// Run `step` once per tick until it returns [`Flow::Stop`].
///
/// The first tick only records its timestamp. Errors from the frame source
/// or the step end the loop and are returned to the caller.
pub async fn run_animation<F, S>(frames: &mut F, mut step: S) -> Result<()>
where
    F: FrameSource,
    S: FnMut(f64) -> Result<Flow>,
{
    let mut previous = frames.next_frame().await?;
    loop {
        let now = frames.next_frame().await?;
        let dt = frame_delta(previous, now);
        previous = now;
        if step(dt)? == Flow::Stop {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ticks(Vec<f64>);

    impl FrameSource for Ticks {
        async fn next_frame(&mut self) -> Result<f64> {
            if self.0.is_empty() {
                anyhow::bail!("frame source exhausted");
            }
            Ok(self.0.remove(0))
        }
    }

    #[test]
    fn delta_is_clamped_to_a_tenth_of_a_second() {
        assert_eq!(frame_delta(0.0, 5000.0), 0.1);
        assert_eq!(frame_delta(1000.0, 1016.0), 0.016);
    }

    #[test]
    fn negative_delta_is_zero() {
        assert_eq!(frame_delta(500.0, 400.0), 0.0);
    }

    #[test]
    fn step_errors_propagate() {
        let mut ticks = Ticks(vec![0.0, 16.0, 32.0]);
        let result = tokio_test::block_on(run_animation(&mut ticks, |_| {
            anyhow::bail!("surface lost")
        }));
        assert!(result.is_err());
        assert_eq!(ticks.0, vec![32.0]);
    }
}
