//! Sprite selection: which atlas frame an actor shows right now.
//!
//! Walk and coin cycles run on wall-clock time, not simulation time, so the
//! animation speed stays the same however the simulation is stepped.

use crate::types::{Vec2, ANIMATION_FRAME_MS, IDLE_FRAME, JUMP_FRAME, WALK_CYCLE_FRAMES};

/// Player atlas frame for the given velocity.
///
/// Airborne beats walking, walking beats idle.
///
/// ```
/// use tui_platformer_term::sprite::player_frame;
/// use tui_platformer_types::Vec2;
///
/// assert_eq!(player_frame(Vec2::new(7.0, -3.0), 0), 1);
/// assert_eq!(player_frame(Vec2::new(7.0, 0.0), 180), 3);
/// assert_eq!(player_frame(Vec2::ZERO, 180), 7);
/// ```
pub fn player_frame(speed: Vec2, now_ms: u64) -> u32 {
    if speed.y != 0.0 {
        JUMP_FRAME
    } else if speed.x != 0.0 {
        cycle_frame(now_ms)
    } else {
        IDLE_FRAME
    }
}

/// Coin atlas frame; coins spin continuously.
pub fn coin_frame(now_ms: u64) -> u32 {
    cycle_frame(now_ms)
}

/// Next facing flag (`true` = mirrored, facing left).
///
/// Only horizontal motion changes it, so the player keeps facing the last
/// direction it moved in while standing still.
pub fn update_facing(flipped: bool, speed: Vec2) -> bool {
    if speed.x != 0.0 {
        speed.x < 0.0
    } else {
        flipped
    }
}

fn cycle_frame(now_ms: u64) -> u32 {
    ((now_ms / ANIMATION_FRAME_MS) % WALK_CYCLE_FRAMES as u64) as u32
}
