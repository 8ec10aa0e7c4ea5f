//! Dead-zone camera over a level, in tile units.

use crate::types::Actor;

/// Visible sub-rectangle of the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Scroll so the player stays inside the central band of the view.
    ///
    /// The band is inset by a third of the view width on both axes. Inside
    /// it the camera does not move; outside it the camera moves just enough
    /// to bring the player back to the band edge, never past the level edges.
    pub fn track(&mut self, player: &Actor, level_width: f64, level_height: f64) {
        let margin = self.width / 3.0;
        let center = player.center();

        self.left = follow(self.left, self.width, center.x, margin, level_width);
        self.top = follow(self.top, self.height, center.y, margin, level_height);
    }
}

fn follow(start: f64, extent: f64, center: f64, margin: f64, level_extent: f64) -> f64 {
    let next = if center < start + margin {
        (center - margin).max(0.0)
    } else if center > start + extent - margin {
        (center + margin - extent).min(level_extent - extent)
    } else {
        start
    };
    // Levels narrower than the view pin the camera at 0.
    next.clamp(0.0, (level_extent - extent).max(0.0))
}
