//! Sprite atlases.
//!
//! Atlases are authored as text: one palette character per pixel, `.` for
//! transparent. Multi-frame atlases lay their frames out left to right at a
//! fixed frame width. The built-in set is embedded at compile time and parsed
//! once at startup; a parse failure is fatal before any level starts.

use crate::canvas::Sprite;
use crate::fb::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    #[error("atlas {atlas:?} has no pixels")]
    Empty {
        atlas: &'static str,
    },
    #[error("atlas {atlas:?} row {row} is {found} pixels wide, expected {expected}")]
    RaggedRow {
        atlas: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("atlas {atlas:?} has unknown color {ch:?} at ({x}, {y})")]
    UnknownColor {
        atlas: &'static str,
        ch: char,
        x: usize,
        y: usize,
    },
}

impl AtlasError {
    pub fn code(self) -> &'static str {
        match self {
            AtlasError::Empty { .. } => "empty_atlas",
            AtlasError::RaggedRow { .. } => "ragged_row",
            AtlasError::UnknownColor { .. } => "unknown_color",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AtlasError::Empty { .. } => "atlas has no pixels",
            AtlasError::RaggedRow { .. } => "atlas rows differ in width",
            AtlasError::UnknownColor { .. } => "atlas contains an unknown palette character",
        }
    }
}

fn palette(ch: char) -> Option<Option<Rgb>> {
    let color = match ch {
        '.' => return Some(None),
        'k' => Rgb::new(24, 24, 32),
        'w' => Rgb::new(250, 250, 250),
        's' => Rgb::new(255, 205, 160),
        'h' => Rgb::new(110, 60, 20),
        'r' => Rgb::new(220, 50, 60),
        'p' => Rgb::new(50, 50, 130),
        'g' => Rgb::new(100, 205, 80),
        'G' => Rgb::new(60, 160, 60),
        'd' => Rgb::new(160, 110, 60),
        'D' => Rgb::new(120, 80, 40),
        'l' => Rgb::new(255, 100, 0),
        'L' => Rgb::new(255, 190, 40),
        'y' => Rgb::new(255, 220, 60),
        'Y' => Rgb::new(200, 150, 20),
        _ => return None,
    };
    Some(Some(color))
}

/// Immutable pixel grid; `None` pixels are transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    width: u32,
    height: u32,
    pixels: Vec<Option<Rgb>>,
}

impl Atlas {
    pub fn parse(name: &'static str, text: &str) -> Result<Self, AtlasError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(AtlasError::Empty { atlas: name });
        };

        let width = first.chars().count();
        let mut pixels = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(AtlasError::RaggedRow {
                    atlas: name,
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let px = palette(ch).ok_or(AtlasError::UnknownColor {
                    atlas: name,
                    ch,
                    x,
                    y,
                })?;
                pixels.push(px);
            }
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, `None` when transparent or outside the atlas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Every atlas the frame renderer draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub ground_top: Atlas,
    pub ground_fill: Atlas,
    pub lava: Atlas,
    /// 8 frames: walk cycle 0..=6, idle 7.
    pub player: Atlas,
    /// 7 frames.
    pub coin: Atlas,
}

impl SpriteSheet {
    pub fn builtin() -> Result<Self, AtlasError> {
        Ok(Self {
            ground_top: Atlas::parse("ground_top", include_str!("../assets/ground_top.txt"))?,
            ground_fill: Atlas::parse("ground_fill", include_str!("../assets/ground_fill.txt"))?,
            lava: Atlas::parse("lava", include_str!("../assets/lava.txt"))?,
            player: Atlas::parse("player", include_str!("../assets/player.txt"))?,
            coin: Atlas::parse("coin", include_str!("../assets/coin.txt"))?,
        })
    }

    pub fn atlas(&self, sprite: Sprite) -> &Atlas {
        match sprite {
            Sprite::GroundTop => &self.ground_top,
            Sprite::GroundFill => &self.ground_fill,
            Sprite::Lava => &self.lava,
            Sprite::Player => &self.player,
            Sprite::Coin => &self.coin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_atlases_have_expected_layout() {
        let sheet = SpriteSheet::builtin().unwrap();
        for tile in [&sheet.ground_top, &sheet.ground_fill, &sheet.lava] {
            assert_eq!((tile.width(), tile.height()), (5, 5));
        }
        // 8 frames of (0.8 tiles * 5px + 2 * 2px overlap) = 8px.
        assert_eq!((sheet.player.width(), sheet.player.height()), (64, 8));
        // 7 frames of 0.6 tiles * 5px = 3px.
        assert_eq!((sheet.coin.width(), sheet.coin.height()), (21, 3));
    }

    #[test]
    fn dot_is_transparent() {
        let atlas = Atlas::parse("t", ".k").unwrap();
        assert_eq!(atlas.pixel(0, 0), None);
        assert_eq!(atlas.pixel(1, 0), Some(Rgb::new(24, 24, 32)));
        assert_eq!(atlas.pixel(2, 0), None);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Atlas::parse("t", "\n\n"),
            Err(AtlasError::Empty { atlas: "t" })
        );
        assert_eq!(
            Atlas::parse("t", "kk\nk").unwrap_err().code(),
            "ragged_row"
        );
        assert_eq!(
            Atlas::parse("t", "kk\nk").unwrap_err().to_string(),
            "atlas \"t\" row 1 is 1 pixels wide, expected 2"
        );
        assert_eq!(
            Atlas::parse("t", "kz"),
            Err(AtlasError::UnknownColor {
                atlas: "t",
                ch: 'z',
                x: 1,
                y: 0
            })
        );
    }
}
