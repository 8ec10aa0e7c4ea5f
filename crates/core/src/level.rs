//! Level plans: text layout → immutable tile grid plus actor spawns.
//!
//! A plan is a rectangle of characters, one per tile:
//!
//! | Char | Meaning |
//! |------|---------|
//! | `.` | empty |
//! | `#` | ground |
//! | `+` | lava tile |
//! | `@` | player start |
//! | `o` | coin |
//! | `=` | lava moving horizontally |
//! | `\|` | lava moving vertically |
//! | `v` | dripping lava |
//!
//! Actor characters leave an empty tile behind them.

use crate::types::{TileKind, Vec2};

/// Where and how an actor enters the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawn {
    Player { pos: Vec2 },
    Coin { pos: Vec2 },
    Lava { pos: Vec2, speed: Vec2, drips: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("level plan has no rows")]
    EmptyPlan,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown tile {ch:?} at ({x}, {y})")]
    UnknownTile { ch: char, x: usize, y: usize },
    #[error("level plan has no player start")]
    MissingPlayer,
    #[error("level plan has more than one player start")]
    MultiplePlayers,
}

impl LevelError {
    pub fn code(self) -> &'static str {
        match self {
            LevelError::EmptyPlan => "empty_plan",
            LevelError::RaggedRow { .. } => "ragged_row",
            LevelError::UnknownTile { .. } => "unknown_tile",
            LevelError::MissingPlayer | LevelError::MultiplePlayers => "player_count",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LevelError::EmptyPlan => "level plan has no rows",
            LevelError::RaggedRow { .. } => "level plan rows differ in width",
            LevelError::UnknownTile { .. } => "level plan contains an unknown tile",
            LevelError::MissingPlayer => "level plan has no player start",
            LevelError::MultiplePlayers => "level plan has more than one player start",
        }
    }
}

/// Immutable tile grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    width: usize,
    height: usize,
    /// Row-major tiles.
    tiles: Vec<TileKind>,
    spawns: Vec<Spawn>,
}

impl Level {
    /// Parse a textual plan.
    ///
    /// Blank leading/trailing lines and surrounding whitespace on each row
    /// are ignored, so plans can be written as indented raw strings.
    ///
    /// ```
    /// use tui_platformer_core::Level;
    /// use tui_platformer_types::TileKind;
    ///
    /// let level = Level::parse("
    ///     ..o.
    ///     .@..
    ///     ###+#
    /// ").unwrap();
    /// assert_eq!((level.width(), level.height()), (4, 3));
    /// assert_eq!(level.tile(2, 2), Some(TileKind::Lava));
    /// assert_eq!(level.tile(1, 1), Some(TileKind::Empty));
    /// ```
    pub fn parse(plan: &str) -> Result<Self, LevelError> {
        let rows: Vec<&str> = plan
            .lines()
            .map(str::trim)
            .skip_while(|line| line.is_empty())
            .collect();
        let rows = match rows.iter().rposition(|line| !line.is_empty()) {
            Some(last) => &rows[..=last],
            None => return Err(LevelError::EmptyPlan),
        };

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);
        let mut spawns = Vec::new();
        let mut players = 0usize;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, ch) in row.chars().enumerate() {
                let at = Vec2::new(x as f64, y as f64);
                let tile = match ch {
                    '.' => TileKind::Empty,
                    '#' => TileKind::Ground,
                    '+' => TileKind::Lava,
                    '@' => {
                        players += 1;
                        spawns.push(Spawn::Player {
                            pos: at + Vec2::new(0.0, -0.5),
                        });
                        TileKind::Empty
                    }
                    'o' => {
                        spawns.push(Spawn::Coin {
                            pos: at + Vec2::new(0.2, 0.1),
                        });
                        TileKind::Empty
                    }
                    '=' | '|' | 'v' => {
                        let (speed, drips) = match ch {
                            '=' => (Vec2::new(2.0, 0.0), false),
                            '|' => (Vec2::new(0.0, 2.0), false),
                            _ => (Vec2::new(0.0, 3.0), true),
                        };
                        spawns.push(Spawn::Lava {
                            pos: at,
                            speed,
                            drips,
                        });
                        TileKind::Empty
                    }
                    _ => return Err(LevelError::UnknownTile { ch, x, y }),
                };
                tiles.push(tile);
            }
        }

        match players {
            0 => Err(LevelError::MissingPlayer),
            1 => Ok(Self {
                width,
                height,
                tiles,
                spawns,
            }),
            _ => Err(LevelError::MultiplePlayers),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn spawns(&self) -> &[Spawn] {
        &self.spawns
    }

    /// Tile at grid coordinates, or `None` outside the grid.
    pub fn tile(&self, x: usize, y: usize) -> Option<TileKind> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    /// Whether any grid cell overlapped by the box is of `kind`.
    ///
    /// Cells outside the grid count as ground, so actors can never leave the
    /// level.
    pub fn touches(&self, pos: Vec2, size: Vec2, kind: TileKind) -> bool {
        let x_start = pos.x.floor() as i64;
        let x_end = (pos.x + size.x).ceil() as i64;
        let y_start = pos.y.floor() as i64;
        let y_end = (pos.y + size.y).ceil() as i64;

        for y in y_start..y_end {
            for x in x_start..x_end {
                let here = if x < 0 || y < 0 {
                    TileKind::Ground
                } else {
                    self.tile(x as usize, y as usize)
                        .unwrap_or(TileKind::Ground)
                };
                if here == kind {
                    return true;
                }
            }
        }
        false
    }
}
