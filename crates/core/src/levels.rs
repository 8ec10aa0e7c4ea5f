//! Built-in level plans and JSON level packs.
//!
//! A level pack is a JSON document of the form:
//!
//! ```json
//! { "levels": ["...\n.@.\n###", "..."] }
//! ```

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::level::{Level, LevelError};

pub const LEVEL_1: &str = "
...................
...................
...................
...........o.......
...@......###......
..####++++++++++###
###################
";

pub const LEVEL_2: &str = "
........................
........................
........................
........................
.....................=..
........................
........................
......o......o......o...
......#......#......#...
.@......................
#####+++####+++####+++##
";

pub const LEVEL_3: &str = "
...............########.............
...............###+####.............
..................v.................
....................................
....................................
....................................
....................................
....................................
....................................
...............o....................
....................................
....................................
.......o.....####...................
......###...............o...........
.o.....|..............####....o.....
##................................o.
...........................###+++###
....................................
...###..............................
..........###.......................
..................######............
.............................@......
++++++++++++++++++++++++++##########
";

pub const GAME_LEVELS: [&str; 3] = [LEVEL_1, LEVEL_2, LEVEL_3];

/// Ordered list of level plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<String>,
}

impl LevelPack {
    pub fn builtin() -> Self {
        Self {
            levels: GAME_LEVELS.iter().map(|plan| plan.to_string()).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse every plan up front so a broken pack fails before play starts.
    ///
    /// The error carries the zero-based index of the offending plan.
    pub fn parse_levels(&self) -> Result<Vec<Rc<Level>>, (usize, LevelError)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, plan)| Level::parse(plan).map(Rc::new).map_err(|e| (i, e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_levels_parse() {
        let levels = LevelPack::builtin().parse_levels().unwrap();
        let sizes: Vec<(usize, usize)> = levels.iter().map(|l| (l.width(), l.height())).collect();
        assert_eq!(sizes, vec![(19, 7), (24, 11), (36, 23)]);
    }

    #[test]
    fn pack_reports_index_of_broken_plan() {
        let pack = LevelPack::from_json(r#"{"levels": [".@.\n###", "..\n##"]}"#).unwrap();
        let err = pack.parse_levels().unwrap_err();
        assert_eq!(err, (1, LevelError::MissingPlayer));
    }
}
