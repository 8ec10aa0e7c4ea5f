use tui_platformer::core::{Level, LevelError, LevelPack};
use tui_platformer::types::{TileKind, Vec2};

#[test]
fn blank_lines_around_a_plan_are_ignored() {
    let level = Level::parse("\n\n   ...\n   .@.\n   ###\n\n").unwrap();
    assert_eq!((level.width(), level.height()), (3, 3));
    assert_eq!(level.tile(1, 2), Some(TileKind::Ground));
}

#[test]
fn actor_cells_are_empty_background() {
    let level = Level::parse("o=|\nv@.\n###").unwrap();
    for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1)] {
        assert_eq!(level.tile(x, y), Some(TileKind::Empty));
    }
    assert_eq!(level.spawns().len(), 5);
}

#[test]
fn malformed_plans_are_rejected() {
    assert_eq!(Level::parse("").unwrap_err(), LevelError::EmptyPlan);
    assert_eq!(Level::parse("\n  \n").unwrap_err(), LevelError::EmptyPlan);
    assert_eq!(
        Level::parse("...\n.@\n###").unwrap_err(),
        LevelError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(
        Level::parse(".@.\n#x#").unwrap_err(),
        LevelError::UnknownTile { ch: 'x', x: 1, y: 1 }
    );
    assert_eq!(Level::parse("...\n###").unwrap_err(), LevelError::MissingPlayer);
    assert_eq!(
        Level::parse("@.@\n###").unwrap_err(),
        LevelError::MultiplePlayers
    );
}

#[test]
fn errors_describe_themselves() {
    let err = Level::parse(".@.\n#x#").unwrap_err();
    assert_eq!(err.code(), "unknown_tile");
    assert_eq!(err.message(), "level plan contains an unknown tile");
    assert_eq!(err.to_string(), "unknown tile 'x' at (1, 1)");
}

#[test]
fn outside_the_grid_counts_as_ground() {
    let level = Level::parse("...\n.@.\n...").unwrap();
    let size = Vec2::new(1.0, 1.0);
    assert!(!level.touches(Vec2::new(1.0, 1.0), size, TileKind::Ground));
    assert!(level.touches(Vec2::new(-0.5, 1.0), size, TileKind::Ground));
    assert!(level.touches(Vec2::new(1.0, 2.5), size, TileKind::Ground));
    assert!(level.touches(Vec2::new(2.5, 1.0), size, TileKind::Ground));
    assert!(!level.touches(Vec2::new(-0.5, 1.0), size, TileKind::Lava));
}

#[test]
fn touches_sees_partially_overlapped_cells() {
    let level = Level::parse("...\n.@+\n###").unwrap();
    let size = Vec2::new(0.8, 1.5);
    assert!(!level.touches(Vec2::new(1.0, 0.5), size, TileKind::Lava));
    assert!(level.touches(Vec2::new(1.3, 0.5), size, TileKind::Lava));
}

#[test]
fn json_pack_replaces_builtin_levels() {
    let pack = LevelPack::from_json(r#"{"levels": [".@.\n###", "@..\n#+#"]}"#).unwrap();
    let levels = pack.parse_levels().unwrap();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[1].tile(1, 1), Some(TileKind::Lava));

    assert!(LevelPack::from_json(r#"{"plans": []}"#).is_err());
}
