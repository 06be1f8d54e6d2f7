use std::fs;

use ball_roller::GameConfig;

#[test]
fn defaults_are_runnable() {
    let cfg = GameConfig::default();
    assert!(cfg.reject_invalid().is_ok());
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn overlay_wins_per_key_and_keeps_base_elsewhere() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    let overlay = dir.path().join("game.local.ron");
    fs::write(
        &base,
        r#"(
            player: (speed: 10.0, max_speed: 8.0),
            level: (win_threshold: 4, pickup_count: 6),
        )"#,
    )
    .unwrap();
    fs::write(&overlay, r#"( player: (speed: 25.0) )"#).unwrap();

    let (cfg, used, errors) = GameConfig::load_layered([&base, &overlay]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.player.speed, 25.0, "overlay overrides");
    assert_eq!(cfg.player.max_speed, 8.0, "base survives under overlay");
    assert_eq!(cfg.level.win_threshold, 4);
    // Untouched sections fall back to defaults.
    assert_eq!(cfg.camera.distance, GameConfig::default().camera.distance);
}

#[test]
fn missing_files_fall_back_to_defaults_with_reports() {
    let (cfg, used, errors) = GameConfig::load_layered(["/nonexistent/game.ron"]);
    assert_eq!(cfg, GameConfig::default());
    assert!(used.is_empty());
    assert_eq!(errors.len(), 1);
}

#[test]
fn malformed_ron_is_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("game.ron");
    fs::write(&bad, "(player: (speed: ").unwrap();
    let (cfg, _used, errors) = GameConfig::load_layered([&bad]);
    assert_eq!(cfg, GameConfig::default());
    assert!(errors.iter().any(|e| e.contains("parse error")));
}

#[test]
fn shipped_config_parses_and_passes_checks() {
    let cfg = GameConfig::load_from_file("assets/config/game.ron").expect("shipped config");
    assert!(cfg.reject_invalid().is_ok());
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}
