//! Tests for loading game configuration from disk.

use std::io::Write;
use strictly_ladders::{GameConfig, Phase, ShortcutEntry, TurnError, TurnScheduler};

#[derive(Debug)]
struct Nothing;

impl strictly_ladders::DiceSource for Nothing {
    fn request_roll(&mut self, _player: &strictly_ladders::Player) {}
}

impl strictly_ladders::Mover for Nothing {
    fn move_to(&mut self, _request: strictly_ladders::MoveRequest) {}
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_config(
        r#"
        number_of_players = 3
        number_of_ai_players = 1
        player_names = ["Ada", "Grace"]
        ai_think_delay_ms = 250

        [rules]
        starting_dice_value = 6

        [[shortcuts]]
        start = 5
        end = 95
        kind = "ladder"
        "#,
    );

    let config = GameConfig::from_file(file.path()).expect("valid config");
    assert_eq!(*config.number_of_players(), 3);
    assert_eq!(config.ai_think_delay().as_millis(), 250);
    assert_eq!(config.rules().starting_dice_value, 6);
    assert!(config.shortcut_entries().contains(&ShortcutEntry::ladder(5, 95)));

    let registry = config.registry();
    let names: Vec<_> = registry.iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, ["Ada", "Grace", "Player 3"]);
    assert!(registry.get(0).is_some_and(|p| p.is_ai()));
}

#[test]
fn test_missing_file_is_an_error() {
    let err = GameConfig::from_file("/definitely/not/here.toml").expect_err("missing file");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_player_count_rejected_not_clamped() {
    let file = write_config("number_of_players = 12\n");
    let err = GameConfig::from_file(file.path()).expect_err("too many players");
    assert!(err.message.contains("number_of_players"));
}

#[test]
fn test_config_builds_playable_scheduler() {
    let config = GameConfig::new(2, 0).with_shortcut(ShortcutEntry::snake(3, 50));
    let (mut game, rejected) =
        TurnScheduler::from_config(&config, Nothing, Nothing).expect("valid config");
    assert_eq!(rejected.len(), 1);
    assert_eq!(game.shortcuts().len(), 15);

    assert_eq!(game.submit_roll(1), Err(TurnError::NotAwaitingRoll(Phase::Idle)));
    game.start_game().expect("start");
    assert_eq!(game.phase(), Phase::AwaitingRoll);
}
