use smallecon_core::{
    AppConfig, ConfigError, FundingMilestone, MilestoneLadder, Persona, UnlockRule,
};
use std::path::PathBuf;

#[test]
fn empty_text_yields_defaults() {
    let config = AppConfig::from_toml_str("").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.funding.unlock_rule, UnlockRule::TaskFunding);
    assert_eq!(config.funding.milestones, MilestoneLadder::default());
    assert_eq!(config.roadmap.persona, Persona::Entrepreneur);
    assert_eq!(config.storage.db_path, None);
}

#[test]
fn full_config_parses() {
    let config = AppConfig::from_toml_str(
        r#"
[funding]
unlock_rule = "milestone_ladder"
milestones = [
    { amount = 100, required_tasks = 2 },
    { amount = 400, required_tasks = 5 },
]

[roadmap]
persona = "community_builder"

[storage]
db_path = "/var/lib/smallecon/progress.sqlite3"

[logging]
level = "warn"
dir = "/var/log/smallecon"
"#,
    )
    .unwrap();

    assert_eq!(config.funding.unlock_rule, UnlockRule::MilestoneLadder);
    assert_eq!(
        config.funding.milestones.milestones(),
        &[FundingMilestone::new(100, 2), FundingMilestone::new(400, 5)]
    );
    assert_eq!(config.roadmap.persona, Persona::CommunityBuilder);
    assert_eq!(
        config.storage.db_path,
        Some(PathBuf::from("/var/lib/smallecon/progress.sqlite3"))
    );
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn descending_ladder_is_a_parse_error() {
    let err = AppConfig::from_toml_str(
        r#"
[funding]
milestones = [
    { amount = 500, required_tasks = 6 },
    { amount = 250, required_tasks = 3 },
]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = AppConfig::from_toml_str("[funding]\nbonus = 5\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn bad_logging_settings_are_invalid() {
    let level = AppConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
    assert!(matches!(level, ConfigError::Invalid(_)));

    let dir = AppConfig::from_toml_str("[logging]\ndir = \"relative/logs\"\n").unwrap_err();
    assert!(matches!(dir, ConfigError::Invalid(_)));
}

#[test]
fn load_reads_file_and_reports_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smallecon.toml");
    std::fs::write(&path, "[roadmap]\npersona = \"individual\"\n").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.roadmap.persona, Persona::Individual);

    let missing = AppConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read { .. }));
}
