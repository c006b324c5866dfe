use review_council::config::{CouncilConfig, ProjectPriority};

use tempfile::TempDir;

#[tokio::test]
async fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("review-council.toml");

    let config = CouncilConfig::load(&path).await.unwrap();
    assert_eq!(config, CouncilConfig::default());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("review-council.toml");

    let mut config = CouncilConfig::default();
    config.project.priority = ProjectPriority::Security;
    config.project.security_sensitive = true;
    config.agents.timeout_secs = 10;
    config.agents.enabled = vec!["Security Agent".to_string()];

    config.save(&path).await.unwrap();
    let loaded = CouncilConfig::load(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn invalid_values_fail_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("review-council.toml");

    tokio::fs::write(&path, "[project]\nteam_size = 0\n")
        .await
        .unwrap();

    let err = CouncilConfig::load(&path).await.unwrap_err();
    assert!(err.to_string().contains("team_size"));
}

#[tokio::test]
async fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("review-council.toml");

    tokio::fs::write(&path, "priority = [unclosed\n").await.unwrap();

    assert!(CouncilConfig::load(&path).await.is_err());
}

#[tokio::test]
async fn partial_config_fills_remaining_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("review-council.toml");

    tokio::fs::write(&path, "[project]\npriority = \"performance\"\n")
        .await
        .unwrap();

    let config = CouncilConfig::load(&path).await.unwrap();
    assert_eq!(config.project.priority, ProjectPriority::Performance);
    assert_eq!(config.project.team_size, 5);
    assert_eq!(config.agents.timeout_secs, 30);
}
