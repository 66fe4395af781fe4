use chrono::Utc;
use claimclear_core::ClaimClearError;
use claimclear_core::config::{CyclePolicy, LogFormat, RootConfig};
use claimclear_core::conversation::{ArtifactStore, CycleId, EvidencePackage};
use claimclear_core::patient::{PatientRecordRepository, get_sample_record};
use claimclear_infrastructure::{
    ConfigService, DirectoryArtifactStore, InMemoryArtifactStore, SamplePatientRecordRepository,
    TomlPatientRecordRepository,
};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn package() -> EvidencePackage {
    EvidencePackage {
        id: "ev-test".to_string(),
        name: "ClaimClear_Evidence_Package.pdf".to_string(),
        created_at: Utc::now(),
        cycle: CycleId::new(1),
    }
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

    let config = service.get_config().expect("Should fall back to defaults");
    assert_eq!(config, RootConfig::default());
}

#[test]
fn test_config_overrides_are_applied() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[orchestrator]
response_delay_ms = 250
artifact_delay_ms = 750
cycle_policy = "concurrent"

[templates]
greeting = "Hi Edward, how can we help?"

[artifact]
file_name = "Evidence.pdf"
output_dir = "/srv/claimclear/artifacts"

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = ConfigService::with_path(&config_path).get_config().unwrap();

    assert_eq!(config.orchestrator.response_delay, Duration::from_millis(250));
    assert_eq!(config.orchestrator.artifact_delay, Duration::from_millis(750));
    assert_eq!(config.orchestrator.cycle_policy, CyclePolicy::Concurrent);
    assert_eq!(config.templates.greeting, "Hi Edward, how can we help?");
    assert_eq!(
        config.templates.completion,
        RootConfig::default().templates.completion
    );
    assert_eq!(config.artifact.file_name, "Evidence.pdf");
    assert_eq!(
        config.artifact.output_dir,
        Some(PathBuf::from("/srv/claimclear/artifacts"))
    );
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[orchestrator]\ncycle_policy = \"parallel\"\n").unwrap();

    let err = ConfigService::with_path(&config_path).get_config().unwrap_err();
    assert!(matches!(err, ClaimClearError::Serialization { .. }));
}

#[test]
fn test_cache_is_invalidated() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let service = ConfigService::with_path(&config_path);

    assert_eq!(service.get_config().unwrap().artifact.file_name, "ClaimClear_Evidence_Package.pdf");

    std::fs::write(&config_path, "[artifact]\nfile_name = \"Renamed.pdf\"\n").unwrap();
    assert_eq!(
        service.get_config().unwrap().artifact.file_name,
        "ClaimClear_Evidence_Package.pdf",
        "cached value is served until invalidated"
    );

    service.invalidate_cache();
    assert_eq!(service.get_config().unwrap().artifact.file_name, "Renamed.pdf");
}

#[test]
fn test_rendered_config_loads_back() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = RootConfig::default();
    config.orchestrator.cycle_policy = CyclePolicy::Reject;
    config.orchestrator.stage_timeout = None;

    std::fs::write(&config_path, ConfigService::render(&config).unwrap()).unwrap();
    assert_eq!(ConfigService::load_from_path(&config_path).unwrap(), config);
}

#[tokio::test]
async fn test_sample_repository_serves_builtin_record() {
    let record = SamplePatientRecordRepository.load().await.unwrap();
    assert_eq!(record, get_sample_record());
    assert_eq!(record.profile.name, "Edward Fisher");
}

#[tokio::test]
async fn test_toml_repository_reads_rendered_record() {
    let temp_dir = TempDir::new().unwrap();
    let record_path = temp_dir.path().join("record.toml");
    let sample = get_sample_record();

    std::fs::write(
        &record_path,
        TomlPatientRecordRepository::render(&sample).unwrap(),
    )
    .unwrap();

    let loaded = TomlPatientRecordRepository::with_path(&record_path)
        .load()
        .await
        .expect("Should load record");
    assert_eq!(loaded, sample);
}

#[tokio::test]
async fn test_toml_repository_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let repo = TomlPatientRecordRepository::with_path(temp_dir.path().join("absent.toml"));

    let err = repo.load().await.unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_in_memory_store_reference() {
    let package = package();
    let reference = InMemoryArtifactStore.reference_for(&package).unwrap();

    assert_eq!(reference.file_name, package.name);
    assert_eq!(reference.package_id, "ev-test");
    assert_eq!(
        reference.location,
        "artifact://ev-test/ClaimClear_Evidence_Package.pdf"
    );
}

#[test]
fn test_directory_store_reference() {
    let temp_dir = TempDir::new().unwrap();
    let store = DirectoryArtifactStore::new(temp_dir.path());
    let package = package();

    let reference = store.reference_for(&package).unwrap();

    assert_eq!(reference.file_name, package.name);
    assert!(reference.location.starts_with("file://"));
    assert!(reference.location.ends_with("ClaimClear_Evidence_Package.pdf"));
    assert_eq!(store.path_for(&package), temp_dir.path().join(&package.name));
}
