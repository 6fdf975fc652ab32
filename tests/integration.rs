use env_refresh::host::{CollectedEnvironment, ENV_FILE_NAME, HostEvent, LocalHost, RenamedFile};
use env_refresh::refresh::RefreshController;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_multi_root_refresh_integration() {
  let root_a = TempDir::new().unwrap();
  let root_b = TempDir::new().unwrap();

  fs::write(
    root_a.path().join(ENV_FILE_NAME),
    "# Database configuration
DB_HOST=localhost
DB_PORT=5432
SHARED=from_a",
  )
  .unwrap();
  fs::write(
    root_b.path().join(ENV_FILE_NAME),
    "SHARED=from_b
API_KEY=secret123",
  )
  .unwrap();

  let host = LocalHost::new(vec![
    root_a.path().to_path_buf(),
    root_b.path().to_path_buf(),
  ]);
  let controller = RefreshController::new(host, CollectedEnvironment::new());

  let env = controller.sink();
  assert_eq!(env.len(), 4);
  assert_eq!(env.get("DB_HOST"), Some("localhost"));
  assert_eq!(env.get("DB_PORT"), Some("5432"));
  assert_eq!(env.get("API_KEY"), Some("secret123"));
  // The later root wins for keys defined in both files.
  assert_eq!(env.get("SHARED"), Some("from_b"));
}

#[test]
fn test_root_without_env_file_is_isolated() {
  let empty_root = TempDir::new().unwrap();
  let root = TempDir::new().unwrap();

  fs::write(root.path().join(ENV_FILE_NAME), "Y=3").unwrap();

  let host = LocalHost::new(vec![
    empty_root.path().to_path_buf(),
    root.path().to_path_buf(),
  ]);
  let controller = RefreshController::new(host, CollectedEnvironment::new());

  assert_eq!(controller.sink().len(), 1);
  assert_eq!(controller.sink().get("Y"), Some("3"));
}

#[test]
fn test_save_event_rereads_from_disk() {
  let root = TempDir::new().unwrap();
  let env_path = root.path().join(ENV_FILE_NAME);

  fs::write(&env_path, "KEY=one").unwrap();

  let host = LocalHost::new(vec![root.path().to_path_buf()]);
  let mut controller = RefreshController::new(host, CollectedEnvironment::new());
  assert_eq!(controller.sink().get("KEY"), Some("one"));

  fs::write(&env_path, "KEY=two").unwrap();
  controller.handle_event(&HostEvent::FileSaved(env_path));

  assert_eq!(controller.sink().get("KEY"), Some("two"));
}

#[test]
fn test_rename_away_drops_variables() {
  let root = TempDir::new().unwrap();
  let env_path = root.path().join(ENV_FILE_NAME);
  let renamed_path = root.path().join(".env.bak");

  fs::write(&env_path, "KEY=value").unwrap();

  let host = LocalHost::new(vec![root.path().to_path_buf()]);
  let mut controller = RefreshController::new(host, CollectedEnvironment::new());
  assert_eq!(controller.sink().len(), 1);

  fs::rename(&env_path, &renamed_path).unwrap();
  controller.handle_event(&HostEvent::FilesRenamed(vec![RenamedFile {
    old_path: env_path,
    new_path: renamed_path,
  }]));

  assert!(controller.sink().is_empty());
}

#[test]
fn test_disabled_host_applies_nothing() {
  let root = TempDir::new().unwrap();

  fs::write(root.path().join(ENV_FILE_NAME), "KEY=value").unwrap();

  let mut host = LocalHost::new(vec![root.path().to_path_buf()]);
  host.set_enabled(false);

  let controller = RefreshController::new(host, CollectedEnvironment::new());

  assert!(controller.sink().is_empty());
}
