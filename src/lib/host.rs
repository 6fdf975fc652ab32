//! Host capabilities consumed by the refresh controller.
//!
//! The editor or terminal host owns the workspace, the filesystem, the
//! configuration store and the environment collection. The controller only
//! ever talks to it through the narrow traits below, so any host (or a test
//! double) can be plugged in.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration namespace recognized by the controller.
pub const CONFIG_NAMESPACE: &str = "dotenv";

/// Option within [`CONFIG_NAMESPACE`] gating whether refreshes repopulate
/// the environment collection.
pub const OPTION_ENABLED: &str = "enabled";

/// File name tracked at each workspace root.
pub const ENV_FILE_NAME: &str = ".env";

/// A trigger event delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
  /// A configuration section changed. `section` is the most specific
  /// changed section, e.g. `"dotenv.enabled"`.
  ConfigurationChanged { section: String },
  /// The list of open workspace roots changed.
  WorkspaceFoldersChanged,
  FilesCreated(Vec<PathBuf>),
  FilesDeleted(Vec<PathBuf>),
  FilesRenamed(Vec<RenamedFile>),
  FileSaved(PathBuf),
}

/// Old and new location of a renamed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFile {
  pub old_path: PathBuf,
  pub new_path: PathBuf,
}

/// Whether a changed configuration section affects a namespace.
///
/// True when the section is the namespace itself, a child of it
/// (`"dotenv.enabled"` affects `"dotenv"`) or an ancestor of it (a change to
/// a whole parent section affects everything underneath).
pub fn affects_namespace(section: &str, namespace: &str) -> bool {
  section == namespace || is_child(section, namespace) || is_child(namespace, section)
}

fn is_child(child: &str, parent: &str) -> bool {
  child
    .strip_prefix(parent)
    .is_some_and(|rest| rest.starts_with('.'))
}

/// Read-side capabilities of the host.
pub trait Host {
  /// The currently open workspace roots, in precedence order. May be empty
  /// and may change between calls; callers must not cache the result across
  /// events.
  fn workspace_roots(&self) -> Vec<PathBuf>;

  /// Reads the full contents of a file.
  fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileReadError>;

  /// Reads a boolean option from the host configuration store.
  fn config_bool(&self, namespace: &str, option: &str, default: bool) -> bool;

  /// Surfaces an informational message to the user. Fire-and-forget.
  fn show_information_message(&self, message: &str);
}

/// Errors surfaced by [`Host::read_file`].
#[derive(Debug, thiserror::Error)]
pub enum FileReadError {
  #[error("file not found: {0}")]
  NotFound(PathBuf),
  #[error("could not read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// The host's persistent environment-variable collection.
///
/// `replace` calls are cumulative; a `clear` followed by one `replace` per
/// key establishes the collection's full state.
pub trait EnvironmentSink {
  fn clear(&mut self);
  fn replace(&mut self, key: &str, value: &str);
}

/// [`Host`] backed by the local filesystem and a fixed root list.
#[derive(Debug, Clone)]
pub struct LocalHost {
  roots: Vec<PathBuf>,
  enabled: bool,
}

impl LocalHost {
  pub fn new(roots: Vec<PathBuf>) -> Self {
    Self {
      roots,
      enabled: true,
    }
  }

  /// Toggles the `dotenv.enabled` option this host reports.
  pub fn set_enabled(&mut self, enabled: bool) {
    self.enabled = enabled;
  }
}

impl Host for LocalHost {
  fn workspace_roots(&self) -> Vec<PathBuf> {
    self.roots.clone()
  }

  fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileReadError> {
    std::fs::read(path).map_err(|source| {
      if source.kind() == io::ErrorKind::NotFound {
        FileReadError::NotFound(path.to_path_buf())
      } else {
        FileReadError::Io {
          path: path.to_path_buf(),
          source,
        }
      }
    })
  }

  fn config_bool(&self, namespace: &str, option: &str, default: bool) -> bool {
    if namespace == CONFIG_NAMESPACE && option == OPTION_ENABLED {
      self.enabled
    } else {
      default
    }
  }

  fn show_information_message(&self, message: &str) {
    eprintln!("{message}");
  }
}

/// In-memory [`EnvironmentSink`] with sorted, deterministic iteration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectedEnvironment {
  vars: BTreeMap<String, String>,
}

impl CollectedEnvironment {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.vars.get(key).map(String::as_str)
  }

  pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .vars
      .iter()
      .map(|(key, value)| (key.as_str(), value.as_str()))
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }
}

impl EnvironmentSink for CollectedEnvironment {
  fn clear(&mut self) {
    self.vars.clear();
  }

  fn replace(&mut self, key: &str, value: &str) {
    self.vars.insert(key.to_string(), value.to_string());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_affects_namespace() {
    assert!(affects_namespace("dotenv", "dotenv"));
    assert!(affects_namespace("dotenv.enabled", "dotenv"));
    assert!(affects_namespace("dotenv", "dotenv.enabled"));
    assert!(!affects_namespace("editor", "dotenv"));
    assert!(!affects_namespace("dotenvx", "dotenv"));
    assert!(!affects_namespace("dotenv", "dotenvx"));
  }

  #[test]
  fn test_local_host_reads_bytes() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(ENV_FILE_NAME);
    std::fs::write(&path, "KEY=value\n").unwrap();

    let host = LocalHost::new(vec![dir.path().to_path_buf()]);
    assert_eq!(host.read_file(&path).unwrap(), b"KEY=value\n");
  }

  #[test]
  fn test_local_host_missing_file_is_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(ENV_FILE_NAME);

    let host = LocalHost::new(vec![dir.path().to_path_buf()]);
    match host.read_file(&path) {
      Err(FileReadError::NotFound(missing)) => assert_eq!(missing, path),
      other => panic!("Expected NotFound, got {:?}", other),
    }
  }

  #[test]
  fn test_local_host_config() {
    let mut host = LocalHost::new(Vec::new());

    assert!(host.config_bool(CONFIG_NAMESPACE, OPTION_ENABLED, true));
    host.set_enabled(false);
    assert!(!host.config_bool(CONFIG_NAMESPACE, OPTION_ENABLED, true));

    // Unknown options fall back to the caller's default.
    assert!(host.config_bool(CONFIG_NAMESPACE, "telemetry", true));
    assert!(!host.config_bool("editor", OPTION_ENABLED, false));
  }

  #[test]
  fn test_collected_environment_replace_after_clear() {
    let mut env = CollectedEnvironment::new();

    env.replace("STALE", "old");
    env.clear();
    env.replace("FRESH", "new");

    assert_eq!(env.len(), 1);
    assert_eq!(env.get("STALE"), None);
    assert_eq!(env.get("FRESH"), Some("new"));
  }
}
