//! Event-driven refresh of the host environment collection.
//!
//! This module decides *when* to recompute the injected environment and
//! performs the recomputation.
//!
//! # Refresh cycle
//!
//! Every refresh rebuilds the full state from scratch:
//! 1. Clear the environment collection
//! 2. Stop early when the `dotenv.enabled` option is off
//! 3. Notify the user when no workspace root is open (and carry on)
//! 4. Read `<root>/.env` for every current root; a root whose file cannot
//!    be read contributes nothing
//! 5. Parse each file and merge in root order, later roots winning
//! 6. Replace one variable per merged entry
//!
//! # Examples
//!
//! ```rust,no_run
//! use env_refresh::host::{CollectedEnvironment, HostEvent, LocalHost};
//! use env_refresh::refresh::RefreshController;
//! use std::path::PathBuf;
//!
//! let host = LocalHost::new(vec![PathBuf::from(".")]);
//! let mut controller = RefreshController::new(host, CollectedEnvironment::new());
//!
//! controller.handle_event(&HostEvent::FileSaved(PathBuf::from("./.env")));
//! ```

use std::path::PathBuf;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::host::{
  CONFIG_NAMESPACE, ENV_FILE_NAME, EnvironmentSink, Host, HostEvent, OPTION_ENABLED,
  affects_namespace,
};
use crate::parse::EnvMapping;

const NO_WORKSPACE_MESSAGE: &str = "No folder or workspace opened";

/// Watches host events and keeps an [`EnvironmentSink`] in sync with the
/// `.env` files of the current workspace roots.
///
/// A controller performs one refresh at construction time and one more for
/// every relevant event handed to [`handle_event`](Self::handle_event).
/// Refreshes always re-query the host for its current roots, so a refresh
/// triggered after a folder change never acts on a stale list.
pub struct RefreshController<H: Host, S: EnvironmentSink> {
  host: H,
  sink: S,
}

impl<H: Host, S: EnvironmentSink> RefreshController<H, S> {
  /// Creates the controller and immediately performs the first refresh.
  pub fn new(host: H, sink: S) -> Self {
    let mut controller = Self { host, sink };
    controller.refresh();
    controller
  }

  pub fn host(&self) -> &H {
    &self.host
  }

  pub fn sink(&self) -> &S {
    &self.sink
  }

  /// Reacts to a host event, refreshing when the event is relevant.
  ///
  /// Configuration changes only count when they affect the `dotenv`
  /// namespace. File events only count when they touch a tracked
  /// `<root>/.env` path; renames are checked against both their old and new
  /// location, since either side can be a tracked file.
  pub fn handle_event(&mut self, event: &HostEvent) {
    match event {
      HostEvent::ConfigurationChanged { section } => {
        if affects_namespace(section, CONFIG_NAMESPACE) {
          self.refresh();
        }
      }
      HostEvent::WorkspaceFoldersChanged => self.refresh(),
      HostEvent::FilesCreated(paths) | HostEvent::FilesDeleted(paths) => {
        self.check_changed_files(paths);
      }
      HostEvent::FilesRenamed(renames) => {
        let changed: Vec<PathBuf> = renames
          .iter()
          .flat_map(|rename| [rename.old_path.clone(), rename.new_path.clone()])
          .collect();
        self.check_changed_files(&changed);
      }
      HostEvent::FileSaved(path) => self.check_changed_files(std::slice::from_ref(path)),
    }
  }

  /// Drains `events` until every sender is dropped, handling each event in
  /// delivery order.
  ///
  /// A refresh runs to completion before the next event is examined, so
  /// refreshes are never concurrent. Returning leaves the last applied
  /// state in the sink untouched.
  pub fn run(&mut self, events: &flume::Receiver<HostEvent>) {
    for event in events.iter() {
      self.handle_event(&event);
    }
  }

  /// Refreshes once when any changed path is a tracked `.env` file.
  fn check_changed_files(&mut self, changed: &[PathBuf]) {
    for root in self.host.workspace_roots() {
      let tracked = root.join(ENV_FILE_NAME);

      if changed.contains(&tracked) {
        self.refresh();
        return;
      }
    }
  }

  /// Recomputes the environment collection from the current workspace roots.
  pub fn refresh(&mut self) {
    #[cfg(feature = "tracing")]
    info!("Refreshing environment collection");

    self.sink.clear();

    if !self.host.config_bool(CONFIG_NAMESPACE, OPTION_ENABLED, true) {
      #[cfg(feature = "tracing")]
      debug!("Refresh disabled by configuration, collection left cleared");
      return;
    }

    let roots = self.host.workspace_roots();

    if roots.is_empty() {
      self.host.show_information_message(NO_WORKSPACE_MESSAGE);
    }

    let mut merged = EnvMapping::default();

    for root in &roots {
      let path = root.join(ENV_FILE_NAME);

      match self.host.read_file(&path) {
        Ok(bytes) => merged.merge(EnvMapping::from_bytes(&bytes)),
        Err(_err) => {
          #[cfg(feature = "tracing")]
          debug!("Could not load {}: {}", path.display(), _err);
        }
      }
    }

    #[cfg(feature = "tracing")]
    debug!(
      "Applying {} variables from {} workspace roots",
      merged.len(),
      roots.len()
    );

    for (key, value) in merged.iter() {
      self.sink.replace(key, value);
    }
  }
}
