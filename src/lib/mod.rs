//! Terminal environment injection from `.env` files.
//!
//! This library keeps a host's environment-variable collection in sync with
//! the `.env` files of the open workspace roots. A [`refresh::RefreshController`]
//! listens for host events (file saves, creates, deletes, renames, workspace
//! folder changes, configuration changes) and recomputes the full collection
//! whenever a tracked `.env` file may have changed.
//!
//! # Features
//!
//! - **Forgiving parsing**: lines that are not `KEY=value` assignments are
//!   skipped, never an error
//! - **Multi-root merging**: one `.env` per workspace root, later roots
//!   overriding earlier ones
//! - **Host-agnostic**: the workspace, filesystem, configuration store and
//!   environment collection are reached through narrow traits in [`host`]
//! - **Optional tracing**: detailed logging when the `tracing` feature is
//!   enabled
//!
//! # Example
//!
//! ```rust,no_run
//! use env_refresh::host::{CollectedEnvironment, LocalHost};
//! use env_refresh::refresh::RefreshController;
//! use std::path::PathBuf;
//!
//! let host = LocalHost::new(vec![PathBuf::from(".")]);
//! let controller = RefreshController::new(host, CollectedEnvironment::new());
//!
//! for (key, value) in controller.sink().vars() {
//!   println!("{key}={value}");
//! }
//! ```

pub mod host;
pub mod parse;
pub mod refresh;
