//! Tidy Core Library
//!
//! This is the core library for the tidy maintenance task runner. It defines the
//! project's check tasks (formatting, import order, typing, lint and tests) and
//! everything needed to run them: dependency group resolution from the
//! project manifest, passthrough argument tokenization and isolated
//! environments.
//!
//! ## Architecture
//!
//! - [`task_manager`] - High-level interface used by the CLI
//! - [`tasks`] - Task definitions and invocation assembly
//! - [`manifest`] - Dependency group resolution from the TOML manifest
//! - [`args`] - Shell-style tokenization of passthrough arguments
//! - [`environment`] - Isolated environments tasks run in
//! - [`execution`] - Command execution and task sequencing
//! - [`configs`] - Project configuration parsing
//! - [`results`] - Result types for task manager operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tidy_core::task_manager::{TaskManager, TaskManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> tidy_core::types::TidyResult<()> {
//! let manager = TaskManager::new(TaskManagerConfig {
//!     project_root: PathBuf::from("."),
//!     config_path: None,
//! })?;
//!
//! let tasks = manager.list_tasks()?;
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod configs;
pub mod environment;
pub mod execution;
pub mod manifest;
pub mod results;
pub mod task_manager;
pub mod tasks;
pub mod types;

// Re-export the main types for easier usage
pub use task_manager::{TaskManager, TaskManagerConfig};
pub use types::{TidyError, TidyResult};
