//! Task execution module
//!
//! This module handles running external commands and sequencing task runs.

pub mod command;
pub mod runner;

pub use command::CommandExecutor;
pub use runner::TaskRunner;
