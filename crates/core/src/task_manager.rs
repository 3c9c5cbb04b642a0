//! High-level task management interface
//!
//! This module provides the [`TaskManager`] which serves as the primary interface
//! for the CLI. It loads the project configuration once and exposes listing,
//! planning and running of the maintenance tasks.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tidy_core::task_manager::{TaskManager, TaskManagerConfig};
//! use tidy_core::tasks::PassthroughArgs;
//! use std::path::PathBuf;
//!
//! # fn example() -> tidy_core::types::TidyResult<()> {
//! let manager = TaskManager::new(TaskManagerConfig {
//!     project_root: PathBuf::from("."),
//!     config_path: None,
//! })?;
//!
//! // Show what `pytest` would install and run
//! let plan = manager.plan(&["pytest".to_string()], &PassthroughArgs::default(), None)?;
//!
//! // Run the type checker in strict mode
//! let passthrough = PassthroughArgs {
//!     mypy: "--strict".to_string(),
//!     ..Default::default()
//! };
//! manager.run(&["mypy".to_string()], &passthrough, None)?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use colored::Color;

use crate::configs::project::{load_project_config, ProjectConfig};
use crate::environment::{EnvironmentBackend, VirtualEnvBackend};
use crate::execution::runner::TaskRunner;
use crate::results::{TaskInfo, TaskListResult, TaskPlanResult};
use crate::tasks::{get_task_color, plan_tasks, PassthroughArgs, TaskContext, TaskKind};
use crate::types::{TidyError, TidyResult};

/// High-level manager for the project's maintenance tasks
pub struct TaskManager {
    pub project_root: PathBuf,
    pub config: ProjectConfig,
}

/// Configuration for initializing a task manager
pub struct TaskManagerConfig {
    pub project_root: PathBuf,
    /// Explicit config file; `tidy.yml` in the project root when absent
    pub config_path: Option<PathBuf>,
}

impl TaskManager {
    pub fn new(config: TaskManagerConfig) -> TidyResult<Self> {
        // Children run with the root as working directory, so every path handed
        // to them must not depend on tidy's own working directory
        let project_root = std::path::absolute(&config.project_root).map_err(|e| {
            TidyError::Config(format!(
                "Failed to resolve project root {}: {}",
                config.project_root.display(),
                e
            ))
        })?;
        let project_config = load_project_config(&project_root, config.config_path.as_deref())?;

        Ok(Self {
            project_root,
            config: project_config,
        })
    }

    /// List every task with the environments it would use
    pub fn list_tasks(&self) -> TidyResult<TaskListResult> {
        let tasks = TaskKind::ALL
            .into_iter()
            .map(|kind| {
                let mut info = TaskInfo::from(kind);
                info.environments = self
                    .config
                    .python_versions
                    .iter()
                    .map(|python| format!("{}-{}", kind.name(), python))
                    .collect();
                info
            })
            .collect();

        Ok(TaskListResult {
            tasks,
            task_colors: Self::task_colors(&TaskKind::ALL),
        })
    }

    /// Plan a run without touching any environment
    pub fn plan(
        &self,
        task_names: &[String],
        passthrough: &PassthroughArgs,
        python: Option<&str>,
    ) -> TidyResult<TaskPlanResult> {
        let tasks = Self::parse_tasks(task_names)?;
        let pythons = self.select_pythons(python)?;

        let invocations = plan_tasks(&tasks, &pythons, &self.context(passthrough))?;

        Ok(TaskPlanResult {
            invocations,
            task_colors: Self::task_colors(&tasks),
        })
    }

    /// Run tasks in isolated virtual environments
    pub fn run(
        &self,
        task_names: &[String],
        passthrough: &PassthroughArgs,
        python: Option<&str>,
    ) -> TidyResult<()> {
        let backend = VirtualEnvBackend::new(&self.project_root, &self.config);
        self.run_with(&backend, task_names, passthrough, python)
    }

    /// Run tasks against the given backend
    pub fn run_with(
        &self,
        backend: &dyn EnvironmentBackend,
        task_names: &[String],
        passthrough: &PassthroughArgs,
        python: Option<&str>,
    ) -> TidyResult<()> {
        let tasks = Self::parse_tasks(task_names)?;
        let pythons = self.select_pythons(python)?;

        TaskRunner::new(self.context(passthrough), backend).run_tasks(&tasks, &pythons)
    }

    /// JSON schema of the project configuration file
    pub fn config_schema() -> TidyResult<String> {
        let schema = schemars::schema_for!(ProjectConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    // Private helper methods

    fn context<'a>(&'a self, passthrough: &'a PassthroughArgs) -> TaskContext<'a> {
        TaskContext {
            project_root: &self.project_root,
            config: &self.config,
            passthrough,
        }
    }

    /// No names selects every task
    fn parse_tasks(task_names: &[String]) -> TidyResult<Vec<TaskKind>> {
        if task_names.is_empty() {
            return Ok(TaskKind::ALL.to_vec());
        }
        task_names.iter().map(|name| name.parse()).collect()
    }

    fn select_pythons(&self, python: Option<&str>) -> TidyResult<Vec<String>> {
        match python {
            None => Ok(self.config.python_versions.clone()),
            Some(version) if self.config.python_versions.iter().any(|v| v == version) => {
                Ok(vec![version.to_string()])
            }
            Some(version) => Err(TidyError::Config(format!(
                "Python {} is not configured (available: {})",
                version,
                self.config.python_versions.join(", ")
            ))),
        }
    }

    fn task_colors(tasks: &[TaskKind]) -> HashMap<String, Color> {
        tasks
            .iter()
            .map(|kind| (kind.name().to_string(), get_task_color(kind.name())))
            .collect()
    }
}
