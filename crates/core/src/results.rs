//! Result types for task manager operations

use std::collections::HashMap;

use colored::Color;

use crate::tasks::{TaskInvocation, TaskKind};

/// Information about one task as shown by `list`
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub kind: TaskKind,
    pub name: String,
    pub description: String,
    pub accepts_extra_args: bool,
    /// One environment per configured python version
    pub environments: Vec<String>,
}

/// Result of listing the available tasks
#[derive(Debug)]
pub struct TaskListResult {
    pub tasks: Vec<TaskInfo>,
    pub task_colors: HashMap<String, Color>,
}

/// Result of planning a run without executing it
#[derive(Debug)]
pub struct TaskPlanResult {
    pub invocations: Vec<TaskInvocation>,
    pub task_colors: HashMap<String, Color>,
}

impl From<TaskKind> for TaskInfo {
    fn from(kind: TaskKind) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            accepts_extra_args: kind.accepts_extra_args(),
            environments: Vec::new(), // Populated by caller from the python versions
        }
    }
}
