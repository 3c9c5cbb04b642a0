//! High-level task runner
//!
//! Plans each requested task for each selected python version, then sets up
//! its environment and runs it. Everything is sequential and the first failure
//! stops the run.

use colored::*;

use crate::environment::EnvironmentBackend;
use crate::tasks::{get_task_color, plan_task, TaskContext, TaskInvocation, TaskKind};
use crate::types::TidyResult;

/// Coordinates planning and execution of tasks against a backend
pub struct TaskRunner<'a> {
    context: TaskContext<'a>,
    backend: &'a dyn EnvironmentBackend,
}

impl<'a> TaskRunner<'a> {
    pub fn new(context: TaskContext<'a>, backend: &'a dyn EnvironmentBackend) -> Self {
        Self { context, backend }
    }

    /// Run every task on every python version, stopping at the first failure
    pub fn run_tasks(&self, tasks: &[TaskKind], pythons: &[String]) -> TidyResult<()> {
        for &task in tasks {
            for python in pythons {
                // Planned right before running so the manifest is read per task
                let invocation = plan_task(task, python, &self.context)?;
                self.run_invocation(&invocation)?;
            }
        }
        Ok(())
    }

    fn run_invocation(&self, invocation: &TaskInvocation) -> TidyResult<()> {
        let task_color = get_task_color(invocation.task.name());

        println!();
        println!(
            "┌─ {} {}",
            format!("Running task '{}'", invocation.task).bold(),
            format!("on python {}", invocation.python).color(task_color).bold()
        );
        println!("└─ {} {}", "Command:".bright_black(), invocation.command_line());

        self.backend.setup(invocation)?;
        self.backend.run(invocation)?;

        println!(
            "{} {}",
            "✓".green().bold(),
            format!("Completed {}", invocation.environment).color(task_color)
        );
        Ok(())
    }
}
