use anyhow::{Context, Result};
use colored::*;
use tidy_core::task_manager::TaskManager;
use tidy_core::tasks::PassthroughArgs;

pub fn execute(
    manager: &TaskManager,
    tasks: &[String],
    passthrough: &PassthroughArgs,
    python: Option<&str>,
) -> Result<()> {
    let plan = manager
        .plan(tasks, passthrough, python)
        .context("Failed to plan tasks")?;

    println!("{}:", "Execution order".bold());
    for (i, invocation) in plan.invocations.iter().enumerate() {
        let color = plan
            .task_colors
            .get(invocation.task.name())
            .copied()
            .unwrap_or(Color::Blue);

        println!("  {}. {}", i + 1, invocation.environment.color(color).bold());
        println!(
            "     {} {}",
            "install:".dimmed(),
            invocation.install.join(" ")
        );
        println!("     {} {}", "run:".dimmed(), invocation.command_line());
    }

    Ok(())
}
