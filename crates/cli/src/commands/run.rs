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
    let label = if tasks.is_empty() {
        "all tasks".to_string()
    } else {
        tasks.join(", ")
    };
    println!("{} {}", "Running".bold(), label.cyan());

    manager
        .run(tasks, passthrough, python)
        .context("Failed to run tasks")?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        "All tasks completed successfully!".green().bold()
    );

    Ok(())
}
