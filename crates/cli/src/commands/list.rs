use anyhow::Result;
use colored::*;
use tidy_core::task_manager::TaskManager;

pub fn execute(manager: &TaskManager) -> Result<()> {
    let result = manager.list_tasks()?;

    println!("{}", "Tasks".bold().underline());

    for task in &result.tasks {
        let color = result
            .task_colors
            .get(&task.name)
            .copied()
            .unwrap_or(Color::Blue);

        let extra = if task.accepts_extra_args {
            format!(" [--{}-extra-args]", task.name).green().to_string()
        } else {
            String::new()
        };

        println!("{}{} {}", task.name.color(color).bold(), extra, task.description.dimmed());
        println!(
            "  {} {}",
            "environments:".dimmed(),
            task.environments.join(", ")
        );
    }

    Ok(())
}
