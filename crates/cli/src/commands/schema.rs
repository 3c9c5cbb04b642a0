use anyhow::Result;
use tidy_core::task_manager::TaskManager;

pub fn execute() -> Result<()> {
    println!("{}", TaskManager::config_schema()?);
    Ok(())
}
