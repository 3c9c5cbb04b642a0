//! Command execution utilities
//!
//! Runs one external program to completion in the project root and maps its
//! exit status onto [`TidyError`].

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::types::{TidyError, TidyResult};

/// Runs commands from the project root with a fixed set of extra environment variables
pub struct CommandExecutor<'a> {
    working_dir: &'a Path,
    envs: Vec<(String, OsString)>,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(working_dir: &'a Path) -> Self {
        Self {
            working_dir,
            envs: Vec::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Run `command`, blocking until it exits.
    ///
    /// A non-zero status becomes [`TidyError::ToolFailed`] carrying the status.
    pub fn execute_command(&self, command: &mut Command, program: &str) -> TidyResult<()> {
        command.current_dir(self.working_dir);
        for (key, value) in &self.envs {
            command.env(key, value);
        }

        debug!("Executing {:?}", command);

        let status = command.status().map_err(|source| TidyError::Spawn {
            program: program.to_string(),
            source,
        })?;

        if !status.success() {
            return Err(TidyError::ToolFailed {
                program: program.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }

    /// Run `executable` with `args`, reporting failures under `program`
    pub fn execute_command_with_args(
        &self,
        executable: &Path,
        program: &str,
        args: &[String],
    ) -> TidyResult<()> {
        let mut command = Command::new(executable);
        command.args(args);
        self.execute_command(&mut command, program)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        command
    }

    #[test]
    fn successful_command_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new(temp_dir.path());

        executor.execute_command(&mut sh("exit 0"), "sh").unwrap();
    }

    #[test]
    fn exit_status_is_propagated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new(temp_dir.path());

        let err = executor.execute_command(&mut sh("exit 3"), "black").unwrap_err();
        assert!(matches!(
            err,
            TidyError::ToolFailed { ref program, code: Some(3) } if program == "black"
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn runs_in_working_dir_with_extra_env() {
        let temp_dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new(temp_dir.path()).with_env("TIDY_MARKER", "present");

        executor
            .execute_command(&mut sh("echo \"$TIDY_MARKER\" > marker.txt"), "sh")
            .unwrap();

        let written = std::fs::read_to_string(temp_dir.path().join("marker.txt")).unwrap();
        assert_eq!(written.trim(), "present");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new(temp_dir.path());

        let err = executor
            .execute_command_with_args(
                Path::new("definitely-not-an-installed-tool"),
                "definitely-not-an-installed-tool",
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, TidyError::Spawn { .. }));
    }
}
