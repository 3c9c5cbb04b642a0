//! Isolated environments for task execution
//!
//! [`EnvironmentBackend`] is the seam between task planning and the outside
//! world: it prepares an environment holding the invocation's install list and
//! runs the invocation's program inside it. [`VirtualEnvBackend`] delegates to
//! `python -m venv` and `pip`.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::configs::project::ProjectConfig;
use crate::execution::command::CommandExecutor;
use crate::tasks::TaskInvocation;
use crate::types::{TidyError, TidyResult};

pub trait EnvironmentBackend {
    /// Create the environment for `invocation` and install its packages
    fn setup(&self, invocation: &TaskInvocation) -> TidyResult<()>;

    /// Run the invocation's program inside the prepared environment
    fn run(&self, invocation: &TaskInvocation) -> TidyResult<()>;
}

pub struct VirtualEnvBackend {
    project_root: PathBuf,
    env_root: PathBuf,
    reuse: bool,
    constraints: Option<PathBuf>,
}

impl VirtualEnvBackend {
    pub fn new(project_root: &Path, config: &ProjectConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            env_root: project_root.join(&config.env_dir),
            reuse: config.reuse_environments,
            constraints: config
                .constraints
                .as_ref()
                .map(|path| project_root.join(path)),
        }
    }

    pub fn environment_dir(&self, invocation: &TaskInvocation) -> PathBuf {
        self.env_root.join(&invocation.environment)
    }

    fn bin_dir(env_dir: &Path) -> PathBuf {
        if cfg!(windows) {
            env_dir.join("Scripts")
        } else {
            env_dir.join("bin")
        }
    }

    fn executable(env_dir: &Path, name: &str) -> PathBuf {
        let file_name = if cfg!(windows) {
            format!("{}.exe", name)
        } else {
            name.to_string()
        };
        Self::bin_dir(env_dir).join(file_name)
    }

    fn create(&self, env_dir: &Path, python: &str) -> TidyResult<()> {
        if env_dir.exists() {
            if self.reuse {
                info!("Reusing environment {}", env_dir.display());
                return Ok(());
            }
            std::fs::remove_dir_all(env_dir).map_err(|e| {
                TidyError::EnvironmentSetup(format!(
                    "Failed to remove stale environment {}: {}",
                    env_dir.display(),
                    e
                ))
            })?;
        }

        info!("Creating environment {} with python {}", env_dir.display(), python);

        let interpreter = format!("python{}", python);
        let args = vec![
            "-m".to_string(),
            "venv".to_string(),
            env_dir.display().to_string(),
        ];
        CommandExecutor::new(&self.project_root)
            .execute_command_with_args(Path::new(&interpreter), &interpreter, &args)
            .map_err(|e| {
                if let Err(remove_err) = std::fs::remove_dir_all(env_dir) {
                    if env_dir.exists() {
                        warn!(
                            "Failed to clean up {}: {}",
                            env_dir.display(),
                            remove_err
                        );
                    }
                }
                TidyError::EnvironmentSetup(format!(
                    "Failed to create environment {}: {}",
                    env_dir.display(),
                    e
                ))
            })
    }

    fn install(&self, env_dir: &Path, packages: &[String]) -> TidyResult<()> {
        if packages.is_empty() {
            return Ok(());
        }

        info!("Installing {} into {}", packages.join(" "), env_dir.display());

        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        if let Some(constraints) = &self.constraints {
            args.push("-c".to_string());
            args.push(constraints.display().to_string());
        }
        args.extend(packages.iter().cloned());

        let python = Self::executable(env_dir, "python");
        self.executor(env_dir)
            .execute_command_with_args(&python, "pip", &args)
            .map_err(|e| {
                TidyError::EnvironmentSetup(format!(
                    "Failed to install packages into {}: {}",
                    env_dir.display(),
                    e
                ))
            })
    }

    /// Executor with the environment activated the way `activate` would
    fn executor(&self, env_dir: &Path) -> CommandExecutor<'_> {
        let bin_dir = Self::bin_dir(env_dir);
        let mut paths = vec![bin_dir];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        let path = std::env::join_paths(paths)
            .unwrap_or_else(|_| Self::bin_dir(env_dir).into_os_string());

        CommandExecutor::new(&self.project_root)
            .with_env("VIRTUAL_ENV", env_dir.as_os_str())
            .with_env("PATH", path)
    }
}

impl EnvironmentBackend for VirtualEnvBackend {
    fn setup(&self, invocation: &TaskInvocation) -> TidyResult<()> {
        let env_dir = self.environment_dir(invocation);
        self.create(&env_dir, &invocation.python)?;
        self.install(&env_dir, &invocation.install)
    }

    fn run(&self, invocation: &TaskInvocation) -> TidyResult<()> {
        let env_dir = self.environment_dir(invocation);
        let installed = Self::executable(&env_dir, &invocation.program);
        let executable = if installed.exists() {
            installed
        } else {
            PathBuf::from(&invocation.program)
        };

        self.executor(&env_dir)
            .execute_command_with_args(&executable, &invocation.program, &invocation.args)
    }
}
