//! Task definitions and color management
//!
//! Every task installs a package list into its own environment and runs a
//! single external tool. This module assembles both lists; running them is
//! left to [`crate::execution`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use colored::*;
use tracing::debug;

use crate::args::split_extra_args;
use crate::configs::project::ProjectConfig;
use crate::manifest::{resolve_dependency_group, resolve_dependency_groups, GroupLayout};
use crate::types::{TidyError, TidyResult};

/// Installs the project itself alongside its dependency groups
const PROJECT_PACKAGE: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Black,
    Isort,
    Mypy,
    Pylint,
    Pytest,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Black,
        TaskKind::Isort,
        TaskKind::Mypy,
        TaskKind::Pylint,
        TaskKind::Pytest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Black => "black",
            TaskKind::Isort => "isort",
            TaskKind::Mypy => "mypy",
            TaskKind::Pylint => "pylint",
            TaskKind::Pytest => "pytest",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TaskKind::Black => "Runs black in check mode to ensure all files are formatted",
            TaskKind::Isort => "Runs isort in check mode to ensure all files have sorted imports",
            TaskKind::Mypy => "Runs mypy to validate typing is correct",
            TaskKind::Pylint => "Runs pylint to validate there are no errors detected",
            TaskKind::Pytest => "Runs the pytest suite",
        }
    }

    /// Whether the task forwards a user-supplied argument string to its tool
    pub fn accepts_extra_args(self) -> bool {
        matches!(self, TaskKind::Mypy | TaskKind::Pylint)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskKind {
    type Err = TidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TidyError::UnknownTask(s.to_string()))
    }
}

/// Free-form argument strings forwarded to the tools that accept them
#[derive(Debug, Clone, Default)]
pub struct PassthroughArgs {
    pub mypy: String,
    pub pylint: String,
}

impl PassthroughArgs {
    pub fn for_task(&self, kind: TaskKind) -> &str {
        match kind {
            TaskKind::Mypy => &self.mypy,
            TaskKind::Pylint => &self.pylint,
            _ => "",
        }
    }
}

/// Everything needed to run one task once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInvocation {
    pub task: TaskKind,
    pub python: String,
    /// Environment name, `<task>-<python>`
    pub environment: String,
    pub install: Vec<String>,
    pub program: String,
    pub args: Vec<String>,
}

impl TaskInvocation {
    /// The command line as it would be typed in a shell
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| shlex::try_quote(part).map_or_else(|_| part.to_string(), |q| q.into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Project-wide inputs to task planning
pub struct TaskContext<'a> {
    pub project_root: &'a Path,
    pub config: &'a ProjectConfig,
    pub passthrough: &'a PassthroughArgs,
}

impl TaskContext<'_> {
    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.config.manifest)
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.tests_dir)
    }

    /// Source tree, test tree and task file, in that order
    pub fn check_targets(&self) -> Vec<String> {
        [
            &self.config.source_dir,
            &self.config.tests_dir,
            &self.config.task_file,
        ]
        .iter()
        .map(|relative| self.project_root.join(relative).display().to_string())
        .collect()
    }
}

/// Assemble the install list and command line for `kind` on `python`.
///
/// Group resolution and argument tokenization both happen here, so any
/// configuration or quoting error surfaces before an environment is touched.
pub fn plan_task(kind: TaskKind, python: &str, context: &TaskContext) -> TidyResult<TaskInvocation> {
    let layout = GroupLayout::from_config(context.config);
    let manifest_path = context.manifest_path();
    let extra_args = split_extra_args(context.passthrough.for_task(kind))?;

    let (install, args) = match kind {
        TaskKind::Black | TaskKind::Isort => {
            let mut args = vec!["--check".to_string()];
            args.extend(context.check_targets());
            (vec![kind.name().to_string()], args)
        }
        TaskKind::Mypy | TaskKind::Pylint => {
            let mut install = vec![kind.name().to_string()];
            install.extend(resolve_dependency_groups(
                &manifest_path,
                &layout,
                &context.config.analysis_groups,
            )?);
            install.push(PROJECT_PACKAGE.to_string());

            let mut args = Vec::new();
            if kind == TaskKind::Pylint {
                args.push("--recursive=y".to_string());
            }
            args.extend(context.check_targets());
            args.extend(extra_args);
            (install, args)
        }
        TaskKind::Pytest => {
            let mut install =
                resolve_dependency_group(&manifest_path, &layout, &context.config.test_group)?;
            install.push(PROJECT_PACKAGE.to_string());
            (install, vec![context.tests_dir().display().to_string()])
        }
    };

    let invocation = TaskInvocation {
        task: kind,
        python: python.to_string(),
        environment: format!("{}-{}", kind.name(), python),
        install,
        program: kind.name().to_string(),
        args,
    };
    debug!("Planned {}: {:?}", invocation.environment, invocation);

    Ok(invocation)
}

/// Plan every task on every python version, tasks outermost
pub fn plan_tasks(
    tasks: &[TaskKind],
    pythons: &[String],
    context: &TaskContext,
) -> TidyResult<Vec<TaskInvocation>> {
    let mut invocations = Vec::new();
    for &task in tasks {
        for python in pythons {
            invocations.push(plan_task(task, python, context)?);
        }
    }
    Ok(invocations)
}

/// Get a consistent color for a task name
pub fn get_task_color(task_name: &str) -> Color {
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    // Label colors, kept clear of the red/yellow/green used for status lines
    let colors = [
        Color::TrueColor {
            r: 147,
            g: 112,
            b: 219,
        },
        Color::TrueColor {
            r: 64,
            g: 224,
            b: 208,
        },
        Color::TrueColor {
            r: 255,
            g: 140,
            b: 0,
        },
        Color::TrueColor {
            r: 199,
            g: 21,
            b: 133,
        },
        Color::TrueColor {
            r: 72,
            g: 209,
            b: 204,
        },
        Color::TrueColor {
            r: 138,
            g: 43,
            b: 226,
        },
    ];

    colors[(hash % colors.len() as u64) as usize]
}
