use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::*;
use tidy_core::task_manager::{TaskManager, TaskManagerConfig};
use tidy_core::tasks::PassthroughArgs;
use tidy_core::TidyError;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;

/// Tidy - formatting, typing, lint and test checks for a Python project
#[derive(Parser)]
#[command(name = "tidy")]
#[command(about = "Runs a Python project's maintenance checks in isolated environments")]
#[command(version)]
struct Cli {
    /// Path to the project root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    /// Configuration file (defaults to tidy.yml in the project root)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available tasks
    List,
    /// Show what tasks would install and run without running them
    Plan(TaskArgs),
    /// Run tasks
    Run(TaskArgs),
    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(Args, Debug)]
struct TaskArgs {
    /// Tasks to run, in order (every task when omitted)
    tasks: Vec<String>,

    /// Only use this python version
    #[arg(long)]
    python: Option<String>,

    /// Extra args passed to mypy
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    mypy_extra_args: String,

    /// Extra args passed to pylint
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pylint_extra_args: String,
}

impl TaskArgs {
    fn passthrough(&self) -> PassthroughArgs {
        PassthroughArgs {
            mypy: self.mypy_extra_args.clone(),
            pylint: self.pylint_extra_args.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("TIDY_LOG")
        .from_env_lossy();

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init()
    {
        eprintln!("{} Failed to initialize logging: {}", "Warning:".yellow().bold(), e);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Only commands that need the project load its configuration
    let load_manager = move || {
        TaskManager::new(TaskManagerConfig {
            project_root: cli.project,
            config_path: cli.config,
        })
        .context("Failed to load project configuration")
    };

    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::List => commands::list::execute(&load_manager()?),
        Commands::Plan(args) => commands::plan::execute(
            &load_manager()?,
            &args.tasks,
            &args.passthrough(),
            args.python.as_deref(),
        ),
        Commands::Run(args) => commands::run::execute(
            &load_manager()?,
            &args.tasks,
            &args.passthrough(),
            args.python.as_deref(),
        ),
        Commands::Schema => commands::schema::execute(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        // A failing tool's status is passed through as tidy's own
        let code = e
            .downcast_ref::<TidyError>()
            .map_or(1, TidyError::exit_code);
        process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_several_tasks_and_extra_args() {
        let cli = Cli::try_parse_from([
            "tidy",
            "run",
            "mypy",
            "pylint",
            "--mypy-extra-args",
            "--strict",
            "--pylint-extra-args=--disable C0114",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.tasks, vec!["mypy", "pylint"]);
        assert_eq!(args.mypy_extra_args, "--strict");
        assert_eq!(args.pylint_extra_args, "--disable C0114");
        assert_eq!(args.python, None);
    }

    #[test]
    fn extra_args_default_to_empty() {
        let cli = Cli::try_parse_from(["tidy", "plan", "pytest", "--python", "3.12"]).unwrap();

        let Commands::Plan(args) = cli.command else {
            panic!("expected plan command");
        };
        let passthrough = args.passthrough();
        assert_eq!(passthrough.mypy, "");
        assert_eq!(passthrough.pylint, "");
        assert_eq!(args.python.as_deref(), Some("3.12"));
    }

    #[test]
    fn global_options_are_parsed() {
        let cli = Cli::try_parse_from(["tidy", "-p", "/srv/app", "-c", "ci.yml", "list", "-vv"])
            .unwrap();

        assert_eq!(cli.project, PathBuf::from("/srv/app"));
        assert_eq!(cli.config, Some(PathBuf::from("ci.yml")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn schema_does_not_need_a_project() {
        let missing = std::env::temp_dir()
            .join("tidy-no-such-project")
            .display()
            .to_string();
        let cli = Cli::try_parse_from([
            "tidy",
            "-p",
            missing.as_str(),
            "-c",
            "absent.yml",
            "schema",
        ])
        .unwrap();

        run(cli).unwrap();
    }

    #[test]
    fn missing_config_fails_commands_that_load_the_project() {
        let missing = std::env::temp_dir()
            .join("tidy-no-such-project")
            .display()
            .to_string();
        let cli = Cli::try_parse_from([
            "tidy",
            "-p",
            missing.as_str(),
            "-c",
            "absent.yml",
            "list",
        ])
        .unwrap();

        let err = run(cli).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load project configuration"));
    }

    #[test]
    fn repeated_logging_setup_does_not_panic() {
        init_logging(0);
        init_logging(1);
    }

    #[test]
    fn tool_exit_code_survives_context() {
        let err = anyhow::Error::new(TidyError::ToolFailed {
            program: "pytest".to_string(),
            code: Some(5),
        })
        .context("Failed to run tasks");

        let code = err
            .downcast_ref::<TidyError>()
            .map_or(1, TidyError::exit_code);
        assert_eq!(code, 5);
    }
}
