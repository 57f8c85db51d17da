// Rust guideline compliant 2026-10-12

//! Flowpath CLI Application
//!
//! Command-line interface for moving Jira issues through their workflows.

use clap::Parser;
use flowpath_app::{AppError, ErrorEnvelope, Workspace};
use flowpath_cli::commands::{self, transition::TransitionArgs};
use flowpath_cli::{create_formatter, logging, should_use_color, OutputFormatter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flowpath",
    version,
    about = "Flowpath: move Jira issues to any status along the shortest route",
    long_about = "Flowpath finds the shortest sequence of workflow transitions that takes an issue from its current status to a target status, and executes it one transition at a time. Workflows can be discovered and cached for offline inspection.",
    after_help = "Examples:\n  flowpath transitions PROJ-123\n  flowpath transition PROJ-123 Done --comment\n  flowpath transition PROJ-123 \"In Review\" --dry-run\n  flowpath discover PROJ-999 --save\n  flowpath workflows show Task --dot\n  flowpath workflows path Task Open Done\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration directory (default: $FLOWPATH_HOME or ./.flowpath)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Plain,
}

impl From<FormatArg> for flowpath_core::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => flowpath_core::OutputFormat::Json,
            FormatArg::Table => flowpath_core::OutputFormat::Table,
            FormatArg::Plain => flowpath_core::OutputFormat::Plain,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List the transitions available on an issue
    Transitions {
        /// Issue key
        key: String,
    },

    /// Move an issue to a target status
    Transition {
        /// Issue key
        key: String,

        /// Target status name, or part of a transition name
        target: String,

        /// Post an audit comment listing the transitions applied
        #[arg(long)]
        comment: bool,

        /// Plan the route without moving the issue
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of transitions to execute
        #[arg(long)]
        max_steps: Option<usize>,
    },

    /// Discover an issue type's workflow by walking a probe issue
    Discover {
        /// Probe issue key (the issue will be moved)
        key: String,

        /// Save the workflow to the cache if discovery completes
        #[arg(long)]
        save: bool,

        /// Save even if the hop limit or a dead end stopped discovery
        #[arg(long)]
        force: bool,

        /// Maximum number of transitions to execute
        #[arg(long)]
        max_hops: Option<usize>,
    },

    /// Inspect cached workflows
    Workflows {
        #[command(subcommand)]
        action: WorkflowAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum WorkflowAction {
    /// List cached workflows
    List,

    /// Show a cached workflow
    Show {
        /// Issue type name
        issue_type: String,

        /// Print Graphviz DOT instead
        #[arg(long)]
        dot: bool,
    },

    /// Delete a cached workflow
    Delete {
        /// Issue type name
        issue_type: String,
    },

    /// Shortest path between two statuses of a cached workflow
    Path {
        /// Issue type name
        issue_type: String,

        /// Starting status
        from: String,

        /// Target status
        to: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let workspace = Workspace::resolve(cli.config_dir.as_deref());
    let config = workspace.as_ref().ok().map(Workspace::config);

    logging::init(
        cli.verbose,
        config.map(|c| c.log_level.as_str()).unwrap_or("warn"),
    );

    let format = match (cli.format, cli.json) {
        (Some(format), _) => format.into(),
        (None, true) => flowpath_core::OutputFormat::Json,
        (None, false) => config.map(|c| c.output_format).unwrap_or_default(),
    };
    let use_color = !cli.no_color && should_use_color();
    let formatter = create_formatter(format, use_color);

    let result = workspace
        .map_err(anyhow::Error::from)
        .and_then(|workspace| run(cli.command, &workspace, formatter.as_ref()));

    if let Err(err) = result {
        report(&err, format, formatter.as_ref());
        std::process::exit(1);
    }
}

fn run(
    command: Option<Commands>,
    workspace: &Workspace,
    formatter: &dyn OutputFormatter,
) -> anyhow::Result<()> {
    match command {
        Some(Commands::Transitions { key }) => {
            commands::transitions::execute(workspace, &key, formatter)?;
        }
        Some(Commands::Transition {
            key,
            target,
            comment,
            dry_run,
            max_steps,
        }) => {
            let args = TransitionArgs {
                comment,
                dry_run,
                max_steps,
            };
            commands::transition::execute(workspace, &key, &target, &args, formatter)?;
        }
        Some(Commands::Discover {
            key,
            save,
            force,
            max_hops,
        }) => {
            commands::discover::execute(workspace, &key, save, force, max_hops, formatter)?;
        }
        Some(Commands::Workflows { action }) => match action {
            WorkflowAction::List => commands::workflows::list(workspace, formatter)?,
            WorkflowAction::Show { issue_type, dot } => {
                commands::workflows::show(workspace, &issue_type, dot, formatter)?;
            }
            WorkflowAction::Delete { issue_type } => {
                commands::workflows::delete(workspace, &issue_type, formatter)?;
            }
            WorkflowAction::Path {
                issue_type,
                from,
                to,
            } => {
                commands::workflows::path(workspace, &issue_type, &from, &to, formatter)?;
            }
        },
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Prints an error: JSON envelopes to stdout, everything else to stderr.
fn report(
    err: &anyhow::Error,
    format: flowpath_core::OutputFormat,
    formatter: &dyn OutputFormatter,
) {
    let Some(app) = err.downcast_ref::<AppError>() else {
        eprintln!("Error: {:#}", err);
        return;
    };

    let rendered = formatter.format_error(&ErrorEnvelope::from_error(app));
    if format == flowpath_core::OutputFormat::Json {
        println!("{}", rendered);
    } else {
        eprintln!("{}", rendered);
    }
}
