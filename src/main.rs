//! Pomodoro Ladder CLI - an escalating Pomodoro timer
//!
//! Work periods grow step by step:
//! - 2 × (1 minute of work, 30 seconds of break)
//! - 2 × (5 minutes of work, 1 minute of break)
//! - 25 minutes of work, 5 minutes of break, with a 20 minute long break
//!   after every 4 pomodoros

use anyhow::Result;
use clap::{CommandFactory, Parser};

use pomodoro_ladder::cli::{runner, Cli, Commands, Display};
use pomodoro_ladder::engine::schedule;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they do not interleave with the status line.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => {
            let completed = runner::run(args.to_config(), args.cue_sounds()).await?;
            Display::show_run_summary(completed);
        }
        Some(Commands::Schedule(args)) => {
            let entries = schedule(usize::from(args.count));
            let result = if args.json {
                Display::show_schedule_json(&entries)
            } else {
                Display::show_schedule(&entries)
            };
            match result {
                // The reader went away (e.g. `| head`); nothing left to print
                Err(e) if Display::is_broken_pipe(&e) => {}
                other => other?,
            }
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
