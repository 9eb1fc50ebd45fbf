//! Pomodoro Timer CLI
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after every 4 work phases

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use pomodoro::cli::{Cli, Commands, Display, RunArgs, SettingsAction};
use pomodoro::engine::MonotonicClock;
use pomodoro::notification::DesktopNotifier;
use pomodoro::session::{spawn_stdin_reader, Session};
use pomodoro::settings::{JsonFileStore, Settings, SettingsStore};
use pomodoro::sound::{resolve_sound, LazySoundPlayer};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with the status output on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => {
            let store = open_store(cli.settings_file)?;
            run_session(&store, &args).await?;
        }
        Some(Commands::Settings { action }) => {
            let store = open_store(cli.settings_file)?;
            manage_settings(&store, action)?;
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

/// Opens the settings file given on the command line or the default one.
fn open_store(path: Option<PathBuf>) -> Result<JsonFileStore> {
    match path {
        Some(path) => Ok(JsonFileStore::new(path)),
        None => JsonFileStore::at_default_location().context("Failed to locate the settings file"),
    }
}

/// Runs an interactive session on stdin.
async fn run_session(store: &JsonFileStore, args: &RunArgs) -> Result<()> {
    let notifier = if args.no_notify {
        DesktopNotifier::denied()
    } else {
        DesktopNotifier::new()
    };

    // `--no-sound` is a session override; `set sound on` lifts it and the
    // device opens on the next phase end.
    let player = LazySoundPlayer::new();
    let sound = resolve_sound(args.sound.as_deref());

    let mut session = Session::new(MonotonicClock, store, &notifier, &player, args.overrides())
        .with_sound(sound);

    session.run(spawn_stdin_reader()).await
}

/// Handles the `settings` subcommands.
fn manage_settings(store: &JsonFileStore, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            Display::show_settings(&store.load());
        }
        SettingsAction::Set(args) => {
            let settings = store.load().merge(&args.to_record());
            store.save(&settings).context("Failed to save settings")?;
            Display::show_settings_saved(&store.load());
        }
        SettingsAction::Reset => {
            store
                .save(&Settings::default())
                .context("Failed to reset settings")?;
            Display::show_settings_saved(&Settings::default());
        }
        SettingsAction::Path => {
            Display::show_settings_path(store.path());
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

// ============================================================================
// Tests
// ============================================================================
