//! Binary entry point for prefstore.
//!
//! A thin command-line surface over the settings service, standing in for
//! the settings form: every command reads or writes fields and exits.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use prefstore::config::{BackendKind, PrefstoreConfig};
use prefstore::{
    Error, FileBackend, MemoryBackend, PreferencesBackend, Ringtone, SettingsService,
    StorageBackend,
};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Prefstore - client-side settings persistence.
#[derive(Parser)]
#[command(name = "prefstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the current settings record.
    Show,

    /// Print a single settings field.
    Get {
        /// Field name: username, is-private, ringtone, or counter.
        field: String,
    },

    /// Set a single settings field.
    Set {
        /// Field name: username, is-private, ringtone, or counter.
        field: String,

        /// New value for the field.
        value: String,
    },

    /// Increment the counter.
    Increment,

    /// Decrement the counter.
    Decrement,

    /// Reset all settings to their defaults.
    Reset,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    // Optional .env; absence is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match PrefstoreConfig::load(cli.config.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Installs the fmt subscriber; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "prefstore=debug"
    } else {
        "prefstore=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn run_command(command: Commands, config: &PrefstoreConfig) -> prefstore::Result<()> {
    if let Commands::Completions { shell } = &command {
        clap_complete::generate(*shell, &mut Cli::command(), "prefstore", &mut std::io::stdout());
        return Ok(());
    }

    let backend = open_backend(config)?;
    let mut service = SettingsService::new(backend, config.key.as_str());

    match command {
        Commands::Show => run_show(&service),
        Commands::Get { field } => run_get(&service, &field),
        Commands::Set { field, value } => run_set(&mut service, &field, &value),
        Commands::Increment => {
            service.increment_counter();
            println!("{}", service.counter());
            Ok(())
        },
        Commands::Decrement => {
            service.decrement_counter();
            println!("{}", service.counter());
            Ok(())
        },
        Commands::Reset => {
            service.reset();
            run_show(&service)
        },
        Commands::Completions { .. } => Ok(()),
    }
}

/// Opens the backend named by the configuration.
fn open_backend(config: &PrefstoreConfig) -> prefstore::Result<Box<dyn StorageBackend>> {
    Ok(match config.backend {
        BackendKind::Memory => Box::new(MemoryBackend::new()),
        BackendKind::Preferences => Box::new(PreferencesBackend::new(config.preferences_db_path())?),
        BackendKind::File => Box::new(FileBackend::new(&config.data_dir, &config.file_name)),
    })
}

fn run_show(service: &SettingsService<Box<dyn StorageBackend>>) -> prefstore::Result<()> {
    let json = serde_json::to_string_pretty(service.settings()).map_err(|e| Error::Encode {
        key: "settings".to_string(),
        cause: e.to_string(),
    })?;
    println!("{json}");
    Ok(())
}

fn run_get(
    service: &SettingsService<Box<dyn StorageBackend>>,
    field: &str,
) -> prefstore::Result<()> {
    match normalize_field(field)? {
        Field::Username => println!("{}", service.username()),
        Field::IsPrivate => println!("{}", service.is_private()),
        Field::Ringtone => println!("{}", service.ringtone()),
        Field::Counter => println!("{}", service.counter()),
    }
    Ok(())
}

fn run_set(
    service: &mut SettingsService<Box<dyn StorageBackend>>,
    field: &str,
    value: &str,
) -> prefstore::Result<()> {
    match normalize_field(field)? {
        Field::Username => service.set_username(value),
        Field::IsPrivate => {
            let is_private = value.parse::<bool>().map_err(|_| {
                Error::InvalidInput(format!("invalid boolean '{value}' (expected true or false)"))
            })?;
            service.set_private(is_private);
        },
        Field::Ringtone => {
            let ringtone = Ringtone::parse(value).ok_or_else(|| {
                let options = Ringtone::all()
                    .iter()
                    .map(Ringtone::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Error::InvalidInput(format!("unknown ringtone '{value}' (expected {options})"))
            })?;
            service.set_ringtone(ringtone);
        },
        Field::Counter => {
            let counter = value
                .parse::<i64>()
                .map_err(|_| Error::InvalidInput(format!("invalid counter '{value}'")))?;
            service.set_counter(counter);
        },
    }
    Ok(())
}

/// Settings fields addressable from the command line.
enum Field {
    Username,
    IsPrivate,
    Ringtone,
    Counter,
}

fn normalize_field(field: &str) -> prefstore::Result<Field> {
    match field.to_lowercase().as_str() {
        "username" => Ok(Field::Username),
        "is-private" | "is_private" | "private" => Ok(Field::IsPrivate),
        "ringtone" => Ok(Field::Ringtone),
        "counter" => Ok(Field::Counter),
        _ => Err(Error::InvalidInput(format!(
            "unknown field '{field}' (expected username, is-private, ringtone, or counter)"
        ))),
    }
}
