//! Fairway - practice-range test log
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fairway::cli::bag::{BagAction, BagCommand, BagOptions};
use fairway::cli::clubs::{ClubsCommand, ClubsOptions};
use fairway::cli::history::{HistoryCommand, HistoryOptions};
use fairway::cli::status::{StatusCommand, StatusOptions};
use fairway::cli::test_cmd::{TestCommand, TestOptions};
use fairway::config::{fairway_home, Config};
use fairway::error::exit_codes;
use fairway::storage::FileKeyValueStore;

/// Log filter used when `FAIRWAY_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

// =============================================================================
// CLI Definition
// =============================================================================

/// Fairway - practice-range test log with per-club statistics and trends
#[derive(Parser)]
#[command(name = "fairway")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the clubs in your bag
    Bag {
        /// Action to perform
        #[command(subcommand)]
        action: BagSubcommand,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },

    /// Play a test against random targets (reads shots from stdin)
    Test {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Number of shots
        #[arg(long, short)]
        shots: Option<usize>,
        /// Shortest target in yards
        #[arg(long)]
        min: Option<f64>,
        /// Longest target in yards
        #[arg(long)]
        max: Option<f64>,
    },

    /// Show recorded sessions, trend and summary
    History {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Maximum number of sessions to list
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Show per-club distance and consistency
    Clubs {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show bag and history counts and record this visit
    Status {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

#[derive(Subcommand)]
enum BagSubcommand {
    /// List the clubs in the bag
    List,
    /// Show every catalog club
    Catalog,
    /// Add clubs to the bag
    Add {
        /// Club names, e.g. "7 Iron"
        #[arg(required = true)]
        clubs: Vec<String>,
    },
    /// Remove clubs from the bag
    Remove {
        /// Club names, e.g. "7 Iron"
        #[arg(required = true)]
        clubs: Vec<String>,
    },
}

impl From<BagSubcommand> for BagAction {
    fn from(action: BagSubcommand) -> Self {
        match action {
            BagSubcommand::List => BagAction::List,
            BagSubcommand::Catalog => BagAction::Catalog,
            BagSubcommand::Add { clubs } => BagAction::Add(clubs),
            BagSubcommand::Remove { clubs } => BagAction::Remove(clubs),
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fairway error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.fairway/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("fairway panic: {}", info);

        if let Some(home) = fairway_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Install the stderr log subscriber, filtered by `FAIRWAY_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("FAIRWAY_LOG")
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Bag {
            action,
            json,
            quiet,
        } => run_bag(&config, action.into(), json, quiet),
        Commands::Test {
            json,
            quiet,
            shots,
            min,
            max,
        } => run_test(
            config,
            TestOptions {
                json,
                quiet,
                shots,
                min_yardage: min,
                max_yardage: max,
            },
        ),
        Commands::History { json, quiet, limit } => run_history(&config, json, quiet, limit),
        Commands::Clubs { json, quiet } => run_clubs(&config, json, quiet),
        Commands::Status { json, quiet } => run_status(&config, json, quiet),
    }
}

/// Open the file store in the configured data directory.
fn open_store(config: &Config) -> Result<FileKeyValueStore, Box<dyn std::error::Error>> {
    let store = match config.data_dir() {
        Some(dir) => FileKeyValueStore::with_dir(dir)?,
        None => FileKeyValueStore::new()?,
    };
    tracing::debug!(dir = %store.dir().display(), "opened data directory");
    Ok(store)
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::OK as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        println!("{}", formatted);
    }
}

fn run_bag(
    config: &Config,
    action: BagAction,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut cmd = BagCommand::new(open_store(config)?);
    let options = BagOptions { json, quiet };

    let output = cmd.run(&action);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_test(config: Config, options: TestOptions) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = open_store(&config)?;
    let cmd = TestCommand::new(store, config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    // Prompts go to stderr so --json output on stdout stays clean
    let mut prompt = std::io::stderr();

    let output = cmd.run(&options, &mut input, &mut prompt, &mut rand::rng());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_history(
    config: &Config,
    json: bool,
    quiet: bool,
    limit: Option<usize>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = HistoryCommand::new(open_store(config)?);
    let options = HistoryOptions { json, quiet, limit };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_clubs(
    config: &Config,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = ClubsCommand::new(open_store(config)?);
    let options = ClubsOptions { json, quiet };

    let output = cmd.run();
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_status(
    config: &Config,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut cmd = StatusCommand::new(open_store(config)?);
    let options = StatusOptions { json, quiet };

    let output = cmd.run(chrono::Utc::now());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_codes::OK, 0);
        assert_eq!(exit_codes::ERROR, 1);
        assert_eq!(exit_codes::CRASH, 3);
    }

    #[test]
    fn test_success_to_exit_code() {
        assert_eq!(
            success_to_exit_code(true),
            ExitCode::from(exit_codes::OK as u8)
        );
        assert_eq!(
            success_to_exit_code(false),
            ExitCode::from(exit_codes::ERROR as u8)
        );
    }

    #[test]
    fn test_bag_subcommand_conversion() {
        assert_eq!(BagAction::from(BagSubcommand::List), BagAction::List);
        assert_eq!(BagAction::from(BagSubcommand::Catalog), BagAction::Catalog);
        assert_eq!(
            BagAction::from(BagSubcommand::Add {
                clubs: vec!["Driver".to_string()]
            }),
            BagAction::Add(vec!["Driver".to_string()])
        );
    }

    #[test]
    fn test_cli_parse_bag_add() {
        let cli = Cli::parse_from(["fairway", "bag", "add", "7 Iron", "Sand Wedge", "--json"]);
        match cli.command {
            Commands::Bag { action, json, .. } => {
                assert!(json);
                match action {
                    BagSubcommand::Add { clubs } => {
                        assert_eq!(clubs, vec!["7 Iron", "Sand Wedge"]);
                    }
                    _ => panic!("Expected Add action"),
                }
            }
            _ => panic!("Expected Bag command"),
        }
    }

    #[test]
    fn test_cli_parse_bag_add_requires_club() {
        assert!(Cli::try_parse_from(["fairway", "bag", "add"]).is_err());
    }

    #[test]
    fn test_cli_parse_bag_catalog() {
        let cli = Cli::parse_from(["fairway", "bag", "catalog"]);
        match cli.command {
            Commands::Bag { action, .. } => {
                assert!(matches!(action, BagSubcommand::Catalog));
            }
            _ => panic!("Expected Bag command"),
        }
    }

    #[test]
    fn test_cli_parse_test() {
        let cli = Cli::parse_from([
            "fairway", "test", "--shots", "5", "--min", "80", "--max", "120.5",
        ]);
        match cli.command {
            Commands::Test {
                shots, min, max, ..
            } => {
                assert_eq!(shots, Some(5));
                assert_eq!(min, Some(80.0));
                assert_eq!(max, Some(120.5));
            }
            _ => panic!("Expected Test command"),
        }
    }

    #[test]
    fn test_cli_parse_test_defaults() {
        let cli = Cli::parse_from(["fairway", "test"]);
        match cli.command {
            Commands::Test {
                shots, min, max, ..
            } => {
                assert!(shots.is_none());
                assert!(min.is_none());
                assert!(max.is_none());
            }
            _ => panic!("Expected Test command"),
        }
    }

    #[test]
    fn test_cli_parse_history() {
        let cli = Cli::parse_from(["fairway", "history", "--limit", "3", "--json"]);
        match cli.command {
            Commands::History { json, limit, .. } => {
                assert!(json);
                assert_eq!(limit, Some(3));
            }
            _ => panic!("Expected History command"),
        }
    }

    #[test]
    fn test_cli_parse_clubs_and_status() {
        let cli = Cli::parse_from(["fairway", "clubs", "-q"]);
        assert!(matches!(cli.command, Commands::Clubs { quiet: true, .. }));

        let cli = Cli::parse_from(["fairway", "status", "-j"]);
        assert!(matches!(cli.command, Commands::Status { json: true, .. }));
    }
}
