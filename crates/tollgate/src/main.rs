//! Tollgate - Entry point
//!
//! Runs the configured request through the configured chains and prints
//! one line per diagnostic on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use tollgate::config::{ConfigError, ConfigLoader, TollgateConfig};
use tollgate::telemetry::{init_logging, LogConfig};
use tollgate::{Application, CONFIG_ERROR_EXIT};

/// Command-line arguments.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    /// Path to configuration file.
    config: Option<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
    Version,
}

impl Args {
    fn parse() -> Self {
        match Self::try_parse_from(std::env::args().skip(1)) {
            Ok(Command::Run(args)) => args,
            Ok(Command::Help) => {
                print_help();
                std::process::exit(0);
            }
            Ok(Command::Version) => {
                println!("tollgate {}", tollgate::VERSION);
                std::process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
    }

    fn try_parse_from<I>(args: I) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => match args.next() {
                    Some(path) if !path.starts_with('-') => config = Some(PathBuf::from(path)),
                    _ => return Err(format!("Missing path after {arg}")),
                },
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-v" => return Ok(Command::Version),
                other => return Err(format!("Unknown argument: {other}")),
            }
        }

        Ok(Command::Run(Self { config }))
    }
}

fn print_help() {
    println!(
        r"Tollgate - validation and dispatch chains over a single request

USAGE:
    tollgate [OPTIONS]

OPTIONS:
    -c, --config <PATH>    Path to configuration file (TOML or JSON)
    -h, --help             Print help information
    -v, --version          Print version information

ENVIRONMENT VARIABLES:
    TOLLGATE__REQUEST__<FIELD>        Set a request field (e.g. TOLLGATE__REQUEST__AGE=18)
    TOLLGATE__PIPELINE__MIDDLEWARE    Comma-separated validation steps (default: age,country,name)
    TOLLGATE__PIPELINE__HANDLERS      Comma-separated handlers (default: qiwi,sberbank)
    TOLLGATE__LOGGING__LEVEL          Log level (default: warn)
    TOLLGATE__LOGGING__FORMAT         Log format: json or pretty (default: json)
    TOLLGATE__LOGGING__ENABLED        Enable logging (default: true)

EXAMPLES:
    # Run the reference request
    tollgate

    # Run with a configuration file
    tollgate --config tollgate.toml

    # Reject the request at the age check
    TOLLGATE__REQUEST__AGE=18 tollgate
"
    );
}

fn load_config(path: Option<PathBuf>) -> Result<TollgateConfig, ConfigError> {
    let loader = ConfigLoader::new().with_defaults().with_dotenv()?;

    let loader = match path {
        Some(path) => loader.with_file(path)?,
        None => loader,
    };

    loader.with_env_prefix("TOLLGATE").load()
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&LogConfig::from(&config.logging)) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    info!(version = tollgate::VERSION, "Starting tollgate");

    let app = match Application::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to build chains");
            println!("{}", e.to_diagnostic());
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
    };

    let report = app.handle();
    for line in report.lines() {
        println!("{line}");
    }

    ExitCode::from(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        Args::try_parse_from(args.iter().map(ToString::to_string))
    }

    #[test]
    fn test_no_arguments_runs_with_defaults() {
        assert_eq!(parse(&[]), Ok(Command::Run(Args { config: None })));
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            parse(&["-c", "tollgate.toml"]),
            Ok(Command::Run(Args {
                config: Some(PathBuf::from("tollgate.toml"))
            }))
        );
        assert_eq!(
            parse(&["--config", "a.json"]),
            Ok(Command::Run(Args {
                config: Some(PathBuf::from("a.json"))
            }))
        );
    }

    #[test]
    fn test_config_flag_without_path_is_usage_error() {
        assert_eq!(parse(&["-c"]), Err("Missing path after -c".to_string()));
        assert_eq!(
            parse(&["--config", "--help"]),
            Err("Missing path after --config".to_string())
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]), Ok(Command::Help));
        assert_eq!(parse(&["-v"]), Ok(Command::Version));
    }

    #[test]
    fn test_unknown_argument() {
        assert_eq!(parse(&["--fast"]), Err("Unknown argument: --fast".to_string()));
    }
}
