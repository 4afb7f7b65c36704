use clap::Parser;
use iban_core::{CountryRules, DatasetSource, Registry};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod cmd;
mod error;
mod io;

use cli::{Cli, Command, OutputFormat};
use error::{CliError, error_chain};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Dispatches the parsed command.
fn run(cli: Cli) -> Result<(), CliError> {
    let registry = match &cli.dataset {
        Some(path) => Registry::new(DatasetSource::Path(path.clone())),
        None => Registry::bundled(),
    };

    match cli.command {
        Command::Validate { ibans, file } => {
            let ibans = match file {
                Some(source) => io::ibans_from_lines(&io::read_input(&source, cli.max_file_size)?),
                None => ibans,
            };
            cmd::validate::run(load(&registry)?, &ibans, cli.format, cli.quiet)
        }
        Command::Create {
            account,
            bic,
            country,
        } => cmd::create::run(
            load(&registry)?,
            &account,
            bic.as_deref(),
            country.as_deref(),
            cli.format,
        ),
        Command::Checksum { iban } => cmd::checksum::run(&iban, cli.format),
        Command::Countries { code } => {
            cmd::countries::run(load(&registry)?, code.as_deref(), cli.format)
        }
    }
}

fn load(registry: &Registry) -> Result<&CountryRules, CliError> {
    registry.load().map_err(|e| CliError::DatasetLoad {
        source: registry.source().to_string(),
        detail: error_chain(&e),
    })
}
