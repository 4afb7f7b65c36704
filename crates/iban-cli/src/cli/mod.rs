//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated plain text (default).
    Human,
    /// One JSON object per line (NDJSON), or a single JSON value.
    Json,
}

/// All top-level subcommands exposed by the `iban` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate IBANs given as arguments or read one per line from a file.
    Validate {
        /// IBANs in electronic form (no spaces).
        #[arg(value_name = "IBAN", required_unless_present = "file")]
        ibans: Vec<String>,
        /// Read IBANs from a file, one per line, or `-` for stdin.
        #[arg(long, value_name = "FILE", conflicts_with = "ibans")]
        file: Option<PathOrStdin>,
    },

    /// Build an IBAN from an account number and a BIC or country code.
    Create {
        /// Domestic account number.
        #[arg(value_name = "ACCOUNT")]
        account: String,
        /// Bank identifier code (8 or 11 characters).
        #[arg(long, value_name = "BIC", required_unless_present = "country")]
        bic: Option<String>,
        /// Country code; overrides the country taken from the BIC.
        #[arg(long, value_name = "CC")]
        country: Option<String>,
    },

    /// Print the check digits an IBAN should carry.
    Checksum {
        /// IBAN in electronic form; its current check digits are ignored.
        #[arg(value_name = "IBAN")]
        iban: String,
    },

    /// List the per-country IBAN rules.
    Countries {
        /// Show only this country.
        #[arg(value_name = "CC")]
        code: Option<String>,
    },
}

/// Root CLI struct for the `iban` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "iban",
    version,
    about = "IBAN validator and builder",
    long_about = "Validates International Bank Account Numbers against per-country\n\
                  structural rules and ISO 7064 MOD 97-10 check digits, and builds\n\
                  IBANs from domestic account numbers."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Country rules JSON file to use instead of the bundled dataset.
    ///
    /// Can also be set via the `IBAN_DATASET` environment variable.
    #[arg(long, global = true, env = "IBAN_DATASET", value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log dataset loading and per-IBAN outcomes to stderr
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum size in bytes of a `--file` input.
    ///
    /// Can also be set via the `IBAN_MAX_FILE_SIZE` environment variable.
    /// Default: 67108864 (64 MB).
    #[arg(
        long,
        global = true,
        env = "IBAN_MAX_FILE_SIZE",
        default_value = "67108864"
    )]
    pub max_file_size: u64,
}
