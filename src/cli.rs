use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::EntryDirection;

#[derive(Parser, Debug)]
#[command(
    name = "plate-checkr",
    about = "Validate Korean license plates and build vehicle entry/exit passes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: ./.plate-checkr/config.toml, fallback ~/.config/plate-checkr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT", global = true)]
    pub report: ReportFormat,

    /// Show every plate, not just rejected ones
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one or more plate numbers
    Check {
        /// Plate numbers to validate
        plates: Vec<String>,

        /// Read plates from a file, one per line (`#` starts a comment)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Validate an entry form and print the scan payload
    Pass {
        /// Vehicle plate number
        #[arg(long, default_value = "")]
        plate: String,

        /// Driver name
        #[arg(long, default_value = "")]
        name: String,

        /// Driver mobile number
        #[arg(long, default_value = "")]
        phone: String,

        /// Entry or exit
        #[arg(long, value_name = "DIRECTION")]
        direction: Option<DirectionArg>,

        /// Consent to personal-data collection
        #[arg(long)]
        agree: bool,
    },

    /// List the recognised plate formats and their patterns
    Patterns,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DirectionArg {
    Entry,
    Exit,
}

impl From<DirectionArg> for EntryDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Entry => EntryDirection::Entry,
            DirectionArg::Exit => EntryDirection::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["plate-checkr", "check", "12가3456", "K12345", "--report", "json"]);
        assert!(matches!(cli.report, ReportFormat::Json));
        match cli.command {
            Command::Check { plates, file } => {
                assert_eq!(plates, vec!["12가3456", "K12345"]);
                assert!(file.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_pass_defaults() {
        let cli = Cli::parse_from(["plate-checkr", "pass", "--plate", "외1234", "--direction", "exit"]);
        match cli.command {
            Command::Pass {
                plate,
                name,
                direction,
                agree,
                ..
            } => {
                assert_eq!(plate, "외1234");
                assert_eq!(name, "");
                assert_eq!(direction.map(EntryDirection::from), Some(EntryDirection::Exit));
                assert!(!agree);
            }
            _ => panic!("expected pass"),
        }
    }
}
