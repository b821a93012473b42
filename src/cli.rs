//! Command-line argument parsing
//!
//! Without a subcommand the interactive terminal UI starts.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// health-log - track height, weight, BMI and blood pressure for one session
#[derive(Parser, Debug)]
#[command(name = "health-log")]
#[command(version)]
#[command(about = "Log daily health measurements and watch your BMI", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial date of the entry form (YYYY-MM-DD, today by default)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Verbosity of the log file: -v (debug), -vv (trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute BMI and status once, without starting the UI
    Bmi {
        /// Height in centimetres
        #[arg(long)]
        height: f64,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },
}

impl Args {
    /// Log level override from -v flags, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_start_ui() {
        let args = Args::try_parse_from(["health-log"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
        assert!(args.date.is_none());
        assert_eq!(args.log_level_override(), None);
    }

    #[test]
    fn test_date_and_verbosity() {
        let args = Args::try_parse_from(["health-log", "--date", "2024-01-15", "-vv"]).unwrap();
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(args.log_level_override(), Some("trace"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(Args::try_parse_from(["health-log", "--date", "15/01/2024"]).is_err());
    }

    #[test]
    fn test_bmi_subcommand() {
        let args =
            Args::try_parse_from(["health-log", "bmi", "--height", "170", "--weight", "65"]).unwrap();
        match args.command {
            Some(Commands::Bmi { height, weight }) => {
                assert_eq!(height, 170.0);
                assert_eq!(weight, 65.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
