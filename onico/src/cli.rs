use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "onico",
    version,
    about = "Command-line companion for the Onicotech salon backend",
    long_about = None
)]
pub struct Cli {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        email: String,
        /// Read from the terminal when omitted.
        #[arg(long, env = "ONICO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and sign in.
    Register {
        first_name: String,
        last_name: String,
        email: String,
        #[arg(long, env = "ONICO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List clients.
    Clients,
    /// List services and prices.
    Services,
    /// List appointments, optionally for one day.
    Appointments {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Show active promotions.
    Promotions,
    /// Show the dashboard summary.
    Dashboard,
    /// Show advanced statistics.
    Stats,
    /// Ask the backend to drop its caches.
    InvalidateCache,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_appointment_date_filter() {
        let cli = Cli::try_parse_from(["onico", "appointments", "--date", "2026-03-14"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Appointments {
                date: NaiveDate::from_ymd_opt(2026, 3, 14)
            }
        );
    }

    #[test]
    fn kebab_case_subcommands() {
        let cli = Cli::try_parse_from(["onico", "-c", "alt.toml", "invalidate-cache"]).unwrap();
        assert_eq!(cli.command, Command::InvalidateCache);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["onico", "appointments", "--date", "14/03/2026"]).is_err());
    }
}
