mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "msgroute", version, about = "Message-type routing and discovery CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve_subcommand() {
        let cli = Cli::try_parse_from([
            "msgroute",
            "resolve",
            "--manifest",
            "/tmp/handlers.json",
            "https://didcomm.org/trust_ping/1.0/ping",
        ])
        .expect("resolve args should parse");

        assert!(matches!(cli.command, Command::Resolve(_)));
    }

    #[test]
    fn discover_requires_peer_or_query() {
        let err = Cli::try_parse_from(["msgroute", "discover", "--manifest", "/tmp/h.json"])
            .expect_err("discover without a filter should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_conflicting_discover_filters() {
        let err = Cli::try_parse_from([
            "msgroute",
            "discover",
            "--manifest",
            "/tmp/h.json",
            "--peer",
            "https://didcomm.org/basicmessage/1.0",
            "--query",
            "*",
        ])
        .expect_err("conflicting filters should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_global_format_after_subcommand() {
        let cli = Cli::try_parse_from([
            "msgroute",
            "parse",
            "https://didcomm.org/trust_ping/1.0/ping",
            "--format",
            "json",
        ])
        .expect("parse args should parse");
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }
}
