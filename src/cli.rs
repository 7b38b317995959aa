// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

/// How headless runs print feed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormatArg {
    /// Plain text, one block per feed entry.
    #[default]
    Text,
    /// The widget's HTML fragment for each entry.
    Html,
    /// One JSON object per line per entry.
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "shopchat",
    about = "Shopping assistant chat for the terminal",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional first search, submitted as soon as the chat starts
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Run headless (no TUI); reads messages from stdin, one per line
    #[arg(long, short = 'H')]
    pub headless: bool,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Chat endpoint URL; `mock://echo` answers offline
    #[arg(long, env = "SHOPCHAT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Output format for headless runs (text | html | json)
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormatArg,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// Probe the chat service's health endpoint
    Health {
        /// Print the raw report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Returns true if the run should be headless.
    /// Headless is triggered by --headless or when stdin is not a terminal.
    pub fn is_headless(&self) -> bool {
        self.headless || !std::io::stdin().is_terminal()
    }
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "shopchat", &mut std::io::stdout());
}

// We need this trait for stdin TTY detection
trait IsTerminal {
    fn is_terminal(&self) -> bool;
}

impl IsTerminal for std::io::Stdin {
    fn is_terminal(&self) -> bool {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(self.as_raw_fd()) != 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_headless_run() {
        let cli = Cli::try_parse_from([
            "shopchat", "-H", "--output-format", "json", "--endpoint", "mock://echo", "phones",
        ])
        .unwrap();
        assert!(cli.headless);
        assert_eq!(cli.output_format, OutputFormatArg::Json);
        assert_eq!(cli.endpoint.as_deref(), Some("mock://echo"));
        assert_eq!(cli.prompt.as_deref(), Some("phones"));
    }

    #[test]
    fn cli_parses_health_subcommand() {
        let cli = Cli::try_parse_from(["shopchat", "health", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Health { json: true })));
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["shopchat", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
