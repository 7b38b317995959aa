mod cli;
mod headless;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use clap::Parser;
use cli::{Cli, Commands};
use shopchat_config::Config;
use shopchat_core::ChatClient;
use shopchat_model::ChatBackend;
use shopchat_tui::{App, AppOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = cli.command.is_none() && !cli.is_headless();
    init_logging(cli.verbose, interactive);

    // Handle subcommands first
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Completions { shell } => {
                cli::print_completions(*shell);
                return Ok(());
            }
            Commands::ShowConfig => {
                let config = load_config(&cli)?;
                print!("{}", toml::to_string_pretty(&config).context("serialising config")?);
                return Ok(());
            }
            Commands::Health { json } => {
                let config = load_config(&cli)?;
                return health_cmd(&config, *json).await;
            }
        }
    }

    let config = Arc::new(load_config(&cli)?);
    let backend: Arc<dyn ChatBackend> = Arc::from(shopchat_model::from_config(&config.endpoint)?);
    let client = ChatClient::new(backend);

    if cli.is_headless() {
        run_headless(cli, config, client).await
    } else {
        run_tui(cli, config, client).await
    }
}

/// Load layered config and apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = shopchat_config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.endpoint {
        config.endpoint.url = url.clone();
    }
    Ok(config)
}

/// Probe the health endpoint.  Exits non-zero when the service is not healthy.
async fn health_cmd(config: &Config, as_json: bool) -> anyhow::Result<()> {
    let backend = shopchat_model::from_config(&config.endpoint)?;
    let report = backend
        .health()
        .await
        .with_context(|| format!("probing {}", config.endpoint.resolved_health_url()))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("status: {}", report.status);
        for (key, value) in &report.details {
            match value.as_str() {
                Some(s) => println!("  {key}: {s}"),
                None => println!("  {key}: {value}"),
            }
        }
    }

    if !report.is_healthy() {
        anyhow::bail!("service reports status {:?}", report.status);
    }
    Ok(())
}

async fn run_headless(cli: Cli, config: Arc<Config>, client: ChatClient) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout().lock();
    headless::run(
        client,
        &config.widget,
        cli.output_format,
        cli.prompt,
        stdin,
        &mut stdout,
    )
    .await
}

async fn run_tui(cli: Cli, config: Arc<Config>, client: ChatClient) -> anyhow::Result<()> {
    use ratatui::crossterm::{
        execute,
        event::{
            DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        },
    };

    let terminal = ratatui::init();
    let _ = execute!(std::io::stdout(), EnableMouseCapture, EnableBracketedPaste);

    let opts = AppOptions { initial_prompt: cli.prompt };
    let app = App::new(config, client, opts);
    let result = app.run(terminal).await;

    let _ = execute!(std::io::stdout(), DisableBracketedPaste, DisableMouseCapture);
    ratatui::restore();

    result
}

/// Log file used while the TUI owns the terminal.
fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("shopchat").join("shopchat.log"))
}

fn init_logging(verbosity: u8, interactive: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = interactive
        .then(log_file_path)
        .flatten()
        .and_then(|path| {
            std::fs::create_dir_all(path.parent()?).ok()?;
            OpenOptions::new().create(true).append(true).open(path).ok()
        });

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init(),
        // No log file in TUI mode means logging is dropped rather than
        // drawn over the screen.
        None if interactive => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::sink))
            .with(filter)
            .init(),
        None => tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
}
