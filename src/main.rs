use std::process::ExitCode;

use region_client::commands::{Command, USAGE};
use region_client::config::load_config;
use region_client::subscriber::PageWriter;
use region_client::{App, HttpRemote};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load {}: {}", config_path, err);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    let remote = match HttpRemote::new(&config.api_base, config.requests_per_minute) {
        Ok(remote) => remote,
        Err(err) => {
            eprintln!("Invalid configuration in {}: {}", config_path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(Box::new(remote));
    app.subscribe(Box::new(PageWriter::new(&config.output_path)));
    tracing::info!(api = config.api_base.as_str(), page = config.output_path.as_str(), "Starting region client");

    // A failed initial load is already rendered as the error state of every view
    if let Err(err) = app.reload().await {
        println!("Initial load failed: {}", err);
    }

    println!("{}", USAGE);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::error!("Failed to read command: {}", err);
                return ExitCode::FAILURE;
            }
        };

        if line.trim() == "quit" {
            break;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match app.dispatch(command).await {
            Ok(()) => println!("ok"),
            Err(err) => println!("{}", err)
        }
    }

    ExitCode::SUCCESS
}
