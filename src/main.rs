mod config;
mod feed;
mod replay;
mod schema;
mod sync;

use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;

use crate::config::{Config, ConfigError};
use crate::feed::{ConnectionManager, WsConnector};
use crate::sync::{LogAdapter, Registry};

#[derive(Parser)]
#[command(name = "orbit-sync")]
#[command(about = "Space object telemetry feed synchronizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the telemetry feed and keep object state in sync
    Run {
        #[arg(long)]
        config: Option<String>,
        /// Host the client is served from, e.g. `orbit.example.com`
        #[arg(long)]
        host: Option<String>,
        /// Feed URL, bypassing host based selection
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Apply recorded feed frames (one JSON message per line) and print the result
    Replay {
        frames: String,
        #[arg(long)]
        config: Option<String>,
        /// Print objects and trails as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            host,
            endpoint,
        } => run(config.as_deref(), host, endpoint),
        Commands::Replay {
            frames,
            config,
            json,
        } => replay(&frames, config.as_deref(), json),
    }
}

fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn run(config_path: Option<&str>, host: Option<String>, endpoint: Option<String>) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = host {
        config.feed.host = host;
    }
    if endpoint.is_some() {
        config.feed.endpoint = endpoint;
    }

    let reconnect_delay = match config.feed.reconnect_delay() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let endpoint = feed::select_endpoint(&config.feed.host, &config.feed);
    if let Err(e) = feed::validate_endpoint(&endpoint) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut registry = Registry::with_trail_capacity(LogAdapter::default(), config.trail.capacity);
    let mut manager = ConnectionManager::new(WsConnector, endpoint, reconnect_delay);
    log::info!("Syncing from {}", manager.endpoint());

    runtime.block_on(manager.run(&mut registry, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }));

    let stats = manager.stats();
    println!(
        "Tracked {} objects ({} created, {} updates)",
        registry.len(),
        registry.adapter().created(),
        registry.adapter().updated()
    );
    println!(
        "Feed: {} sessions, {} disconnects, {} failed connects, {} frames ({} malformed)",
        stats.connects,
        stats.disconnects,
        stats.failed_connects,
        stats.frames,
        stats.malformed_frames
    );
    ExitCode::SUCCESS
}

fn replay(path: &str, config_path: Option<&str>, json: bool) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut registry = Registry::with_trail_capacity(LogAdapter::default(), config.trail.capacity);
    let summary = replay::replay(&mut registry, &content);
    let objects = replay::summarize(&registry);

    if json {
        match serde_json::to_string_pretty(&objects) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Failed to serialize objects: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!(
        "Replayed {} frames ({} malformed, {} records skipped)",
        summary.frames, summary.malformed_frames, summary.records.skipped
    );
    for entry in &objects {
        let object = entry.object;
        println!(
            "  {:<9} {:>6}  {:<24} {:<6} {}  trail {}",
            object.kind.to_string(),
            object.id,
            object.name,
            object.risk_class.to_string(),
            object.position,
            entry.trail.len()
        );
    }
    ExitCode::SUCCESS
}
