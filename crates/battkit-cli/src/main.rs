#![deny(unsafe_code)]

//! battkit CLI — power telemetry and daemon control from the terminal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use battkit_core::socket::{SocketClient, daemon_available};
use battkit_core::telemetry::TelemetryReader;

/// battkit — client for the system power daemon and power telemetry.
#[derive(Parser)]
#[command(name = "battkit", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "battkit.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a command value to the daemon and print its reply.
    Send {
        /// Command value. Opaque to battkit — its meaning is owned by
        /// the daemon.
        command: i64,

        /// Override the daemon socket path from the config file.
        #[arg(long)]
        socket: Option<PathBuf>,
    },

    /// Print instantaneous power readings and the battery snapshot.
    Power {
        /// Emit JSON instead of aligned text.
        #[arg(long)]
        json: bool,
    },

    /// Show daemon reachability and charging status.
    Status,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

/// Combined output of the `power` subcommand.
#[derive(Serialize)]
struct PowerReport {
    readings: battkit_core::PowerReadings,
    battery: battkit_core::BatterySnapshot,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing subscriber with verbosity level
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Send { command, socket } => {
            cmd_send(&cli.config, command, socket.as_deref()).await?
        }
        Commands::Power { json } => cmd_power(&cli.config, json).await?,
        Commands::Status => cmd_status(&cli.config).await?,
        Commands::Config { show } => cmd_config(&cli.config, show).await?,
    }

    Ok(())
}

async fn cmd_send(config_path: &Path, command: i64, socket: Option<&Path>) -> Result<()> {
    let config = load_config(config_path).await?;
    let socket_path = socket
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.socket.path));

    let client = SocketClient::from_config(&config.socket);
    let reply = client
        .send_command(command, &socket_path)
        .await
        .with_context(|| format!("command {command} failed"))?;

    println!("{reply}");
    Ok(())
}

async fn cmd_power(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path).await?;
    let reader = TelemetryReader::from_config(&config.telemetry);

    let report = PowerReport {
        readings: reader.readings(),
        battery: reader.battery_snapshot(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let r = &report.readings;
    let b = &report.battery;
    println!("system power    {:8.2} W", r.raw_system_power_watts);
    println!("adapter power   {:8.2} W", r.adapter_power_watts);
    println!("adapter voltage {:8.2} V", r.adapter_voltage_volts);
    println!("adapter current {:8.2} A", r.adapter_amperage_amps);
    println!("battery voltage {:8.2} V", r.battery_voltage_volts);
    println!("battery current {:8.2} A", r.battery_amperage_amps);
    println!("battery power   {:8.2} W", r.battery_power_watts);
    println!("status          {}", r.charging_status);
    println!();
    println!("charge          {:7} %", b.percent);
    println!("health          {:8.1} %", b.health_percent);
    println!("cycles          {:7}", b.cycle_count);
    println!("temperature     {:8.1} °C", b.temperature_celsius);
    println!("serial          {}", b.serial_number);
    Ok(())
}

async fn cmd_status(config_path: &Path) -> Result<()> {
    let config = load_config(config_path).await?;
    let reader = TelemetryReader::from_config(&config.telemetry);

    let reachable = daemon_available(&config.socket.path);
    println!(
        "daemon: {} ({})",
        if reachable { "available" } else { "not running" },
        config.socket.path
    );
    println!("battery: {}", reader.charging_status());
    Ok(())
}

async fn cmd_config(config_path: &Path, show: bool) -> Result<()> {
    let config = load_config(config_path).await?;
    if show {
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| anyhow::anyhow!("TOML error: {e}"))?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

async fn load_config(path: &Path) -> Result<battkit_config::AppConfig> {
    if path.exists() {
        battkit_config::AppConfig::load(path)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(battkit_config::AppConfig::default())
    }
}
