mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod monitor;
mod runtime;
mod session;
mod snapshot;
mod ui;
mod workers;

use crate::config::{Config, SERVER_URL_ENV, get_config_path};
use crate::environment::Environment;
use crate::logging::init_console_logger;
use crate::monitor::{MonitorApi, MonitorClient};
use crate::session::headless_mode::device_table;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::workers::device_manager::validate_new_device;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Monitor backend URL, or `local` for http://localhost:5000.
    #[arg(long, global = true, value_name = "URL")]
    server_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the live dashboard
    Start {
        /// Print status changes to the console instead of running the TUI
        #[arg(long, default_value = "false")]
        headless: bool,

        /// Interval between status polls, in milliseconds
        #[arg(long, value_name = "MS")]
        poll_interval_ms: Option<u64>,

        /// Paint the dashboard background
        #[arg(long, default_value = "false")]
        with_background: bool,
    },
    /// Fetch and print the current status once
    Status,
    /// Add a device to the monitor
    AddDevice {
        #[arg(long)]
        name: String,
        #[arg(long)]
        ip: String,
    },
    /// Remove a device from the monitor
    RemoveDevice {
        #[arg(long)]
        name: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value = "false")]
        yes: bool,
    },
    /// Show or update the saved configuration (the global --server-url is saved too)
    Config {
        /// Poll interval to save, in milliseconds
        #[arg(long, value_name = "MS")]
        poll_interval_ms: Option<u64>,

        /// Delete the configuration file
        #[arg(long, default_value = "false")]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;
    let env_server_url = std::env::var(SERVER_URL_ENV).ok();
    let cli_server_url = args.server_url;

    // Config file first, then NETMON_SERVER_URL, then --server-url on top.
    let load_settings = || -> Result<(Config, Environment), Box<dyn Error>> {
        let config = Config::load_or_default(&config_path)
            .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
        let environment =
            config.resolve_environment(cli_server_url.as_deref(), env_server_url.as_deref())?;
        Ok((config, environment))
    };

    match args.command {
        Command::Start {
            headless,
            poll_interval_ms,
            with_background,
        } => {
            let (config, environment) = load_settings()?;
            let poll_interval = config.resolve_poll_interval(poll_interval_ms)?;
            let session = setup_session(environment, poll_interval);
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Status => {
            init_console_logger();
            let (_, environment) = load_settings()?;
            let client = MonitorClient::new(environment);
            match client.get_status().await {
                Ok(snapshot) => {
                    print!("{}", device_table(&snapshot));
                    Ok(())
                }
                Err(e) => exit_with_error("Error checking status", &e.to_string()),
            }
        }
        Command::AddDevice { name, ip } => {
            init_console_logger();
            let (name, ip) = match validate_new_device(&name, &ip) {
                Ok(fields) => fields,
                Err(e) => exit_with_error("Failed to add device", &e),
            };
            let (_, environment) = load_settings()?;
            let client = MonitorClient::new(environment);
            match client.add_device(&name, &ip).await {
                Ok(message) => {
                    let message = message
                        .unwrap_or_else(|| format!("Device \"{}\" added successfully", name));
                    print_cmd_success!("Device added", "{}", message);
                    Ok(())
                }
                Err(e) => exit_with_error("Failed to add device", &e.user_message()),
            }
        }
        Command::RemoveDevice { name, yes } => {
            init_console_logger();
            let (_, environment) = load_settings()?;
            if !yes && !confirm(&format!("Remove device \"{}\"?", name))? {
                print_cmd_info!("Removal cancelled", "");
                return Ok(());
            }
            let client = MonitorClient::new(environment);
            match client.remove_device(&name).await {
                Ok(message) => {
                    let message = message
                        .unwrap_or_else(|| format!("Device \"{}\" removed successfully", name));
                    print_cmd_success!("Device removed", "{}", message);
                    Ok(())
                }
                Err(e) => exit_with_error("Failed to remove device", &e.user_message()),
            }
        }
        Command::Config {
            poll_interval_ms,
            reset,
        } => update_config(&config_path, cli_server_url, poll_interval_ms, reset),
    }
}

/// Print a command error once and exit with a failure status.
fn exit_with_error(title: &str, details: &str) -> ! {
    print_cmd_error!(title, details);
    std::process::exit(1);
}

/// Ask a y/N question on stdin. Anything but `y`/`yes` is a no.
fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn update_config(
    config_path: &std::path::Path,
    server_url: Option<String>,
    poll_interval_ms: Option<u64>,
    reset: bool,
) -> Result<(), Box<dyn Error>> {
    if reset {
        Config::clear(config_path)?;
        print_cmd_success!("Configuration cleared", "{}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(config_path)?;
    if server_url.is_none() && poll_interval_ms.is_none() {
        print_cmd_info!("Configuration file", "{}", config_path.display());
        let environment = config.resolve_environment(None, None)?;
        print_cmd_info!("Server URL", "{}", environment.server_url());
        print_cmd_info!(
            "Poll interval",
            "{} ms",
            config.resolve_poll_interval(None)?.as_millis()
        );
        return Ok(());
    }

    if let Some(url) = server_url {
        let environment = url.trim().parse::<Environment>()?;
        config.server_url = Some(environment.server_url().to_string());
    }
    if let Some(ms) = poll_interval_ms {
        config.resolve_poll_interval(Some(ms))?;
        config.poll_interval_ms = Some(ms);
    }
    config.save(config_path)?;
    print_cmd_success!("Configuration saved", "{}", config_path.display());
    Ok(())
}
