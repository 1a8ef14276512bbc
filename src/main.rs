use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use skycast::dashboard::{Event, Preferences, render_text};
use skycast::{Dashboard, SkycastConfig, Units, telemetry, web};

/// Weather dashboard backed by OpenWeather
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "SKYCAST_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging for skycast
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard for a place name or "lat,lon"
    Show {
        /// Place to show; words are joined with spaces
        #[arg(required = true)]
        location: Vec<String>,

        /// Fahrenheit and mph instead of Celsius and m/s
        #[arg(long)]
        imperial: bool,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the dashboard over HTTP
    Serve {
        /// Port to listen on (overrides dashboard.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SkycastConfig::load_from_path(cli.config)
        .with_context(|| "Failed to load configuration")?;
    telemetry::init(&config.logging, cli.verbose)?;

    let mut dashboard = Dashboard::from_config(&config)?;

    match cli.command {
        Command::Show {
            location,
            imperial,
            json,
        } => {
            if imperial {
                let preferences = Preferences {
                    units: Units::Imperial,
                    ..Preferences::default()
                };
                dashboard = dashboard.with_preferences(preferences);
            }
            let view = dashboard.dispatch(Event::Search(location.join(" "))).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_text(&view));
            }
        }
        Command::Serve { port } => {
            web::run(port.unwrap_or(config.dashboard.port), dashboard).await?;
        }
    }

    Ok(())
}
