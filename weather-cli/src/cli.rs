use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;
use weather_core::{Config, DashboardView, FetchOutcome, OpenWeatherProvider, QueryController};

use crate::{dashboard, render::render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug). `RUST_LOG` overrides it.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Fetch once and print the dashboard.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Print the dashboard view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Live dashboard: type a city and press Enter to search.
    ///
    /// The clock shows the time of the last redraw. Press Enter on an empty
    /// line to refresh it; `:q` or Ctrl-C quits.
    Dashboard {
        /// City to load first; defaults to the configured city.
        #[arg(long)]
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, json } => show(&config, city, json).await,
            Command::Dashboard { city } => {
                let controller = controller(&config, city)?;
                dashboard::run(controller, config.clock_tick()).await
            }
        }
    }
}

fn controller(config: &Config, city: Option<String>) -> anyhow::Result<Arc<QueryController>> {
    let provider = OpenWeatherProvider::from_config(config)?;
    let city = city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| config.default_city.clone());

    Ok(Arc::new(QueryController::new(Arc::new(provider), city)))
}

async fn show(config: &Config, city: Option<String>, json: bool) -> anyhow::Result<()> {
    let controller = controller(config, city)?;
    let outcome = controller.load_initial().await;

    let view = DashboardView::build(&controller.snapshot_state(), &Local::now());
    if json {
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize view")?;
        println!("{out}");
    } else {
        print!("{}", render(&view));
    }

    match outcome {
        FetchOutcome::Failed(message) => Err(anyhow!(message)),
        _ => Ok(()),
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.set_api_key(api_key);
    config.set_default_city(&city);

    let path = config.save()?;
    info!(path = %path.display(), "Configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}
