use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use maha_weather_core::{City, Config, Widget, provider_from_config, registry};
use std::fmt;
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "maha-weather", version, about = "Weather for Maharashtra cities")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List supported cities.
    Cities,

    /// Pick the default city and provider settings.
    Configure,

    /// Show current conditions and the forecast for a city.
    Show {
        /// City id, e.g. "pune"; defaults to the configured city.
        city: Option<String>,

        /// Print the rendered view as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Cities => {
                output::print_cities(registry::all());
                Ok(())
            }
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
        }
    }
}

/// Prompt entry for one registry city.
#[derive(Debug, Clone, Copy)]
struct CityChoice(&'static City);

impl fmt::Display for CityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.name, self.0.id)
    }
}

fn city_choices() -> Vec<CityChoice> {
    registry::all().iter().map(CityChoice).collect()
}

/// Cursor position of the configured city, or the first entry.
fn starting_cursor(choices: &[CityChoice], default_city: Option<&str>) -> usize {
    default_city
        .and_then(|id| choices.iter().position(|c| c.0.id == id))
        .unwrap_or(0)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let choices = city_choices();
    let start = starting_cursor(&choices, config.default_city.as_deref());

    let choice = Select::new("Default city:", choices)
        .with_starting_cursor(start)
        .prompt()
        .context("City selection was cancelled")?;
    config.set_default_city(choice.0.id)?;

    let base_url = Text::new("Provider base URL:")
        .with_default(&config.provider.base_url)
        .prompt()
        .context("Base URL input was cancelled")?;
    config.provider.base_url = base_url.trim().to_string();

    // Fail here rather than on the next `show`.
    provider_from_config(&config)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let mut widget = Widget::new(provider);

    let selected = match city {
        Some(id) => Some(id.trim().to_lowercase()),
        None => config.default_city.clone(),
    };
    debug!(city = ?selected, base_url = %config.provider.base_url, "Showing weather");
    widget.select_city(selected.as_deref());

    let result = widget.fetch_and_render().await;

    if json {
        println!("{}", serde_json::to_string_pretty(widget.view())?);
    } else {
        output::print_view(widget.view());
    }

    if let Err(err) = result {
        if err.is_validation() {
            eprintln!("Run `maha-weather cities` to list supported city ids.");
        }
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_accepts_optional_city_and_json_flag() {
        let cli = Cli::try_parse_from(["maha-weather", "show", "pune", "--json"]).unwrap();
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city.as_deref(), Some("pune"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["maha-weather", "-v", "show"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Show { city: None, json: false }));
    }

    #[test]
    fn city_choices_cover_registry_in_order() {
        let choices = city_choices();

        assert_eq!(choices.len(), registry::all().len());
        assert_eq!(choices[0].to_string(), "Mumbai (mumbai)");
        assert_eq!(choices[1].0.id, "pune");
    }

    #[test]
    fn starting_cursor_points_at_configured_city() {
        let choices = city_choices();

        let at = starting_cursor(&choices, Some("kolhapur"));
        assert_eq!(choices[at].0.id, "kolhapur");

        assert_eq!(starting_cursor(&choices, None), 0);
        assert_eq!(starting_cursor(&choices, Some("atlantis")), 0);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["maha-weather"]).is_err());
    }
}
