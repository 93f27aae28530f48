use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, Coordinate, ForecastSession, SessionState, Units, provider_from_config,
};

use crate::location::LastKnownLocation;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Forecast lookup CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used for forecast requests.
    Configure,

    /// Show the multi-day forecast for a coordinate.
    Show {
        /// Latitude in decimal degrees.
        latitude: String,

        /// Longitude in decimal degrees.
        longitude: String,

        /// Measurement system: standard, metric or imperial.
        #[arg(long)]
        units: Option<String>,
    },

    /// Show the forecast for the best-known device location.
    Here {
        /// Measurement system: standard, metric or imperial.
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { latitude, longitude, units } => {
                let coordinate = parse_coordinate(&latitude, &longitude)?;
                let (mut session, units) = open_session(units)?;

                session.fetch_forecast(coordinate).await;
                render(session.state(), units);
                Ok(())
            }
            Command::Here { units } => {
                let (mut session, units) = open_session(units)?;
                let resolver = LastKnownLocation::from_env();

                session.fetch_forecast_from_location(&resolver).await;
                render(session.state(), units);
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key =
        inquire::Password::new("OpenWeather API key:").without_confirmation().prompt()?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty.");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Validate textual coordinate input before the core is involved.
fn parse_coordinate(latitude: &str, longitude: &str) -> anyhow::Result<Coordinate> {
    if latitude.trim().is_empty() || longitude.trim().is_empty() {
        bail!("Please enter latitude and longitude.");
    }

    let lat: f64 = latitude
        .trim()
        .parse()
        .with_context(|| format!("'{latitude}' is not a valid latitude"))?;
    let lon: f64 = longitude
        .trim()
        .parse()
        .with_context(|| format!("'{longitude}' is not a valid longitude"))?;

    Ok(Coordinate::new(lat, lon)?)
}

fn open_session(units_flag: Option<String>) -> anyhow::Result<(ForecastSession, Units)> {
    let config = Config::load()?;
    let units = match units_flag {
        Some(s) => Units::try_from(s.as_str())?,
        None => config.units()?,
    };

    let provider = provider_from_config(&config, units)?;
    Ok((ForecastSession::new(provider), units))
}

/// Render the session outcome: either the forecast or the error, never both.
fn render(state: &SessionState, units: Units) {
    match state {
        SessionState::Ready(forecast) => {
            let city =
                forecast.city.as_ref().and_then(|c| c.name.as_deref()).unwrap_or("Unknown");
            println!("City: {city}");

            for interval in &forecast.intervals {
                let when = interval
                    .time()
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .or_else(|| interval.timestamp.clone())
                    .unwrap_or_default();
                println!("Date: {when}");

                if let Some(metrics) = &interval.metrics {
                    if let Some(temp) = metrics.temperature {
                        println!("Temperature: {temp}{}", units.temperature_suffix());
                    }
                }
                if let Some(description) =
                    interval.leading_descriptor().and_then(|d| d.description.as_deref())
                {
                    println!("Description: {description}");
                }
                if let Some(humidity) = interval.metrics.as_ref().and_then(|m| m.humidity) {
                    println!("Humidity: {humidity}%");
                }
                println!("{:-<40}", "");
            }
        }
        SessionState::Failed(err) => println!("{err}"),
        SessionState::Empty => {}
    }
}
