//! Core library for the `forecast` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The typed OpenWeather forecast client and its error taxonomy
//! - The session state that presentation code reads after each fetch
//! - The location resolver contract
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::FetchError;
pub use location::{LocationResolver, Unavailable};
pub use model::{City, Coordinate, Forecast, ForecastInterval, IntervalMetrics, WeatherDescriptor};
pub use provider::{ForecastProvider, Units, provider_from_config};
pub use session::{ForecastSession, SessionState};
