use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Format of the `dt_txt` field in forecast responses.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point on Earth's surface.
///
/// Doubles as the request input and the `coord` object of the wire model,
/// hence the serde renames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Validates the WGS84 ranges before constructing.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FetchError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(FetchError::InvalidInput(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(FetchError::InvalidInput(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self { latitude, longitude })
    }
}

/// One human-readable weather condition, e.g. "clear sky".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDescriptor {
    #[serde(default)]
    pub description: Option<String>,
}

/// Numeric readings of a single forecast interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalMetrics {
    #[serde(rename = "temp", default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

/// One time-stamped prediction slot of a multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInterval {
    #[serde(rename = "dt_txt", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "main", default)]
    pub metrics: Option<IntervalMetrics>,
    #[serde(rename = "weather", default)]
    pub descriptors: Vec<WeatherDescriptor>,
}

impl ForecastInterval {
    /// First weather descriptor, when the server provided any.
    pub fn leading_descriptor(&self) -> Option<&WeatherDescriptor> {
        self.descriptors.first()
    }

    /// Parses `dt_txt` into a date-time, `None` when absent or malformed.
    pub fn time(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub coord: Option<Coordinate>,
}

/// Decoded `/forecast` response.
///
/// Constructed fresh from each successful fetch and never mutated; the next
/// fetch supersedes it wholesale. Interval order is whatever the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(rename = "cod", default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub message: Option<i64>,
    #[serde(rename = "cnt", default)]
    pub count: Option<u32>,
    #[serde(rename = "list", default)]
    pub intervals: Vec<ForecastInterval>,
    #[serde(default)]
    pub city: Option<City>,
}

impl Forecast {
    /// Decode a raw response body.
    ///
    /// Absent optional fields decode to `None` or an empty sequence; a
    /// present field of the wrong shape is an error naming that field.
    pub fn from_json(bytes: &[u8]) -> Result<Self, FetchError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
