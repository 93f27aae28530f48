//! Best-known location for a terminal session.
//!
//! A terminal has no positioning hardware; the closest analogue of a last
//! known fix is a coordinate the user exported beforehand. The
//! `FORECAST_LAT` / `FORECAST_LON` environment variables play that role.

use async_trait::async_trait;
use forecast_core::{Coordinate, LocationResolver, Unavailable};

pub const LAT_VAR: &str = "FORECAST_LAT";
pub const LON_VAR: &str = "FORECAST_LON";

#[derive(Debug, Default)]
pub struct LastKnownLocation {
    latitude: Option<String>,
    longitude: Option<String>,
}

impl LastKnownLocation {
    /// Snapshot the exported fix at startup.
    pub fn from_env() -> Self {
        Self {
            latitude: std::env::var(LAT_VAR).ok(),
            longitude: std::env::var(LON_VAR).ok(),
        }
    }
}

#[async_trait]
impl LocationResolver for LastKnownLocation {
    async fn resolve(&self) -> Result<Coordinate, Unavailable> {
        let (Some(lat), Some(lon)) = (&self.latitude, &self.longitude) else {
            return Err(Unavailable::NoKnownFix);
        };

        let lat: f64 = lat.trim().parse().map_err(|_| Unavailable::NoKnownFix)?;
        let lon: f64 = lon.trim().parse().map_err(|_| Unavailable::NoKnownFix)?;

        Coordinate::new(lat, lon).map_err(|_| Unavailable::NoKnownFix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(lat: &str, lon: &str) -> LastKnownLocation {
        LastKnownLocation {
            latitude: Some(lat.to_string()),
            longitude: Some(lon.to_string()),
        }
    }

    #[tokio::test]
    async fn missing_fix_is_unavailable() {
        let resolver = LastKnownLocation::default();
        assert_eq!(resolver.resolve().await, Err(Unavailable::NoKnownFix));
    }

    #[tokio::test]
    async fn garbled_fix_is_unavailable() {
        let resolver = fix("fifty-two", "13.405");
        assert_eq!(resolver.resolve().await, Err(Unavailable::NoKnownFix));
    }

    #[tokio::test]
    async fn out_of_range_fix_is_unavailable() {
        let resolver = fix("123.0", "13.405");
        assert_eq!(resolver.resolve().await, Err(Unavailable::NoKnownFix));
    }

    #[tokio::test]
    async fn valid_fix_resolves() {
        let resolver = fix("52.52", "13.405");
        let coordinate = resolver.resolve().await.expect("fix should resolve");
        assert_eq!(coordinate.latitude, 52.52);
        assert_eq!(coordinate.longitude, 13.405);
    }
}
