use async_trait::async_trait;
use thiserror::Error;

use crate::model::Coordinate;

/// Why no device-derived coordinate could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("location permission not granted")]
    PermissionDenied,
    #[error("no location provider enabled")]
    ProviderDisabled,
    #[error("no last known fix")]
    NoKnownFix,
}

/// Source of a best-known device coordinate.
///
/// Implementations must hold whatever capability grant their platform
/// requires before resolving; the session never performs permission checks
/// of its own.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self) -> Result<Coordinate, Unavailable>;
}
