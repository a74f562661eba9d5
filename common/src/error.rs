//! Error taxonomy of the rent-control lookup.
//!
//! Transport-class failures ([`LookupError::Transport`], [`LookupError::Status`],
//! [`LookupError::Decode`]) mean "could not verify, retry". [`LookupError::NoData`]
//! and [`LookupError::UnsupportedTerritory`] are final answers. Nothing is retried
//! inside the core.

use thiserror::Error;

use crate::territory::Territory;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum LookupError {
    /// The request never produced a response (DNS, TLS, timeout, connection reset).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The dataset answered with a non-2xx status.
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body did not have the expected JSON shape.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed data, but nothing matches this address and category.
    #[error("no rent-control data for this address in {}", territory.label())]
    NoData { territory: Territory },

    /// The postcode is outside every covered territory. Raised before any request.
    #[error("postcode {postcode:?} is outside the covered territories")]
    UnsupportedTerritory { postcode: String },
}

impl LookupError {
    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        LookupError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        LookupError::Decode {
            url: url.into(),
            source,
        }
    }

    /// Whether asking again later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LookupError::Transport { .. } | LookupError::Status { .. } | LookupError::Decode { .. }
        )
    }
}

/// An invalid UI code while building a regulation category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("invalid room count: {0:?} (expected 1, 2, 3 or 4+)")]
    RoomCount(String),

    #[error(
        "invalid construction period: {0:?} (expected avant-1946, 1946-1970, 1971-1990 or apres-1990)"
    )]
    ConstructionPeriod(String),

    #[error("invalid furnished flag: {0:?} (expected meuble or non-meuble)")]
    Furnished(String),

    #[error("invalid building type: {0:?} (expected appartement or maison)")]
    BuildingType(String),
}
