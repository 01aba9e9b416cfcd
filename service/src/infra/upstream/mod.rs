//! [`Upstream`]-related implementations.

#[cfg(feature = "dummyjson")]
pub mod dummyjson;

use derive_more::{Display, Error as StdError};

#[cfg(feature = "dummyjson")]
pub use self::dummyjson::DummyJson;

/// External data source operation.
pub use common::Handler as Upstream;

/// [`Upstream`] error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// External data source cannot be reached.
    #[display("external API is unreachable: {_0}")]
    Unreachable(#[error(not(source))] String),

    /// External data source responded with an unsuccessful status.
    #[display("failed to fetch data from external API: {_0}")]
    Status(#[error(not(source))] String),

    /// External data source responded with no or invalid data.
    #[display("invalid response from external API: {_0}")]
    Malformed(#[error(not(source))] String),

    /// Any other failure.
    #[display("unexpected error occurred: {_0}")]
    Unexpected(#[error(not(source))] String),
}

impl Error {
    /// Indicates whether this [`Error`] means that the external data source
    /// is unavailable at the moment.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Status(_))
    }
}
