//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    extract::rejection::QueryRejection,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::infra::upstream;
use tracerr::{Trace, Traced};
use tracing as log;

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            path: None,
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// REST API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,

    /// Path of the request this [`Error`] was raised for.
    pub path: Option<String>,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    ///
    /// The provided `msg` is only logged, never exposed to the client.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        log::error!("unexpected error occurred: {}", msg.to_string());
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "An unexpected error occurred. Please try again later."
                .to_owned(),
            path: None,
            backtrace: None,
        }
    }

    /// Attaches the `path` of the request this [`Error`] was raised for.
    #[must_use]
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
            path: _,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            log::error!("{self}");
        } else {
            log::warn!("{self}");
        }

        let Self {
            code,
            status_code,
            backtrace: _,
            message,
            path,
        } = self;

        (
            status_code,
            Json(Body {
                code,
                status: status_code.as_u16(),
                message,
                path,
            }),
        )
            .into_response()
    }
}

/// JSON body of an [`Error`] response.
#[derive(Debug, Serialize)]
struct Body {
    /// [`Error`] code.
    code: Code,

    /// HTTP status code.
    status: u16,

    /// Human-readable message.
    message: String,

    /// Path of the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for QueryRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_PARAMETER",
            status_code: http::StatusCode::BAD_REQUEST,
            message: self.body_text(),
            path: None,
            backtrace: None,
        })
    }
}

impl AsError for upstream::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Unreachable(_) | Self::Status(_) => {
                Some(UpstreamError::Unavailable.into())
            }
            Self::Malformed(_) => Some(UpstreamError::Malformed.into()),
            Self::Unexpected(_) => None,
        }
    }
}

define_error! {
    enum UpstreamError {
        #[code = "UPSTREAM_UNAVAILABLE"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "The external API is currently unreachable. Please try again later."]
        Unavailable,

        #[code = "UPSTREAM_MALFORMED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "The external API returned an invalid response."]
        Malformed,
    }
}
