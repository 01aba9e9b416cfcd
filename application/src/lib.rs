//! Application provides REST API for interacting with the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
pub mod error;

use axum::{routing::get, Extension, Router};
use http::header::{HeaderValue, InvalidHeaderValue};
use tower_http::cors::{AllowOrigin, CorsLayer};
// Used in binary.
use axum_client_ip as _;
use tokio as _;
use tracing_subscriber as _;
// Used in tests.
#[cfg(test)]
use reqwest as _;
#[cfg(test)]
use serde_json as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<
    service::infra::Cached<service::infra::DummyJson>,
>;

/// Creates a [`Router`] serving the REST API on top of the provided
/// [`Service`].
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/users", get(api::users::list))
        .route("/api/users", get(api::users::list))
        .layer(Extension(service))
}

/// Creates a [`CorsLayer`] allowing `GET` requests from the configured
/// origins.
///
/// A `*` entry allows any origin.
///
/// # Errors
///
/// If any of the configured origins is not a valid [`HeaderValue`].
pub fn cors(config: &config::Cors) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = if config.origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    Ok(CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(origins))
}
