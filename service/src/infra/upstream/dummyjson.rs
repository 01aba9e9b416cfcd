//! [DummyJSON] [`Upstream`] implementation.
//!
//! [DummyJSON]: https://dummyjson.com

use std::{sync::Arc, time};

use common::operations::{By, Select};
use serde::Deserialize;
use tracerr::Traced;
use tracing as log;

use crate::domain::{User, Users};

use super::{Error, Upstream};

/// [`DummyJson`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the API.
    pub url: String,

    /// Maximum number of [`User`]s requested at once.
    pub limit: usize,

    /// Timeout of a single request.
    pub timeout: time::Duration,
}

/// [DummyJSON] API client.
///
/// [DummyJSON]: https://dummyjson.com
#[derive(Clone, Debug)]
pub struct DummyJson {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// URL of the users listing endpoint.
    endpoint: String,

    /// Maximum number of [`User`]s requested at once.
    limit: usize,
}

impl DummyJson {
    /// Creates a new [`DummyJson`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// Errors if the underlying HTTP client cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/users", config.url.trim_end_matches('/')),
            limit: config.limit,
        })
    }
}

impl Upstream<Select<By<Arc<Users>, ()>>> for DummyJson {
    type Ok = Arc<Users>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Arc<Users>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        log::info!(
            "fetching users from external API: {}?limit={}",
            self.endpoint,
            self.limit,
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("limit", self.limit)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(classify)
            .map_err(tracerr::wrap!())?;

        let users = response
            .json::<Option<Payload>>()
            .await
            .map_err(classify)
            .and_then(Payload::into_users)
            .map_err(|e| {
                log::error!("received invalid response from external API: {e}");
                e
            })
            .map_err(tracerr::wrap!())?;

        log::info!(
            "fetched {} users from external API (total: {})",
            users.users.len(),
            users.total,
        );

        Ok(Arc::new(users))
    }
}

/// Body of the users listing response.
#[derive(Debug, Deserialize)]
struct Payload {
    /// Listed [`User`]s.
    users: Option<Vec<User>>,

    /// Total number of [`User`]s.
    #[serde(default)]
    total: u64,

    /// Number of skipped [`User`]s.
    #[serde(default)]
    skip: u64,

    /// Applied limit.
    #[serde(default)]
    limit: u64,
}

impl Payload {
    /// Converts the (possibly `null`) [`Payload`] into [`Users`].
    fn into_users(payload: Option<Self>) -> Result<Users, Error> {
        let Self {
            users,
            total,
            skip,
            limit,
        } = payload.ok_or_else(|| Error::Malformed("empty body".into()))?;

        Ok(Users {
            users: users
                .ok_or_else(|| Error::Malformed("missing `users`".into()))?,
            total,
            skip,
            limit,
        })
    }
}

/// Classifies the provided [`reqwest::Error`] into an [`Error`].
fn classify(err: reqwest::Error) -> Error {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        log::error!("network error while calling external API: {err}");
        Error::Unreachable(err.to_string())
    } else if err.is_status() {
        log::error!("error calling external API: {err}");
        Error::Status(err.to_string())
    } else if err.is_decode() {
        Error::Malformed(err.to_string())
    } else {
        log::error!("unexpected error while calling external API: {err}");
        Error::Unexpected(err.to_string())
    }
}
