//! [`User`]s listing endpoint.

use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query},
    Extension, Json,
};
use common::{
    pagination::{self, ArgumentsError},
    Page,
};
use serde::Deserialize;
use service::{domain::User, query, Query as _};
use tracing as log;

use crate::{define_error, AsError, Error, Service};

/// Query parameters of the [`list`] endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct Params {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of [`User`]s per page.
    #[serde(default = "default_size")]
    pub size: i64,

    /// Name (or its part) to filter [`User`]s by.
    pub name: Option<String>,
}

/// Returns the default [`Params::page`].
const fn default_page() -> i64 {
    pagination::DEFAULT_PAGE
}

/// Returns the default [`Params::size`].
const fn default_size() -> i64 {
    pagination::DEFAULT_SIZE
}

/// Returns a [`Page`] of [`User`]s, optionally filtered by their name.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_PARAMETER` - a query parameter is not a valid value;
/// - `INVALID_PAGE` - `page` is not positive;
/// - `INVALID_SIZE` - `size` is not positive;
/// - `SIZE_TOO_LARGE` - `size` exceeds 100;
/// - `UPSTREAM_UNAVAILABLE` - the external API cannot be reached;
/// - `UPSTREAM_MALFORMED` - the external API returned an invalid response.
#[tracing::instrument(
    skip_all,
    fields(
        page = tracing::field::Empty,
        size = tracing::field::Empty,
        name = tracing::field::Empty,
    ),
)]
pub async fn list(
    Extension(service): Extension<Service>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Page<User>>, Error> {
    let Query(Params { page, size, name }) =
        params.map_err(|e| e.into_error().at(uri.path()))?;

    let span = tracing::Span::current();
    _ = span.record("page", page).record("size", size);
    if let Some(name) = &name {
        _ = span.record("name", name.as_str());
    }
    log::info!("listing users: page={page}, size={size}, name={name:?}");

    let page = service
        .execute(query::users::List { page, size, name })
        .await
        .map_err(|e| e.into_error().at(uri.path()))?;

    log::info!(
        "returning {} users for page {} of {}",
        page.data.len(),
        page.page,
        page.total_pages,
    );

    Ok(Json(page))
}

impl AsError for query::users::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::InvalidArguments(e) => Some(PaginationError::from(*e).into()),
            Self::Upstream(e) => e.try_as_error(),
        }
    }
}

impl From<ArgumentsError> for PaginationError {
    fn from(err: ArgumentsError) -> Self {
        match err {
            ArgumentsError::PageNotPositive => Self::InvalidPage,
            ArgumentsError::SizeNotPositive => Self::InvalidSize,
            ArgumentsError::SizeTooLarge => Self::SizeTooLarge,
        }
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGE"]
        #[status = BAD_REQUEST]
        #[message = "page must be greater than 0"]
        InvalidPage,

        #[code = "INVALID_SIZE"]
        #[status = BAD_REQUEST]
        #[message = "size must be greater than 0"]
        InvalidSize,

        #[code = "SIZE_TOO_LARGE"]
        #[status = BAD_REQUEST]
        #[message = "size cannot exceed 100"]
        SizeTooLarge,
    }
}
