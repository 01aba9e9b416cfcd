//! [`Query`] collection related to the multiple [`User`]s.

use std::sync::Arc;

use common::{
    operations::{By, Select},
    pagination::{self, ArgumentsError},
    Page,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{User, Users},
    infra::{upstream, Upstream},
    read::user::list::Filter,
    Service,
};

use super::Query;

/// Queries a [`Page`] of [`User`]s, optionally filtered by name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct List {
    /// 1-based number of the requested [`Page`].
    pub page: i64,

    /// Size of the requested [`Page`].
    pub size: i64,

    /// Name (or its part) to filter the [`User`]s by.
    pub name: Option<String>,
}

impl Default for List {
    fn default() -> Self {
        Self {
            page: pagination::DEFAULT_PAGE,
            size: pagination::DEFAULT_SIZE,
            name: None,
        }
    }
}

impl<Up> Query<List> for Service<Up>
where
    Up: Upstream<
        Select<By<Arc<Users>, ()>>,
        Ok = Arc<Users>,
        Err = Traced<upstream::Error>,
    >,
{
    type Ok = Page<User>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let List { page, size, name } = query;

        // Reject invalid arguments before bothering the `Upstream`.
        let arguments = pagination::Arguments::new(page, size)
            .map_err(E::InvalidArguments)
            .map_err(tracerr::wrap!())?;

        let users = self
            .upstream()
            .execute(Select(By::default()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let filter = Filter::new(name.as_deref());
        if let Some(name) = &filter.name {
            log::debug!("applying name filter: {name}");
        }

        let page = Page::new(&arguments, filter.apply(&users.users))
            .map(User::clone);

        log::info!(
            "returning page {} of {} with {} items (total: {})",
            page.page,
            page.total_pages,
            page.data.len(),
            page.total_items,
        );

        Ok(page)
    }
}

/// Error of [`List`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Invalid pagination arguments.
    #[display("invalid pagination arguments: {_0}")]
    InvalidArguments(ArgumentsError),

    /// [`Upstream`] error.
    #[display("`Upstream` operation failed: {_0}")]
    Upstream(upstream::Error),
}
