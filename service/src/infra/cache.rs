//! [`Cached`] [`Upstream`] definitions.

use std::{convert::Infallible, sync::Arc, time};

use common::operations::{By, Delete, Select};
use tokio::{sync::Mutex, time::Instant};
use tracerr::Traced;
use tracing as log;

use crate::domain::Users;

use super::{upstream, Upstream};

/// [`Cached`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Time after which a cached value is considered stale.
    ///
    /// Zero disables caching.
    pub ttl: time::Duration,
}

/// [`Upstream`] remembering the [`Users`] fetched from the wrapped one.
///
/// Concurrent misses are coalesced into a single fetch, and failed fetches
/// are never remembered.
#[derive(Clone, Debug)]
pub struct Cached<Up> {
    /// Wrapped [`Upstream`].
    upstream: Up,

    /// [`Config`] of this [`Cached`].
    config: Config,

    /// Currently cached [`Users`].
    entry: Arc<Mutex<Option<Entry>>>,
}

/// Cached [`Users`] along with the moment they were fetched.
#[derive(Debug)]
struct Entry {
    /// Cached [`Users`].
    users: Arc<Users>,

    /// [`Instant`] when the [`Users`] were fetched.
    fetched_at: Instant,
}

impl<Up> Cached<Up> {
    /// Wraps the provided [`Upstream`] into a [`Cached`] one.
    #[must_use]
    pub fn new(upstream: Up, config: Config) -> Self {
        Self {
            upstream,
            config,
            entry: Arc::new(Mutex::new(None)),
        }
    }
}

impl<Up> Upstream<Select<By<Arc<Users>, ()>>> for Cached<Up>
where
    Up: Upstream<
        Select<By<Arc<Users>, ()>>,
        Ok = Arc<Users>,
        Err = Traced<upstream::Error>,
    >,
{
    type Ok = Arc<Users>;
    type Err = Traced<upstream::Error>;

    async fn execute(
        &self,
        select: Select<By<Arc<Users>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut entry = self.entry.lock().await;

        if let Some(e) = entry
            .as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.config.ttl)
        {
            log::debug!("serving `Users` from cache");
            return Ok(Arc::clone(&e.users));
        }

        let users = self
            .upstream
            .execute(select)
            .await
            .map_err(tracerr::wrap!())?;
        *entry = Some(Entry {
            users: Arc::clone(&users),
            fetched_at: Instant::now(),
        });

        Ok(users)
    }
}

impl<Up> Upstream<Delete<By<Arc<Users>, ()>>> for Cached<Up> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        _: Delete<By<Arc<Users>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.entry.lock().await.take().is_some() {
            log::debug!("invalidated cached `Users`");
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time,
    };

    use common::operations::{By, Delete, Select};
    use tracerr::Traced;

    use crate::{
        domain::Users,
        infra::{upstream, Upstream},
    };

    use super::{Cached, Config};

    /// [`Upstream`] counting its calls and serving a fixed result.
    #[derive(Clone, Debug)]
    pub(crate) struct Stub {
        /// Number of times this [`Stub`] was called.
        pub(crate) calls: Arc<AtomicUsize>,

        /// Result this [`Stub`] serves.
        pub(crate) result: Result<Arc<Users>, upstream::Error>,
    }

    impl Stub {
        pub(crate) fn ok(users: Users) -> Self {
            Self {
                calls: Arc::default(),
                result: Ok(Arc::new(users)),
            }
        }

        pub(crate) fn err(err: upstream::Error) -> Self {
            Self {
                calls: Arc::default(),
                result: Err(err),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Upstream<Select<By<Arc<Users>, ()>>> for Stub {
        type Ok = Arc<Users>;
        type Err = Traced<upstream::Error>;

        async fn execute(
            &self,
            _: Select<By<Arc<Users>, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.result.clone().map_err(tracerr::wrap!())
        }
    }

    fn cached(stub: &Stub, ttl: u64) -> Cached<Stub> {
        Cached::new(
            stub.clone(),
            Config {
                ttl: time::Duration::from_secs(ttl),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn serves_from_cache_until_expired() {
        let stub = Stub::ok(Users::default());
        let cache = cached(&stub, 60);

        let first = cache.execute(Select(By::default())).await.unwrap();
        let second = cache.execute(Select(By::default())).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(stub.calls(), 1);

        tokio::time::advance(time::Duration::from_secs(61)).await;

        _ = cache.execute(Select(By::default())).await.unwrap();
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_disables_caching() {
        let stub = Stub::ok(Users::default());
        let cache = cached(&stub, 0);

        _ = cache.execute(Select(By::default())).await.unwrap();
        _ = cache.execute(Select(By::default())).await.unwrap();
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn invalidates() {
        let stub = Stub::ok(Users::default());
        let cache = cached(&stub, 60);

        _ = cache.execute(Select(By::default())).await.unwrap();
        cache.execute(Delete(By::default())).await.unwrap();
        _ = cache.execute(Select(By::default())).await.unwrap();
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn does_not_cache_failures() {
        let stub = Stub::err(upstream::Error::Unreachable("refused".into()));
        let cache = cached(&stub, 60);

        let err = cache.execute(Select(By::default())).await.unwrap_err();
        assert!(err.as_ref().is_unavailable());
        assert!(cache.execute(Select(By::default())).await.is_err());
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn coalesces_concurrent_misses() {
        let stub = Stub::ok(Users::default());
        let cache = cached(&stub, 60);

        let (a, b) = tokio::join!(
            cache.execute(Select(By::default())),
            cache.execute(Select(By::default())),
        );
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(stub.calls(), 1);
    }
}
