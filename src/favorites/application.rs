pub mod load_all {
    use std::sync::Arc;

    use crate::{
        catalog::domain::{repository::Repository as CatalogRepository, store::CatalogStore},
        favorites::domain::{
            refresh_epoch::RefreshEpoch, repository::Repository, store::FavoritesStore,
        },
        prelude::*,
        shared::domain::errors::RemoteError,
    };

    /// Initial load: catalog and remote favorites are fetched concurrently
    /// and applied independently, so one failing half still leaves the other
    /// usable (degraded view, not fatal).
    pub struct LoadAll {
        catalog_repository: Arc<dyn CatalogRepository>,
        favorites_repository: Arc<dyn Repository>,
        catalog_store: CatalogStore,
        favorites_store: FavoritesStore,
        refresh_epoch: RefreshEpoch,
    }

    impl ContextProvide<LoadAll> for AppContext {
        fn ctx_provide(&self) -> LoadAll {
            LoadAll {
                catalog_repository: self.provide(),
                favorites_repository: self.provide(),
                catalog_store: self.provide(),
                favorites_store: self.provide(),
                refresh_epoch: self.provide(),
            }
        }
    }

    impl LoadAll {
        pub async fn run(&self) -> Result<(), AppError<LoadError>> {
            let epoch = self.refresh_epoch.current();

            let (products, favorites) = tokio::join!(
                self.catalog_repository.fetch_products(),
                self.favorites_repository.fetch_favorite_ids(),
            );

            let catalog = match products {
                Ok(products) => {
                    self.catalog_store.replace(products);
                    Ok(())
                }
                Err(e) => Err(e.map_app(LoadError::Catalog)),
            };

            match favorites {
                // a toggle that started mid-load owns the store now; its
                // authoritative refresh supersedes this read
                Ok(ids) if self.refresh_epoch.is_current(epoch) => {
                    self.favorites_store.replace_all(ids)
                }
                Ok(_) => {}
                Err(e) => {
                    catalog?;
                    return Err(e.map_app(LoadError::Favorites));
                }
            }

            catalog
        }
    }

    #[derive(Debug, thiserror::Error)]
    pub enum LoadError {
        #[error("catalog fetch failed: {0}")]
        Catalog(RemoteError),
        #[error("favorites fetch failed: {0}")]
        Favorites(RemoteError),
    }
}

pub mod toggle_one {
    use std::sync::Arc;

    use storefront_core::ProductId;

    use crate::{
        favorites::domain::{
            pending_mutation::PendingMutation, refresh_epoch::RefreshEpoch,
            repository::Repository, store::FavoritesStore,
        },
        prelude::*,
        shared::{application::logging::LogService, domain::errors::RemoteError},
    };

    /// One toggle transaction: optimistic flip, remote commit, reconcile.
    #[derive(Clone)]
    pub struct ToggleOne {
        repository: Arc<dyn Repository>,
        store: FavoritesStore,
        refresh_epoch: RefreshEpoch,
        log: LogService,
    }

    #[derive(Debug)]
    pub enum ToggleOutcome {
        /// The remote accepted the toggle; the store keeps the optimistic
        /// state and one authoritative refresh ran (unless superseded).
        Settled,
        /// The remote refused or failed; the store was restored to the exact
        /// set captured before the optimistic flip.
        RolledBack(AppError<RemoteError>),
    }

    impl ContextProvide<ToggleOne> for AppContext {
        fn ctx_provide(&self) -> ToggleOne {
            ToggleOne {
                repository: self.provide(),
                store: self.provide(),
                refresh_epoch: self.provide(),
                log: self.provide(),
            }
        }
    }

    impl ToggleOne {
        /// Fire-and-forget entry point for the presentation layer: completion
        /// is observed through the store, a rollback is reported via the log.
        pub fn request(&self, id: ProductId) {
            let this = self.clone();
            tokio::spawn(async move {
                let _ = this.run(id).await;
            });
        }

        pub async fn run(&self, id: ProductId) -> ToggleOutcome {
            // a favorites read issued before this toggle must not clobber the
            // optimistic write once it resolves
            self.refresh_epoch.bump();

            let pending = PendingMutation::capture(&self.store, id);
            self.store.optimistic_toggle(id);

            match self.repository.toggle_favorite(id).await {
                Ok(()) => {
                    pending.discard();
                    self.refresh().await;
                    ToggleOutcome::Settled
                }
                Err(reason) => {
                    self.log.error(format!(
                        "toggle of product {} rolled back: {}",
                        pending.product_id(),
                        reason
                    ));
                    pending.restore(&self.store);
                    ToggleOutcome::RolledBack(reason)
                }
            }
        }

        /// Cache invalidation after a settled toggle: re-read the
        /// authoritative set and apply it only if no newer toggle started in
        /// the meantime.
        async fn refresh(&self) {
            let epoch = self.refresh_epoch.current();

            match self.repository.fetch_favorite_ids().await {
                Ok(ids) if self.refresh_epoch.is_current(epoch) => self.store.replace_all(ids),
                Ok(_) => {}
                Err(error) => self.log.error(format!("favorites refresh failed: {}", error)),
            }
        }
    }
}

pub mod get_favorites {
    use storefront_core::FavoriteIdSet;

    use crate::{favorites::domain::store::FavoritesStore, prelude::*};

    /// Synchronous favorites read for the presentation layer.
    pub struct GetFavorites {
        store: FavoritesStore,
    }

    impl ContextProvide<GetFavorites> for AppContext {
        fn ctx_provide(&self) -> GetFavorites {
            GetFavorites {
                store: self.provide(),
            }
        }
    }

    impl GetFavorites {
        pub fn run(&self) -> FavoriteIdSet {
            self.store.current()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };
    use std::time::Duration;

    use storefront_core::{FavoriteIdSet, ProductId};
    use tokio::sync::{Mutex, Notify};

    use super::{
        get_favorites::GetFavorites,
        load_all::{LoadAll, LoadError},
        toggle_one::{ToggleOne, ToggleOutcome},
    };
    use crate::{
        brand::base_configs,
        catalog::{
            domain::{repository::Repository as CatalogRepository, store::CatalogStore},
            infrastructure::memory::MemoryRepository as MemoryCatalog,
        },
        favorites::domain::{repository::Repository, store::FavoritesStore},
        prelude::*,
        shared::{domain::errors::RemoteError, infrastructure::logging::ConsoleLogRepository},
    };

    fn id(n: u64) -> ProductId {
        ProductId::new(n)
    }

    fn set(ids: &[u64]) -> FavoriteIdSet {
        ids.iter().copied().map(ProductId::new).collect()
    }

    /// Remote favorites service double: serves a mutable server-side set,
    /// with switchable failures and a one-shot gate to hold a fetch in
    /// flight until the test releases it.
    #[derive(Default)]
    struct FakeRemote {
        server: Mutex<Vec<ProductId>>,
        fetch_gate: Mutex<Option<Arc<Notify>>>,
        toggle_gate: Mutex<Option<Arc<Notify>>>,
        fetch_fails: AtomicBool,
        toggle_fails: AtomicBool,
    }

    impl FakeRemote {
        fn seeded(ids: &[u64]) -> Self {
            Self {
                server: Mutex::new(ids.iter().copied().map(ProductId::new).collect()),
                ..Self::default()
            }
        }

        async fn gate_next_fetch(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.fetch_gate.lock().await = Some(gate.clone());
            gate
        }

        async fn gate_next_toggle(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.toggle_gate.lock().await = Some(gate.clone());
            gate
        }

        fn fail_fetches(&self) {
            self.fetch_fails.store(true, Ordering::SeqCst);
        }

        fn fail_toggles(&self) {
            self.toggle_fails.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl Repository for FakeRemote {
        async fn fetch_favorite_ids(&self) -> Result<Vec<ProductId>, AppError<RemoteError>> {
            if self.fetch_fails.load(Ordering::SeqCst) {
                return Err(AppError::App(RemoteError::Unavailable));
            }

            // snapshot before gating, so a held read resolves with stale data
            let snapshot = self.server.lock().await.clone();
            let gate = self.fetch_gate.lock().await.take();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            Ok(snapshot)
        }

        async fn toggle_favorite(&self, id: ProductId) -> Result<(), AppError<RemoteError>> {
            let gate = self.toggle_gate.lock().await.take();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if self.toggle_fails.load(Ordering::SeqCst) {
                return Err(AppError::App(RemoteError::Rejected));
            }

            let mut server = self.server.lock().await;
            if server.contains(&id) {
                server.retain(|other| *other != id);
            } else {
                server.push(id);
            }

            Ok(())
        }
    }

    struct FailingCatalog;

    #[async_trait::async_trait]
    impl CatalogRepository for FailingCatalog {
        async fn fetch_products(
            &self,
        ) -> Result<Vec<crate::catalog::domain::product::Product>, AppError<RemoteError>> {
            Err(AppError::App(RemoteError::Timeout))
        }
    }

    fn context(remote: Arc<FakeRemote>) -> AppContext {
        AppContext::new(
            Arc::new(MemoryCatalog::new()),
            remote,
            Arc::new(ConsoleLogRepository),
            base_configs::doc_morris(),
        )
    }

    #[tokio::test]
    async fn load_applies_catalog_and_favorites() {
        let ctx = context(Arc::new(FakeRemote::seeded(&[0, 2])));

        let load: LoadAll = ctx.provide();
        load.run().await.unwrap();

        let catalog: CatalogStore = ctx.provide();
        assert_eq!(catalog.current().len(), 3);

        let favorites: GetFavorites = ctx.provide();
        assert_eq!(favorites.run(), set(&[0, 2]));
    }

    #[tokio::test]
    async fn failed_favorites_load_keeps_store_and_surfaces_error() {
        let remote = Arc::new(FakeRemote::seeded(&[0]));
        remote.fail_fetches();
        let ctx = context(remote);

        let load: LoadAll = ctx.provide();
        let error = load.run().await.unwrap_err();

        assert!(matches!(
            error,
            AppError::App(LoadError::Favorites(RemoteError::Unavailable))
        ));
        // the catalog half still applied
        let catalog: CatalogStore = ctx.provide();
        let favorites: FavoritesStore = ctx.provide();
        assert_eq!(catalog.current().len(), 3);
        assert!(favorites.current().is_empty());
    }

    #[tokio::test]
    async fn failed_catalog_load_still_applies_favorites() {
        let ctx = AppContext::new(
            Arc::new(FailingCatalog),
            Arc::new(FakeRemote::seeded(&[0, 2])),
            Arc::new(ConsoleLogRepository),
            base_configs::doc_morris(),
        );

        let load: LoadAll = ctx.provide();
        let error = load.run().await.unwrap_err();

        assert!(matches!(
            error,
            AppError::App(LoadError::Catalog(RemoteError::Timeout))
        ));
        let favorites: FavoritesStore = ctx.provide();
        assert_eq!(favorites.current(), set(&[0, 2]));
    }

    #[tokio::test]
    async fn optimistic_flip_is_visible_before_the_remote_settles() {
        let remote = Arc::new(FakeRemote::seeded(&[]));
        let gate = remote.gate_next_toggle().await;
        remote.fail_toggles();
        let ctx = context(remote);

        let toggle: ToggleOne = ctx.provide();
        let store: FavoritesStore = ctx.provide();
        let before = store.current();

        let in_flight = tokio::spawn({
            let toggle = toggle.clone();
            async move { toggle.run(id(3)).await }
        });
        tokio::task::yield_now().await;

        // committing, not yet settled: the flip is already observable
        assert!(store.contains(id(3)));

        gate.notify_one();
        let outcome = in_flight.await.unwrap();

        assert!(matches!(
            outcome,
            ToggleOutcome::RolledBack(AppError::App(RemoteError::Rejected))
        ));
        assert!(!store.contains(id(3)));
        assert_eq!(store.current(), before);
    }

    #[tokio::test]
    async fn rollback_restores_the_exact_pre_toggle_set() {
        let remote = Arc::new(FakeRemote::seeded(&[1]));
        let ctx = context(remote.clone());

        let load: LoadAll = ctx.provide();
        load.run().await.unwrap();

        remote.fail_toggles();
        let toggle: ToggleOne = ctx.provide();
        let outcome = toggle.run(id(3)).await;

        assert!(matches!(outcome, ToggleOutcome::RolledBack(_)));
        let store: FavoritesStore = ctx.provide();
        assert_eq!(store.current(), set(&[1]));
    }

    #[tokio::test]
    async fn settled_toggle_refreshes_from_the_authoritative_set() {
        let remote = Arc::new(FakeRemote::seeded(&[0]));
        let ctx = context(remote);

        let load: LoadAll = ctx.provide();
        load.run().await.unwrap();

        let toggle: ToggleOne = ctx.provide();
        let outcome = toggle.run(id(2)).await;

        assert!(matches!(outcome, ToggleOutcome::Settled));
        let store: FavoritesStore = ctx.provide();
        assert_eq!(store.current(), set(&[0, 2]));
    }

    #[tokio::test]
    async fn refresh_superseded_by_a_newer_toggle_is_discarded() {
        let remote = Arc::new(FakeRemote::seeded(&[0]));
        let gate = remote.gate_next_fetch().await;
        let ctx = context(remote);

        let toggle: ToggleOne = ctx.provide();
        let first = tokio::spawn({
            let toggle = toggle.clone();
            async move { toggle.run(id(1)).await }
        });
        tokio::task::yield_now().await;
        // the first toggle settled remotely and is now held inside its
        // post-settle refresh read

        let outcome = toggle.run(id(2)).await;
        assert!(matches!(outcome, ToggleOutcome::Settled));

        let store: FavoritesStore = ctx.provide();
        let after_second = store.current();
        assert_eq!(after_second, set(&[0, 1, 2]));

        // the held refresh resolves with a set missing the second toggle;
        // its epoch is stale, so the result is dropped
        gate.notify_one();
        let outcome = first.await.unwrap();
        assert!(matches!(outcome, ToggleOutcome::Settled));
        assert_eq!(store.current(), after_second);
    }

    struct RecordingLog(std::sync::Mutex<Vec<String>>);

    impl crate::shared::domain::logging::LogRepository for RecordingLog {
        fn log(&self, message: std::fmt::Arguments) -> Result<(), InfrastructureError> {
            self.0
                .lock()
                .unwrap()
                .push(message.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn rollback_is_reported_through_the_log() {
        let remote = Arc::new(FakeRemote::seeded(&[]));
        remote.fail_toggles();
        let log = Arc::new(RecordingLog(std::sync::Mutex::new(Vec::new())));
        let ctx = AppContext::new(
            Arc::new(MemoryCatalog::new()),
            remote,
            log.clone(),
            base_configs::doc_morris(),
        );

        let toggle: ToggleOne = ctx.provide();
        let outcome = toggle.run(id(3)).await;
        assert!(matches!(outcome, ToggleOutcome::RolledBack(_)));

        let entries = log.0.lock().unwrap();
        assert!(entries.iter().any(|entry| entry.contains("product 3")));
    }

    #[tokio::test]
    async fn stale_in_flight_read_cannot_clobber_a_later_toggle() {
        let remote = Arc::new(FakeRemote::seeded(&[9]));
        let gate = remote.gate_next_fetch().await;
        let ctx = context(remote);

        let in_flight_load = tokio::spawn({
            let load_ctx = ctx.clone();
            async move {
                let load: LoadAll = load_ctx.provide();
                load.run().await
            }
        });
        tokio::task::yield_now().await;

        // the toggle starts while the favorites read is still in flight
        let toggle: ToggleOne = ctx.provide();
        let outcome = toggle.run(id(3)).await;
        assert!(matches!(outcome, ToggleOutcome::Settled));

        let store: FavoritesStore = ctx.provide();
        let after_toggle = store.current();
        assert_eq!(after_toggle, set(&[9, 3]));

        // the held read resolves with its stale snapshot and is discarded
        gate.notify_one();
        in_flight_load.await.unwrap().unwrap();
        assert_eq!(store.current(), after_toggle);
    }

    #[tokio::test]
    async fn request_is_fire_and_forget() {
        let remote = Arc::new(FakeRemote::seeded(&[]));
        let ctx = context(remote);

        let toggle: ToggleOne = ctx.provide();
        let store: FavoritesStore = ctx.provide();
        let mut changes = store.watch();

        toggle.request(id(1));

        tokio::time::timeout(Duration::from_secs(1), async {
            while !store.contains(id(1)) {
                changes.changed().await.unwrap();
            }
        })
        .await
        .unwrap();
    }
}
