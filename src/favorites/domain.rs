pub mod repository {
    use storefront_core::ProductId;

    use crate::shared::{domain::errors::RemoteError, infrastructure::errors::AppError};

    /// Port for the remote favorites service, the durable owner of favorite
    /// state. The local store is a cache of it, stale between round-trips.
    #[async_trait::async_trait]
    pub trait Repository: Send + Sync + 'static {
        async fn fetch_favorite_ids(&self) -> Result<Vec<ProductId>, AppError<RemoteError>>;

        async fn toggle_favorite(&self, id: ProductId) -> Result<(), AppError<RemoteError>>;
    }
}

pub mod store {
    use std::sync::Arc;

    use storefront_core::{FavoriteIdSet, ProductId};
    use tokio::sync::watch;

    /// Single writer of the favorite-id set. Both mutations are synchronous
    /// and atomic: readers observe them as soon as the call returns.
    #[derive(Clone)]
    pub struct FavoritesStore {
        state: Arc<watch::Sender<FavoriteIdSet>>,
    }

    impl FavoritesStore {
        pub fn new() -> Self {
            let (tx, _rx) = watch::channel(FavoriteIdSet::new());
            Self { state: Arc::new(tx) }
        }

        /// Wholesale overwrite; duplicate ids in the input collapse. Used by
        /// the initial load, refresh application and rollback.
        pub fn replace_all(&self, ids: impl IntoIterator<Item = ProductId>) {
            self.state.send_replace(ids.into_iter().collect());
        }

        pub fn optimistic_toggle(&self, id: ProductId) {
            self.state.send_modify(|set| {
                set.toggle(id);
            });
        }

        pub fn current(&self) -> FavoriteIdSet {
            self.state.borrow().clone()
        }

        pub fn contains(&self, id: ProductId) -> bool {
            self.state.borrow().contains(id)
        }

        pub fn watch(&self) -> watch::Receiver<FavoriteIdSet> {
            self.state.subscribe()
        }
    }

    impl Default for FavoritesStore {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub mod pending_mutation {
    use storefront_core::{FavoriteIdSet, ProductId};

    use super::store::FavoritesStore;

    /// Transaction value for one optimistic toggle: captured before the flip,
    /// consumed exactly once when the remote call settles.
    #[must_use]
    pub struct PendingMutation {
        product_id: ProductId,
        previous: FavoriteIdSet,
    }

    impl PendingMutation {
        pub fn capture(store: &FavoritesStore, product_id: ProductId) -> Self {
            Self {
                product_id,
                previous: store.current(),
            }
        }

        pub fn product_id(&self) -> ProductId {
            self.product_id
        }

        /// Restores the exact pre-toggle membership, not a re-flip of the id:
        /// the transaction rolls back to its own starting point.
        pub fn restore(self, store: &FavoritesStore) {
            store.replace_all(self.previous);
        }

        pub fn discard(self) {}
    }
}

pub mod refresh_epoch {
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    };

    /// Generation token for favorites reads: a read result may only be
    /// applied to the store if the epoch captured when the read was issued is
    /// still current. Every toggle start bumps the epoch, which stands in for
    /// cancelling the superseded in-flight read.
    #[derive(Clone, Default)]
    pub struct RefreshEpoch(Arc<AtomicU64>);

    impl RefreshEpoch {
        pub fn current(&self) -> u64 {
            self.0.load(Ordering::Acquire)
        }

        /// Invalidates every read issued under an earlier epoch.
        pub fn bump(&self) -> u64 {
            self.0.fetch_add(1, Ordering::AcqRel) + 1
        }

        pub fn is_current(&self, epoch: u64) -> bool {
            self.current() == epoch
        }
    }
}
