pub mod logging {
    use crate::shared::infrastructure::errors::InfrastructureError;

    pub trait LogRepository: Send + Sync + 'static {
        fn log(&self, message: std::fmt::Arguments) -> Result<(), InfrastructureError>;
    }
}

pub mod errors {
    /// How a remote collaborator can fail, as seen by the domain. Anything
    /// outside this taxonomy travels as an infrastructure error.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
    pub enum RemoteError {
        #[error("remote service unavailable")]
        Unavailable,
        #[error("remote service timed out")]
        Timeout,
        #[error("remote service rejected the request")]
        Rejected,
    }
}

pub mod api_url {
    /// Base url of the storefront backend.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    pub struct ApiUrl(Box<str>);

    impl ApiUrl {
        pub fn new(url: impl Into<Box<str>>) -> Self {
            Self(url.into())
        }
    }

    impl std::fmt::Display for ApiUrl {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.fmt(f)
        }
    }
}

pub mod context {
    use std::sync::Arc;

    use crate::{
        brand::{
            brand_config::BrandConfig,
            image_index::BrandImageIndex,
        },
        catalog::domain::store::CatalogStore,
        favorites::domain::{refresh_epoch::RefreshEpoch, store::FavoritesStore},
        shared::{
            application::logging::LogService,
            domain::{api_url::ApiUrl, logging::LogRepository},
            infrastructure::errors::InfrastructureError,
        },
    };

    pub trait ContextProvide<S> {
        fn ctx_provide(&self) -> S;
    }

    /// Process-wide dependency wiring: owns the stores, the refresh epoch and
    /// the remote ports. Created once per session, torn down with it.
    #[derive(Clone)]
    pub struct AppContext {
        catalog_store: CatalogStore,
        favorites_store: FavoritesStore,
        refresh_epoch: RefreshEpoch,
        catalog_repository: Arc<dyn crate::catalog::domain::repository::Repository>,
        favorites_repository: Arc<dyn crate::favorites::domain::repository::Repository>,
        log_repository: Arc<dyn LogRepository>,
        brand: Arc<BrandConfig>,
        image_index: BrandImageIndex,
    }

    impl AppContext {
        pub fn new(
            catalog_repository: Arc<dyn crate::catalog::domain::repository::Repository>,
            favorites_repository: Arc<dyn crate::favorites::domain::repository::Repository>,
            log_repository: Arc<dyn LogRepository>,
            brand: BrandConfig,
        ) -> Self {
            let image_index = BrandImageIndex::from(&brand);

            Self {
                catalog_store: CatalogStore::new(),
                favorites_store: FavoritesStore::new(),
                refresh_epoch: RefreshEpoch::default(),
                catalog_repository,
                favorites_repository,
                log_repository,
                brand: Arc::new(brand),
                image_index,
            }
        }

        pub fn provide<S>(&self) -> S
        where
            Self: ContextProvide<S>,
        {
            self.ctx_provide()
        }

        pub fn brand(&self) -> &BrandConfig {
            &self.brand
        }
    }

    /// Default wiring against the brand backend over http.
    pub struct AppContextBuilder {
        pub api_url: ApiUrl,
        pub brand: BrandConfig,
    }

    impl AppContextBuilder {
        pub fn build(self) -> Result<AppContext, InfrastructureError> {
            let http = crate::shared::infrastructure::http::client()?;

            Ok(AppContext::new(
                Arc::new(crate::catalog::infrastructure::repository::HttpRepository::new(
                    http.clone(),
                    self.api_url.clone(),
                )),
                Arc::new(
                    crate::favorites::infrastructure::repository::HttpRepository::new(
                        http,
                        self.api_url,
                    ),
                ),
                Arc::new(crate::shared::infrastructure::logging::ConsoleLogRepository),
                self.brand,
            ))
        }
    }

    impl ContextProvide<CatalogStore> for AppContext {
        fn ctx_provide(&self) -> CatalogStore {
            self.catalog_store.clone()
        }
    }

    impl ContextProvide<FavoritesStore> for AppContext {
        fn ctx_provide(&self) -> FavoritesStore {
            self.favorites_store.clone()
        }
    }

    impl ContextProvide<RefreshEpoch> for AppContext {
        fn ctx_provide(&self) -> RefreshEpoch {
            self.refresh_epoch.clone()
        }
    }

    impl ContextProvide<Arc<dyn crate::catalog::domain::repository::Repository>> for AppContext {
        fn ctx_provide(&self) -> Arc<dyn crate::catalog::domain::repository::Repository> {
            self.catalog_repository.clone()
        }
    }

    impl ContextProvide<Arc<dyn crate::favorites::domain::repository::Repository>> for AppContext {
        fn ctx_provide(&self) -> Arc<dyn crate::favorites::domain::repository::Repository> {
            self.favorites_repository.clone()
        }
    }

    impl ContextProvide<LogService> for AppContext {
        fn ctx_provide(&self) -> LogService {
            LogService::new(self.log_repository.clone())
        }
    }

    impl ContextProvide<BrandImageIndex> for AppContext {
        fn ctx_provide(&self) -> BrandImageIndex {
            self.image_index.clone()
        }
    }
}
