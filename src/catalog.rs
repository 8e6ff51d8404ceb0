pub mod domain {
    pub mod product {
        use storefront_core::ProductId;

        /// Immutable catalog entry: created at catalog load, never mutated
        /// during a session. Favorite status lives elsewhere.
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Product {
            pub id: ProductId,
            pub name: String,
            pub dosage: String,
            pub unit: String,
            #[serde(rename = "type")]
            pub kind: String,
            pub rating: f32,
            pub reviews_count: u32,
            pub original_price: f64,
            pub discounted_price: f64,
            pub discount_percent: u8,
            pub price_per_unit: String,
        }
    }

    pub mod repository {
        use super::product::Product;
        use crate::shared::{domain::errors::RemoteError, infrastructure::errors::AppError};

        /// Port for the catalog provider.
        #[async_trait::async_trait]
        pub trait Repository: Send + Sync + 'static {
            async fn fetch_products(&self) -> Result<Vec<Product>, AppError<RemoteError>>;
        }
    }

    pub mod store {
        use std::sync::Arc;

        use tokio::sync::watch;

        use super::product::Product;

        /// Holds the loaded catalog. The product list is replaced wholesale
        /// and shared immutably with every reader.
        #[derive(Clone)]
        pub struct CatalogStore {
            state: Arc<watch::Sender<Arc<[Product]>>>,
        }

        impl CatalogStore {
            pub fn new() -> Self {
                let (tx, _rx) = watch::channel::<Arc<[Product]>>(Vec::new().into());
                Self { state: Arc::new(tx) }
            }

            pub fn replace(&self, products: Vec<Product>) {
                self.state.send_replace(products.into());
            }

            pub fn current(&self) -> Arc<[Product]> {
                self.state.borrow().clone()
            }

            pub fn watch(&self) -> watch::Receiver<Arc<[Product]>> {
                self.state.subscribe()
            }
        }

        impl Default for CatalogStore {
            fn default() -> Self {
                Self::new()
            }
        }
    }
}

pub mod infrastructure {
    pub mod repository {
        use reqwest::Client;

        use crate::{
            catalog::domain::{product::Product, repository::Repository},
            shared::{
                domain::{api_url::ApiUrl, errors::RemoteError},
                infrastructure::{errors::AppError, http::CatchRemote},
            },
        };

        pub struct HttpRepository {
            http: Client,
            api: ApiUrl,
        }

        impl HttpRepository {
            pub fn new(http: Client, api: ApiUrl) -> Self {
                Self { http, api }
            }
        }

        #[async_trait::async_trait]
        impl Repository for HttpRepository {
            async fn fetch_products(&self) -> Result<Vec<Product>, AppError<RemoteError>> {
                let products = self
                    .http
                    .get(format!("{}/products", self.api))
                    .send()
                    .await
                    .catch_remote()?
                    .error_for_status()
                    .catch_remote()?
                    .json::<Vec<Product>>()
                    .await
                    .catch_remote()?;

                Ok(products)
            }
        }
    }

    pub mod memory {
        use std::time::Duration;

        use storefront_core::ProductId;

        use crate::{
            catalog::domain::{product::Product, repository::Repository},
            shared::{domain::errors::RemoteError, infrastructure::errors::AppError},
        };

        /// In-memory catalog with the products the backend seeds. Doubles as
        /// demo wiring and test fixture; latency simulates the round-trip.
        pub struct MemoryRepository {
            latency: Duration,
        }

        impl MemoryRepository {
            pub fn new() -> Self {
                Self {
                    latency: Duration::ZERO,
                }
            }

            pub fn with_latency(latency: Duration) -> Self {
                Self { latency }
            }
        }

        impl Default for MemoryRepository {
            fn default() -> Self {
                Self::new()
            }
        }

        #[async_trait::async_trait]
        impl Repository for MemoryRepository {
            async fn fetch_products(&self) -> Result<Vec<Product>, AppError<RemoteError>> {
                tokio::time::sleep(self.latency).await;
                Ok(fixture_products())
            }
        }

        pub fn fixture_products() -> Vec<Product> {
            vec![
                Product {
                    id: ProductId::new(0),
                    name: "IBU-ratiopharm 400mg akut Schmerztabletten".into(),
                    dosage: "400".into(),
                    unit: "mg".into(),
                    kind: "Tabletten".into(),
                    rating: 4.7,
                    reviews_count: 2184,
                    original_price: 5.97,
                    discounted_price: 4.79,
                    discount_percent: 20,
                    price_per_unit: "0,24 €/St".into(),
                },
                Product {
                    id: ProductId::new(1),
                    name: "Thomapyrin Intensiv 20".into(),
                    dosage: "20".into(),
                    unit: "St".into(),
                    kind: "Tabletten".into(),
                    rating: 4.8,
                    reviews_count: 1129,
                    original_price: 6.99,
                    discounted_price: 5.45,
                    discount_percent: 22,
                    price_per_unit: "0,27 €/St".into(),
                },
                Product {
                    id: ProductId::new(2),
                    name: "Voltaren Schmerzgel forte 2,32 % Gel 180 g".into(),
                    dosage: "180".into(),
                    unit: "g".into(),
                    kind: "Gel".into(),
                    rating: 4.9,
                    reviews_count: 3186,
                    original_price: 24.99,
                    discounted_price: 19.49,
                    discount_percent: 22,
                    price_per_unit: "108,28 €/kg".into(),
                },
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::ProductId;

    use super::{
        domain::{repository::Repository, store::CatalogStore},
        infrastructure::memory::{fixture_products, MemoryRepository},
    };

    #[tokio::test]
    async fn memory_repository_serves_the_seeded_catalog() {
        let repository = MemoryRepository::new();

        let products = repository.fetch_products().await.unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, ProductId::new(0));
        assert_eq!(products[0].name, "IBU-ratiopharm 400mg akut Schmerztabletten");
    }

    #[test]
    fn store_replaces_wholesale() {
        let store = CatalogStore::new();
        assert!(store.current().is_empty());

        store.replace(fixture_products());

        let products = store.current();
        assert_eq!(products.len(), 3);
        assert_eq!(products[2].kind, "Gel");
    }
}
