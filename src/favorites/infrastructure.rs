pub mod repository {
    use reqwest::Client;
    use storefront_core::ProductId;

    use crate::{
        favorites::domain::repository::Repository,
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
        async fn fetch_favorite_ids(&self) -> Result<Vec<ProductId>, AppError<RemoteError>> {
            let ids = self
                .http
                .get(format!("{}/favorites", self.api))
                .send()
                .await
                .catch_remote()?
                .error_for_status()
                .catch_remote()?
                .json::<Vec<ProductId>>()
                .await
                .catch_remote()?;

            Ok(ids)
        }

        async fn toggle_favorite(&self, id: ProductId) -> Result<(), AppError<RemoteError>> {
            let response = self
                .http
                .post(format!("{}/favorites/{}/toggle", self.api, id))
                .send()
                .await
                .catch_remote()?;

            // the remote refusing this specific mutation, as opposed to being
            // unreachable or overloaded
            if response.status().is_client_error() {
                return Err(AppError::App(RemoteError::Rejected));
            }

            response.error_for_status().catch_remote()?;

            Ok(())
        }
    }

}

pub mod memory {
    use std::time::Duration;

    use storefront_core::ProductId;
    use tokio::sync::Mutex;

    use crate::{
        favorites::domain::repository::Repository,
        shared::{domain::errors::RemoteError, infrastructure::errors::AppError},
    };

    /// In-memory favorites service mirroring the mock backend the app ships
    /// with: server state flips on toggle, reads return the durable set.
    pub struct MemoryRepository {
        favorites: Mutex<Vec<ProductId>>,
        latency: Duration,
    }

    impl MemoryRepository {
        /// Seeded with the backend's default favorite.
        pub fn new() -> Self {
            Self::seeded([ProductId::new(0)])
        }

        pub fn seeded(ids: impl IntoIterator<Item = ProductId>) -> Self {
            Self {
                favorites: Mutex::new(ids.into_iter().collect()),
                latency: Duration::ZERO,
            }
        }

        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }
    }

    impl Default for MemoryRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait::async_trait]
    impl Repository for MemoryRepository {
        async fn fetch_favorite_ids(&self) -> Result<Vec<ProductId>, AppError<RemoteError>> {
            tokio::time::sleep(self.latency).await;
            Ok(self.favorites.lock().await.clone())
        }

        async fn toggle_favorite(&self, id: ProductId) -> Result<(), AppError<RemoteError>> {
            tokio::time::sleep(self.latency).await;

            let mut favorites = self.favorites.lock().await;
            if favorites.contains(&id) {
                favorites.retain(|other| *other != id);
            } else {
                favorites.push(id);
            }

            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::favorites::domain::repository::Repository as _;

        #[tokio::test]
        async fn toggle_flips_server_state() {
            let repository = MemoryRepository::new();
            let id = ProductId::new(2);

            repository.toggle_favorite(id).await.unwrap();
            assert!(repository.fetch_favorite_ids().await.unwrap().contains(&id));

            repository.toggle_favorite(id).await.unwrap();
            assert!(!repository.fetch_favorite_ids().await.unwrap().contains(&id));
        }
    }
}
