pub mod errors {
    #[derive(Debug, thiserror::Error)]
    #[error("infrastructure error: {0}")]
    pub struct InfrastructureError(Box<dyn std::error::Error + Send + Sync>);

    impl InfrastructureError {
        pub fn new<E>(error: E) -> Self
        where
            E: Into<Box<dyn std::error::Error + Send + Sync>>,
        {
            Self(error.into())
        }
    }

    /// Splits a fallible outcome into the domain refusal the caller can react
    /// to and the infrastructure wreckage it can only report.
    #[derive(Debug)]
    pub enum AppError<E> {
        App(E),
        Infrastructure(InfrastructureError),
    }

    impl<E> AppError<E> {
        pub fn map_app<F>(self, f: impl FnOnce(E) -> F) -> AppError<F> {
            match self {
                AppError::App(e) => AppError::App(f(e)),
                AppError::Infrastructure(e) => AppError::Infrastructure(e),
            }
        }
    }

    impl<E> From<InfrastructureError> for AppError<E> {
        fn from(value: InfrastructureError) -> Self {
            Self::Infrastructure(value)
        }
    }

    impl<E: std::fmt::Display> std::fmt::Display for AppError<E> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                AppError::App(e) => e.fmt(f),
                AppError::Infrastructure(e) => e.fmt(f),
            }
        }
    }
}

pub mod http {
    use std::time::Duration;

    use reqwest::{Client, ClientBuilder};

    use super::errors::{AppError, InfrastructureError};
    use crate::shared::domain::errors::RemoteError;

    pub fn client() -> Result<Client, InfrastructureError> {
        ClientBuilder::default()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(InfrastructureError::new)
    }

    pub(crate) trait CatchRemote {
        type Output;
        fn catch_remote(self) -> Result<Self::Output, AppError<RemoteError>>;
    }

    impl<T> CatchRemote for reqwest::Result<T> {
        type Output = T;

        fn catch_remote(self) -> Result<T, AppError<RemoteError>> {
            self.map_err(|e| {
                if e.is_timeout() {
                    AppError::App(RemoteError::Timeout)
                } else if e.is_connect() {
                    AppError::App(RemoteError::Unavailable)
                } else if e.status().is_some() {
                    // error statuses mean the remote refused service; only the
                    // toggle adapter refines a client error into a rejection
                    AppError::App(RemoteError::Unavailable)
                } else {
                    AppError::Infrastructure(InfrastructureError::new(e))
                }
            })
        }
    }
}

pub mod logging {
    use crate::shared::domain::logging::LogRepository;

    use super::errors::InfrastructureError;

    pub struct ConsoleLogRepository;

    impl LogRepository for ConsoleLogRepository {
        fn log(&self, message: std::fmt::Arguments) -> Result<(), InfrastructureError> {
            eprintln!("storefront error: {}", message);
            Ok(())
        }
    }
}
