pub mod logging {
    use std::sync::Arc;

    use crate::shared::domain::logging::LogRepository;

    /// Last-resort reporting for failures the caller does not propagate,
    /// e.g. a rolled-back toggle inside a fire-and-forget request.
    #[derive(Clone)]
    pub struct LogService {
        repository: Arc<dyn LogRepository>,
    }

    impl LogService {
        pub fn new(repository: Arc<dyn LogRepository>) -> Self {
            Self { repository }
        }

        pub fn error<E: std::fmt::Display>(&self, error: E) {
            if let Err(log_error) = self.repository.log(format_args!("{}", error)) {
                eprintln!("could not log error: {}", log_error);
            }
        }
    }
}
