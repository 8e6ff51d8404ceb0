pub use crate::shared::domain::context::{AppContext, AppContextBuilder, ContextProvide};
pub use crate::shared::infrastructure::errors::{AppError, InfrastructureError};

pub use storefront_core::{FavoriteIdSet, ProductId};
