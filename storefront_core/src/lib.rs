mod favorites;
mod ids;

pub use favorites::FavoriteIdSet;
pub use ids::ProductId;
