pub mod shared;

pub mod brand;
pub mod catalog;
pub mod favorites;
pub mod reports;

pub mod prelude;

pub use storefront_core::{FavoriteIdSet, ProductId};
