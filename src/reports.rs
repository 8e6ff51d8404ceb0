pub mod products {
    pub mod domain {
        pub mod enriched_product {
            use storefront_core::FavoriteIdSet;

            use crate::{
                brand::{brand_config::ImagePath, image_index::BrandImageIndex},
                catalog::domain::product::Product,
            };

            /// Catalog entry joined with the session's favorite flag and the
            /// brand image. Never stored: always regenerated from its three
            /// owning sources.
            #[derive(Debug, Clone, PartialEq, serde::Serialize)]
            #[serde(rename_all = "camelCase")]
            pub struct EnrichedProduct {
                #[serde(flatten)]
                pub product: Product,
                pub is_favorite: bool,
                #[serde(skip_serializing_if = "Option::is_none")]
                pub image: Option<ImagePath>,
            }

            /// Pure projection: the same inputs always yield the same output,
            /// and a missing image entry is not an error.
            pub fn enrich(
                products: &[Product],
                favorites: &FavoriteIdSet,
                images: &BrandImageIndex,
            ) -> Vec<EnrichedProduct> {
                products
                    .iter()
                    .map(|product| EnrichedProduct {
                        is_favorite: favorites.contains(product.id),
                        image: images.resolve(product.id).cloned(),
                        product: product.clone(),
                    })
                    .collect()
            }
        }
    }

    pub mod application {
        pub mod get_enriched {
            use crate::{
                brand::image_index::BrandImageIndex,
                catalog::domain::store::CatalogStore,
                favorites::domain::store::FavoritesStore,
                prelude::*,
                reports::products::domain::enriched_product::{enrich, EnrichedProduct},
            };

            /// Read model for the product screens, always current relative to
            /// the last applied store state.
            pub struct GetEnriched {
                catalog_store: CatalogStore,
                favorites_store: FavoritesStore,
                images: BrandImageIndex,
            }

            impl ContextProvide<GetEnriched> for AppContext {
                fn ctx_provide(&self) -> GetEnriched {
                    GetEnriched {
                        catalog_store: self.provide(),
                        favorites_store: self.provide(),
                        images: self.provide(),
                    }
                }
            }

            impl GetEnriched {
                pub fn run(&self) -> Vec<EnrichedProduct> {
                    enrich(
                        &self.catalog_store.current(),
                        &self.favorites_store.current(),
                        &self.images,
                    )
                }
            }
        }
    }
}
