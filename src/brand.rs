pub mod brand_config {
    use storefront_core::ProductId;

    /// Identifier of a shipped brand flavor.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct BrandId(Box<str>);

    impl BrandId {
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl std::fmt::Display for BrandId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.fmt(f)
        }
    }

    #[derive(Debug, thiserror::Error)]
    pub enum BrandIdError {
        #[error("brand id cannot be empty")]
        Empty,
        #[error("brand id must only contain 'a-z', '0-9', '-' characters")]
        Invalid,
    }

    impl std::str::FromStr for BrandId {
        type Err = BrandIdError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            if s.is_empty() {
                return Err(BrandIdError::Empty);
            }

            let is_valid = s.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'));
            if is_valid {
                Ok(Self(s.into()))
            } else {
                Err(BrandIdError::Invalid)
            }
        }
    }

    /// Asset reference resolved by the app shell; the core only carries it.
    #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct ImagePath(Box<str>);

    impl ImagePath {
        pub fn new(path: impl Into<Box<str>>) -> Self {
            Self(path.into())
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    pub struct ProductImage {
        pub id: ProductId,
        pub image: ImagePath,
    }

    /// Per-brand configuration consumed by the core: display name and the
    /// brand's product image table. Theme tokens stay in the app shell.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    pub struct BrandConfig {
        pub id: BrandId,
        pub name: String,
        pub product_images: Vec<ProductImage>,
    }
}

pub mod image_index {
    use std::collections::HashMap;

    use storefront_core::ProductId;

    use super::brand_config::{BrandConfig, ImagePath};

    /// Brand-scoped product-id to image lookup for the enrichment projection.
    #[derive(Debug, Clone, Default)]
    pub struct BrandImageIndex(HashMap<ProductId, ImagePath>);

    impl BrandImageIndex {
        /// Absent entries are expected: not every product has a brand image.
        pub fn resolve(&self, id: ProductId) -> Option<&ImagePath> {
            self.0.get(&id)
        }
    }

    impl From<&BrandConfig> for BrandImageIndex {
        fn from(config: &BrandConfig) -> Self {
            Self(
                config
                    .product_images
                    .iter()
                    .map(|entry| (entry.id, entry.image.clone()))
                    .collect(),
            )
        }
    }
}

pub mod base_configs {
    use storefront_core::ProductId;

    use super::brand_config::{BrandConfig, BrandId, ImagePath, ProductImage};

    fn image(id: u64, path: &str) -> ProductImage {
        ProductImage {
            id: ProductId::new(id),
            image: ImagePath::new(path),
        }
    }

    pub fn doc_morris() -> BrandConfig {
        BrandConfig {
            id: "docmorris".parse().expect("valid brand id"),
            name: "DocMorris".into(),
            product_images: vec![
                image(0, "assets/products/med1.png"),
                image(1, "assets/products/med2.png"),
                image(2, "assets/products/med3.png"),
            ],
        }
    }

    pub fn brand_b() -> BrandConfig {
        BrandConfig {
            id: "brandb".parse().expect("valid brand id"),
            name: "BrandB".into(),
            product_images: vec![
                image(0, "assets/products/med1.png"),
                image(1, "assets/products/med2.png"),
                image(2, "assets/products/med3.png"),
            ],
        }
    }

    pub fn all() -> Vec<BrandConfig> {
        vec![doc_morris(), brand_b()]
    }

    pub fn find(id: &BrandId) -> Option<BrandConfig> {
        all().into_iter().find(|config| config.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::ProductId;

    use super::{
        base_configs,
        brand_config::{BrandId, BrandIdError},
        image_index::BrandImageIndex,
    };

    #[test]
    fn brand_id_rejects_empty_and_invalid_input() {
        assert!(matches!("".parse::<BrandId>(), Err(BrandIdError::Empty)));
        assert!(matches!(
            "Doc Morris".parse::<BrandId>(),
            Err(BrandIdError::Invalid)
        ));
        assert!("docmorris".parse::<BrandId>().is_ok());
    }

    #[test]
    fn image_index_resolves_configured_products_only() {
        let config = base_configs::doc_morris();
        let index = BrandImageIndex::from(&config);

        assert!(index.resolve(ProductId::new(0)).is_some());
        assert!(index.resolve(ProductId::new(99)).is_none());
    }

    #[test]
    fn shipped_brands_are_discoverable_by_id() {
        let id: BrandId = "brandb".parse().unwrap();
        let config = base_configs::find(&id).unwrap();
        assert_eq!(config.name, "BrandB");
    }
}
