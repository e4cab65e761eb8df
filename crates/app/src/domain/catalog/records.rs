//! Catalog Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Brand UUID
pub type BrandUuid = TypedUuid<BrandRecord>;

/// Brand Record
#[derive(Debug, Clone)]
pub struct BrandRecord {
    pub uuid: BrandUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub brand_uuid: BrandUuid,
    pub title: String,
    pub slug: String,
    pub description: String,

    /// Relative image path, `{slug}/{slug}.{ext}`.
    pub image: Option<String>,

    /// Price in minor units.
    pub price: u64,

    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Outcome of an availability update.
#[derive(Debug, Clone)]
pub struct AvailabilityChange {
    pub product: ProductRecord,

    /// Watchers notified by this update; zero unless the product came back in stock.
    pub notified: u64,
}
