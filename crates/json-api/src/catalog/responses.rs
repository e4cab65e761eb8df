//! Catalog Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::records::{CategoryRecord, ProductRecord};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
            slug: category.slug,
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub category_uuid: Uuid,
    pub brand_uuid: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,

    /// Image path relative to the media root
    pub image: Option<String>,

    /// Price in minor units
    pub price: u64,

    pub available: bool,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            category_uuid: product.category_uuid.into_uuid(),
            brand_uuid: product.brand_uuid.into_uuid(),
            title: product.title,
            slug: product.slug,
            description: product.description,
            image: product.image,
            price: product.price,
            available: product.available,
        }
    }
}

pub(crate) fn categories(records: Vec<CategoryRecord>) -> Vec<CategoryResponse> {
    records.into_iter().map(Into::into).collect()
}

pub(crate) fn products(records: Vec<ProductRecord>) -> Vec<ProductResponse> {
    records.into_iter().map(Into::into).collect()
}
