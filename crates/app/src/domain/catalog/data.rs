//! Catalog Data

use crate::{
    domain::catalog::records::{BrandUuid, CategoryUuid, ProductUuid},
    slug::slugify,
};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,

    /// Derived from `name` when absent.
    pub slug: Option<String>,
}

impl NewCategory {
    /// The explicit slug, or one derived from the name.
    #[must_use]
    pub fn resolved_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.name),
        }
    }
}

/// New Brand Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBrand {
    pub uuid: BrandUuid,
    pub name: String,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub brand_uuid: BrandUuid,
    pub title: String,
    pub slug: String,
    pub description: String,

    /// Original upload file name; only its extension is kept.
    pub image_filename: Option<String>,

    pub price: u64,
    pub available: bool,
}

impl NewProduct {
    /// Storage path for the product image.
    #[must_use]
    pub fn image_path(&self) -> Option<String> {
        let filename = self.image_filename.as_deref()?;
        let (_, extension) = filename.rsplit_once('.')?;

        if extension.is_empty() {
            return None;
        }

        Some(format!(
            "{slug}/{slug}.{ext}",
            slug = self.slug,
            ext = extension.to_ascii_lowercase()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(image_filename: Option<&str>) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: CategoryUuid::new(),
            brand_uuid: BrandUuid::new(),
            title: "Pixel 9".to_string(),
            slug: "pixel-9".to_string(),
            description: String::new(),
            image_filename: image_filename.map(ToString::to_string),
            price: 69_900,
            available: true,
        }
    }

    #[test]
    fn category_slug_derived_from_name_when_absent() {
        let category = NewCategory {
            uuid: CategoryUuid::new(),
            name: "Смартфоны".to_string(),
            slug: None,
        };

        assert_eq!(category.resolved_slug(), "smartfony");
    }

    #[test]
    fn explicit_category_slug_wins() {
        let category = NewCategory {
            uuid: CategoryUuid::new(),
            name: "Смартфоны".to_string(),
            slug: Some("phones".to_string()),
        };

        assert_eq!(category.resolved_slug(), "phones");
    }

    #[test]
    fn blank_category_slug_is_derived() {
        let category = NewCategory {
            uuid: CategoryUuid::new(),
            name: "Laptops".to_string(),
            slug: Some("  ".to_string()),
        };

        assert_eq!(category.resolved_slug(), "laptops");
    }

    #[test]
    fn image_path_uses_slug_and_extension() {
        assert_eq!(
            new_product(Some("IMG_0042.JPG")).image_path().as_deref(),
            Some("pixel-9/pixel-9.jpg")
        );
    }

    #[test]
    fn image_path_absent_without_extension() {
        assert_eq!(new_product(Some("upload")).image_path(), None);
        assert_eq!(new_product(None).image_path(), None);
    }
}
