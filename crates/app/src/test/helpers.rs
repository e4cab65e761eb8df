//! Test Helpers

use std::error::Error;

use crate::{
    domain::{
        accounts::{AccountsService, data::Registration, records::UserRecord},
        catalog::{
            CatalogService, CatalogServiceError,
            data::{NewBrand, NewCategory, NewProduct},
            records::{BrandRecord, BrandUuid, CategoryRecord, CategoryUuid, ProductRecord, ProductUuid},
        },
        sessions::SessionsService,
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "correct-horse-battery";

pub(crate) async fn create_category(
    ctx: &TestContext,
    slug: &str,
) -> Result<CategoryRecord, CatalogServiceError> {
    ctx.catalog
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: slug.to_string(),
            slug: Some(slug.to_string()),
        })
        .await
}

pub(crate) async fn create_brand(
    ctx: &TestContext,
    name: &str,
) -> Result<BrandRecord, CatalogServiceError> {
    ctx.catalog
        .create_brand(NewBrand {
            uuid: BrandUuid::new(),
            name: name.to_string(),
        })
        .await
}

/// A product in its own category and brand.
pub(crate) async fn create_product(
    ctx: &TestContext,
    slug: &str,
    price: u64,
    available: bool,
) -> Result<ProductRecord, CatalogServiceError> {
    let category = create_category(ctx, &format!("{slug}-category")).await?;
    let brand = create_brand(ctx, &format!("{slug} brand")).await?;

    ctx.catalog
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: category.uuid,
            brand_uuid: brand.uuid,
            title: format!("Product {slug}"),
            slug: slug.to_string(),
            description: String::new(),
            image_filename: None,
            price,
            available,
        })
        .await
}

/// Register a user through a throwaway session.
pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, Box<dyn Error>> {
    let issued = ctx.sessions.start_session().await?;

    let signed_in = ctx
        .accounts
        .register(
            issued.session.uuid,
            Registration {
                username: Some(username.to_string()),
                password: Some(TEST_PASSWORD.to_string()),
                password_check: Some(TEST_PASSWORD.to_string()),
                first_name: Some("Test".to_string()),
                last_name: Some("User".to_string()),
                email: Some(format!("{username}@example.com")),
            },
        )
        .await?;

    Ok(signed_in.user)
}
