use clap::Args;
use storefront_app::domain::catalog::{
    CatalogService, PgCatalogService,
    data::NewProduct,
    records::{BrandUuid, ProductUuid},
};

use crate::cli::format_amount;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Slug of the product's category
    #[arg(long)]
    category: String,

    /// UUID of the product's brand
    #[arg(long)]
    brand_uuid: BrandUuid,

    #[arg(long)]
    title: String,

    #[arg(long)]
    slug: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Uploaded image file name; stored as `{slug}/{slug}.{ext}`
    #[arg(long)]
    image: Option<String>,

    /// Price in minor units
    #[arg(long)]
    price: u64,

    /// Create the product as unavailable
    #[arg(long)]
    unavailable: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let service = PgCatalogService::new(crate::cli::connect(&args.database_url).await?);

    let category = service
        .get_category(&args.category)
        .await
        .map_err(|error| format!("failed to find category `{}`: {error}", args.category))?;

    let product = service
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: category.uuid,
            brand_uuid: args.brand_uuid,
            title: args.title,
            slug: args.slug,
            description: args.description,
            image_filename: args.image,
            price: args.price,
            available: !args.unavailable,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_slug: {}", product.slug);
    println!("price: {}", format_amount(product.price));
    println!("available: {}", product.available);

    Ok(())
}
