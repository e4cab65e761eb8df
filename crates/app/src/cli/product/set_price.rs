use clap::Args;
use storefront_app::domain::catalog::{CatalogService, PgCatalogService};

use crate::cli::format_amount;

#[derive(Debug, Args)]
pub(crate) struct SetPriceArgs {
    #[arg(long)]
    slug: String,

    /// New price in minor units
    #[arg(long)]
    price: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetPriceArgs) -> Result<(), String> {
    let service = PgCatalogService::new(crate::cli::connect(&args.database_url).await?);

    let product = service
        .set_price(&args.slug, args.price)
        .await
        .map_err(|error| format!("failed to set price: {error}"))?;

    println!("product_slug: {}", product.slug);
    println!("price: {}", format_amount(product.price));

    Ok(())
}
