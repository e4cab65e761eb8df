use clap::Args;
use storefront_app::domain::catalog::{CatalogService, PgCatalogService};

#[derive(Debug, Args)]
pub(crate) struct SetAvailabilityArgs {
    #[arg(long)]
    slug: String,

    #[arg(long, action = clap::ArgAction::Set)]
    available: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetAvailabilityArgs) -> Result<(), String> {
    let service = PgCatalogService::new(crate::cli::connect(&args.database_url).await?);

    let change = service
        .set_availability(&args.slug, args.available)
        .await
        .map_err(|error| format!("failed to set availability: {error}"))?;

    println!("product_slug: {}", change.product.slug);
    println!("available: {}", change.product.available);
    println!("notified: {}", change.notified);

    Ok(())
}
