use clap::Args;
use storefront_app::domain::catalog::{
    CatalogService, PgCatalogService, data::NewBrand, records::BrandUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateBrandArgs {
    /// Brand name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateBrandArgs) -> Result<(), String> {
    let service = PgCatalogService::new(crate::cli::connect(&args.database_url).await?);

    let brand = service
        .create_brand(NewBrand {
            uuid: BrandUuid::new(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create brand: {error}"))?;

    println!("brand_uuid: {}", brand.uuid);
    println!("brand_name: {}", brand.name);

    Ok(())
}
