use clap::Args;
use storefront_app::domain::orders::{OrdersService, PgOrdersService, records::OrderUuid};

#[derive(Debug, Args)]
pub(crate) struct AdvanceOrderArgs {
    #[arg(long)]
    order_uuid: OrderUuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: AdvanceOrderArgs) -> Result<(), String> {
    let service = PgOrdersService::new(crate::cli::connect(&args.database_url).await?);

    let order = service
        .advance_order(args.order_uuid)
        .await
        .map_err(|error| format!("failed to advance order: {error}"))?;

    println!("{}: {}", order.label(), order.status.label());

    Ok(())
}
