use clap::Args;
use storefront_app::domain::orders::{OrdersService, PgOrdersService, records::OrderUuid};

#[derive(Debug, Args)]
pub(crate) struct MarkPaidArgs {
    /// Orders to mark as paid; repeat the flag for several
    #[arg(long = "order-uuid", required = true)]
    order_uuids: Vec<OrderUuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MarkPaidArgs) -> Result<(), String> {
    let service = PgOrdersService::new(crate::cli::connect(&args.database_url).await?);

    let marked = service
        .mark_paid(&args.order_uuids)
        .await
        .map_err(|error| format!("failed to mark orders paid: {error}"))?;

    println!("marked_paid: {marked}");

    Ok(())
}
