use clap::Args;
use storefront_app::domain::orders::{OrdersService, PgOrdersService, status::OrderStatus};

use crate::cli::format_amount;

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Only show orders in this status (accepted, in_progress, paid)
    #[arg(long)]
    status: Option<OrderStatus>,
}

pub(crate) async fn run(args: ListOrdersArgs) -> Result<(), String> {
    let service = PgOrdersService::new(crate::cli::connect(&args.database_url).await?);

    let orders = service
        .list_orders(args.status)
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    for order in orders {
        println!("{}", order.label());
        println!("order_uuid: {}", order.uuid);
        println!("status: {}", order.status.label());
        println!("buyer: {} {}", order.first_name, order.last_name);
        println!("phone: {}", order.phone);
        println!("buying_type: {}", order.buying_type.label());

        if !order.address.is_empty() {
            println!("address: {}", order.address);
        }

        if let Some(date) = order.delivery_date {
            println!("delivery_date: {date}");
        }

        for item in &order.items {
            println!(
                "  {} x{} = {}",
                item.title,
                item.qty,
                format_amount(item.item_total)
            );
        }

        println!("total: {}", format_amount(order.total));
        println!("created_at: {}", order.created_at);
        println!();
    }

    Ok(())
}
