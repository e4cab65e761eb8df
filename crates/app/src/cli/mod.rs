use clap::{Parser, Subcommand};
use storefront_app::database::{self, Db};

mod brand;
mod category;
mod db;
mod order;
mod product;
mod session;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Category(category::CategoryCommand),
    Brand(brand::BrandCommand),
    Product(product::ProductCommand),
    Order(order::OrderCommand),
    Session(session::SessionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Brand(command) => brand::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Order(command) => order::run(command).await,
            Commands::Session(command) => session::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}

/// Format minor units as `units.cents`.
fn format_amount(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_pads_cents() {
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(1005), "10.05");
        assert_eq!(format_amount(123_456), "1234.56");
    }
}
