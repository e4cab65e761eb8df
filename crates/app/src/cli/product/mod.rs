use clap::{Args, Subcommand};

mod create;
mod set_availability;
mod set_price;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(create::CreateProductArgs),
    SetPrice(set_price::SetPriceArgs),
    SetAvailability(set_availability::SetAvailabilityArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args).await,
        ProductSubcommand::SetPrice(args) => set_price::run(args).await,
        ProductSubcommand::SetAvailability(args) => set_availability::run(args).await,
    }
}
