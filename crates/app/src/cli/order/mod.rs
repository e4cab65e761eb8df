use clap::{Args, Subcommand};

mod advance;
mod list;
mod mark_paid;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    List(list::ListOrdersArgs),
    Advance(advance::AdvanceOrderArgs),
    MarkPaid(mark_paid::MarkPaidArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::List(args) => list::run(args).await,
        OrderSubcommand::Advance(args) => advance::run(args).await,
        OrderSubcommand::MarkPaid(args) => mark_paid::run(args).await,
    }
}
