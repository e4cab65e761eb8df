use clap::Args;
use storefront_app::domain::sessions::{DEFAULT_SESSION_TTL, PgSessionsService, SessionsService};

#[derive(Debug, Args)]
pub(crate) struct PurgeSessionsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PurgeSessionsArgs) -> Result<(), String> {
    let service = PgSessionsService::new(
        crate::cli::connect(&args.database_url).await?,
        DEFAULT_SESSION_TTL,
    );

    let purged = service
        .purge_expired_sessions()
        .await
        .map_err(|error| format!("failed to purge sessions: {error}"))?;

    println!("sessions_deleted: {}", purged.sessions);
    println!("carts_deleted: {}", purged.carts);

    Ok(())
}
