//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        carts::{CartPricing, CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        notifications::{NotificationsService, PgNotificationsService},
        orders::{OrdersService, PgOrdersService},
        sessions::{PgSessionsService, SessionsService},
    },
};

/// Why the application context could not be built.
#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Every domain service behind a trait object, shared across handlers.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub sessions: Arc<dyn SessionsService>,
    pub accounts: Arc<dyn AccountsService>,
    pub notifications: Arc<dyn NotificationsService>,
}

impl AppContext {
    /// Postgres-backed services over `db`.
    #[must_use]
    pub fn new(db: &Db, pricing: CartPricing, session_ttl: SignedDuration) -> Self {
        Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone(), pricing)),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            sessions: Arc::new(PgSessionsService::new(db.clone(), session_ttl)),
            accounts: Arc::new(PgAccountsService::new(db.clone(), session_ttl)),
            notifications: Arc::new(PgNotificationsService::new(db.clone())),
        }
    }

    /// Build application context from a database URL, applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or a migration fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        pricing: CartPricing,
        session_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::new(&Db::new(pool), pricing, session_ttl))
    }
}
