//! Application state

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::JwtService;
use crate::config::Config;
use crate::db::{PgOrderRepository, PgProductCatalog};
use crate::orders::OrderService;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Order lifecycle operations
    pub orders: Arc<OrderService>,
    /// Session token issuer/validator
    pub jwt: Arc<JwtService>,
}

impl AppState {
    /// Connect, run pending migrations and wire the services.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let orders = OrderService::new(
            Arc::new(PgOrderRepository::new(pool.clone())),
            Arc::new(PgProductCatalog::new(pool.clone())),
        );
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiry_hours);

        Ok(Self::from_parts(pool, orders, jwt))
    }

    pub fn from_parts(pool: PgPool, orders: OrderService, jwt: JwtService) -> Self {
        Self {
            pool,
            orders: Arc::new(orders),
            jwt: Arc::new(jwt),
        }
    }
}
