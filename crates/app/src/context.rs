//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        delivery::{DeliveryService, PgDeliveryService},
        emails::{EmailConfig, EmailService, ResendEmailService},
        orders::{OrdersService, PgOrdersService},
        products::{CatalogService, PgCatalogService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub delivery: Arc<dyn DeliveryService>,
    pub orders: Arc<dyn OrdersService>,
    pub emails: Arc<dyn EmailService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        email_config: EmailConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db.clone()));

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            delivery: Arc::new(PgDeliveryService::new(db)),
            emails: Arc::new(ResendEmailService::new(orders.clone(), email_config)),
            orders,
        })
    }
}
