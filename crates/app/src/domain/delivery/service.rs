//! Delivery areas service.

use async_trait::async_trait;
use mockall::automock;

use snaxo::delivery::DeliveryArea;

use crate::{
    database::Db,
    domain::delivery::{errors::DeliveryServiceError, repository::PgDeliveryRepository},
};

#[derive(Debug, Clone)]
pub struct PgDeliveryService {
    db: Db,
    repository: PgDeliveryRepository,
}

impl PgDeliveryService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgDeliveryRepository::new(),
        }
    }
}

#[async_trait]
impl DeliveryService for PgDeliveryService {
    async fn list_areas(&self) -> Result<Vec<DeliveryArea>, DeliveryServiceError> {
        let mut tx = self.db.begin().await?;

        let areas = self.repository.list_areas(&mut tx).await?;

        tx.commit().await?;

        Ok(areas)
    }
}

#[automock]
#[async_trait]
pub trait DeliveryService: Send + Sync {
    /// Retrieve the full list of delivery areas with their fees.
    async fn list_areas(&self) -> Result<Vec<DeliveryArea>, DeliveryServiceError>;
}
