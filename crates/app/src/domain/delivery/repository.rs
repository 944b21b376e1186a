//! Delivery areas repository.

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use snaxo::delivery::{DeliveryArea, DeliveryAreaId};

use crate::domain::products::repository::try_get_amount;

const LIST_AREAS_SQL: &str = include_str!("sql/list_areas.sql");
const GET_AREA_SQL: &str = include_str!("sql/get_area.sql");

/// Row wrapper so sqlx decoding stays local to this crate.
#[derive(Debug, Clone)]
pub(crate) struct DeliveryAreaRow(pub(crate) DeliveryArea);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDeliveryRepository;

impl PgDeliveryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_areas(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<DeliveryArea>, sqlx::Error> {
        let rows = query_as::<Postgres, DeliveryAreaRow>(LIST_AREAS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    pub(crate) async fn get_area(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        area: DeliveryAreaId,
    ) -> Result<DeliveryArea, sqlx::Error> {
        let row = query_as::<Postgres, DeliveryAreaRow>(GET_AREA_SQL)
            .bind(area.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }
}

impl<'r> FromRow<'r, PgRow> for DeliveryAreaRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(DeliveryArea {
            id: DeliveryAreaId::from_uuid(row.try_get("id")?),
            name: row.try_get("name")?,
            fee: try_get_amount(row, "fee")?,
        }))
    }
}
