//! Delivery Area Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snaxo::delivery::DeliveryArea;

use crate::{delivery_areas::errors::into_status_error, extensions::*, state::State};

/// Delivery Area Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryAreaResponse {
    /// The unique identifier of the delivery area
    pub id: Uuid,

    /// Area display name
    pub name: String,

    /// Flat delivery fee in whole kronor
    pub fee: u64,
}

impl From<DeliveryArea> for DeliveryAreaResponse {
    fn from(area: DeliveryArea) -> Self {
        Self {
            id: area.id.into_uuid(),
            name: area.name,
            fee: area.fee,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryAreasResponse {
    /// The list of delivery areas, cheapest first
    pub areas: Vec<DeliveryAreaResponse>,
}

/// Delivery Area Index Handler
///
/// Returns the list of delivery areas with their fees.
#[endpoint(tags("delivery-areas"), summary = "List Delivery Areas")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DeliveryAreasResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let areas = state
        .app
        .delivery
        .list_areas()
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeliveryAreasResponse {
        areas: areas.into_iter().map(Into::into).collect(),
    }))
}
