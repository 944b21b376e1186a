//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use snaxo::{
    checkout::{CustomerDetails, OrderLine, OrderRequest},
    delivery::{DeliveryAreaId, DeliverySpeed},
    products::ProductId,
};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Customer details on an incoming order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

impl From<CustomerPayload> for CustomerDetails {
    fn from(payload: CustomerPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            notes: payload.notes,
        }
    }
}

/// A single order line on an incoming order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLinePayload {
    /// Product identifier
    pub product_id: Uuid,

    /// Number of units, at least 1
    pub quantity: u32,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub customer: CustomerPayload,
    pub delivery_area_id: Uuid,
    /// Delivery speed, either "standard" or "priority"
    pub delivery_speed: String,
    pub lines: Vec<OrderLinePayload>,
}

impl CreateOrderRequest {
    fn try_into_order_request(self) -> Result<OrderRequest, StatusError> {
        let delivery_speed = self
            .delivery_speed
            .parse::<DeliverySpeed>()
            .map_err(|_error| StatusError::bad_request().brief("Unknown delivery speed"))?;

        Ok(OrderRequest {
            customer: self.customer.into(),
            delivery_area_id: DeliveryAreaId::from_uuid(self.delivery_area_id),
            delivery_speed,
            lines: self
                .lines
                .into_iter()
                .map(|line| OrderLine {
                    product_id: ProductId::from_uuid(line.product_id),
                    quantity: line.quantity,
                })
                .collect(),
        })
    }
}

/// Order Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCreatedResponse {
    /// Order identifier
    pub id: Uuid,

    /// Human-facing order number
    pub order_number: String,

    /// Server-computed total in whole kronor
    pub total: u64,

    /// Email the confirmation is being sent to
    pub customer_email: String,
}

/// Create Order Handler
///
/// Validates and prices the order server-side, persists it atomically,
/// and queues confirmation emails in the background. Email failures
/// never affect the response.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order payload"),
        (status_code = StatusCode::CONFLICT, description = "A product is out of stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner().try_into_order_request()?;

    let created = state
        .app
        .orders
        .create_order(request)
        .await
        .map_err(into_status_error)?;

    let emails = state.app.emails.clone();
    let order_number = created.order_number.clone();
    let customer_email = created.customer_email.clone();

    tokio::spawn(async move {
        if let Err(error) = emails
            .send_confirmation(order_number.clone(), customer_email)
            .await
        {
            warn!(%order_number, "failed to send confirmation emails: {error}");
        }
    });

    res.add_header(LOCATION, format!("/orders/{}", created.order_number), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderCreatedResponse {
        id: created.id.into_uuid(),
        order_number: created.order_number,
        total: created.total,
        customer_email: created.customer_email,
    }))
}
