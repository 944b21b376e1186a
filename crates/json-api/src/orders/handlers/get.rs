//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use snaxo_app::domain::orders::{OrderItem, OrderWithItems};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// Product name as it was at order time
    pub product_name: String,

    /// Number of units ordered
    pub quantity: u32,

    /// Unit price at order time, in whole kronor
    pub price_at_order: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_name: item.product_name,
            quantity: item.quantity,
            price_at_order: item.price_at_order,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Human-facing order number
    pub order_number: String,

    /// Current order status
    pub status: String,

    /// Customer name
    pub customer_name: String,

    /// Delivery street address
    pub delivery_address: String,

    /// Delivery area name
    pub delivery_area: String,

    /// Selected delivery speed
    pub delivery_speed: String,

    /// Sum of line totals in whole kronor
    pub subtotal: u64,

    /// Multi-buy discount applied
    pub discount: u64,

    /// Flat delivery fee for the area
    pub delivery_fee: u64,

    /// Priority surcharge, zero for standard delivery
    pub priority_fee: u64,

    /// Amount due on delivery
    pub total: u64,

    /// Ordered items with price snapshots
    pub items: Vec<OrderItemResponse>,

    /// When the order was placed
    pub created_at: String,
}

impl From<OrderWithItems> for OrderResponse {
    fn from(order: OrderWithItems) -> Self {
        let OrderWithItems { order, items } = order;

        Self {
            order_number: order.order_number,
            status: order.status.to_string(),
            customer_name: order.customer_name,
            delivery_address: order.delivery_address,
            delivery_area: order.delivery_area_name,
            delivery_speed: order.delivery_speed.to_string(),
            subtotal: order.subtotal,
            discount: order.discount,
            delivery_fee: order.delivery_fee,
            priority_fee: order.priority_fee,
            total: order.total,
            items: items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order with its items, for the confirmation view.
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    order_number: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order_number.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use snaxo_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order_number}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_order_with_items() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|number| number.as_str() == "SNX-000042")
            .return_once(|_| Ok(make_order("SNX-000042")));

        orders.expect_create_order().never();
        orders.expect_find_order_for_notification().never();

        let response: OrderResponse = TestClient::get("http://example.com/orders/SNX-000042")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.order_number, "SNX-000042");
        assert_eq!(response.status, "pending");
        assert_eq!(response.total, 108);
        assert_eq!(response.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        orders.expect_create_order().never();
        orders.expect_find_order_for_notification().never();

        let res = TestClient::get("http://example.com/orders/SNX-999999")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
