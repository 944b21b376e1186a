//! App Router

use salvo::Router;

use crate::{delivery_areas, healthcheck, notifications, orders, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("delivery-areas").get(delivery_areas::index::handler))
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("{order_number}").get(orders::get::handler)),
        )
        .push(
            Router::new()
                .hoop(notifications::middleware::handler)
                .push(Router::with_path("order-emails").post(notifications::create::handler)),
        )
}
