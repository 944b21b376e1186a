//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use snaxo::{
    delivery::{DeliveryAreaId, DeliverySpeed},
    products::{Category, Product, ProductId},
};
use snaxo_app::{
    context::AppContext,
    domain::{
        delivery::MockDeliveryService,
        emails::MockEmailService,
        orders::{MockOrdersService, Order, OrderId, OrderItem, OrderStatus, OrderWithItems},
        products::MockCatalogService,
    },
};

use crate::{notifications, state::State};

pub(crate) const TEST_OPERATOR_TOKEN: &str = "test-operator-token";

pub(crate) fn make_product(id: ProductId, name: &str, price: u64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: None,
        price,
        original_price: None,
        category: Category::Snacks,
        image_url: None,
        in_stock: true,
        is_popular: false,
        promo_family: None,
    }
}

pub(crate) fn make_order(order_number: &str) -> OrderWithItems {
    let order_id = OrderId::new();

    OrderWithItems {
        order: Order {
            id: order_id,
            order_number: order_number.to_string(),
            customer_name: "Astrid Lind".to_string(),
            customer_email: "astrid@example.com".to_string(),
            customer_phone: "070-123 45 67".to_string(),
            delivery_address: "Kvarnvägen 3, Järfälla".to_string(),
            delivery_area_id: DeliveryAreaId::new(),
            delivery_area_name: "Järfälla".to_string(),
            delivery_speed: DeliverySpeed::Priority,
            subtotal: 90,
            discount: 30,
            delivery_fee: 29,
            priority_fee: 19,
            total: 108,
            status: OrderStatus::Pending,
            notes: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        items: vec![OrderItem {
            id: Uuid::now_v7(),
            order_id,
            product_id: Some(ProductId::new()),
            product_name: "Billy's Pan Pizza".to_string(),
            quantity: 3,
            price_at_order: 30,
        }],
    }
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_products().never();
    catalog.expect_get_product().never();

    catalog
}

fn strict_delivery_mock() -> MockDeliveryService {
    let mut delivery = MockDeliveryService::new();

    delivery.expect_list_areas().never();

    delivery
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_find_order_for_notification().never();

    orders
}

pub(crate) fn strict_emails_mock() -> MockEmailService {
    let mut emails = MockEmailService::new();

    emails.expect_send_confirmation().never();

    emails
}

fn make_state(
    catalog: MockCatalogService,
    delivery: MockDeliveryService,
    orders: MockOrdersService,
    emails: MockEmailService,
) -> Arc<State> {
    let app = AppContext {
        catalog: Arc::new(catalog),
        delivery: Arc::new(delivery),
        orders: Arc::new(orders),
        emails: Arc::new(emails),
    };

    Arc::new(State::new(app, TEST_OPERATOR_TOKEN.to_string()))
}

/// State wired entirely with strict mocks, for middleware tests.
pub(crate) fn strict_state() -> Arc<State> {
    make_state(
        strict_catalog_mock(),
        strict_delivery_mock(),
        strict_orders_mock(),
        strict_emails_mock(),
    )
}

fn into_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    into_service(
        make_state(
            catalog,
            strict_delivery_mock(),
            strict_orders_mock(),
            strict_emails_mock(),
        ),
        route,
    )
}

pub(crate) fn delivery_service(delivery: MockDeliveryService, route: Router) -> Service {
    into_service(
        make_state(
            strict_catalog_mock(),
            delivery,
            strict_orders_mock(),
            strict_emails_mock(),
        ),
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    into_service(
        make_state(
            strict_catalog_mock(),
            strict_delivery_mock(),
            orders,
            strict_emails_mock(),
        ),
        route,
    )
}

pub(crate) fn orders_service_with_emails(
    orders: MockOrdersService,
    emails: MockEmailService,
    route: Router,
) -> Service {
    into_service(
        make_state(strict_catalog_mock(), strict_delivery_mock(), orders, emails),
        route,
    )
}

/// Routes the given handler behind the operator auth middleware.
pub(crate) fn emails_service(emails: MockEmailService, route: Router) -> Service {
    let state = make_state(
        strict_catalog_mock(),
        strict_delivery_mock(),
        strict_orders_mock(),
        emails,
    );

    Service::new(
        Router::new().hoop(inject(state)).push(
            Router::new()
                .hoop(notifications::middleware::handler)
                .push(route),
        ),
    )
}
