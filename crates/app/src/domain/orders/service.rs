//! Orders service.
//!
//! Order creation is the write path of the system: every price on the
//! persisted order is recomputed here from catalog rows locked inside
//! the same transaction, so client-supplied amounts never reach
//! storage.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

use snaxo::{
    cart::CartLine,
    checkout::{CustomerDetails, OrderLine, OrderRequest},
    pricing,
    products::{Product, ProductId},
};

use crate::{
    database::Db,
    domain::delivery::repository::PgDeliveryRepository,
    domain::orders::{
        errors::OrdersServiceError,
        models::{CreatedOrder, OrderId, OrderWithItems},
        repository::{NewOrder, NewOrderItem, PgOrdersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    delivery: PgDeliveryRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            delivery: PgDeliveryRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        request: OrderRequest,
    ) -> Result<CreatedOrder, OrdersServiceError> {
        let customer = validated_customer(&request.customer)?;
        let lines = coalesced_lines(&request.lines)?;

        let mut tx = self.db.begin().await?;

        let area = self
            .delivery
            .get_area(&mut tx, request.delivery_area_id)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::UnknownDeliveryArea,
                other => other.into(),
            })?;

        let ids: Vec<ProductId> = lines.iter().map(|(id, _)| *id).collect();
        let products = self.repository.lock_products(&mut tx, &ids).await?;
        let by_id: FxHashMap<ProductId, &Product> =
            products.iter().map(|p| (p.id, p)).collect();

        let mut cart_lines = Vec::with_capacity(lines.len());

        for (id, quantity) in &lines {
            let product = by_id.get(id).ok_or(OrdersServiceError::UnknownProduct)?;

            if !product.in_stock {
                return Err(OrdersServiceError::ProductUnavailable(
                    product.name.clone(),
                ));
            }

            cart_lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                promo_family: product.promo_family,
                quantity: *quantity,
            });
        }

        let quote = pricing::quote(&cart_lines, Some(&area), request.delivery_speed);

        let order_id = OrderId::new();
        let order_number = self
            .repository
            .create_order(
                &mut tx,
                &NewOrder {
                    id: order_id,
                    customer_name: &customer.name,
                    customer_email: &customer.email,
                    customer_phone: &customer.phone,
                    delivery_address: &customer.address,
                    delivery_area_id: area.id,
                    delivery_speed: request.delivery_speed,
                    quote,
                    notes: customer.notes.as_deref(),
                },
            )
            .await?;

        for line in &cart_lines {
            self.repository
                .create_order_item(
                    &mut tx,
                    &NewOrderItem {
                        order_id,
                        product_id: line.product_id,
                        product_name: &line.name,
                        quantity: line.quantity,
                        price_at_order: line.price,
                    },
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!(%order_number, total = quote.total, "order created");

        Ok(CreatedOrder {
            id: order_id,
            order_number,
            total: quote.total,
            customer_email: customer.email.clone(),
        })
    }

    async fn get_order(&self, order_number: String) -> Result<OrderWithItems, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, &order_number).await?;
        let items = self.repository.list_order_items(&mut tx, order.id).await?;

        tx.commit().await?;

        Ok(OrderWithItems { order, items })
    }

    async fn find_order_for_notification(
        &self,
        order_number: String,
        customer_email: String,
    ) -> Result<OrderWithItems, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .repository
            .get_order_for_notification(&mut tx, &order_number, &customer_email)
            .await?;
        let items = self.repository.list_order_items(&mut tx, order.id).await?;

        tx.commit().await?;

        Ok(OrderWithItems { order, items })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate, price and persist an order atomically.
    ///
    /// All monetary amounts on the stored order are computed
    /// server-side from locked catalog rows; either the order and all
    /// of its items are written, or nothing is.
    async fn create_order(&self, request: OrderRequest)
    -> Result<CreatedOrder, OrdersServiceError>;

    /// Retrieve an order with its items by order number.
    async fn get_order(&self, order_number: String) -> Result<OrderWithItems, OrdersServiceError>;

    /// Retrieve an order for confirmation email rendering, checking
    /// that the supplied email matches the order's customer.
    async fn find_order_for_notification(
        &self,
        order_number: String,
        customer_email: String,
    ) -> Result<OrderWithItems, OrdersServiceError>;
}

fn validated_customer(customer: &CustomerDetails) -> Result<&CustomerDetails, OrdersServiceError> {
    snaxo::checkout::validate(customer)?;

    Ok(customer)
}

/// Coalesce duplicate product ids, preserving first-seen order, and
/// reject empty or zero-quantity submissions.
fn coalesced_lines(lines: &[OrderLine]) -> Result<Vec<(ProductId, u32)>, OrdersServiceError> {
    if lines.is_empty() {
        return Err(OrdersServiceError::EmptyOrder);
    }

    let mut coalesced: Vec<(ProductId, u32)> = Vec::with_capacity(lines.len());
    let mut index: FxHashMap<ProductId, usize> = FxHashMap::default();

    for line in lines {
        if line.quantity == 0 {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        if let Some(&position) = index.get(&line.product_id) {
            if let Some((_, quantity)) = coalesced.get_mut(position) {
                *quantity = quantity.saturating_add(line.quantity);
            }
        } else {
            index.insert(line.product_id, coalesced.len());
            coalesced.push((line.product_id, line.quantity));
        }
    }

    Ok(coalesced)
}
