//! Orders repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use snaxo::{
    delivery::{DeliveryAreaId, DeliverySpeed},
    pricing::Quote,
    products::{Product, ProductId},
};

use crate::domain::products::repository::{ProductRow, try_get_amount, try_get_parsed};

use super::models::{Order, OrderId, OrderItem, OrderStatus};

const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_FOR_NOTIFICATION_SQL: &str = include_str!("sql/get_order_for_notification.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");

/// Row wrapper so sqlx decoding stays local to this crate.
#[derive(Debug, Clone)]
pub(crate) struct OrderRow(pub(crate) Order);

#[derive(Debug, Clone)]
pub(crate) struct OrderItemRow(pub(crate) OrderItem);

/// Fields supplied by the caller when inserting an order. Monetary
/// amounts come from the server-side quote, never from the request.
#[derive(Debug, Clone)]
pub(crate) struct NewOrder<'a> {
    pub(crate) id: OrderId,
    pub(crate) customer_name: &'a str,
    pub(crate) customer_email: &'a str,
    pub(crate) customer_phone: &'a str,
    pub(crate) delivery_address: &'a str,
    pub(crate) delivery_area_id: DeliveryAreaId,
    pub(crate) delivery_speed: DeliverySpeed,
    pub(crate) quote: Quote,
    pub(crate) notes: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem<'a> {
    pub(crate) order_id: OrderId,
    pub(crate) product_id: ProductId,
    pub(crate) product_name: &'a str,
    pub(crate) quantity: u32,
    pub(crate) price_at_order: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the given product rows for the duration of the transaction.
    ///
    /// Rows are returned in arbitrary order and may be fewer than the
    /// ids requested; the caller resolves which ids are missing.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductId],
    ) -> Result<Vec<Product>, sqlx::Error> {
        let ids: Vec<Uuid> = products.iter().map(|id| id.into_uuid()).collect();

        let rows = query_as::<Postgres, ProductRow>(LOCK_PRODUCTS_SQL)
            .bind(&ids)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    /// Insert an order row and return the generated order number.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder<'_>,
    ) -> Result<String, sqlx::Error> {
        let order_number: String = query_scalar(CREATE_ORDER_SQL)
            .bind(order.id.into_uuid())
            .bind(order.customer_name)
            .bind(order.customer_email)
            .bind(order.customer_phone)
            .bind(order.delivery_address)
            .bind(order.delivery_area_id.into_uuid())
            .bind(order.delivery_speed.as_str())
            .bind(try_into_i64(order.quote.subtotal)?)
            .bind(try_into_i64(order.quote.discount)?)
            .bind(try_into_i64(order.quote.delivery_fee)?)
            .bind(try_into_i64(order.quote.priority_fee)?)
            .bind(try_into_i64(order.quote.total)?)
            .bind(order.notes)
            .fetch_one(&mut **tx)
            .await?;

        Ok(order_number)
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewOrderItem<'_>,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(Uuid::now_v7())
            .bind(item.order_id.into_uuid())
            .bind(item.product_id.into_uuid())
            .bind(item.product_name)
            .bind(i64::from(item.quantity))
            .bind(try_into_i64(item.price_at_order)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
    ) -> Result<Order, sqlx::Error> {
        let row = query_as::<Postgres, OrderRow>(GET_ORDER_SQL)
            .bind(order_number)
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }

    /// Look up an order by number and customer email, for the email
    /// dispatcher. Email comparison is case-insensitive.
    pub(crate) async fn get_order_for_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
        customer_email: &str,
    ) -> Result<Order, sqlx::Error> {
        let row = query_as::<Postgres, OrderRow>(GET_ORDER_FOR_NOTIFICATION_SQL)
            .bind(order_number)
            .bind(customer_email)
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let rows = query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(Order {
            id: OrderId::from_uuid(row.try_get("id")?),
            order_number: row.try_get("order_number")?,
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            customer_phone: row.try_get("customer_phone")?,
            delivery_address: row.try_get("delivery_address")?,
            delivery_area_id: DeliveryAreaId::from_uuid(row.try_get("delivery_area_id")?),
            delivery_area_name: row.try_get("delivery_area_name")?,
            delivery_speed: try_get_parsed::<DeliverySpeed>(row, "delivery_speed")?,
            subtotal: try_get_amount(row, "subtotal")?,
            discount: try_get_amount(row, "discount")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            priority_fee: try_get_amount(row, "priority_fee")?,
            total: try_get_amount(row, "total")?,
            status: try_get_parsed::<OrderStatus>(row, "status")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product_id: Option<Uuid> = row.try_get("product_id")?;
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self(OrderItem {
            id: row.try_get("id")?,
            order_id: OrderId::from_uuid(row.try_get("order_id")?),
            product_id: product_id.map(ProductId::from_uuid),
            product_name: row.try_get("product_name")?,
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            price_at_order: try_get_amount(row, "price_at_order")?,
        }))
    }
}

fn try_into_i64(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
