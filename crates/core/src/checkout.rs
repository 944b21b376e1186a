//! Checkout validation
//!
//! Field validation shared by the client path and the server path. The
//! client runs it before submitting as a UX optimisation; the backend
//! re-runs the same checks inside the order-creation transaction, since
//! client-side validation is never a trust boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartStore,
    delivery::{DeliveryAreaId, DeliverySpeed},
    products::ProductId,
    storage::CartStorage,
};

/// Minimum customer name length.
pub const NAME_MIN: usize = 2;

/// Maximum customer name length.
pub const NAME_MAX: usize = 100;

/// Minimum digits in a phone number after stripping non-digits.
pub const PHONE_MIN_DIGITS: usize = 7;

/// Maximum raw phone number length.
pub const PHONE_MAX_RAW: usize = 20;

/// Minimum delivery address length.
pub const ADDRESS_MIN: usize = 5;

/// Customer contact and delivery fields collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Customer name.
    pub name: String,

    /// Customer email address.
    pub email: String,

    /// Customer phone number, as entered.
    pub phone: String,

    /// Delivery street address.
    pub address: String,

    /// Optional free-text notes for the courier.
    pub notes: Option<String>,
}

/// Per-field validation failures, each with its own user-facing message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name outside the 2-100 character range.
    #[error("name must be between 2 and 100 characters")]
    Name,

    /// Email does not match a standard address shape.
    #[error("email address is not valid")]
    Email,

    /// Phone too long, or too few digits once separators are stripped.
    #[error("phone number must contain at least 7 digits")]
    Phone,

    /// Address shorter than the minimum.
    #[error("delivery address must be at least 5 characters")]
    Address,
}

/// Checkout preconditions and field failures, each blocking submission
/// before any backend call is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no entries.
    #[error("cart is empty")]
    EmptyCart,

    /// No delivery area has been selected.
    #[error("no delivery area selected")]
    NoDeliveryArea,

    /// A customer field failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validate the customer name.
///
/// # Errors
///
/// Returns [`ValidationError::Name`] when the trimmed name is outside
/// the 2-100 character range.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();

    if (NAME_MIN..=NAME_MAX).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::Name)
    }
}

/// Validate the customer email address.
///
/// # Errors
///
/// Returns [`ValidationError::Email`] when the address does not match a
/// standard `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

/// Validate the customer phone number.
///
/// # Errors
///
/// Returns [`ValidationError::Phone`] when the raw value exceeds 20
/// characters or fewer than 7 digits remain after stripping separators.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let raw = phone.trim();
    let digits = raw.chars().filter(char::is_ascii_digit).count();

    if raw.chars().count() <= PHONE_MAX_RAW && digits >= PHONE_MIN_DIGITS {
        Ok(())
    } else {
        Err(ValidationError::Phone)
    }
}

/// Validate the delivery address.
///
/// # Errors
///
/// Returns [`ValidationError::Address`] when the trimmed address is
/// shorter than 5 characters.
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.trim().chars().count() >= ADDRESS_MIN {
        Ok(())
    } else {
        Err(ValidationError::Address)
    }
}

/// Validate all customer fields, failing on the first violation.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failing field, in
/// name, email, phone, address order.
pub fn validate(details: &CustomerDetails) -> Result<(), ValidationError> {
    validate_name(&details.name)?;
    validate_email(&details.email)?;
    validate_phone(&details.phone)?;
    validate_address(&details.address)?;

    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// One (product, quantity) pair submitted with an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Referenced product.
    pub product_id: ProductId,

    /// Units ordered, at least 1.
    pub quantity: u32,
}

/// The validated payload handed to the order submission service.
///
/// Carries no client-computed totals; authoritative pricing is always
/// recomputed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Customer contact and delivery fields.
    pub customer: CustomerDetails,

    /// Selected delivery area.
    pub delivery_area_id: DeliveryAreaId,

    /// Selected delivery speed.
    pub delivery_speed: DeliverySpeed,

    /// The cart's (product, quantity) pairs.
    pub lines: Vec<OrderLine>,
}

/// Build an [`OrderRequest`] from the current cart state, enforcing the
/// client-side preconditions.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] when the cart has no entries.
/// - [`CheckoutError::NoDeliveryArea`] when no area is selected.
/// - [`CheckoutError::Invalid`] when a customer field fails validation.
pub fn build_order_request<S: CartStorage>(
    cart: &CartStore<S>,
    customer: CustomerDetails,
) -> Result<OrderRequest, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let area = cart.delivery_area().ok_or(CheckoutError::NoDeliveryArea)?;

    validate(&customer)?;

    Ok(OrderRequest {
        customer,
        delivery_area_id: area.id,
        delivery_speed: cart.delivery_speed(),
        lines: cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect(),
    })
}
