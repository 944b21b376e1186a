//! Snaxo
//!
//! Cart-state and pricing engine for the Snaxo snack delivery storefront:
//! a session-scoped cart store with durable persistence and subscriber
//! seams, a pure pricing quote (delivery fees, priority surcharge and the
//! 3-for-2 multi-buy discount), and the checkout field validation shared
//! by client and server paths.

pub mod cart;
pub mod checkout;
pub mod delivery;
pub mod discounts;
pub mod pricing;
pub mod products;
pub mod storage;
