//! Application domain modules.

pub mod delivery;
pub mod emails;
pub mod orders;
pub mod products;
