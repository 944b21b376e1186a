//! Delivery Area Handlers

pub(crate) mod index;
