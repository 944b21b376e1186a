//! Notification Handlers

pub(crate) mod create;
