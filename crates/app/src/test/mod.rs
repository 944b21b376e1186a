//! Shared integration-test infrastructure.

mod db;

pub(crate) use context::{SeedProduct, TestContext};
