//! Products

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generate a fresh product identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Unwrap to the underlying UUID.
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ProductId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Drinks
    Drinks,
    /// Frozen food
    Frozen,
    /// Snacks
    Snacks,
    /// Bundled deals
    Deals,
}

impl Category {
    /// Stable identifier used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drinks => "drinks",
            Self::Frozen => "frozen",
            Self::Snacks => "snacks",
            Self::Deals => "deals",
        }
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Drinks => "Drickor",
            Self::Frozen => "Fryst mat",
            Self::Snacks => "Snacks",
            Self::Deals => "Deals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when parsing an unknown category name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drinks" => Ok(Self::Drinks),
            "frozen" => Ok(Self::Frozen),
            "snacks" => Ok(Self::Snacks),
            "deals" => Ok(Self::Deals),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Promotional product family.
///
/// Multi-buy eligibility is keyed by an explicit family marker resolved at
/// catalog load, not by matching on display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoFamily {
    /// Billy's pan pizza line (3-for-2).
    Billys,
}

impl PromoFamily {
    /// Stable identifier used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Billys => "billys",
        }
    }
}

impl fmt::Display for PromoFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when parsing an unknown promo family name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown promo family: {0}")]
pub struct UnknownPromoFamily(pub String);

impl FromStr for PromoFamily {
    type Err = UnknownPromoFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "billys" => Ok(Self::Billys),
            other => Err(UnknownPromoFamily(other.to_string())),
        }
    }
}

/// A catalog product.
///
/// Prices are whole currency units (kronor); `original_price`, when
/// present, is the pre-discount display price and is greater than `price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Unit price in whole currency units.
    pub price: u64,

    /// Pre-discount display price, greater than `price` when present.
    pub original_price: Option<u64>,

    /// Category the product is listed under.
    pub category: Category,

    /// Optional image reference.
    pub image_url: Option<String>,

    /// Whether the product can currently be ordered.
    pub in_stock: bool,

    /// Whether the product is surfaced in the popular section.
    pub is_popular: bool,

    /// Promotional family marker, if the product participates in one.
    pub promo_family: Option<PromoFamily>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn category_round_trips_through_str() -> TestResult {
        for category in [
            Category::Drinks,
            Category::Frozen,
            Category::Snacks,
            Category::Deals,
        ] {
            assert_eq!(category.as_str().parse::<Category>()?, category);
        }

        Ok(())
    }

    #[test]
    fn unknown_category_errors() {
        let result = "sweets".parse::<Category>();

        assert_eq!(result, Err(UnknownCategory("sweets".to_string())));
    }

    #[test]
    fn promo_family_round_trips_through_str() -> TestResult {
        assert_eq!("billys".parse::<PromoFamily>()?, PromoFamily::Billys);

        Ok(())
    }

    #[test]
    fn product_id_wraps_uuid() {
        let uuid = uuid::Uuid::now_v7();
        let id = ProductId::from_uuid(uuid);

        assert_eq!(id.into_uuid(), uuid);
    }
}
