//! Delivery areas and speeds

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fixed surcharge for priority delivery, in whole currency units.
///
/// The 20-unit constant found in one checkout lineage is superseded.
pub const PRIORITY_FEE: u64 = 19;

/// Delivery area identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryAreaId(Uuid);

impl DeliveryAreaId {
    /// Generate a fresh area identifier.
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

impl Default for DeliveryAreaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeliveryAreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for DeliveryAreaId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A delivery area with a flat fee.
///
/// Read-only reference data; the canonical table (Järfälla 29,
/// Upplands Bro 49, Husby/Akalla/Kista 52) is seeded by migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryArea {
    /// Area identifier.
    pub id: DeliveryAreaId,

    /// Display name.
    pub name: String,

    /// Flat delivery fee in whole currency units.
    pub fee: u64,
}

/// Delivery speed selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverySpeed {
    /// Standard delivery, no surcharge.
    #[default]
    Standard,
    /// Priority delivery with a fixed surcharge.
    Priority,
}

impl DeliverySpeed {
    /// Stable identifier used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Priority => "priority",
        }
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Priority => "Prioritering",
        }
    }

    /// Estimated delivery window.
    #[must_use]
    pub const fn window(self) -> &'static str {
        match self {
            Self::Standard => "20-30 min",
            Self::Priority => "10-20 min",
        }
    }

    /// Surcharge carried by this speed.
    #[must_use]
    pub const fn surcharge(self) -> u64 {
        match self {
            Self::Standard => 0,
            Self::Priority => PRIORITY_FEE,
        }
    }
}

impl fmt::Display for DeliverySpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when parsing an unknown delivery speed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown delivery speed: {0}")]
pub struct UnknownDeliverySpeed(pub String);

impl FromStr for DeliverySpeed {
    type Err = UnknownDeliverySpeed;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "priority" => Ok(Self::Priority),
            other => Err(UnknownDeliverySpeed(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_speed_carries_no_surcharge() {
        assert_eq!(DeliverySpeed::Standard.surcharge(), 0);
    }

    #[test]
    fn priority_speed_carries_fixed_surcharge() {
        assert_eq!(DeliverySpeed::Priority.surcharge(), PRIORITY_FEE);
    }

    #[test]
    fn default_speed_is_standard() {
        assert_eq!(DeliverySpeed::default(), DeliverySpeed::Standard);
    }

    #[test]
    fn speed_round_trips_through_str() {
        for speed in [DeliverySpeed::Standard, DeliverySpeed::Priority] {
            assert_eq!(speed.as_str().parse(), Ok(speed));
        }
    }

    #[test]
    fn speed_serializes_as_snake_case() {
        let json = serde_json::to_string(&DeliverySpeed::Priority);

        assert_eq!(json.ok().as_deref(), Some("\"priority\""));
    }
}
