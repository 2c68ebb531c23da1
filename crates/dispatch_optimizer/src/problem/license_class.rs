use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Passenger-transport licence tiers, ordered by capability.
///
/// A higher tier may carry any load a lower tier may.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, JsonSchema,
)]
pub enum LicenseClass {
    /// Up to 8 passengers
    B,
    /// Up to 16 passengers
    D1,
    /// No passenger cap
    D,
}

impl LicenseClass {
    pub fn passenger_cap(&self) -> Option<u32> {
        match self {
            LicenseClass::B => Some(8),
            LicenseClass::D1 => Some(16),
            LicenseClass::D => None,
        }
    }

    pub fn allows(&self, passengers: u32) -> bool {
        self.passenger_cap().is_none_or(|cap| passengers <= cap)
    }
}

impl Display for LicenseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LicenseClass::B => "B",
                LicenseClass::D1 => "D1",
                LicenseClass::D => "D",
            }
        )
    }
}

impl FromStr for LicenseClass {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B" => Ok(LicenseClass::B),
            "D1" => Ok(LicenseClass::D1),
            "D" => Ok(LicenseClass::D),
            other => Err(DispatchError::invalid_argument(format!(
                "unknown license class '{other}'"
            ))),
        }
    }
}
