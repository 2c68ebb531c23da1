use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Non-negative amount of money in currency subunits (cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct Cents(u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(value: u64) -> Self {
        Cents(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn checked_add(self, other: Cents) -> Option<Cents> {
        match self.0.checked_add(other.0) {
            Some(value) => Some(Cents(value)),
            None => None,
        }
    }

    pub const fn checked_mul(self, factor: u64) -> Option<Cents> {
        match self.0.checked_mul(factor) {
            Some(value) => Some(Cents(value)),
            None => None,
        }
    }
}

impl From<u64> for Cents {
    fn from(value: u64) -> Self {
        Cents::new(value)
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
