use std::fmt;

use serde::Serialize;

use crate::{
    parsers::clock::format_clock_minutes,
    problem::{Minutes, license_class::LicenseClass},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Violation {
    LicenseCapacityExceeded {
        passengers: u32,
        license_class: LicenseClass,
    },
    SeatCapacityExceeded {
        passengers: u32,
        seats: u32,
    },
    Unreachable {
        arrival: Minutes,
        ride_start: Minutes,
    },
    OutsideShift {
        ride_start: Minutes,
        ride_end: Minutes,
        time_to_reach: Minutes,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::LicenseCapacityExceeded {
                passengers,
                license_class,
            } => write!(
                f,
                "{passengers} passengers exceed the cap of license {license_class}"
            ),
            Violation::SeatCapacityExceeded { passengers, seats } => {
                write!(f, "{passengers} passengers exceed {seats} seats")
            }
            Violation::Unreachable {
                arrival,
                ride_start,
            } => write!(
                f,
                "arrives at {} after pickup at {}",
                format_clock_minutes(*arrival),
                format_clock_minutes(*ride_start)
            ),
            Violation::OutsideShift {
                ride_start,
                ride_end,
                time_to_reach,
            } => write!(
                f,
                "{}-{} with {time_to_reach} min to reach fits no shift",
                format_clock_minutes(*ride_start),
                format_clock_minutes(*ride_end)
            ),
        }
    }
}
