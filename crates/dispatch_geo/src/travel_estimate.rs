use serde::{Deserialize, Serialize};

pub type Minutes = i64;

/// Road (or straight-line) distance in kilometres and travel time rounded to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub km: f64,
    pub minutes: Minutes,
}

impl TravelEstimate {
    pub const ZERO: TravelEstimate = TravelEstimate {
        km: 0.0,
        minutes: 0,
    };

    pub fn new(km: f64, minutes: Minutes) -> Self {
        TravelEstimate { km, minutes }
    }

    pub fn from_meters_and_seconds(meters: f64, seconds: f64) -> Self {
        TravelEstimate {
            km: meters / 1000.0,
            minutes: (seconds / 60.0).round() as Minutes,
        }
    }
}
