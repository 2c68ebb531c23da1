use serde::Serialize;

use crate::{error::DispatchError, problem::Minutes};

pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// `[start, end)` in minutes since midnight.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    start: Minutes,
    end: Minutes,
}

impl ShiftWindow {
    pub fn new(start: Minutes, end: Minutes) -> Result<Self, DispatchError> {
        if !(0..=MINUTES_PER_DAY).contains(&start) || !(0..=MINUTES_PER_DAY).contains(&end) {
            return Err(DispatchError::invalid_argument(format!(
                "shift window [{start}, {end}) is outside of the day"
            )));
        }

        if end <= start {
            return Err(DispatchError::invalid_argument(format!(
                "shift window [{start}, {end}) ends before it starts"
            )));
        }

        Ok(ShiftWindow { start, end })
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    /// Both edges are inclusive: starting exactly at `start + time_to_reach` or
    /// ending exactly at `end` still fits.
    pub fn contains(&self, ride_start: Minutes, ride_end: Minutes, time_to_reach: Minutes) -> bool {
        ride_start >= self.start.saturating_add(time_to_reach) && ride_end <= self.end
    }
}
