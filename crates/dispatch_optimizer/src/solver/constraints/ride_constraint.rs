use dispatch_geo::travel_estimate::TravelEstimate;

use crate::{
    problem::{Minutes, driver::Driver, ride::Ride},
    solver::schedule_state::ScheduleState,
};

use super::violation::Violation;

/// Everything a constraint may look at for one ride and driver pair.
pub struct FeasibilityContext<'a> {
    ride: &'a Ride,
    driver: &'a Driver,
    state: &'a ScheduleState,
    deadhead: TravelEstimate,
}

impl<'a> FeasibilityContext<'a> {
    pub fn new(
        ride: &'a Ride,
        driver: &'a Driver,
        state: &'a ScheduleState,
        deadhead: TravelEstimate,
    ) -> Self {
        FeasibilityContext {
            ride,
            driver,
            state,
            deadhead,
        }
    }

    pub fn ride(&self) -> &Ride {
        self.ride
    }

    pub fn driver(&self) -> &Driver {
        self.driver
    }

    pub fn state(&self) -> &ScheduleState {
        self.state
    }

    pub fn time_to_reach(&self) -> Minutes {
        self.deadhead.minutes
    }
}

pub trait RideConstraint {
    fn check(&self, context: &FeasibilityContext, violations: &mut Vec<Violation>);
}
