use dispatch_geo::coordinates::GeoPoint;

use crate::problem::{
    Minutes,
    dispatch_problem::DispatchProblem,
    driver::{Driver, DriverIdx},
    ride::Ride,
};

/// Where and when a driver becomes free again during one strategy run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleState {
    last_end_time: Minutes,
    last_location: GeoPoint,
    rides_served: usize,
}

impl ScheduleState {
    pub fn initial(driver: &Driver) -> Self {
        ScheduleState {
            last_end_time: 0,
            last_location: *driver.location(),
            rides_served: 0,
        }
    }

    pub fn last_end_time(&self) -> Minutes {
        self.last_end_time
    }

    pub fn last_location(&self) -> &GeoPoint {
        &self.last_location
    }

    pub fn rides_served(&self) -> usize {
        self.rides_served
    }

    pub fn advance(&mut self, ride: &Ride) {
        self.last_end_time = ride.end();
        self.last_location = *ride.dropoff();
        self.rides_served += 1;
    }
}

/// One state per driver, indexed like `DispatchProblem::drivers`.
#[derive(Debug, Clone)]
pub struct ScheduleStates(Vec<ScheduleState>);

impl ScheduleStates {
    pub fn new(problem: &DispatchProblem) -> Self {
        ScheduleStates(problem.drivers().iter().map(ScheduleState::initial).collect())
    }

    pub fn get(&self, driver: DriverIdx) -> &ScheduleState {
        &self.0[driver.get()]
    }

    pub fn advance(&mut self, driver: DriverIdx, ride: &Ride) {
        self.0[driver.get()].advance(ride);
    }
}
