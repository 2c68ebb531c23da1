use super::{
    ride_constraint::{FeasibilityContext, RideConstraint},
    violation::Violation,
};

/// A driver without shift windows is always available. Otherwise any single
/// window must hold the ride once the time to reach the pickup is added to its start.
#[derive(Clone)]
pub struct ShiftConstraint;

impl RideConstraint for ShiftConstraint {
    fn check(&self, context: &FeasibilityContext, violations: &mut Vec<Violation>) {
        let driver = context.driver();
        if !driver.has_shifts() {
            return;
        }

        let ride = context.ride();
        let time_to_reach = context.time_to_reach();
        let fits = driver
            .shift_windows()
            .iter()
            .any(|window| window.contains(ride.start(), ride.end(), time_to_reach));

        if !fits {
            violations.push(Violation::OutsideShift {
                ride_start: ride.start(),
                ride_end: ride.end(),
                time_to_reach,
            });
        }
    }
}
