use super::{
    ride_constraint::{FeasibilityContext, RideConstraint},
    violation::Violation,
};

#[derive(Clone)]
pub struct LegalConstraint;

impl RideConstraint for LegalConstraint {
    fn check(&self, context: &FeasibilityContext, violations: &mut Vec<Violation>) {
        let passengers = context.ride().passengers();
        let driver = context.driver();

        if !driver.license_class().allows(passengers) {
            violations.push(Violation::LicenseCapacityExceeded {
                passengers,
                license_class: driver.license_class(),
            });
        }

        if passengers > driver.seats() {
            violations.push(Violation::SeatCapacityExceeded {
                passengers,
                seats: driver.seats(),
            });
        }
    }
}
