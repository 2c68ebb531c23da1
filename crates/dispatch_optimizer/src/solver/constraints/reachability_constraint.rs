use super::{
    ride_constraint::{FeasibilityContext, RideConstraint},
    violation::Violation,
};

#[derive(Clone)]
pub struct ReachabilityConstraint;

impl RideConstraint for ReachabilityConstraint {
    fn check(&self, context: &FeasibilityContext, violations: &mut Vec<Violation>) {
        let arrival = context
            .state()
            .last_end_time()
            .saturating_add(context.time_to_reach());
        let ride_start = context.ride().start();

        if arrival > ride_start {
            violations.push(Violation::Unreachable {
                arrival,
                ride_start,
            });
        }
    }
}
