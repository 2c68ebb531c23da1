use dispatch_geo::{geo_estimator::GeoEstimator, travel_estimate::TravelEstimate};

use crate::{
    problem::{driver::Driver, ride::Ride},
    solver::schedule_state::ScheduleState,
};

use super::{constraint::Constraint, ride_constraint::FeasibilityContext, violation::Violation};

#[derive(Debug, Clone, PartialEq)]
pub struct Feasibility {
    reasons: Vec<Violation>,
    deadhead: TravelEstimate,
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reasons(&self) -> &[Violation] {
        &self.reasons
    }

    /// Estimate from the driver's last location to the pickup, reused for pricing.
    pub fn deadhead(&self) -> TravelEstimate {
        self.deadhead
    }
}

/// Pure check of one ride against one driver's current schedule state.
/// Nothing is memoized, callers re-evaluate after every state change.
#[derive(Clone)]
pub struct ConstraintEvaluator {
    constraints: Vec<Constraint>,
}

impl Default for ConstraintEvaluator {
    fn default() -> Self {
        ConstraintEvaluator::new(Constraint::all())
    }
}

impl ConstraintEvaluator {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        ConstraintEvaluator { constraints }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn evaluate(
        &self,
        ride: &Ride,
        driver: &Driver,
        state: &ScheduleState,
        estimator: &dyn GeoEstimator,
    ) -> Feasibility {
        let deadhead = estimator.estimate(state.last_location(), ride.pickup());
        let context = FeasibilityContext::new(ride, driver, state, deadhead);

        let mut reasons = vec![];
        for constraint in &self.constraints {
            constraint.check(&context, &mut reasons);
        }

        Feasibility { reasons, deadhead }
    }
}
