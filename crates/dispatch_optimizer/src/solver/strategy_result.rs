use std::cmp::Ordering;

use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    error::DispatchError,
    problem::{cents::Cents, driver::DriverIdx, ride::RideIdx},
};

use super::{assignment::Assignment, cost_model::sum_costs};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StrategyResult {
    strategy: String,
    assignments: Vec<Assignment>,
    unserved: Vec<RideIdx>,
    served: usize,
    objective: Cents,
    elapsed: SignedDuration,
}

impl StrategyResult {
    pub fn new(
        strategy: &str,
        assignments: Vec<Assignment>,
        unserved: Vec<RideIdx>,
        elapsed: SignedDuration,
    ) -> Result<Self, DispatchError> {
        let objective = sum_costs(assignments.iter().map(Assignment::total_cost))?;

        Ok(StrategyResult {
            strategy: strategy.to_owned(),
            served: assignments.len(),
            assignments,
            unserved,
            objective,
            elapsed,
        })
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn unserved(&self) -> &[RideIdx] {
        &self.unserved
    }

    pub fn served(&self) -> usize {
        self.served
    }

    /// Sum of every assignment's total cost.
    pub fn objective(&self) -> Cents {
        self.objective
    }

    pub fn elapsed(&self) -> SignedDuration {
        self.elapsed
    }

    pub fn assignments_for_driver(&self, driver: DriverIdx) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.driver() == driver)
    }
}

/// Orders results so that the better one compares as `Less`: more rides served,
/// then lower objective, then faster.
pub fn compare_results(a: &StrategyResult, b: &StrategyResult) -> Ordering {
    b.served
        .cmp(&a.served)
        .then_with(|| a.objective.cmp(&b.objective))
        .then_with(|| a.elapsed.cmp(&b.elapsed))
}

/// Keeps `a` unless `b` is strictly better.
pub fn better<'a>(a: &'a StrategyResult, b: &'a StrategyResult) -> &'a StrategyResult {
    if compare_results(b, a) == Ordering::Less {
        b
    } else {
        a
    }
}
