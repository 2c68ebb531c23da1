use dispatch_geo::geo_estimator::GeoEstimator;

use crate::{error::DispatchError, problem::dispatch_problem::DispatchProblem};

use super::{
    dispatch_options::DispatchOptions, greedy_chaining::dispatch_in_start_order,
    strategy::Strategy, strategy_result::StrategyResult,
};

/// Same ordering, feasibility and tie-break as [`super::greedy_chaining::GreedyChaining`],
/// but a driver serves at most one ride.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unchained;

impl Strategy for Unchained {
    fn strategy_name(&self) -> &'static str {
        "unchained"
    }

    fn run(
        &self,
        problem: &DispatchProblem,
        options: &DispatchOptions,
        estimator: &dyn GeoEstimator,
    ) -> Result<StrategyResult, DispatchError> {
        dispatch_in_start_order(self.strategy_name(), problem, options, estimator, Some(1))
    }
}
