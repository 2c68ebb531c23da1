use std::cmp::Ordering;

use dispatch_geo::geo_estimator::GeoEstimator;
use jiff::Timestamp;
use tracing::{debug, instrument};

use crate::{error::DispatchError, problem::dispatch_problem::DispatchProblem};

use super::{
    assignment::Assignment, constraints::feasibility::ConstraintEvaluator, cost_model::CostModel,
    dispatch_options::DispatchOptions, schedule_state::ScheduleStates, strategy::Strategy,
    strategy_result::StrategyResult,
};

/// One pass over the rides by start time. Each ride goes to the cheapest feasible
/// driver and that driver continues from the dropoff, so a driver may chain rides.
/// Decisions are never revisited.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyChaining;

impl Strategy for GreedyChaining {
    fn strategy_name(&self) -> &'static str {
        "greedy"
    }

    fn run(
        &self,
        problem: &DispatchProblem,
        options: &DispatchOptions,
        estimator: &dyn GeoEstimator,
    ) -> Result<StrategyResult, DispatchError> {
        dispatch_in_start_order(self.strategy_name(), problem, options, estimator, None)
    }
}

/// Shared loop of the start-ordered strategies. `max_rides_per_driver` stops
/// considering a driver once they reached it.
#[instrument(skip_all, level = "debug", fields(strategy = strategy_name))]
pub(crate) fn dispatch_in_start_order(
    strategy_name: &'static str,
    problem: &DispatchProblem,
    options: &DispatchOptions,
    estimator: &dyn GeoEstimator,
    max_rides_per_driver: Option<usize>,
) -> Result<StrategyResult, DispatchError> {
    options.validate()?;

    let started_at = Timestamp::now();
    let cost_model = CostModel::from_options(options);
    let evaluator = ConstraintEvaluator::default();
    let mut states = ScheduleStates::new(problem);

    let mut assignments = Vec::with_capacity(problem.num_rides());
    let mut unserved = vec![];

    for ride_idx in problem.rides_by_start_time() {
        let ride = problem.ride(ride_idx);
        let mut loaded_km = None;
        let mut best: Option<Assignment> = None;

        for (driver_idx, driver) in problem.drivers_iter() {
            let state = states.get(driver_idx);
            if max_rides_per_driver.is_some_and(|max| state.rides_served() >= max) {
                continue;
            }

            let feasibility = evaluator.evaluate(ride, driver, state, estimator);
            if !feasibility.is_feasible() {
                continue;
            }

            let loaded_km = *loaded_km
                .get_or_insert_with(|| estimator.estimate(ride.pickup(), ride.dropoff()).km);

            let candidate = Assignment::price(
                ride_idx,
                ride,
                driver_idx,
                driver,
                loaded_km,
                feasibility.deadhead(),
                options,
                &cost_model,
            )?;

            if best
                .as_ref()
                .is_none_or(|current| compare_candidates(problem, &candidate, current).is_lt())
            {
                best = Some(candidate);
            }
        }

        match best {
            Some(assignment) => {
                states.advance(assignment.driver(), ride);
                assignments.push(assignment);
            }
            None => {
                debug!(
                    ride = ride.external_id(),
                    "Dispatch: no feasible driver, ride left unserved"
                );
                unserved.push(ride_idx);
            }
        }
    }

    let elapsed = Timestamp::now().duration_since(started_at);

    debug!(
        served = assignments.len(),
        unserved = unserved.len(),
        elapsed_ms = elapsed.as_millis(),
        "Dispatch: {strategy_name} done"
    );

    StrategyResult::new(strategy_name, assignments, unserved, elapsed)
}

/// Cheaper first, equal costs go to the smallest driver id.
fn compare_candidates(problem: &DispatchProblem, a: &Assignment, b: &Assignment) -> Ordering {
    a.total_cost().cmp(&b.total_cost()).then_with(|| {
        problem
            .driver(a.driver())
            .external_id()
            .cmp(problem.driver(b.driver()).external_id())
    })
}
