use std::sync::Arc;

use dispatch_geo::geo_estimator::GeoEstimator;
use futures::future::join_all;
use jiff::SignedDuration;
use tracing::{info, instrument, warn};

use crate::{error::DispatchError, problem::dispatch_problem::DispatchProblem};

use super::{
    dispatch_options::DispatchOptions,
    selector_params::SelectorParams,
    strategy::Strategy,
    strategy_result::{StrategyResult, better},
};

/// What came out of one candidate run.
#[derive(Debug)]
pub enum CandidateOutcome {
    Completed(StrategyResult),
    Errored(DispatchError),
    TimedOut(SignedDuration),
    Panicked,
}

#[derive(Debug)]
pub struct CandidateRun {
    pub strategy: &'static str,
    pub outcome: CandidateOutcome,
}

/// Races every candidate strategy on its own blocking thread, each under its own
/// budget, and keeps the best completed result.
///
/// A candidate that exceeds its budget is given up on rather than interrupted:
/// its thread runs to completion in the background and the result is dropped.
pub struct AutoSelector {
    strategies: Vec<Arc<dyn Strategy>>,
    candidate_budget: SignedDuration,
}

impl AutoSelector {
    pub fn new(params: &SelectorParams) -> Self {
        AutoSelector::with_strategies(
            params.candidates.iter().map(|kind| kind.build()).collect(),
            params.candidate_budget,
        )
    }

    pub fn with_strategies(
        strategies: Vec<Arc<dyn Strategy>>,
        candidate_budget: SignedDuration,
    ) -> Self {
        AutoSelector {
            strategies,
            candidate_budget,
        }
    }

    #[instrument(skip_all, level = "debug")]
    pub async fn select(
        &self,
        problem: Arc<DispatchProblem>,
        options: Arc<DispatchOptions>,
        estimator: Arc<dyn GeoEstimator>,
    ) -> Result<StrategyResult, DispatchError> {
        options.validate()?;

        let runs = join_all(self.strategies.iter().map(|strategy| {
            self.run_candidate(
                Arc::clone(strategy),
                Arc::clone(&problem),
                Arc::clone(&options),
                Arc::clone(&estimator),
            )
        }))
        .await;

        let best = select_best(runs)?;

        info!(
            served = best.served(),
            objective = %best.objective(),
            elapsed_ms = best.elapsed().as_millis(),
            "Selector: picked {}",
            best.strategy()
        );

        Ok(best)
    }

    async fn run_candidate(
        &self,
        strategy: Arc<dyn Strategy>,
        problem: Arc<DispatchProblem>,
        options: Arc<DispatchOptions>,
        estimator: Arc<dyn GeoEstimator>,
    ) -> CandidateRun {
        let name = strategy.strategy_name();
        let handle = tokio::task::spawn_blocking(move || {
            strategy.run(&problem, &options, estimator.as_ref())
        });

        let outcome =
            match tokio::time::timeout(self.candidate_budget.unsigned_abs(), handle).await {
                Ok(Ok(Ok(result))) => CandidateOutcome::Completed(result),
                Ok(Ok(Err(error))) => CandidateOutcome::Errored(error),
                Ok(Err(join_error)) => {
                    warn!(%join_error, "Selector: candidate {name} did not finish");
                    CandidateOutcome::Panicked
                }
                Err(_) => {
                    warn!(
                        "Selector: candidate {name} exceeded its budget of {}ms",
                        self.candidate_budget.as_millis()
                    );
                    CandidateOutcome::TimedOut(self.candidate_budget)
                }
            };

        CandidateRun {
            strategy: name,
            outcome,
        }
    }
}

/// Folds completed runs with [`better`] in candidate order.
///
/// An input error reported by any candidate aborts the selection. Timed out or
/// panicked candidates are skipped, and if nothing completed the selection fails.
pub fn select_best(runs: Vec<CandidateRun>) -> Result<StrategyResult, DispatchError> {
    let mut completed: Vec<StrategyResult> = Vec::with_capacity(runs.len());
    let mut failures = vec![];

    for run in runs {
        match run.outcome {
            CandidateOutcome::Completed(result) => completed.push(result),
            CandidateOutcome::Errored(error) => return Err(error),
            CandidateOutcome::TimedOut(budget) => failures.push(format!(
                "{} timed out after {}ms",
                run.strategy,
                budget.as_millis()
            )),
            CandidateOutcome::Panicked => failures.push(format!("{} panicked", run.strategy)),
        }
    }

    completed
        .iter()
        .reduce(better)
        .cloned()
        .ok_or(DispatchError::NoViableStrategy { failures })
}
