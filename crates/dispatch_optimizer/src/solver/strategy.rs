use std::{fmt::Display, str::FromStr, sync::Arc};

use dispatch_geo::geo_estimator::GeoEstimator;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::DispatchError, problem::dispatch_problem::DispatchProblem};

use super::{
    dispatch_options::DispatchOptions, greedy_chaining::GreedyChaining,
    strategy_result::StrategyResult, unchained::Unchained,
};

/// An assignment algorithm. Each run owns its schedule state, so runs are
/// independent and may execute concurrently.
pub trait Strategy: Send + Sync {
    fn strategy_name(&self) -> &'static str;

    fn run(
        &self,
        problem: &DispatchProblem,
        options: &DispatchOptions,
        estimator: &dyn GeoEstimator,
    ) -> Result<StrategyResult, DispatchError>;
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Greedy,
    Unchained,
}

impl StrategyKind {
    pub fn build(&self) -> Arc<dyn Strategy> {
        match self {
            StrategyKind::Greedy => Arc::new(GreedyChaining),
            StrategyKind::Unchained => Arc::new(Unchained),
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Greedy => write!(f, "greedy"),
            StrategyKind::Unchained => write!(f, "unchained"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(StrategyKind::Greedy),
            "unchained" => Ok(StrategyKind::Unchained),
            other => Err(DispatchError::invalid_argument(format!(
                "unknown strategy '{other}'"
            ))),
        }
    }
}
