use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use super::strategy::StrategyKind;

pub const DEFAULT_CANDIDATE_BUDGET: SignedDuration = SignedDuration::from_secs(5);

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectorParams {
    /// Candidates in order. On a full tie the earlier one wins.
    pub candidates: Vec<StrategyKind>,

    /// Wall-clock budget of each candidate, not of the whole selection
    pub candidate_budget: SignedDuration,
}

impl Default for SelectorParams {
    fn default() -> Self {
        SelectorParams {
            candidates: vec![StrategyKind::Greedy, StrategyKind::Unchained],
            candidate_budget: DEFAULT_CANDIDATE_BUDGET,
        }
    }
}

impl SelectorParams {
    pub fn single(kind: StrategyKind, candidate_budget: SignedDuration) -> Self {
        SelectorParams {
            candidates: vec![kind],
            candidate_budget,
        }
    }
}
