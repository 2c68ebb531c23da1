pub mod assignment;
pub mod constraints;
pub mod cost_model;
pub mod dispatch_options;
pub mod greedy_chaining;
pub mod schedule_state;
pub mod selector;
pub mod selector_params;
pub mod strategy;
pub mod strategy_result;
pub mod unchained;
