pub mod constraint;
pub mod feasibility;
pub mod legal_constraint;
pub mod reachability_constraint;
pub mod ride_constraint;
pub mod shift_constraint;
pub mod violation;
