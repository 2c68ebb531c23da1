use super::{
    legal_constraint::LegalConstraint,
    reachability_constraint::ReachabilityConstraint,
    ride_constraint::{FeasibilityContext, RideConstraint},
    shift_constraint::ShiftConstraint,
    violation::Violation,
};

#[derive(Clone)]
pub enum Constraint {
    Legal(LegalConstraint),
    Reachability(ReachabilityConstraint),
    Shift(ShiftConstraint),
}

impl Constraint {
    /// Evaluation order used by the evaluator.
    pub fn all() -> Vec<Constraint> {
        vec![
            Constraint::Legal(LegalConstraint),
            Constraint::Reachability(ReachabilityConstraint),
            Constraint::Shift(ShiftConstraint),
        ]
    }

    pub fn check(&self, context: &FeasibilityContext, violations: &mut Vec<Violation>) {
        match self {
            Constraint::Legal(c) => c.check(context, violations),
            Constraint::Reachability(c) => c.check(context, violations),
            Constraint::Shift(c) => c.check(context, violations),
        }
    }

    pub fn constraint_name(&self) -> &'static str {
        match self {
            Constraint::Legal(_) => "legal",
            Constraint::Reachability(_) => "reachability",
            Constraint::Shift(_) => "shift",
        }
    }
}
