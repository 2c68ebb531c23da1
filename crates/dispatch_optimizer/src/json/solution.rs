use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    parsers::clock::format_clock_minutes,
    problem::{Minutes, cents::Cents, dispatch_problem::DispatchProblem},
    solver::{assignment::Assignment, strategy_result::StrategyResult},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
#[serde(rename = "DispatchSolution")]
pub struct JsonDispatchSolution {
    pub strategy: String,
    pub elapsed_ms: i64,
    pub served: usize,
    pub total_cost: Cents,
    /// Every driver in input order with their rides in assignment order
    pub drivers: Vec<JsonDriverRides>,
    pub unserved: Vec<String>,
    pub assignments: Vec<JsonAssignment>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq)]
pub struct JsonDriverRides {
    pub driver_id: String,
    pub ride_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub struct JsonAssignment {
    pub ride_id: String,
    pub driver_id: String,
    pub start: String,
    pub end: String,
    pub total_cost: Cents,
    pub loaded_minutes: Minutes,
    pub loaded_km: f64,
    pub deadhead_minutes: Option<Minutes>,
    pub deadhead_km: Option<f64>,
}

impl JsonAssignment {
    fn from_assignment(assignment: &Assignment, problem: &DispatchProblem) -> Self {
        let ride = problem.ride(assignment.ride());

        JsonAssignment {
            ride_id: ride.external_id().to_owned(),
            driver_id: problem.driver(assignment.driver()).external_id().to_owned(),
            start: format_clock_minutes(ride.start()),
            end: format_clock_minutes(ride.end()),
            total_cost: assignment.total_cost(),
            loaded_minutes: assignment.loaded().minutes,
            loaded_km: assignment.loaded().km,
            deadhead_minutes: assignment.deadhead().map(|leg| leg.minutes),
            deadhead_km: assignment.deadhead().map(|leg| leg.km),
        }
    }
}

impl JsonDispatchSolution {
    pub fn from_result(result: &StrategyResult, problem: &DispatchProblem) -> Self {
        let drivers = problem
            .drivers_iter()
            .map(|(driver_idx, driver)| JsonDriverRides {
                driver_id: driver.external_id().to_owned(),
                ride_ids: result
                    .assignments_for_driver(driver_idx)
                    .map(|assignment| problem.ride(assignment.ride()).external_id().to_owned())
                    .collect(),
            })
            .collect();

        JsonDispatchSolution {
            strategy: result.strategy().to_owned(),
            elapsed_ms: i64::try_from(result.elapsed().as_millis()).unwrap_or(i64::MAX),
            served: result.served(),
            total_cost: result.objective(),
            drivers,
            unserved: result
                .unserved()
                .iter()
                .map(|&ride| problem.ride(ride).external_id().to_owned())
                .collect(),
            assignments: result
                .assignments()
                .iter()
                .map(|assignment| JsonAssignment::from_assignment(assignment, problem))
                .collect(),
        }
    }
}
