use dispatch_geo::geo_estimator::{DEFAULT_OSRM_URL, DEFAULT_SPEED_KMH, GeoEstimatorKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::DispatchError, problem::cents::Cents};

pub const DEFAULT_TIME_COST_PER_MINUTE: Cents = Cents::new(30);

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DispatchOptions {
    /// Adds the time cost of driving to the pickup to each assignment
    pub include_deadhead_time: bool,
    /// Adds the fuel cost of driving to the pickup to each assignment
    pub include_deadhead_fuel: bool,
    /// Estimate travel with the routing service instead of great-circle distance
    pub use_external_routing: bool,
    pub time_cost_per_minute: Cents,
    pub average_speed_kmh: f64,
    pub osrm_url: String,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            include_deadhead_time: false,
            include_deadhead_fuel: false,
            use_external_routing: false,
            time_cost_per_minute: DEFAULT_TIME_COST_PER_MINUTE,
            average_speed_kmh: DEFAULT_SPEED_KMH,
            osrm_url: String::from(DEFAULT_OSRM_URL),
        }
    }
}

impl DispatchOptions {
    /// Rejects values that would make travel estimates meaningless.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(DispatchError::invalid_argument(format!(
                "average speed must be a positive number of km/h, got {}",
                self.average_speed_kmh
            )));
        }

        if self.use_external_routing && self.osrm_url.trim().is_empty() {
            return Err(DispatchError::invalid_argument(
                "routing service url is required when external routing is enabled",
            ));
        }

        Ok(())
    }

    pub fn includes_deadhead(&self) -> bool {
        self.include_deadhead_time || self.include_deadhead_fuel
    }

    pub fn estimator_kind(&self) -> GeoEstimatorKind {
        if self.use_external_routing {
            GeoEstimatorKind::Osrm {
                url: self.osrm_url.clone(),
                fallback_speed_kmh: self.average_speed_kmh,
            }
        } else {
            GeoEstimatorKind::AsTheCrowFlies {
                speed_kmh: self.average_speed_kmh,
            }
        }
    }
}
