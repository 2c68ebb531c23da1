use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

use crate::{
    cache::RouteCache,
    coordinates::GeoPoint,
    haversine::AsTheCrowFliesEstimator,
    osrm::{OsrmClient, OsrmClientParams, RoutingError},
    routed_estimator::RoutedEstimator,
    travel_estimate::TravelEstimate,
};

pub const DEFAULT_SPEED_KMH: f64 = 40.0;
pub const DEFAULT_OSRM_URL: &str = "http://localhost:5000";
pub const OSRM_URL_ENV_VAR: &str = "DISPATCH_OSRM_URL";

/// Capability mapping two coordinates to a distance and a travel time.
///
/// Implementations never fail: a backend that can be unavailable must recover
/// locally and still return an estimate.
pub trait GeoEstimator: Send + Sync {
    fn estimate(&self, from: &GeoPoint, to: &GeoPoint) -> TravelEstimate;

    fn estimator_name(&self) -> &'static str;
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum GeoEstimatorKind {
    AsTheCrowFlies { speed_kmh: f64 },
    Osrm { url: String, fallback_speed_kmh: f64 },
}

impl Default for GeoEstimatorKind {
    fn default() -> Self {
        GeoEstimatorKind::AsTheCrowFlies {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl Hash for GeoEstimatorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            GeoEstimatorKind::AsTheCrowFlies { speed_kmh } => {
                state.write_u8(0);
                state.write_u64(speed_kmh.to_bits());
            }
            GeoEstimatorKind::Osrm {
                url,
                fallback_speed_kmh,
            } => {
                state.write_u8(1);
                url.hash(state);
                state.write_u64(fallback_speed_kmh.to_bits());
            }
        }
    }
}

impl GeoEstimatorKind {
    /// `handle` drives routing requests for the `Osrm` kind; the straight-line kind ignores it.
    pub fn build(
        &self,
        handle: &Handle,
        cache: Arc<RouteCache>,
    ) -> Result<Arc<dyn GeoEstimator>, RoutingError> {
        match self {
            GeoEstimatorKind::AsTheCrowFlies { speed_kmh } => {
                Ok(Arc::new(AsTheCrowFliesEstimator::new(*speed_kmh)))
            }
            GeoEstimatorKind::Osrm {
                url,
                fallback_speed_kmh,
            } => {
                let client = OsrmClient::new(OsrmClientParams::new(url.clone()))?;
                Ok(Arc::new(RoutedEstimator::new(
                    client,
                    handle.clone(),
                    cache,
                    AsTheCrowFliesEstimator::new(*fallback_speed_kmh),
                )))
            }
        }
    }
}
