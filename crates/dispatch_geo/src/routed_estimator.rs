use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::warn;

use crate::{
    cache::{RouteCache, RouteKey},
    coordinates::GeoPoint,
    geo_estimator::GeoEstimator,
    haversine::AsTheCrowFliesEstimator,
    osrm::OsrmClient,
    travel_estimate::TravelEstimate,
};

/// Estimates travel through a routing service, memoized per rounded coordinate pair.
///
/// Any routing failure is replaced by the straight-line estimate, and that
/// replacement is cached too so a failing pair is not retried in the same batch.
///
/// `estimate` blocks on `handle`; it must be called from a blocking thread
/// (e.g. `spawn_blocking`) or from outside the runtime, never from async code.
pub struct RoutedEstimator {
    client: OsrmClient,
    handle: Handle,
    cache: Arc<RouteCache>,
    fallback: AsTheCrowFliesEstimator,
}

impl RoutedEstimator {
    pub fn new(
        client: OsrmClient,
        handle: Handle,
        cache: Arc<RouteCache>,
        fallback: AsTheCrowFliesEstimator,
    ) -> Self {
        Self {
            client,
            handle,
            cache,
            fallback,
        }
    }

    fn route_or_fallback(&self, from: &GeoPoint, to: &GeoPoint) -> TravelEstimate {
        match self.handle.block_on(self.client.fetch_route(from, to)) {
            Ok(estimate) => estimate,
            Err(error) => {
                warn!(
                    %error,
                    "RoutedEstimator: routing unavailable at {}, using {}",
                    self.client.osrm_url(),
                    self.fallback.estimator_name()
                );
                self.fallback.estimate(from, to)
            }
        }
    }
}

impl GeoEstimator for RoutedEstimator {
    fn estimate(&self, from: &GeoPoint, to: &GeoPoint) -> TravelEstimate {
        self.cache
            .get_or_compute(RouteKey::new(from, to), || self.route_or_fallback(from, to))
    }

    fn estimator_name(&self) -> &'static str {
        "osrm"
    }
}
