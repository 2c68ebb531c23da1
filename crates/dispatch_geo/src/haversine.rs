use geo::{Distance, Haversine};

use crate::{
    coordinates::GeoPoint,
    geo_estimator::{DEFAULT_SPEED_KMH, GeoEstimator},
    travel_estimate::{Minutes, TravelEstimate},
};

pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let haversine = Haversine;
    haversine.distance(geo::Point::from(from), geo::Point::from(to)) / 1000.0
}

pub fn haversine_estimate(from: &GeoPoint, to: &GeoPoint, speed_kmh: f64) -> TravelEstimate {
    let km = haversine_km(from, to);
    let minutes = if km > 0.0 {
        (km / speed_kmh * 60.0).round() as Minutes
    } else {
        0
    };

    TravelEstimate { km, minutes }
}

/// Great-circle distance at a constant average speed.
#[derive(Debug, Clone, Copy)]
pub struct AsTheCrowFliesEstimator {
    speed_kmh: f64,
}

impl AsTheCrowFliesEstimator {
    pub fn new(speed_kmh: f64) -> Self {
        AsTheCrowFliesEstimator { speed_kmh }
    }
}

impl Default for AsTheCrowFliesEstimator {
    fn default() -> Self {
        AsTheCrowFliesEstimator::new(DEFAULT_SPEED_KMH)
    }
}

impl GeoEstimator for AsTheCrowFliesEstimator {
    fn estimate(&self, from: &GeoPoint, to: &GeoPoint) -> TravelEstimate {
        haversine_estimate(from, to, self.speed_kmh)
    }

    fn estimator_name(&self) -> &'static str {
        "as_the_crow_flies"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let point = GeoPoint::new(48.8566, 2.3522);
        let estimate = AsTheCrowFliesEstimator::default().estimate(&point, &point);
        assert_eq!(estimate, TravelEstimate::ZERO);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let from = GeoPoint::new(0.0, 0.0);
        let to = GeoPoint::new(1.0, 0.0);

        let km = haversine_km(&from, &to);
        assert!((km - 111.19).abs() < 0.1, "got {km}");

        // 111.19 km at 40 km/h = 166.8 minutes
        let estimate = haversine_estimate(&from, &to, 40.0);
        assert_eq!(estimate.minutes, 167);
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(48.8566, 2.3522);
        let b = GeoPoint::new(48.8738, 2.2950);
        let estimator = AsTheCrowFliesEstimator::new(30.0);

        assert_eq!(estimator.estimate(&a, &b), estimator.estimate(&b, &a));
    }
}
