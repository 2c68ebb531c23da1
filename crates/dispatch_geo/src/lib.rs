pub mod cache;
pub mod coordinates;
pub mod geo_estimator;
pub mod haversine;
pub mod osrm;
pub mod routed_estimator;
pub mod travel_estimate;
