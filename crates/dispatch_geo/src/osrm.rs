use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{coordinates::GeoPoint, travel_estimate::TravelEstimate};

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Routing service error: {code} - {message}")]
    Api { code: String, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("No route between {from:?} and {to:?}")]
    NoRoute { from: GeoPoint, to: GeoPoint },
}

pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/driving/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OsrmClientParams {
    pub osrm_url: String,
    pub timeout: Duration,
}

impl OsrmClientParams {
    pub fn new(osrm_url: impl Into<String>) -> Self {
        OsrmClientParams {
            osrm_url: osrm_url.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}

pub struct OsrmClient {
    params: OsrmClientParams,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(params: OsrmClientParams) -> Result<Self, RoutingError> {
        let client = reqwest::Client::builder()
            .connect_timeout(params.timeout)
            .timeout(params.timeout)
            .build()?;

        Ok(Self { params, client })
    }

    pub fn osrm_url(&self) -> &str {
        &self.params.osrm_url
    }

    pub fn route_url(&self, from: &GeoPoint, to: &GeoPoint) -> String {
        format!(
            "{}{}{},{};{},{}",
            self.params.osrm_url.trim_end_matches('/'),
            OSRM_ROUTE_API_PATH,
            from.lng(),
            from.lat(),
            to.lng(),
            to.lat(),
        )
    }

    pub async fn fetch_route(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
    ) -> Result<TravelEstimate, RoutingError> {
        let url = self.route_url(from, to);
        debug!("OsrmClient: requesting {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("overview", "false"), ("steps", "false")])
            .send()
            .await?;

        let body = response.text().await?;
        parse_route_response(&body, from, to)
    }
}

fn parse_route_response(
    body: &str,
    from: &GeoPoint,
    to: &GeoPoint,
) -> Result<TravelEstimate, RoutingError> {
    let response: OsrmRouteResponse = serde_json::from_str(body)?;

    if response.code != "Ok" {
        return Err(RoutingError::Api {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or(RoutingError::NoRoute {
            from: *from,
            to: *to,
        })?;

    Ok(TravelEstimate::from_meters_and_seconds(
        route.distance,
        route.duration,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> (GeoPoint, GeoPoint) {
        (GeoPoint::new(48.85, 2.35), GeoPoint::new(48.87, 2.29))
    }

    #[test]
    fn test_route_url_uses_lng_lat_order() {
        let client = OsrmClient::new(OsrmClientParams::new("http://osrm.local/")).unwrap();
        let (from, to) = points();

        assert_eq!(
            client.route_url(&from, &to),
            "http://osrm.local/route/v1/driving/2.35,48.85;2.29,48.87"
        );
    }

    #[test]
    fn test_parse_ok_response() {
        let (from, to) = points();
        let body = r#"{"code":"Ok","routes":[{"distance":12345.0,"duration":1530.0}]}"#;

        let estimate = parse_route_response(body, &from, &to).unwrap();
        assert_eq!(estimate.km, 12.345);
        assert_eq!(estimate.minutes, 26);
    }

    #[test]
    fn test_parse_error_code() {
        let (from, to) = points();
        let body = r#"{"code":"InvalidQuery","message":"Query string malformed"}"#;

        let error = parse_route_response(body, &from, &to).unwrap_err();
        assert!(matches!(error, RoutingError::Api { ref code, .. } if code == "InvalidQuery"));
    }

    #[test]
    fn test_parse_empty_routes() {
        let (from, to) = points();
        let body = r#"{"code":"Ok","routes":[]}"#;

        let error = parse_route_response(body, &from, &to).unwrap_err();
        assert!(matches!(error, RoutingError::NoRoute { .. }));
    }

    #[test]
    fn test_parse_garbage() {
        let (from, to) = points();
        let error = parse_route_response("<html>", &from, &to).unwrap_err();
        assert!(matches!(error, RoutingError::Deserialize(_)));
    }
}
