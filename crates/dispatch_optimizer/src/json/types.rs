use dispatch_geo::coordinates::GeoPoint;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::DispatchError,
    parsers::clock::parse_clock_minutes,
    problem::{
        dispatch_problem::{DispatchProblem, DispatchProblemBuilder},
        driver::{Driver, DriverBuilder},
        license_class::LicenseClass,
        ride::{Ride, RideBuilder},
        shift_window::ShiftWindow,
    },
    solver::dispatch_options::DispatchOptions,
};

#[derive(Deserialize, JsonSchema)]
#[serde(rename = "DispatchProblem")]
pub struct JsonDispatchProblem {
    pub id: Option<String>,
    pub drivers: Vec<JsonDriver>,
    pub rides: Vec<JsonRide>,
    pub options: Option<DispatchOptions>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Driver")]
pub struct JsonDriver {
    pub id: String,
    pub name: Option<String>,
    /// One of `B`, `D1` or `D`
    pub license: String,
    pub seats: u32,
    /// Currency units per km, defaults to 0
    pub fuel_cost_per_km: Option<f64>,
    pub location: GeoPoint,
    pub shifts: Option<Vec<JsonShift>>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Shift")]
pub struct JsonShift {
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Ride")]
pub struct JsonRide {
    pub id: String,
    pub date: Date,
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub passengers: u32,
}

impl JsonDriver {
    fn build(self) -> Result<Driver, DispatchError> {
        let license_class = self.license.parse::<LicenseClass>().map_err(|_| {
            DispatchError::invalid_argument(format!(
                "driver {}: unknown license class '{}'",
                self.id, self.license
            ))
        })?;

        let mut builder = DriverBuilder::default();
        builder
            .set_license_class(license_class)
            .set_seats(self.seats)
            .set_location(self.location);

        if let Some(name) = self.name {
            builder.set_name(name);
        }

        if let Some(fuel_cost_per_km) = self.fuel_cost_per_km {
            builder.set_fuel_cost_per_km(fuel_cost_per_km);
        }

        let shift_windows = self
            .shifts
            .unwrap_or_default()
            .iter()
            .map(|shift| {
                ShiftWindow::new(
                    parse_clock_minutes(&shift.start)?,
                    parse_clock_minutes(&shift.end)?,
                )
                .map_err(|error| {
                    DispatchError::invalid_argument(format!("driver {}: {error}", self.id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        builder.set_shift_windows(shift_windows);

        builder.set_driver_id(self.id);
        builder.build()
    }
}

impl JsonRide {
    fn build(self) -> Result<Ride, DispatchError> {
        let mut builder = RideBuilder::default();
        builder
            .set_date(self.date)
            .set_start(parse_clock_minutes(&self.start)?)
            .set_end(parse_clock_minutes(&self.end)?)
            .set_pickup(self.pickup)
            .set_dropoff(self.dropoff)
            .set_passengers(self.passengers)
            .set_ride_id(self.id);

        builder.build()
    }
}

impl JsonDispatchProblem {
    /// Validates every driver and ride. The first invalid entity aborts the build.
    #[instrument(skip_all, level = "debug")]
    pub fn build_problem(self) -> Result<DispatchProblem, DispatchError> {
        let mut builder = DispatchProblemBuilder::default();

        if let Some(id) = self.id {
            builder.set_id(id);
        }

        let drivers = self
            .drivers
            .into_iter()
            .map(JsonDriver::build)
            .collect::<Result<Vec<_>, _>>()?;
        let rides = self
            .rides
            .into_iter()
            .map(JsonRide::build)
            .collect::<Result<Vec<_>, _>>()?;

        builder.set_drivers(drivers).set_rides(rides);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use crate::problem::driver::DriverIdx;

    use super::*;

    const INPUT: &str = r#"{
        "id": "sunday",
        "drivers": [
            {
                "id": "d1",
                "name": "Alice",
                "license": "b",
                "seats": 8,
                "fuel_cost_per_km": 2.0,
                "location": { "lat": 48.8566, "lng": 2.3522 },
                "shifts": [
                    { "start": "12:00", "end": "18:00" },
                    { "start": "06:00", "end": "10:00" }
                ]
            },
            {
                "id": "d2",
                "license": "D1",
                "seats": 16,
                "location": { "lat": 48.8738, "lng": 2.2950 }
            }
        ],
        "rides": [
            {
                "id": "r1",
                "date": "2025-11-30",
                "start": "08:00",
                "end": "09:15",
                "pickup": { "lat": 48.8566, "lng": 2.3522 },
                "dropoff": { "lat": 48.8738, "lng": 2.2950 },
                "passengers": 4
            }
        ]
    }"#;

    fn parse(input: &str) -> Result<DispatchProblem, DispatchError> {
        serde_json::from_str::<JsonDispatchProblem>(input)
            .unwrap()
            .build_problem()
    }

    fn with_ride_field(field: &str, value: &str) -> String {
        let mut input = serde_json::from_str::<serde_json::Value>(INPUT).unwrap();
        input["rides"][0][field] = serde_json::from_str(value).unwrap();
        input.to_string()
    }

    fn with_driver_field(field: &str, value: &str) -> String {
        let mut input = serde_json::from_str::<serde_json::Value>(INPUT).unwrap();
        input["drivers"][0][field] = serde_json::from_str(value).unwrap();
        input.to_string()
    }

    #[test]
    fn test_build_problem() {
        let problem = parse(INPUT).unwrap();

        assert_eq!(problem.id(), Some("sunday"));
        assert_eq!(problem.num_drivers(), 2);

        let alice = problem.driver(DriverIdx::new(0));
        assert_eq!(alice.name(), "Alice");
        assert_eq!(alice.license_class(), LicenseClass::B);
        assert_eq!(alice.shift_windows().len(), 2);
        assert_eq!(alice.shift_windows()[0].start(), 720);

        let d2 = problem.driver(DriverIdx::new(1));
        assert_eq!(d2.name(), "d2");
        assert_eq!(d2.fuel_cost_per_km(), 0.0);

        let ride = &problem.rides()[0];
        assert_eq!(ride.start(), 480);
        assert_eq!(ride.end(), 555);
        assert_eq!(ride.date(), jiff::civil::date(2025, 11, 30));
    }

    #[test]
    fn test_invalid_rides() {
        for (field, value) in [
            ("start", r#""8h00""#),
            ("end", r#""24:30""#),
            ("end", r#""07:59""#),
            ("end", r#""08:00""#),
            ("passengers", "0"),
            ("pickup", r#"{ "lat": 91.0, "lng": 2.0 }"#),
        ] {
            let input = with_ride_field(field, value);
            assert!(
                matches!(parse(&input), Err(DispatchError::InvalidArgument(_))),
                "{field} = {value} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_drivers() {
        for (field, value) in [
            ("license", r#""C""#),
            ("seats", "0"),
            ("fuel_cost_per_km", "-1.0"),
            ("location", r#"{ "lat": 48.0, "lng": 181.0 }"#),
            ("shifts", r#"[{ "start": "10:00", "end": "10:00" }]"#),
            ("shifts", r#"[{ "start": "10:00", "end": "9:61" }]"#),
        ] {
            let input = with_driver_field(field, value);
            assert!(
                matches!(parse(&input), Err(DispatchError::InvalidArgument(_))),
                "{field} = {value} should be rejected"
            );
        }
    }

    #[test]
    fn test_duplicate_driver_ids() {
        let input = with_driver_field("id", r#""d2""#);
        assert!(matches!(
            parse(&input),
            Err(DispatchError::InvalidArgument(message)) if message.contains("d2")
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let input = with_ride_field("price", "12");
        assert!(serde_json::from_str::<JsonDispatchProblem>(&input).is_err());
    }

    #[test]
    fn test_options_in_file() {
        let mut input = serde_json::from_str::<serde_json::Value>(INPUT).unwrap();
        input["options"] = serde_json::json!({ "include_deadhead_fuel": true });

        let problem = serde_json::from_value::<JsonDispatchProblem>(input).unwrap();

        assert!(problem.options.unwrap().include_deadhead_fuel);
    }
}
