use dispatch_geo::{
    coordinates::GeoPoint, geo_estimator::GeoEstimator, travel_estimate::TravelEstimate,
};
use jiff::civil::{Date, date};

use crate::{
    parsers::clock::parse_clock_minutes,
    problem::{
        dispatch_problem::{DispatchProblem, DispatchProblemBuilder},
        driver::{Driver, DriverBuilder},
        license_class::LicenseClass,
        ride::{Ride, RideBuilder},
        shift_window::ShiftWindow,
    },
};

/// Paris, Hôtel de Ville
pub const P0: GeoPoint = GeoPoint::new(48.8566, 2.3522);
/// Paris, Étoile (about 4.5 km from P0)
pub const P1: GeoPoint = GeoPoint::new(48.8738, 2.2950);
/// Versailles (about 17 km from P0)
pub const P2: GeoPoint = GeoPoint::new(48.8049, 2.1204);

pub const RIDE_DATE: Date = date(2025, 11, 30);

pub struct DriverSpec<'a> {
    pub id: &'a str,
    pub license_class: LicenseClass,
    pub seats: u32,
    pub fuel_cost_per_km: f64,
    pub location: GeoPoint,
    pub shifts: Vec<(&'a str, &'a str)>,
}

impl<'a> DriverSpec<'a> {
    pub fn new(id: &'a str) -> Self {
        DriverSpec {
            id,
            license_class: LicenseClass::B,
            seats: 8,
            fuel_cost_per_km: 1.5,
            location: P0,
            shifts: vec![],
        }
    }
}

pub struct RideSpec<'a> {
    pub id: &'a str,
    pub date: Date,
    pub start: &'a str,
    pub end: &'a str,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub passengers: u32,
}

impl<'a> RideSpec<'a> {
    pub fn new(id: &'a str, start: &'a str, end: &'a str) -> Self {
        RideSpec {
            id,
            date: RIDE_DATE,
            start,
            end,
            pickup: P0,
            dropoff: P1,
            passengers: 2,
        }
    }
}

pub fn driver(id: &str) -> Driver {
    driver_from(DriverSpec::new(id))
}

pub fn driver_from(spec: DriverSpec) -> Driver {
    let mut builder = DriverBuilder::default();
    builder
        .set_driver_id(spec.id.to_owned())
        .set_license_class(spec.license_class)
        .set_seats(spec.seats)
        .set_fuel_cost_per_km(spec.fuel_cost_per_km)
        .set_location(spec.location);

    let shift_windows = spec
        .shifts
        .into_iter()
        .map(|(start, end)| {
            ShiftWindow::new(
                parse_clock_minutes(start).unwrap(),
                parse_clock_minutes(end).unwrap(),
            )
            .unwrap()
        })
        .collect();
    builder.set_shift_windows(shift_windows);

    builder.build().unwrap()
}

pub fn ride(id: &str, start: &str, end: &str) -> Ride {
    ride_from(RideSpec::new(id, start, end))
}

pub fn ride_between(
    id: &str,
    start: &str,
    end: &str,
    pickup: GeoPoint,
    dropoff: GeoPoint,
    passengers: u32,
) -> Ride {
    ride_from(RideSpec {
        pickup,
        dropoff,
        passengers,
        ..RideSpec::new(id, start, end)
    })
}

pub fn ride_from(spec: RideSpec) -> Ride {
    let mut builder = RideBuilder::default();
    builder
        .set_ride_id(spec.id.to_owned())
        .set_date(spec.date)
        .set_start(parse_clock_minutes(spec.start).unwrap())
        .set_end(parse_clock_minutes(spec.end).unwrap())
        .set_pickup(spec.pickup)
        .set_dropoff(spec.dropoff)
        .set_passengers(spec.passengers);

    builder.build().unwrap()
}

pub fn problem(drivers: Vec<Driver>, rides: Vec<Ride>) -> DispatchProblem {
    let mut builder = DispatchProblemBuilder::default();
    builder.set_drivers(drivers).set_rides(rides);
    builder.build().unwrap()
}

/// A deterministic day of rides spread over the Paris area, 06:00 to about 17:30.
pub fn busy_day_problem(num_drivers: usize, num_rides: usize) -> DispatchProblem {
    let point = |i: usize| {
        GeoPoint::new(
            48.80 + (i % 5) as f64 * 0.02,
            2.25 + (i % 7) as f64 * 0.02,
        )
    };

    let drivers = (0..num_drivers)
        .map(|i| {
            let mut builder = DriverBuilder::default();
            builder
                .set_driver_id(format!("d{i:02}"))
                .set_license_class(if i % 3 == 2 {
                    LicenseClass::D1
                } else {
                    LicenseClass::B
                })
                .set_seats(if i % 3 == 2 { 16 } else { 8 })
                .set_fuel_cost_per_km(1.5 + i as f64 * 0.1)
                .set_location(point(i * 3));
            if i % 2 == 0 {
                builder.add_shift_window(ShiftWindow::new(6 * 60, 14 * 60).unwrap());
            }
            builder.build().unwrap()
        })
        .collect();

    let rides = (0..num_rides)
        .map(|i| {
            let start = 6 * 60 + ((i * 17) % 600) as i64;
            let mut builder = RideBuilder::default();
            builder
                .set_ride_id(format!("r{i:03}"))
                .set_date(RIDE_DATE)
                .set_start(start)
                .set_end(start + 30 + ((i * 7) % 40) as i64)
                .set_pickup(point(i))
                .set_dropoff(point(i + 2))
                .set_passengers(1 + (i % 12) as u32);
            builder.build().unwrap()
        })
        .collect();

    problem(drivers, rides)
}

/// Returns the same estimate for any pair of points.
pub struct FixedEstimator(TravelEstimate);

impl FixedEstimator {
    pub fn new(km: f64, minutes: i64) -> Self {
        FixedEstimator(TravelEstimate::new(km, minutes))
    }
}

impl GeoEstimator for FixedEstimator {
    fn estimate(&self, _from: &GeoPoint, _to: &GeoPoint) -> TravelEstimate {
        self.0
    }

    fn estimator_name(&self) -> &'static str {
        "fixed"
    }
}
