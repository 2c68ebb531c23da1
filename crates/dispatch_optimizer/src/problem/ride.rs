use dispatch_geo::coordinates::GeoPoint;
use jiff::civil::Date;
use serde::Serialize;

use crate::{
    define_index_newtype,
    error::DispatchError,
    problem::{Minutes, shift_window::MINUTES_PER_DAY},
};

define_index_newtype!(RideIdx);

#[derive(Serialize, Debug, Clone)]
pub struct Ride {
    external_id: String,
    date: Date,
    start: Minutes,
    end: Minutes,
    pickup: GeoPoint,
    dropoff: GeoPoint,
    passengers: u32,
}

impl Ride {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn date(&self) -> Date {
        self.date
    }

    /// Minutes since midnight
    pub fn start(&self) -> Minutes {
        self.start
    }

    /// Minutes since midnight
    pub fn end(&self) -> Minutes {
        self.end
    }

    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }

    pub fn pickup(&self) -> &GeoPoint {
        &self.pickup
    }

    pub fn dropoff(&self) -> &GeoPoint {
        &self.dropoff
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }
}

#[derive(Default)]
pub struct RideBuilder {
    external_id: Option<String>,
    date: Option<Date>,
    start: Option<Minutes>,
    end: Option<Minutes>,
    pickup: Option<GeoPoint>,
    dropoff: Option<GeoPoint>,
    passengers: Option<u32>,
}

impl RideBuilder {
    pub fn set_ride_id(&mut self, external_id: String) -> &mut RideBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_date(&mut self, date: Date) -> &mut RideBuilder {
        self.date = Some(date);
        self
    }

    pub fn set_start(&mut self, start: Minutes) -> &mut RideBuilder {
        self.start = Some(start);
        self
    }

    pub fn set_end(&mut self, end: Minutes) -> &mut RideBuilder {
        self.end = Some(end);
        self
    }

    pub fn set_pickup(&mut self, pickup: GeoPoint) -> &mut RideBuilder {
        self.pickup = Some(pickup);
        self
    }

    pub fn set_dropoff(&mut self, dropoff: GeoPoint) -> &mut RideBuilder {
        self.dropoff = Some(dropoff);
        self
    }

    pub fn set_passengers(&mut self, passengers: u32) -> &mut RideBuilder {
        self.passengers = Some(passengers);
        self
    }

    pub fn build(self) -> Result<Ride, DispatchError> {
        let external_id = self
            .external_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| DispatchError::invalid_argument("ride id is required"))?;

        let invalid = |message: &str| {
            DispatchError::invalid_argument(format!("ride {external_id}: {message}"))
        };

        let date = self.date.ok_or_else(|| invalid("date is required"))?;
        let start = self.start.ok_or_else(|| invalid("start time is required"))?;
        let end = self.end.ok_or_else(|| invalid("end time is required"))?;

        if !(0..=MINUTES_PER_DAY).contains(&start) || !(0..=MINUTES_PER_DAY).contains(&end) {
            return Err(invalid("times must fall within the day"));
        }

        if end <= start {
            return Err(invalid("end time must be after start time"));
        }

        let pickup = self
            .pickup
            .filter(GeoPoint::is_valid)
            .ok_or_else(|| invalid("a valid pickup location is required"))?;
        let dropoff = self
            .dropoff
            .filter(GeoPoint::is_valid)
            .ok_or_else(|| invalid("a valid dropoff location is required"))?;

        let passengers = self
            .passengers
            .filter(|passengers| *passengers > 0)
            .ok_or_else(|| invalid("passengers must be a positive number"))?;

        Ok(Ride {
            external_id,
            date,
            start,
            end,
            pickup,
            dropoff,
            passengers,
        })
    }
}
