use fxhash::FxHashSet;

use crate::{
    error::DispatchError,
    problem::{
        driver::{Driver, DriverIdx},
        ride::{Ride, RideIdx},
    },
};

/// One batch: the drivers available and the rides to serve. Immutable once built.
#[derive(Debug, Clone)]
pub struct DispatchProblem {
    id: Option<String>,
    drivers: Vec<Driver>,
    rides: Vec<Ride>,
}

impl DispatchProblem {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn driver(&self, index: DriverIdx) -> &Driver {
        &self.drivers[index.get()]
    }

    pub fn ride(&self, index: RideIdx) -> &Ride {
        &self.rides[index.get()]
    }

    pub fn drivers_iter(&self) -> impl Iterator<Item = (DriverIdx, &Driver)> {
        DriverIdx::range(self.drivers.len()).zip(self.drivers.iter())
    }

    pub fn num_drivers(&self) -> usize {
        self.drivers.len()
    }

    pub fn num_rides(&self) -> usize {
        self.rides.len()
    }

    /// Ride indices by ascending start time, input order kept among equal starts.
    pub fn rides_by_start_time(&self) -> Vec<RideIdx> {
        let mut order = RideIdx::range(self.rides.len()).collect::<Vec<_>>();
        order.sort_by_key(|&index| self.ride(index).start());
        order
    }
}

#[derive(Default)]
pub struct DispatchProblemBuilder {
    id: Option<String>,
    drivers: Vec<Driver>,
    rides: Vec<Ride>,
}

impl DispatchProblemBuilder {
    pub fn set_id(&mut self, id: String) -> &mut DispatchProblemBuilder {
        self.id = Some(id);
        self
    }

    pub fn set_drivers(&mut self, drivers: Vec<Driver>) -> &mut DispatchProblemBuilder {
        self.drivers = drivers;
        self
    }

    pub fn add_driver(&mut self, driver: Driver) -> &mut DispatchProblemBuilder {
        self.drivers.push(driver);
        self
    }

    pub fn set_rides(&mut self, rides: Vec<Ride>) -> &mut DispatchProblemBuilder {
        self.rides = rides;
        self
    }

    pub fn add_ride(&mut self, ride: Ride) -> &mut DispatchProblemBuilder {
        self.rides.push(ride);
        self
    }

    pub fn build(self) -> Result<DispatchProblem, DispatchError> {
        ensure_unique_ids("driver", self.drivers.iter().map(Driver::external_id))?;
        ensure_unique_ids("ride", self.rides.iter().map(Ride::external_id))?;
        ensure_single_date(&self.rides)?;

        Ok(DispatchProblem {
            id: self.id,
            drivers: self.drivers,
            rides: self.rides,
        })
    }
}

fn ensure_unique_ids<'a>(
    entity: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DispatchError> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(DispatchError::invalid_argument(format!(
                "duplicate {entity} id '{id}'"
            )));
        }
    }

    Ok(())
}

/// Clock times are minutes of the day, so a batch only makes sense within one service date.
fn ensure_single_date(rides: &[Ride]) -> Result<(), DispatchError> {
    let Some(first) = rides.first() else {
        return Ok(());
    };

    match rides.iter().find(|ride| ride.date() != first.date()) {
        Some(other) => Err(DispatchError::invalid_argument(format!(
            "ride '{}' is on {} but ride '{}' is on {}, a batch must cover a single date",
            other.external_id(),
            other.date(),
            first.external_id(),
            first.date()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::test_utils::{self, RideSpec};

    use super::*;

    #[test]
    fn test_rides_by_start_time_is_stable() {
        let mut builder = DispatchProblemBuilder::default();
        builder
            .add_ride(test_utils::ride("late", "10:00", "11:00"))
            .add_ride(test_utils::ride("first_early", "08:00", "09:00"))
            .add_ride(test_utils::ride("second_early", "08:00", "08:30"));
        let problem = builder.build().unwrap();

        let order = problem
            .rides_by_start_time()
            .into_iter()
            .map(|index| problem.ride(index).external_id().to_owned())
            .collect::<Vec<_>>();

        assert_eq!(order, vec!["first_early", "second_early", "late"]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut builder = DispatchProblemBuilder::default();
        builder
            .add_driver(test_utils::driver("d1"))
            .add_driver(test_utils::driver("d1"));

        assert!(matches!(
            builder.build(),
            Err(DispatchError::InvalidArgument(message)) if message.contains("d1")
        ));
    }

    #[test]
    fn test_rejects_rides_on_different_dates() {
        let mut builder = DispatchProblemBuilder::default();
        builder
            .add_ride(test_utils::ride("sunday", "08:00", "09:00"))
            .add_ride(test_utils::ride_from(RideSpec {
                date: date(2025, 12, 1),
                ..RideSpec::new("monday", "07:00", "07:30")
            }));

        assert!(matches!(
            builder.build(),
            Err(DispatchError::InvalidArgument(message)) if message.contains("monday")
        ));
    }
}
