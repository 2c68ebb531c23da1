use dispatch_geo::travel_estimate::TravelEstimate;
use serde::Serialize;

use crate::{
    error::DispatchError,
    problem::{
        Minutes,
        cents::Cents,
        driver::{Driver, DriverIdx},
        ride::{Ride, RideIdx},
    },
};

use super::{
    cost_model::{CostModel, sum_costs},
    dispatch_options::DispatchOptions,
};

/// Time and distance of one driven leg together with what it adds to the total.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TravelLeg {
    pub minutes: Minutes,
    pub km: f64,
    pub time_cost: Cents,
    pub fuel_cost: Cents,
}

impl TravelLeg {
    pub fn cost(&self) -> Result<Cents, DispatchError> {
        sum_costs([self.time_cost, self.fuel_cost])
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Assignment {
    ride: RideIdx,
    driver: DriverIdx,
    total_cost: Cents,
    loaded: TravelLeg,
    deadhead: Option<TravelLeg>,
}

impl Assignment {
    /// Prices `ride` for `driver`.
    ///
    /// The loaded leg always counts its time and fuel. The deadhead leg is kept
    /// whenever either deadhead option is set, but only the enabled parts are billed.
    #[allow(clippy::too_many_arguments)]
    pub fn price(
        ride_idx: RideIdx,
        ride: &Ride,
        driver_idx: DriverIdx,
        driver: &Driver,
        loaded_km: f64,
        deadhead: TravelEstimate,
        options: &DispatchOptions,
        cost_model: &CostModel,
    ) -> Result<Assignment, DispatchError> {
        let loaded = TravelLeg {
            minutes: ride.duration(),
            km: loaded_km,
            time_cost: cost_model.time_cost_minutes(ride.duration())?,
            fuel_cost: cost_model.fuel_cost(driver, loaded_km)?,
        };

        let deadhead = if options.includes_deadhead() {
            Some(TravelLeg {
                minutes: deadhead.minutes,
                km: deadhead.km,
                time_cost: if options.include_deadhead_time {
                    cost_model.time_cost_minutes(deadhead.minutes)?
                } else {
                    Cents::ZERO
                },
                fuel_cost: if options.include_deadhead_fuel {
                    cost_model.fuel_cost(driver, deadhead.km)?
                } else {
                    Cents::ZERO
                },
            })
        } else {
            None
        };

        let deadhead_cost = match &deadhead {
            Some(leg) => leg.cost()?,
            None => Cents::ZERO,
        };
        let total_cost = sum_costs([loaded.cost()?, deadhead_cost])?;

        Ok(Assignment {
            ride: ride_idx,
            driver: driver_idx,
            total_cost,
            loaded,
            deadhead,
        })
    }

    pub fn ride(&self) -> RideIdx {
        self.ride
    }

    pub fn driver(&self) -> DriverIdx {
        self.driver
    }

    pub fn total_cost(&self) -> Cents {
        self.total_cost
    }

    pub fn loaded(&self) -> &TravelLeg {
        &self.loaded
    }

    pub fn deadhead(&self) -> Option<&TravelLeg> {
        self.deadhead.as_ref()
    }
}
