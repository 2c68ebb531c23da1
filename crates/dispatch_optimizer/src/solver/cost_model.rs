use crate::{
    error::DispatchError,
    problem::{Minutes, cents::Cents, driver::Driver},
    solver::dispatch_options::DispatchOptions,
};

/// Converts time and distance into integer cents. No fractional amount leaves this type.
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    time_cost_per_minute: Cents,
}

impl CostModel {
    pub fn new(time_cost_per_minute: Cents) -> Self {
        CostModel {
            time_cost_per_minute,
        }
    }

    pub fn from_options(options: &DispatchOptions) -> Self {
        CostModel::new(options.time_cost_per_minute)
    }

    pub fn time_cost_minutes(&self, minutes: Minutes) -> Result<Cents, DispatchError> {
        let minutes = u64::try_from(minutes).map_err(|_| {
            DispatchError::invalid_argument(format!("negative duration of {minutes} minutes"))
        })?;

        self.time_cost_per_minute
            .checked_mul(minutes)
            .ok_or_else(|| {
                DispatchError::invalid_argument(format!(
                    "time cost of {minutes} minutes at {} per minute overflows",
                    self.time_cost_per_minute
                ))
            })
    }

    pub fn fuel_cost(&self, driver: &Driver, km: f64) -> Result<Cents, DispatchError> {
        fuel_cost_at_rate(driver.fuel_cost_per_km(), km)
    }
}

/// `rate` is in currency units per km, the result is rounded to the nearest cent.
pub fn fuel_cost_at_rate(rate: f64, km: f64) -> Result<Cents, DispatchError> {
    if !km.is_finite() || km < 0.0 {
        return Err(DispatchError::invalid_argument(format!(
            "distance {km} km is not a non-negative number"
        )));
    }

    if !rate.is_finite() || rate < 0.0 {
        return Err(DispatchError::invalid_argument(format!(
            "fuel rate {rate} is not a non-negative number"
        )));
    }

    let cents = (rate * km * 100.0).round();
    if cents >= u64::MAX as f64 {
        return Err(DispatchError::invalid_argument(format!(
            "fuel cost of {km} km at {rate} per km overflows"
        )));
    }

    Ok(Cents::new(cents as u64))
}

pub fn sum_costs(amounts: impl IntoIterator<Item = Cents>) -> Result<Cents, DispatchError> {
    amounts.into_iter().try_fold(Cents::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(|| DispatchError::invalid_argument("total cost overflows"))
    })
}
