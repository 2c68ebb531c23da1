use dispatch_geo::coordinates::GeoPoint;
use serde::Serialize;

use crate::{
    define_index_newtype,
    error::DispatchError,
    problem::{license_class::LicenseClass, shift_window::ShiftWindow},
};

define_index_newtype!(DriverIdx);

#[derive(Serialize, Debug, Clone)]
pub struct Driver {
    external_id: String,
    name: String,
    license_class: LicenseClass,
    seats: u32,
    /// Currency units per km
    fuel_cost_per_km: f64,
    location: GeoPoint,
    shift_windows: Vec<ShiftWindow>,
}

impl Driver {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license_class(&self) -> LicenseClass {
        self.license_class
    }

    pub fn seats(&self) -> u32 {
        self.seats
    }

    pub fn fuel_cost_per_km(&self) -> f64 {
        self.fuel_cost_per_km
    }

    pub fn location(&self) -> &GeoPoint {
        &self.location
    }

    pub fn shift_windows(&self) -> &[ShiftWindow] {
        &self.shift_windows
    }

    pub fn has_shifts(&self) -> bool {
        !self.shift_windows.is_empty()
    }
}

#[derive(Default)]
pub struct DriverBuilder {
    external_id: Option<String>,
    name: Option<String>,
    license_class: Option<LicenseClass>,
    seats: Option<u32>,
    fuel_cost_per_km: Option<f64>,
    location: Option<GeoPoint>,
    shift_windows: Option<Vec<ShiftWindow>>,
}

impl DriverBuilder {
    pub fn set_driver_id(&mut self, external_id: String) -> &mut DriverBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_name(&mut self, name: String) -> &mut DriverBuilder {
        self.name = Some(name);
        self
    }

    pub fn set_license_class(&mut self, license_class: LicenseClass) -> &mut DriverBuilder {
        self.license_class = Some(license_class);
        self
    }

    pub fn set_seats(&mut self, seats: u32) -> &mut DriverBuilder {
        self.seats = Some(seats);
        self
    }

    pub fn set_fuel_cost_per_km(&mut self, fuel_cost_per_km: f64) -> &mut DriverBuilder {
        self.fuel_cost_per_km = Some(fuel_cost_per_km);
        self
    }

    pub fn set_location(&mut self, location: GeoPoint) -> &mut DriverBuilder {
        self.location = Some(location);
        self
    }

    pub fn set_shift_windows(&mut self, shift_windows: Vec<ShiftWindow>) -> &mut DriverBuilder {
        self.shift_windows = Some(shift_windows);
        self
    }

    pub fn add_shift_window(&mut self, shift_window: ShiftWindow) -> &mut DriverBuilder {
        self.shift_windows
            .get_or_insert_with(Vec::new)
            .push(shift_window);
        self
    }

    pub fn build(self) -> Result<Driver, DispatchError> {
        let external_id = self
            .external_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| DispatchError::invalid_argument("driver id is required"))?;

        let license_class = self.license_class.ok_or_else(|| {
            DispatchError::invalid_argument(format!("driver {external_id}: license is required"))
        })?;

        let seats = self.seats.filter(|seats| *seats > 0).ok_or_else(|| {
            DispatchError::invalid_argument(format!(
                "driver {external_id}: seats must be a positive number"
            ))
        })?;

        let fuel_cost_per_km = self.fuel_cost_per_km.unwrap_or(0.0);
        if !fuel_cost_per_km.is_finite() || fuel_cost_per_km < 0.0 {
            return Err(DispatchError::invalid_argument(format!(
                "driver {external_id}: fuel cost {fuel_cost_per_km} is not a non-negative number"
            )));
        }

        let location = self
            .location
            .filter(GeoPoint::is_valid)
            .ok_or_else(|| {
                DispatchError::invalid_argument(format!(
                    "driver {external_id}: a valid location is required"
                ))
            })?;

        Ok(Driver {
            name: self.name.unwrap_or_else(|| external_id.clone()),
            external_id,
            license_class,
            seats,
            fuel_cost_per_km,
            location,
            shift_windows: self.shift_windows.unwrap_or_default(),
        })
    }
}
