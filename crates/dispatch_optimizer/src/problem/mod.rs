pub mod cents;
pub mod dispatch_problem;
pub mod driver;
pub mod license_class;
pub mod ride;
pub mod shift_window;

pub use dispatch_geo::travel_estimate::Minutes;
