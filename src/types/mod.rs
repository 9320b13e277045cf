pub mod plan;
pub mod trip;

pub use plan::{BlockSource, DayBlock, SchedulePlan};
pub use trip::{AgeGroup, FlightClass, TripParameters, MAX_RECOVERY_DAYS};
