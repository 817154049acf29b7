pub mod energy;
pub mod probation;

pub use energy::energy_recovery_system;
pub use probation::{probation_day_system, CareerEvent, CareerEventLog};
