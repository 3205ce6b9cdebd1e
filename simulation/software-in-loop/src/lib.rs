pub mod driver;
pub mod dynamics;
pub mod field;
pub mod logging;

type Scalar = f32;

pub use driver::DroneDriverSim;
pub use field::SimConfig;
pub use logging::{load_logs_from_file, FlightLog};
