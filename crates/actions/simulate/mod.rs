mod handler;

pub use handler::{SimulateHandler, SimulateResult};
