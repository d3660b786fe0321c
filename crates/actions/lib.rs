pub mod client;
pub mod config;
pub mod errors;
pub mod events;
pub mod params;
pub mod simulate;
pub mod validators;

pub use client::{ClientError, TevmClient};
pub use config::{ConfigError, SimulateConfig};
pub use errors::{ErrorMetadata, SimulateError, TevmSimulateError, ValidationError};
pub use events::CallEvents;
pub use params::ActionParams;
pub use simulate::{SimulateHandler, SimulateResult};
