pub mod factory;
pub mod remote;

pub use factory::{GatewayConfig, GatewayFactory, GatewayRegistry};
pub use remote::{CarbonGateway, GENERIC_FAILURE, GatewayError, Registration};

#[cfg(any(test, feature = "test-util"))]
pub mod fixture;
