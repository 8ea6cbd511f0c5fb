pub mod auth;
pub mod breakdown;
pub mod gateway;
pub mod i18n;
pub mod models;
pub mod options;
pub mod quiz;
pub mod router;
pub mod wizard;

pub use gateway::{CarbonGateway, GatewayError};
pub use models::*;
