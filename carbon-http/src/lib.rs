//! HTTP implementation of [`carbon_core::CarbonGateway`].

mod client;
mod factory;

pub use client::{
    DETAILED_PATH, HISTORY_PATH, HttpGateway, LOGIN_PATH, LOGOUT_PATH, ME_PATH, QUICK_PATH,
    REGION_PATH, REGISTER_PATH, format_http_error, normalize_base_url,
};
pub use factory::HttpGatewayFactory;
