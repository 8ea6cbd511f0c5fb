use async_trait::async_trait;
use tracing::debug;

use carbon_core::gateway::{GatewayConfig, GatewayFactory};
use carbon_core::{CarbonGateway, GatewayError};

use crate::client::HttpGateway;

/// [`GatewayFactory`] for the backend's JSON API.
///
/// Register this with a [`carbon_core::gateway::GatewayRegistry`] to make the
/// `"http"` backend available:
///
/// ```rust,no_run
/// use carbon_core::gateway::GatewayRegistry;
/// use carbon_http::HttpGatewayFactory;
///
/// let mut registry = GatewayRegistry::new();
/// registry.register(Box::new(HttpGatewayFactory));
/// ```
pub struct HttpGatewayFactory;

#[async_trait]
impl GatewayFactory for HttpGatewayFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Builds a client for `config.base_url`. No request is made here; an
    /// unreachable backend surfaces on the first call instead.
    async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn CarbonGateway>, GatewayError> {
        let gateway = HttpGateway::new(config)?;
        debug!(base_url = gateway.base_url(), "http gateway ready");
        Ok(Box::new(gateway))
    }
}
