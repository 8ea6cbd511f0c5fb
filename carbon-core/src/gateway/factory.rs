use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::remote::{CarbonGateway, GatewayError};

pub const DEFAULT_BACKEND: &str = "http";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Backend-agnostic gateway configuration.
///
/// `backend` must match the [`GatewayFactory::backend_name`] of a registered
/// factory. `base_url` and `timeout_ms` are forwarded to that factory.
///
/// | backend | base_url examples                              |
/// |---------|------------------------------------------------|
/// | `http`  | `http://127.0.0.1:5000`, `https://carbon.tw`  |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    /// Origin the `/api/...` paths are appended to.
    pub base_url: String,
    /// Per-request timeout. No request outlives it.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// One implementation per transport. Each gateway crate exports a unit
/// struct that implements this trait and is registered with a
/// [`GatewayRegistry`] at startup.
#[async_trait]
pub trait GatewayFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use gateway with a fresh (anonymous) session.
    async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn CarbonGateway>, GatewayError>;
}

/// Registry of [`GatewayFactory`] instances, keyed by backend name.
pub struct GatewayRegistry {
    factories: HashMap<&'static str, Box<dyn GatewayFactory>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn GatewayFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`GatewayError::Configuration`] when no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn CarbonGateway>, GatewayError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                GatewayError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::{CarbonGateway, GatewayConfig, GatewayError, GatewayFactory, GatewayRegistry};
    use crate::gateway::fixture::FixtureGateway;
    use crate::models::{SessionStatus, User};

    /// Builds fixture gateways whose session names the backend that made
    /// them, so a test can tell which factory the registry picked.
    struct NamedFactory(&'static str);

    #[async_trait]
    impl GatewayFactory for NamedFactory {
        fn backend_name(&self) -> &'static str {
            self.0
        }

        async fn create(
            &self,
            config: &GatewayConfig,
        ) -> Result<Box<dyn CarbonGateway>, GatewayError> {
            if config.base_url.is_empty() {
                return Err(GatewayError::Configuration("base_url is empty".to_string()));
            }
            let gateway = FixtureGateway::new();
            gateway.push_session(Ok(SessionStatus {
                is_logged_in: true,
                user: Some(User {
                    username: self.0.to_string(),
                    full_name: None,
                }),
            }));
            Ok(Box::new(gateway))
        }
    }

    fn registry(names: &[&'static str]) -> GatewayRegistry {
        let mut registry = GatewayRegistry::new();
        for name in names {
            registry.register(Box::new(NamedFactory(*name)));
        }
        registry
    }

    fn config_for(backend: &str) -> GatewayConfig {
        GatewayConfig {
            backend: backend.to_string(),
            ..GatewayConfig::default()
        }
    }

    async fn session_owner(gateway: &dyn CarbonGateway) -> Option<String> {
        let status = gateway.session().await.ok()?;
        status.into_user().map(|u| u.username)
    }

    #[test]
    fn default_config_targets_local_backend() {
        let config = GatewayConfig::default();

        assert_eq!(config.backend, "http");
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_keys() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{ "base_url": "https://carbon.tw" }"#).unwrap();

        assert_eq!(config.base_url, "https://carbon.tw");
        assert_eq!(config.backend, "http");
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn backends_are_listed_sorted_and_deduplicated() {
        let registry = registry(&["http", "fixture", "http"]);

        assert_eq!(registry.available_backends(), vec!["fixture", "http"]);
        assert!(GatewayRegistry::new().available_backends().is_empty());
    }

    #[tokio::test]
    async fn create_dispatches_on_backend_name() {
        let registry = registry(&["http", "fixture"]);

        let gateway = registry.create(&config_for("fixture")).await.unwrap();

        assert_eq!(session_owner(gateway.as_ref()).await.as_deref(), Some("fixture"));
    }

    #[tokio::test]
    async fn unknown_backend_names_the_choices() {
        let registry = registry(&["http"]);

        let err = registry.create(&config_for("grpc")).await.err();

        let Some(GatewayError::Configuration(message)) = &err else {
            panic!("expected a configuration error, got {err:?}");
        };
        assert!(message.contains("grpc"));
        assert!(message.contains("http"));
    }

    #[tokio::test]
    async fn factory_errors_are_passed_through() {
        let registry = registry(&["http"]);
        let config = GatewayConfig {
            base_url: String::new(),
            ..GatewayConfig::default()
        };

        let err = registry.create(&config).await.err();

        assert_eq!(
            err,
            Some(GatewayError::Configuration("base_url is empty".to_string()))
        );
    }
}
