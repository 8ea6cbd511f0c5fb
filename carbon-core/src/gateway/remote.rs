use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AuthFields, CalculationResult, DetailedAnswers, HistoryEntry, QuickAnswers, RegionQuery,
    RegionalStats, SessionStatus, User,
};

/// Message shown when a failure carries nothing the user can act on.
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again later";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend refused the call because there is no session.
    #[error("Not logged in: {0}")]
    Unauthorized(String),

    /// The backend answered with an error status.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Text suitable for an inline error line: the server's own message when
    /// it sent one, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized(message) | Self::Rejected { message, .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Acknowledgment returned by the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    pub message: Option<String>,
}

/// Remote boundary to the carbon backend.
///
/// Implementations own session propagation (cookies) so that a successful
/// `login` authenticates every later call on the same gateway.
#[async_trait]
pub trait CarbonGateway: Send + Sync {
    // Session
    async fn session(&self) -> Result<SessionStatus, GatewayError>;
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, GatewayError>;
    async fn register(
        &self,
        fields: &AuthFields,
    ) -> Result<Registration, GatewayError>;
    async fn logout(&self) -> Result<(), GatewayError>;

    // Estimates
    async fn calculate_quick(
        &self,
        answers: &QuickAnswers,
    ) -> Result<CalculationResult, GatewayError>;
    async fn calculate_detailed(
        &self,
        answers: &DetailedAnswers,
    ) -> Result<CalculationResult, GatewayError>;
    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError>;

    // Statistics
    async fn regional_stats(
        &self,
        query: &RegionQuery,
    ) -> Result<RegionalStats, GatewayError>;
}
