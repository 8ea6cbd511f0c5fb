use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use carbon_core::gateway::{GatewayConfig, Registration};
use carbon_core::{
    AuthFields, CalculationResult, CarbonGateway, DetailedAnswers, GatewayError, HistoryEntry,
    QuickAnswers, RegionQuery, RegionalStats, SessionStatus, User,
};

/// Timeouts below this are raised to it.
const MIN_TIMEOUT_MS: u64 = 250;

pub const ME_PATH: &str = "/api/me";
pub const LOGIN_PATH: &str = "/api/login";
pub const REGISTER_PATH: &str = "/api/register";
pub const LOGOUT_PATH: &str = "/api/logout";
pub const QUICK_PATH: &str = "/api/calculate/quick";
pub const DETAILED_PATH: &str = "/api/calculate/detailed";
pub const HISTORY_PATH: &str = "/api/calculate/history";
pub const REGION_PATH: &str = "/api/stats/region";

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    user: User,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`CarbonGateway`] over the backend's JSON API.
///
/// The underlying client keeps a cookie store, so the session cookie set by a
/// successful login rides along on every later request.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_millis(config.timeout_ms.max(MIN_TIMEOUT_MS)))
            .build()
            .map_err(|e| GatewayError::Configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(
        &self,
        path: &str,
    ) -> String {
        let trimmed = path.trim();
        if trimmed.starts_with('/') {
            format!("{}{}", self.base_url, trimmed)
        } else {
            format!("{}/{}", self.base_url, trimmed)
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        debug!(path, "request");
        request.send().await.map_err(|e| {
            warn!(path, error = %e, "request failed");
            GatewayError::Transport(e.to_string())
        })
    }

    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let request = self.http.get(self.endpoint(path)).query(query);
        let response = self.send(request, path).await?;
        decode_json_response(response).await
    }

    async fn post_json<Req, Res>(
        &self,
        path: &str,
        payload: &Req,
    ) -> Result<Res, GatewayError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let request = self
            .http
            .request(Method::POST, self.endpoint(path))
            .json(payload);
        let response = self.send(request, path).await?;
        decode_json_response(response).await
    }
}

#[async_trait]
impl CarbonGateway for HttpGateway {
    async fn session(&self) -> Result<SessionStatus, GatewayError> {
        let response = self.send(self.http.get(self.endpoint(ME_PATH)), ME_PATH).await?;
        // Anonymous sessions answer 401 with `{ "is_logged_in": false }`.
        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("no active session");
            return Ok(SessionStatus::default());
        }
        decode_json_response(response).await
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, GatewayError> {
        let body: LoginResponse = self
            .post_json(LOGIN_PATH, &Credentials { username, password })
            .await?;
        Ok(body.user)
    }

    async fn register(
        &self,
        fields: &AuthFields,
    ) -> Result<Registration, GatewayError> {
        let body: MessageResponse = self.post_json(REGISTER_PATH, fields).await?;
        Ok(Registration {
            message: body.message.and_then(non_empty_string),
        })
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .post_json(LOGOUT_PATH, &serde_json::json!({}))
            .await?;
        Ok(())
    }

    async fn calculate_quick(
        &self,
        answers: &QuickAnswers,
    ) -> Result<CalculationResult, GatewayError> {
        self.post_json(QUICK_PATH, answers).await
    }

    async fn calculate_detailed(
        &self,
        answers: &DetailedAnswers,
    ) -> Result<CalculationResult, GatewayError> {
        self.post_json(DETAILED_PATH, answers).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        self.get_json(HISTORY_PATH, &[]).await
    }

    async fn regional_stats(
        &self,
        query: &RegionQuery,
    ) -> Result<RegionalStats, GatewayError> {
        self.get_json(REGION_PATH, &query.to_pairs()).await
    }
}

/// Maps an error status and body onto a [`GatewayError`]. The backend's
/// `{ "error": "..." }` message is kept verbatim; anything else is kept as
/// trimmed text.
pub fn format_http_error(
    status: StatusCode,
    body: &[u8],
) -> GatewayError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| non_empty_string(b.error))
        .or_else(|| non_empty_string(String::from_utf8_lossy(body).into_owned()))
        .unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED {
        GatewayError::Unauthorized(message)
    } else {
        GatewayError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

pub fn normalize_base_url(base_url: &str) -> Result<String, GatewayError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::Configuration(
            "base URL is missing".to_string(),
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

async fn decode_json_response<T>(response: reqwest::Response) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;

    if !status.is_success() {
        let error = format_http_error(status, &bytes);
        warn!(status = status.as_u16(), %error, "backend rejected request");
        return Err(error);
    }

    serde_json::from_slice::<T>(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
}

fn non_empty_string(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
