//! Login / register modal state.
//!
//! One shared [`AuthFields`] record backs both modes so switching modes
//! keeps whatever the user already typed. Every failure is recoverable: the
//! modal stays open with an inline error until it is closed or submitted
//! again.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::{CarbonGateway, GatewayError, Registration};
use crate::models::{AuthField, AuthFields, User};
use crate::options;

/// Shown after a successful registration when the backend sent no message.
pub const REGISTERED_NOTICE: &str = "Registration successful, please log in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Fields the form shows in this mode, in display order.
    pub fn fields(self) -> Vec<AuthField> {
        match self {
            Self::Login => AuthField::CORE.to_vec(),
            Self::Register => AuthField::CORE
                .iter()
                .chain(AuthField::REGISTER_ONLY)
                .copied()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("the login form is not open")]
    Closed,

    #[error("a login or registration is already in flight")]
    AlreadySubmitting,

    #[error("no login or registration is in flight")]
    NoSubmissionInFlight,
}

/// The request the modal wants sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login { username: String, password: String },
    Register(Box<AuthFields>),
}

impl AuthRequest {
    pub async fn send(
        &self,
        gateway: &dyn CarbonGateway,
    ) -> Result<AuthResponse, GatewayError> {
        match self {
            Self::Login { username, password } => gateway
                .login(username, password)
                .await
                .map(AuthResponse::LoggedIn),
            Self::Register(fields) => gateway
                .register(fields)
                .await
                .map(AuthResponse::Registered),
        }
    }
}

/// Successful gateway answer for an [`AuthRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResponse {
    LoggedIn(User),
    Registered(Registration),
}

/// What the caller should do after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The modal closed; the caller now has a current user.
    LoggedIn(User),
    /// The modal switched to login mode and shows an acknowledgment.
    Registered,
    /// The modal stays open with an inline error.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct AuthView {
    open: bool,
    mode: AuthMode,
    fields: AuthFields,
    error: Option<String>,
    notice: Option<String>,
    submitting: bool,
}

impl AuthView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn fields(&self) -> &AuthFields {
        &self.fields
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Acknowledgment shown after a successful registration.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Shows the modal in its initial state, whatever happened in a previous
    /// session of it. Already open means nothing changes.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        *self = Self {
            open: true,
            ..Self::default()
        };
        debug!("auth modal opened");
    }

    /// Hides the modal. A request still in flight is abandoned and its
    /// response will be discarded.
    pub fn close(&mut self) {
        if self.submitting {
            debug!("abandoned in-flight submission");
        }
        self.open = false;
        self.submitting = false;
        debug!("auth modal closed");
    }

    /// Switches between login and register. Typed values survive the switch.
    /// Returns `false` (and does nothing) while a request is in flight.
    pub fn toggle_mode(&mut self) -> bool {
        if self.submitting {
            debug!("ignored mode toggle while submitting");
            return false;
        }
        self.mode = self.mode.toggled();
        self.error = None;
        debug!(mode = ?self.mode, "auth mode toggled");
        true
    }

    /// Merges one field. Picking a city also moves the district to that
    /// city's first district, or clears it for an unknown city. Input is
    /// frozen while a request is in flight.
    pub fn update_field(
        &mut self,
        field: AuthField,
        value: &str,
    ) -> bool {
        if self.submitting {
            debug!(?field, "ignored edit while submitting");
            return false;
        }
        if !self.fields.set(field, value) {
            return false;
        }
        if field == AuthField::City {
            self.fields.district = options::first_district(value)
                .unwrap_or_default()
                .to_string();
        }
        true
    }

    pub fn begin_submit(&mut self) -> Result<AuthRequest, AuthError> {
        if !self.open {
            return Err(AuthError::Closed);
        }
        if self.submitting {
            return Err(AuthError::AlreadySubmitting);
        }
        self.submitting = true;
        self.error = None;

        let request = match self.mode {
            AuthMode::Login => AuthRequest::Login {
                username: self.fields.username.clone(),
                password: self.fields.password.clone(),
            },
            AuthMode::Register => AuthRequest::Register(Box::new(self.fields.clone())),
        };
        Ok(request)
    }

    /// Applies the response to the request from
    /// [`begin_submit`](Self::begin_submit).
    ///
    /// # Errors
    /// [`AuthError::NoSubmissionInFlight`] when nothing is pending, which is
    /// also the case once the modal was closed after the request went out.
    /// The response is dropped and the modal left as it is.
    pub fn complete_submit(
        &mut self,
        outcome: Result<AuthResponse, GatewayError>,
    ) -> Result<AuthOutcome, AuthError> {
        if !self.submitting || !self.open {
            debug!("discarded response without a pending submission");
            return Err(AuthError::NoSubmissionInFlight);
        }
        self.submitting = false;

        match outcome {
            Ok(AuthResponse::LoggedIn(user)) => {
                info!(username = %user.username, "logged in");
                self.open = false;
                Ok(AuthOutcome::LoggedIn(user))
            }
            Ok(AuthResponse::Registered(registration)) => {
                info!(username = %self.fields.username, "registered");
                self.mode = AuthMode::Login;
                self.notice = Some(
                    registration
                        .message
                        .unwrap_or_else(|| REGISTERED_NOTICE.to_string()),
                );
                Ok(AuthOutcome::Registered)
            }
            Err(err) => {
                warn!(mode = ?self.mode, error = %err, "authentication failed");
                self.error = Some(err.user_message());
                Ok(AuthOutcome::Failed)
            }
        }
    }

    pub async fn submit(
        &mut self,
        gateway: &dyn CarbonGateway,
    ) -> Result<AuthOutcome, AuthError> {
        let request = self.begin_submit()?;
        let outcome = request.send(gateway).await;
        self.complete_submit(outcome)
    }
}
