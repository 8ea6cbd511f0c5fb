//! Scripted in-memory [`CarbonGateway`] for tests.
//!
//! Responses are queued per endpoint and consumed in order. An endpoint with
//! nothing queued answers with a transport error, except the session check,
//! which reports an anonymous session. Every call is recorded.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::remote::{CarbonGateway, GatewayError, Registration};
use crate::models::{
    AuthFields, CalculationResult, DetailedAnswers, HistoryEntry, QuickAnswers, RegionQuery,
    RegionalStats, SessionStatus, User,
};

/// A call observed by [`FixtureGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Session,
    Login { username: String },
    Register(Box<AuthFields>),
    Logout,
    Quick(QuickAnswers),
    Detailed(Box<DetailedAnswers>),
    History,
    Regional(RegionQuery),
}

type Queue<T> = VecDeque<Result<T, GatewayError>>;

#[derive(Default)]
struct Script {
    session: Queue<SessionStatus>,
    login: Queue<User>,
    register: Queue<Registration>,
    logout: Queue<()>,
    quick: Queue<CalculationResult>,
    detailed: Queue<CalculationResult>,
    history: Queue<Vec<HistoryEntry>>,
    regional: Queue<RegionalStats>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FixtureGateway {
    script: Mutex<Script>,
}

fn unscripted<T>(
    queue: &mut Queue<T>,
    endpoint: &str,
) -> Result<T, GatewayError> {
    queue.pop_front().unwrap_or_else(|| {
        Err(GatewayError::Transport(format!(
            "no fixture response queued for {endpoint}"
        )))
    })
}

impl FixtureGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_session(
        &self,
        response: Result<SessionStatus, GatewayError>,
    ) -> &Self {
        self.script().session.push_back(response);
        self
    }

    pub fn push_login(
        &self,
        response: Result<User, GatewayError>,
    ) -> &Self {
        self.script().login.push_back(response);
        self
    }

    pub fn push_register(
        &self,
        response: Result<Registration, GatewayError>,
    ) -> &Self {
        self.script().register.push_back(response);
        self
    }

    pub fn push_logout(
        &self,
        response: Result<(), GatewayError>,
    ) -> &Self {
        self.script().logout.push_back(response);
        self
    }

    pub fn push_quick(
        &self,
        response: Result<CalculationResult, GatewayError>,
    ) -> &Self {
        self.script().quick.push_back(response);
        self
    }

    pub fn push_detailed(
        &self,
        response: Result<CalculationResult, GatewayError>,
    ) -> &Self {
        self.script().detailed.push_back(response);
        self
    }

    pub fn push_history(
        &self,
        response: Result<Vec<HistoryEntry>, GatewayError>,
    ) -> &Self {
        self.script().history.push_back(response);
        self
    }

    pub fn push_regional(
        &self,
        response: Result<RegionalStats, GatewayError>,
    ) -> &Self {
        self.script().regional.push_back(response);
        self
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }
}

#[async_trait]
impl CarbonGateway for FixtureGateway {
    async fn session(&self) -> Result<SessionStatus, GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::Session);
        script
            .session
            .pop_front()
            .unwrap_or_else(|| Ok(SessionStatus::default()))
    }

    async fn login(
        &self,
        username: &str,
        _password: &str,
    ) -> Result<User, GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::Login {
            username: username.to_string(),
        });
        unscripted(&mut script.login, "login")
    }

    async fn register(
        &self,
        fields: &AuthFields,
    ) -> Result<Registration, GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::Register(Box::new(fields.clone())));
        unscripted(&mut script.register, "register")
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::Logout);
        script.logout.pop_front().unwrap_or(Ok(()))
    }

    async fn calculate_quick(
        &self,
        answers: &QuickAnswers,
    ) -> Result<CalculationResult, GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::Quick(*answers));
        unscripted(&mut script.quick, "calculate/quick")
    }

    async fn calculate_detailed(
        &self,
        answers: &DetailedAnswers,
    ) -> Result<CalculationResult, GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::Detailed(Box::new(answers.clone())));
        unscripted(&mut script.detailed, "calculate/detailed")
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::History);
        unscripted(&mut script.history, "calculate/history")
    }

    async fn regional_stats(
        &self,
        query: &RegionQuery,
    ) -> Result<RegionalStats, GatewayError> {
        let mut script = self.script();
        script.calls.push(Call::Regional(query.clone()));
        unscripted(&mut script.regional, "stats/region")
    }
}
