use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use carbon_core::gateway::GatewayRegistry;
use carbon_core::i18n::Translator;
use carbon_core::router::{self, Route};
use carbon_core::{CarbonGateway, User};
use carbon_http::HttpGatewayFactory;

use crate::console::Console;
use crate::screens;

/// Every gateway backend this binary knows about.
pub fn build_registry() -> GatewayRegistry {
    let mut registry = GatewayRegistry::new();
    registry.register(Box::new(HttpGatewayFactory));
    registry
}

/// Where a screen wants to go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    To(Route),
    Quit,
}

/// Session-wide state shared by every screen.
///
/// The current user is passed around explicitly; screens read it from here
/// and the router guard decides what may be shown.
pub struct App<'g, C: Console> {
    pub(crate) gateway: &'g dyn CarbonGateway,
    pub(crate) console: C,
    pub(crate) t: Translator,
    pub(crate) user: Option<User>,
}

impl<'g, C: Console> App<'g, C> {
    pub fn new(
        gateway: &'g dyn CarbonGateway,
        console: C,
        t: Translator,
    ) -> Self {
        Self {
            gateway,
            console,
            t,
            user: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    // ── output helpers ───────────────────────────────────────────────────

    pub(crate) fn line(
        &mut self,
        text: &str,
    ) -> Result<()> {
        self.console.write_line(text).context("writing to console")
    }

    pub(crate) fn lines<I>(
        &mut self,
        lines: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        for line in lines {
            self.line(&line)?;
        }
        Ok(())
    }

    /// Prints the translation of `key`.
    pub(crate) fn say(
        &mut self,
        key: &str,
        params: &[(&str, &str)],
    ) -> Result<()> {
        let text = self.t.translate(key, params);
        self.line(&text)
    }

    pub(crate) fn heading(
        &mut self,
        key: &str,
    ) -> Result<()> {
        let title = self.t.t(key);
        self.line("")?;
        self.line(&format!("== {title} =="))
    }

    // ── input helpers ────────────────────────────────────────────────────

    /// Reads a line. `None` once input is exhausted.
    pub(crate) fn ask(
        &mut self,
        prompt: &str,
    ) -> Result<Option<String>> {
        self.console
            .read_line(prompt)
            .context("reading from console")
    }

    /// Prompts for a value showing `current`; a blank answer keeps it.
    pub(crate) fn ask_with_default(
        &mut self,
        label: &str,
        current: &str,
    ) -> Result<Option<String>> {
        let prompt = format!("{label} [{current}]: ");
        Ok(self.ask(&prompt)?.map(|answer| {
            let trimmed = answer.trim();
            if trimmed.is_empty() {
                current.to_string()
            } else {
                trimmed.to_string()
            }
        }))
    }

    /// Numbered menu; re-asks until a listed number is entered. Returns the
    /// zero-based index, or `None` once input is exhausted.
    pub(crate) fn choose(
        &mut self,
        options: &[String],
    ) -> Result<Option<usize>> {
        for (i, option) in options.iter().enumerate() {
            self.line(&format!("  {}) {option}", i + 1))?;
        }
        let prompt = self.t.t("menu.prompt");
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => {
                    debug!(answer = %answer, "invalid menu choice");
                    self.say("menu.invalid", &[("max", &options.len().to_string())])?;
                }
            }
        }
    }

    /// [`choose`](Self::choose) over translation keys.
    pub(crate) fn choose_keys(
        &mut self,
        keys: &[&str],
    ) -> Result<Option<usize>> {
        let options: Vec<String> = keys.iter().map(|k| self.t.t(k)).collect();
        self.choose(&options)
    }

    // ── session ──────────────────────────────────────────────────────────

    /// Restores an existing login. Any failure means browsing anonymously.
    pub async fn bootstrap(&mut self) {
        match self.gateway.session().await {
            Ok(status) => {
                self.user = status.into_user();
                match &self.user {
                    Some(user) => info!(username = %user.username, "resumed session"),
                    None => debug!("anonymous session"),
                }
            }
            Err(err) => {
                warn!(error = %err, "session check failed; continuing anonymously");
                self.user = None;
            }
        }
    }

    /// Ends the session and returns to the landing page. The local user is
    /// cleared even if the backend call fails.
    pub(crate) async fn logout(&mut self) -> Result<Nav> {
        match self.gateway.logout().await {
            Ok(()) => {
                info!("logged out");
                self.user = None;
                self.say("logout.done", &[])?;
            }
            Err(err) => {
                warn!(error = %err, "logout failed");
                self.user = None;
                self.say("logout.failed", &[("message", &err.user_message())])?;
            }
        }
        Ok(Nav::To(Route::Landing))
    }

    /// Runs screens until the user quits or input runs out.
    pub async fn run(
        &mut self,
        start: Route,
    ) -> Result<()> {
        self.bootstrap().await;

        let mut requested = start;
        loop {
            let route = router::resolve(requested, self.user.as_ref()).target();
            debug!(%route, "showing");
            let nav = match route {
                Route::Landing => screens::landing::show(self).await?,
                Route::Dashboard => screens::dashboard::show(self).await?,
                Route::QuickEstimate => screens::estimate::quick(self).await?,
                Route::DetailedAnalysis => screens::estimate::detailed(self).await?,
                Route::Quiz => screens::quiz::show(self)?,
                Route::History => screens::history::show(self).await?,
                Route::RegionalStats => screens::regional::show(self).await?,
            };
            match nav {
                Nav::To(next) => requested = next,
                Nav::Quit => break,
            }
        }

        self.say("app.goodbye", &[])?;
        Ok(())
    }
}
