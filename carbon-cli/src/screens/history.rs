use anyhow::Result;
use tracing::{debug, warn};

use carbon_core::router::Route;

use crate::app::{App, Nav};
use crate::console::Console;
use crate::render;

/// Lists past estimates, newest first as the backend returns them.
pub async fn show<C: Console>(app: &mut App<'_, C>) -> Result<Nav> {
    loop {
        app.heading("history.title")?;
        match app.gateway.history().await {
            Ok(entries) if entries.is_empty() => app.say("history.empty", &[])?,
            Ok(entries) => {
                debug!(count = entries.len(), "history loaded");
                let lines: Vec<String> = entries
                    .iter()
                    .map(|entry| render::history_line(&app.t, entry))
                    .collect();
                app.lines(lines)?;
            }
            Err(err) => {
                warn!(error = %err, "history failed");
                app.say("history.error", &[("message", &err.user_message())])?;
            }
        }

        match app.choose_keys(&["history.refresh", "nav.dashboard"])? {
            Some(0) => continue,
            Some(_) => return Ok(Nav::To(Route::Dashboard)),
            None => return Ok(Nav::Quit),
        }
    }
}
