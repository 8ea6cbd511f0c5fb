use anyhow::Result;

use carbon_core::router::Route;

use super::auth::{self, ModalExit};
use crate::app::{App, Nav};
use crate::console::Console;

pub async fn show<C: Console>(app: &mut App<'_, C>) -> Result<Nav> {
    app.heading("app.title")?;
    app.say("landing.tagline", &[])?;

    match app.choose_keys(&["landing.login", "landing.quit"])? {
        Some(0) => match auth::modal(app).await? {
            ModalExit::LoggedIn => Ok(Nav::To(Route::Dashboard)),
            ModalExit::Cancelled => Ok(Nav::To(Route::Landing)),
            ModalExit::InputClosed => Ok(Nav::Quit),
        },
        _ => Ok(Nav::Quit),
    }
}
