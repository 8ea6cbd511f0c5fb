use anyhow::Result;

use carbon_core::auth::{AuthMode, AuthOutcome, AuthView};
use carbon_core::options::{self, OCCUPATIONS};
use carbon_core::{AuthField, Gender};

use crate::app::App;
use crate::console::Console;

/// How the login modal was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalExit {
    LoggedIn,
    Cancelled,
    InputClosed,
}

/// Hint listing the accepted values of `field`, if it has a fixed set.
fn choices_hint(
    view: &AuthView,
    field: AuthField,
) -> Option<String> {
    match field {
        AuthField::Gender => Some(
            Gender::all()
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join(" / "),
        ),
        AuthField::City => Some(options::cities().collect::<Vec<_>>().join(" ")),
        AuthField::District => options::districts(&view.fields().city).map(|d| d.join(" ")),
        AuthField::Occupation => Some(OCCUPATIONS.join(" ")),
        _ => None,
    }
}

/// Walks the fields of the current mode. Returns `false` if input ran out.
fn fill_fields<C: Console>(
    app: &mut App<'_, C>,
    view: &mut AuthView,
) -> Result<bool> {
    for field in view.mode().fields() {
        if field == AuthField::GenderOther && view.fields().gender != Gender::Other {
            continue;
        }
        if let Some(hint) = choices_hint(view, field) {
            app.line(&format!("  ({hint})"))?;
        }

        let label = app.t.t(&format!("auth.fields.{}", field.name()));
        let answer = if field == AuthField::Password {
            let prompt = format!("{label}: ");
            app.ask(&prompt)?
                .map(|a| if a.is_empty() { view.fields().password.clone() } else { a })
        } else {
            let current = view.fields().get(field).to_string();
            app.ask_with_default(&label, &current)?
        };
        let Some(value) = answer else {
            return Ok(false);
        };

        if !view.update_field(field, &value) {
            app.say("auth.invalid_value", &[("value", &value)])?;
        }
    }
    Ok(true)
}

/// Shows the login / register modal until it is left.
pub async fn modal<C: Console>(app: &mut App<'_, C>) -> Result<ModalExit> {
    let mut view = AuthView::new();
    view.open();

    loop {
        let (title, toggle) = match view.mode() {
            AuthMode::Login => ("auth.login_title", "auth.to_register"),
            AuthMode::Register => ("auth.register_title", "auth.to_login"),
        };
        app.heading(title)?;
        if let Some(notice) = view.notice() {
            app.line(&format!("* {notice}"))?;
        }
        if let Some(error) = view.error() {
            app.say("auth.error", &[("message", error)])?;
        }

        match app.choose_keys(&["auth.fill", toggle, "auth.cancel"])? {
            None => return Ok(ModalExit::InputClosed),
            Some(0) => {
                if !fill_fields(app, &mut view)? {
                    return Ok(ModalExit::InputClosed);
                }
                app.say("auth.submitting", &[])?;
                match view.submit(app.gateway).await? {
                    AuthOutcome::LoggedIn(user) => {
                        app.say("auth.welcome", &[("name", user.display_name())])?;
                        app.user = Some(user);
                        return Ok(ModalExit::LoggedIn);
                    }
                    AuthOutcome::Registered | AuthOutcome::Failed => {}
                }
            }
            Some(1) => {
                view.toggle_mode();
            }
            Some(_) => {
                view.close();
                return Ok(ModalExit::Cancelled);
            }
        }
    }
}
