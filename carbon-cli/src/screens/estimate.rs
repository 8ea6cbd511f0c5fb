use anyhow::Result;
use tracing::warn;

use carbon_core::router::Route;
use carbon_core::wizard::{DetailedWizard, QuickWizard, Wizard, WizardError, WizardFlow, WizardPhase};
use carbon_core::{DetailedField, DietHabit, QuickField, ShoppingLevel, Vehicle};

use crate::app::{App, Nav};
use crate::console::Console;
use crate::render;

/// Picks one of `codes` from a menu of their translations under `prefix`.
/// Returns the chosen code, or `None` once input is exhausted.
fn pick<C: Console>(
    app: &mut App<'_, C>,
    prefix: &str,
    codes: &[&'static str],
) -> Result<Option<&'static str>> {
    let labels: Vec<String> = codes
        .iter()
        .map(|code| app.t.t(&format!("{prefix}.{code}")))
        .collect();
    Ok(app.choose(&labels)?.map(|i| codes[i]))
}

fn vehicle_codes() -> Vec<&'static str> {
    Vehicle::all().iter().map(|v| v.as_str()).collect()
}

/// Submits and reports the outcome. A failure leaves the wizard on its last
/// step with the message stored for display.
async fn submit<C: Console, F: WizardFlow>(
    app: &mut App<'_, C>,
    wizard: &mut Wizard<F>,
) -> Result<()> {
    app.say("wizard.submitting", &[])?;
    match wizard.submit(app.gateway).await {
        Ok(_) | Err(WizardError::Remote(_)) => {}
        Err(other) => warn!(error = %other, "submission refused"),
    }
    Ok(())
}

/// Shows the result and offers a fresh start. `None` means leave the screen
/// with that navigation.
fn show_result<C: Console, F: WizardFlow>(
    app: &mut App<'_, C>,
    wizard: &mut Wizard<F>,
) -> Result<Option<Nav>> {
    if let Some(result) = wizard.result() {
        let lines = render::result_lines(&app.t, result);
        app.line("")?;
        app.lines(lines)?;
    }
    match app.choose_keys(&["wizard.again", "nav.dashboard"])? {
        Some(0) => {
            wizard.reset();
            Ok(None)
        }
        Some(_) => Ok(Some(Nav::To(Route::Dashboard))),
        None => Ok(Some(Nav::Quit)),
    }
}

fn show_error<C: Console, F: WizardFlow>(
    app: &mut App<'_, C>,
    wizard: &Wizard<F>,
) -> Result<()> {
    if let Some(error) = wizard.error() {
        app.say("wizard.error", &[("message", error)])?;
    }
    Ok(())
}

// ── quick estimate ───────────────────────────────────────────────────────

/// Asks the three quick questions. Returns `false` if input ran out.
fn ask_quick<C: Console>(
    app: &mut App<'_, C>,
    wizard: &mut QuickWizard,
) -> Result<bool> {
    let diets: Vec<&str> = DietHabit::all().iter().map(|d| d.as_str()).collect();
    let levels: Vec<&str> = ShoppingLevel::all().iter().map(|s| s.as_str()).collect();
    let questions: [(QuickField, &str, &str, Vec<&'static str>); 3] = [
        (QuickField::Commute, "quick.commute", "options.vehicle", vehicle_codes()),
        (QuickField::Diet, "quick.diet", "options.diet", diets),
        (QuickField::Shopping, "quick.shopping", "options.shopping", levels),
    ];

    for (field, question, prefix, codes) in questions {
        app.say(question, &[])?;
        let Some(code) = pick(app, prefix, &codes)? else {
            return Ok(false);
        };
        wizard.update_field(field, code);
    }
    Ok(true)
}

pub async fn quick<C: Console>(app: &mut App<'_, C>) -> Result<Nav> {
    let mut wizard = QuickWizard::new();
    let mut fresh = true;

    loop {
        if wizard.phase() == WizardPhase::Result {
            match show_result(app, &mut wizard)? {
                Some(nav) => return Ok(nav),
                None => {
                    fresh = true;
                    continue;
                }
            }
        }

        app.heading("quick.title")?;
        if fresh {
            if !ask_quick(app, &mut wizard)? {
                return Ok(Nav::Quit);
            }
            fresh = false;
        }
        show_error(app, &wizard)?;

        match app.choose_keys(&["wizard.submit", "wizard.edit", "nav.dashboard"])? {
            Some(0) => submit(app, &mut wizard).await?,
            Some(1) => fresh = true,
            Some(_) => return Ok(Nav::To(Route::Dashboard)),
            None => return Ok(Nav::Quit),
        }
    }
}

// ── detailed analysis ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepAction {
    Next,
    Submit,
    Back,
    Edit,
    Dashboard,
}

impl StepAction {
    fn key(&self) -> &'static str {
        match self {
            StepAction::Next => "wizard.next",
            StepAction::Submit => "wizard.submit",
            StepAction::Back => "wizard.back",
            StepAction::Edit => "wizard.edit",
            StepAction::Dashboard => "nav.dashboard",
        }
    }
}

/// Asks every field of the current step. Returns `false` if input ran out.
fn ask_step<C: Console>(
    app: &mut App<'_, C>,
    wizard: &mut DetailedWizard,
) -> Result<bool> {
    for field in DetailedField::for_step(wizard.step()) {
        let label = app.t.t(&format!("detailed.fields.{}", field.name()));
        if field == DetailedField::VehicleType {
            app.line(&label)?;
            let codes = vehicle_codes();
            let Some(code) = pick(app, "options.vehicle", &codes)? else {
                return Ok(false);
            };
            wizard.update_field(field, code);
            continue;
        }

        let current = wizard.answers().get(field);
        let Some(value) = app.ask_with_default(&label, &current)? else {
            return Ok(false);
        };
        if !wizard.update_field(field, &value) {
            app.say("wizard.invalid_number", &[("value", &value)])?;
        }
    }
    Ok(true)
}

pub async fn detailed<C: Console>(app: &mut App<'_, C>) -> Result<Nav> {
    let mut wizard = DetailedWizard::new();
    let mut fresh = true;

    loop {
        let step = match wizard.phase() {
            WizardPhase::Result => match show_result(app, &mut wizard)? {
                Some(nav) => return Ok(nav),
                None => {
                    fresh = true;
                    continue;
                }
            },
            WizardPhase::Step(step) => step,
        };

        let category = DetailedField::for_step(step)
            .first()
            .map(|f| f.category())
            .unwrap_or_default();
        let title = app.t.t(&format!("detailed.steps.{category}"));
        app.heading("detailed.title")?;
        app.say(
            "wizard.step",
            &[
                ("step", &step.to_string()),
                ("steps", &wizard.steps().to_string()),
                ("title", &title),
            ],
        )?;

        if fresh {
            if !ask_step(app, &mut wizard)? {
                return Ok(Nav::Quit);
            }
            fresh = false;
        }
        show_error(app, &wizard)?;

        let mut actions = vec![if wizard.is_last_step() {
            StepAction::Submit
        } else {
            StepAction::Next
        }];
        if step > 1 {
            actions.push(StepAction::Back);
        }
        actions.extend([StepAction::Edit, StepAction::Dashboard]);
        let keys: Vec<&str> = actions.iter().map(StepAction::key).collect();

        let Some(choice) = app.choose_keys(&keys)? else {
            return Ok(Nav::Quit);
        };
        match actions[choice] {
            StepAction::Next => fresh = wizard.advance(),
            StepAction::Back => fresh = wizard.retreat(),
            StepAction::Edit => fresh = true,
            StepAction::Submit => submit(app, &mut wizard).await?,
            StepAction::Dashboard => return Ok(Nav::To(Route::Dashboard)),
        }
    }
}
