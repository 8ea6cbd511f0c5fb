use std::marker::PhantomData;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::flow::{EstimateRequest, WizardFlow};
use crate::gateway::{CarbonGateway, GatewayError};
use crate::models::CalculationResult;

/// Reasons a submission cannot start or complete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("submission is only possible on the last step (at step {step} of {steps})")]
    NotAtFinalStep { step: usize, steps: usize },

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("the result is already shown; reset to start over")]
    ShowingResult,

    #[error("no submission is in flight")]
    NoSubmissionInFlight,

    #[error("estimate failed: {0}")]
    Remote(#[from] GatewayError),
}

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Collecting input on step `k` (1-based).
    Step(usize),
    /// Terminal state after a successful submission.
    Result,
}

/// Linear multi-step input flow that ends in one remote submission.
///
/// Steps are 1-based and always within `1..=F::STEPS`. Moving past either end
/// is ignored rather than reported. The only way out of the last step is a
/// successful [`submit`](Self::submit); the only way out of the result is
/// [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct Wizard<F: WizardFlow> {
    step: usize,
    answers: F::Answers,
    result: Option<CalculationResult>,
    submitting: bool,
    error: Option<String>,
    flow: PhantomData<F>,
}

impl<F: WizardFlow> Default for Wizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: WizardFlow> Wizard<F> {
    pub fn new() -> Self {
        Self {
            step: 1,
            answers: F::Answers::default(),
            result: None,
            submitting: false,
            error: None,
            flow: PhantomData,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn steps(&self) -> usize {
        F::STEPS
    }

    pub fn is_last_step(&self) -> bool {
        self.step == F::STEPS
    }

    pub fn phase(&self) -> WizardPhase {
        if self.result.is_some() {
            WizardPhase::Result
        } else {
            WizardPhase::Step(self.step)
        }
    }

    pub fn answers(&self) -> &F::Answers {
        &self.answers
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the most recent failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Input is frozen while a request is in flight or the result is shown.
    fn is_locked(&self) -> bool {
        self.submitting || self.result.is_some()
    }

    /// Moves to the next step. Returns `false` (and does nothing) on the last
    /// step, while submitting, or while the result is shown.
    pub fn advance(&mut self) -> bool {
        if self.is_locked() || self.step >= F::STEPS {
            return false;
        }
        self.step += 1;
        debug!(flow = F::NAME, step = self.step, "advanced");
        true
    }

    /// Moves to the previous step. Returns `false` (and does nothing) on the
    /// first step, while submitting, or while the result is shown.
    pub fn retreat(&mut self) -> bool {
        if self.is_locked() || self.step <= 1 {
            return false;
        }
        self.step -= 1;
        debug!(flow = F::NAME, step = self.step, "retreated");
        true
    }

    /// Merges a single field into the answers. No cross-field validation is
    /// done; the backend owns that. Returns `false` if the value was not taken.
    pub fn update_field(
        &mut self,
        field: F::Field,
        value: &str,
    ) -> bool {
        if self.is_locked() {
            debug!(flow = F::NAME, ?field, "ignored edit while locked");
            return false;
        }
        F::apply(&mut self.answers, field, value)
    }

    /// Marks a submission as in flight and returns the request to send.
    ///
    /// # Errors
    /// * [`WizardError::ShowingResult`] once the result is shown.
    /// * [`WizardError::AlreadySubmitting`] while a request is in flight.
    /// * [`WizardError::NotAtFinalStep`] before the last step.
    pub fn begin_submit(&mut self) -> Result<EstimateRequest, WizardError> {
        if self.result.is_some() {
            return Err(WizardError::ShowingResult);
        }
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        if !self.is_last_step() {
            return Err(WizardError::NotAtFinalStep {
                step: self.step,
                steps: F::STEPS,
            });
        }
        self.submitting = true;
        self.error = None;
        debug!(flow = F::NAME, "submission started");
        Ok(F::request(&self.answers))
    }

    /// Records the outcome of the request returned by
    /// [`begin_submit`](Self::begin_submit).
    ///
    /// On failure the wizard stays on the last step with its answers intact
    /// and can be submitted again.
    pub fn complete_submit(
        &mut self,
        outcome: Result<CalculationResult, GatewayError>,
    ) -> Result<&CalculationResult, WizardError> {
        if !self.submitting {
            return Err(WizardError::NoSubmissionInFlight);
        }
        self.submitting = false;

        match outcome {
            Ok(result) => {
                info!(flow = F::NAME, total = %result.total, "estimate received");
                Ok(self.result.insert(result))
            }
            Err(err) => {
                warn!(flow = F::NAME, error = %err, "estimate failed");
                self.error = Some(err.user_message());
                Err(WizardError::Remote(err))
            }
        }
    }

    /// Submits the answers through `gateway` and waits for the outcome.
    pub async fn submit(
        &mut self,
        gateway: &dyn CarbonGateway,
    ) -> Result<&CalculationResult, WizardError> {
        let request = self.begin_submit()?;
        let outcome = request.send(gateway).await;
        self.complete_submit(outcome)
    }

    /// Starts over: first step, default answers, no result, no error.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!(flow = F::NAME, "reset");
    }
}
