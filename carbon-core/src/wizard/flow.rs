use std::fmt;

use crate::gateway::{CarbonGateway, GatewayError};
use crate::models::{CalculationResult, DetailedAnswers, DetailedField, QuickAnswers, QuickField};

/// The payload a wizard hands to the gateway on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateRequest {
    Quick(QuickAnswers),
    Detailed(Box<DetailedAnswers>),
}

impl EstimateRequest {
    pub async fn send(
        &self,
        gateway: &dyn CarbonGateway,
    ) -> Result<CalculationResult, GatewayError> {
        match self {
            Self::Quick(answers) => gateway.calculate_quick(answers).await,
            Self::Detailed(answers) => gateway.calculate_detailed(answers).await,
        }
    }
}

/// Static description of one estimate flow.
pub trait WizardFlow {
    type Answers: Clone + Default + PartialEq + fmt::Debug;
    type Field: Copy + fmt::Debug;

    /// Number of input screens. Always at least 1.
    const STEPS: usize;

    /// Short name used in log records.
    const NAME: &'static str;

    /// Merge one field; `false` when the value is not acceptable for it.
    fn apply(
        answers: &mut Self::Answers,
        field: Self::Field,
        value: &str,
    ) -> bool;

    fn request(answers: &Self::Answers) -> EstimateRequest;
}

/// Three-question estimate on a single screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickFlow;

impl WizardFlow for QuickFlow {
    type Answers = QuickAnswers;
    type Field = QuickField;

    const STEPS: usize = 1;
    const NAME: &'static str = "quick";

    fn apply(
        answers: &mut QuickAnswers,
        field: QuickField,
        value: &str,
    ) -> bool {
        answers.set(field, value)
    }

    fn request(answers: &QuickAnswers) -> EstimateRequest {
        EstimateRequest::Quick(*answers)
    }
}

/// Five-step analysis: energy, transport, diet, consumption, waste.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailedFlow;

impl WizardFlow for DetailedFlow {
    type Answers = DetailedAnswers;
    type Field = DetailedField;

    const STEPS: usize = 5;
    const NAME: &'static str = "detailed";

    fn apply(
        answers: &mut DetailedAnswers,
        field: DetailedField,
        value: &str,
    ) -> bool {
        answers.set(field, value)
    }

    fn request(answers: &DetailedAnswers) -> EstimateRequest {
        EstimateRequest::Detailed(Box::new(answers.clone()))
    }
}
