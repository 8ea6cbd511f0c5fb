//! Estimate wizards.
//!
//! Both the quick estimate and the detailed analysis are the same state
//! machine: `Step(1) .. Step(N)`, then `Result`. They differ only in their
//! [`WizardFlow`], which fixes the number of steps, the answer record, and
//! the endpoint the answers are sent to.

pub mod flow;
pub mod machine;

pub use flow::{DetailedFlow, EstimateRequest, QuickFlow, WizardFlow};
pub use machine::{Wizard, WizardError, WizardPhase};

pub type QuickWizard = Wizard<QuickFlow>;
pub type DetailedWizard = Wizard<DetailedFlow>;
