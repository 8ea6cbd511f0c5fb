use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a quick or detailed estimate, as computed by the backend.
///
/// Totals are annual kgCO2e. The client only renders this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total: Decimal,
    #[serde(default)]
    pub breakdown: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub top_source: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

impl CalculationResult {
    /// The category with the largest contribution, preferring the backend's
    /// own `top_source` when it sent one.
    pub fn dominant_category(&self) -> Option<&str> {
        if let Some(top) = self.top_source.as_deref() {
            return Some(top);
        }
        self.breakdown
            .iter()
            .max_by(|a, b| a.1.cmp(b.1))
            .map(|(category, _)| category.as_str())
    }
}

impl fmt::Display for CalculationResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Total:      {} kgCO2e/yr", self.total)?;
        for (category, value) in &self.breakdown {
            writeln!(f, "  {category:<12}{value}")?;
        }
        match &self.suggestion {
            Some(suggestion) => write!(f, "Suggestion: {suggestion}"),
            None => write!(f, "Suggestion: -"),
        }
    }
}
