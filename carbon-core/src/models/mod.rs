mod auth_fields;
mod calculation_result;
mod detailed_answers;
mod history;
mod quick_answers;
mod regional_stats;
mod user;

pub use auth_fields::{AuthField, AuthFields, Gender};
pub use calculation_result::CalculationResult;
pub use detailed_answers::{
    Consumption, DetailedAnswers, DetailedField, Diet, Energy, Transport, Waste,
};
pub use history::HistoryEntry;
pub use quick_answers::{DietHabit, QuickAnswers, QuickField, ShoppingLevel, Vehicle};
pub use regional_stats::{ChartPoint, RegionQuery, RegionalStats};
pub use user::{SessionStatus, User};
