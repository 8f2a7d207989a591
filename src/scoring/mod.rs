pub mod engine;
pub mod rules;
pub mod validation;

pub use engine::{calculate_points, PointsBreakdown, PointsResult, RuleContribution};
pub use rules::Rule;
pub use validation::{validate_receipt, ValidationError};
