// ============================================================================
// Engine Module
// Static operator resolution for every numeric type
// ============================================================================

mod operators;
mod overflow_rules;
mod resolution;
mod scaled_rules;

pub use resolution::{resolution, Resolution, Resolve, Rule};
pub use scaled_rules::ScaledOperator;
