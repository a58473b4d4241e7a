// ============================================================================
// Domain Models Module
// Runtime descriptions of numeric types
// ============================================================================

pub mod descriptor;

pub use descriptor::NumericDescriptor;
