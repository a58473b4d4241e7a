// ============================================================================
// Utilities Module
// Optional diagnostics plumbing
// ============================================================================

#[cfg(feature = "logging")]
pub mod logging;
