// ============================================================================
// Trapping Policy
// Halts the process on overflow
// ============================================================================

use crate::interfaces::{Integer, OverflowEvent, OverflowTag, PolicyKind};

/// Out-of-range results abort the process after printing a diagnostic.
///
/// The halt never unwinds: no destructor runs, no `catch_unwind` observes
/// it, and the caller never sees a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Trapping;

#[cold]
#[inline(never)]
fn trap(event: &OverflowEvent<'_>) -> ! {
    tracing::error!(
        operator = %event.operator,
        polarity = %event.polarity,
        "trapping overflow, aborting"
    );
    // a subscriber may not be installed
    eprintln!("{event}");
    std::process::abort()
}

impl OverflowTag for Trapping {
    const KIND: PolicyKind = PolicyKind::Trapping;

    #[inline]
    fn on_overflow<R: Integer>(_wrapped: R, event: &OverflowEvent<'_>) -> R {
        trap(event)
    }
}
