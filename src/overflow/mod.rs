// ============================================================================
// Overflow Policies
// The fixed catalogue of overflow behaviours
// ============================================================================
//
// | policy     | out of range                          |
// |------------|---------------------------------------|
// | Native     | two's complement wraparound           |
// | Trapping   | diagnostic on stderr, process abort   |
// | Saturating | clamp to MAX / MIN by polarity        |
// | Throwing   | unwinding panic with `OverflowError`  |

mod native;
mod saturating;
mod throwing;
mod trapping;

pub use native::Native;
pub use saturating::Saturating;
pub use throwing::Throwing;
pub use trapping::Trapping;
