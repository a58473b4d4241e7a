// ============================================================================
// Scaled Numeric Library
// Overflow-aware and fixed-point arithmetic over ordinary integers
// ============================================================================

//! # Scaled Numeric
//!
//! Integer types that keep their plain representation while taking part in
//! fixed-point and overflow-aware arithmetic.
//!
//! ## Features
//!
//! - **Overflow policies** as zero-sized tags: native wraparound, trapping
//!   (abort), saturating (clamp) and throwing (recoverable `OverflowError`)
//! - **Static operator resolution**: every `a <op> b` picks one rule at
//!   compile time; incompatible policies do not compile
//! - **Scaled integers** with the exponent and radix in the type
//!   (`Q16_16`, `Decimal64<-2>`, ...)
//! - **Radix conversion** (`descale`) through a widened intermediate
//!
//! ## Example
//!
//! ```rust
//! use scaled_numeric::prelude::*;
//!
//! // policy-tagged integers
//! let x = SaturatingInteger::<i32>::from_rep(i32::MAX);
//! assert_eq!((x + 1i32).rep(), i32::MAX);
//!
//! // binary fixed-point, shown in decimal
//! let price = SaturatingQ16_16::from_f64(1.5) * 3i32;
//! assert_eq!(price.to_string(), "4.5");
//!
//! // the same value in decimal hundredths
//! let cents: ScaledInteger<i64, -2, 10> = price.convert();
//! assert_eq!(cents.significand(), 450);
//! ```
//!
//! Operands under different overflow policies are rejected by the compiler:
//!
//! ```compile_fail
//! use scaled_numeric::numeric::{SaturatingInteger, TrappingInteger};
//!
//! let a = SaturatingInteger::<i32>::from_rep(1);
//! let b = TrappingInteger::<i32>::from_rep(1);
//! let _ = a + b;
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod overflow;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::NumericDescriptor;
    pub use crate::engine::{resolution, Resolution, Resolve, Rule};
    pub use crate::interfaces::{Integer, Number, OverflowTag, Polarity, PolicyKind};
    pub use crate::numeric::{
        descale, math, Decimal64, NativeInteger, NumericError, NumericResult, OverflowError,
        OverflowInteger, Q16_16, Q8_8, SaturatingDecimal64, SaturatingInteger, SaturatingQ16_16,
        ScaledInteger, ThrowingInteger, TrappingInteger,
    };
    pub use crate::overflow::{Native, Saturating, Throwing, Trapping};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::interfaces::{AddOp, MultiplyOp};
    use rust_decimal::Decimal;

    #[test]
    fn test_end_to_end_fixed_point() {
        // 12.5% of 19.99, in hundredths
        let price = SaturatingDecimal64::<-2>::from_decimal(Decimal::new(1999, 2)).unwrap();
        let rate = SaturatingQ16_16::from_f64(0.125);
        let rate_in_cents: SaturatingDecimal64<-3> = rate.convert();
        assert_eq!(rate_in_cents.significand(), 125);

        let tax = price * rate_in_cents;
        assert_eq!(tax.significand(), 249);
        assert_eq!(tax.to_decimal().unwrap(), Decimal::new(249, 2));
        assert_eq!(format!("{tax:?}"), "ScaledInteger(2.49, i64 * 10^-2 (saturating))");
    }

    #[test]
    fn test_policies_share_one_representation() {
        let wrapped = NativeInteger::<i8>::from_rep(100) + 100i8;
        let clamped = SaturatingInteger::<i8>::from_rep(100) + 100i8;
        assert_eq!(wrapped.rep(), -56);
        assert_eq!(clamped.rep(), i8::MAX);

        let checked = ThrowingInteger::<i8>::from_rep(100).try_add(ThrowingInteger::from_rep(100));
        assert!(matches!(checked, Err(NumericError::Overflow(ref e)) if e.polarity == Polarity::Positive));
    }

    #[test]
    fn test_resolution_is_reported() {
        let report = resolution::<MultiplyOp, SaturatingQ16_16, u16>();
        assert_eq!(report.to_string(), "multiply via lift plain rhs (saturating)");
        let report = resolution::<AddOp, f64, TrappingInteger<i64>>();
        assert_eq!(report.to_string(), "add via floating peer (floating)");
    }

    #[test]
    fn test_descale_feeds_display() {
        let descaled = descale::<i32, 10>(12_345, -4, 2).unwrap();
        assert_eq!(descaled.to_string(), "771.5625");
        assert_eq!(Q16_16::from_significand(12_345 << 12).to_string(), "771.5625");
    }
}
