// ============================================================================
// Saturating Policy
// Clamps out-of-range results to the representation's bounds
// ============================================================================

use crate::interfaces::{Integer, OverflowEvent, OverflowTag, Polarity, PolicyKind};

/// Positive overflow yields `MAX`, negative overflow yields `MIN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Saturating;

impl OverflowTag for Saturating {
    const KIND: PolicyKind = PolicyKind::Saturating;

    #[inline]
    fn on_overflow<R: Integer>(_wrapped: R, event: &OverflowEvent<'_>) -> R {
        match event.polarity {
            Polarity::Positive => R::MAX,
            Polarity::Negative => R::MIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{
        AddOp, DivideOp, MultiplyOp, NegateOp, ShiftLeftOp, ShiftRightOp, SubtractOp,
    };
    use proptest::prelude::*;

    #[test]
    fn test_convert_clamps() {
        assert_eq!(Saturating::convert::<u8, i32>(259), 255);
        assert_eq!(Saturating::convert::<u16, i32>(-123), 0);
        assert_eq!(Saturating::convert::<i8, i64>(-1000), i8::MIN);
        assert_eq!(Saturating::convert::<i32, u64>(u64::MAX), i32::MAX);
        assert_eq!(Saturating::convert::<i64, i8>(-5), -5);
    }

    #[test]
    fn test_convert_float_clamps() {
        assert_eq!(Saturating::convert_float::<u8>(-3.5), 0);
        assert_eq!(Saturating::convert_float::<i16>(1e9), i16::MAX);
        assert_eq!(Saturating::convert_float::<i16>(f64::NEG_INFINITY), i16::MIN);
        assert_eq!(Saturating::convert_float::<i16>(-32768.9), i16::MIN);
        assert_eq!(Saturating::convert_float::<u8>(255.99), 255);
    }

    #[test]
    fn test_apply_clamps() {
        assert_eq!(Saturating::apply::<AddOp, i32>(i32::MAX, 1), i32::MAX);
        assert_eq!(Saturating::apply::<SubtractOp, u32>(0, 1), 0);
        assert_eq!(Saturating::apply::<MultiplyOp, i16>(-300, 300), i16::MIN);
        assert_eq!(Saturating::apply::<DivideOp, i8>(i8::MIN, -1), i8::MAX);
        assert_eq!(Saturating::apply_unary::<NegateOp, u8>(7), 0);
        assert_eq!(Saturating::apply_unary::<NegateOp, i8>(i8::MIN), i8::MAX);
    }

    #[test]
    fn test_shift_left_clamps_by_sign() {
        assert_eq!(Saturating::apply_shift::<ShiftLeftOp, u8>(0x81, 1), u8::MAX);
        assert_eq!(
            Saturating::apply_shift::<ShiftLeftOp, i32>(-1_073_741_825, 1),
            i32::MIN
        );
        assert_eq!(Saturating::apply_shift::<ShiftLeftOp, i32>(3, 2), 12);
        assert_eq!(Saturating::apply_shift::<ShiftRightOp, i32>(-8, 64), -1);
    }

    proptest! {
        #[test]
        fn prop_convert_is_clamp(v in any::<i64>()) {
            prop_assert_eq!(
                Saturating::convert::<i16, i64>(v),
                v.clamp(i16::MIN as i64, i16::MAX as i64) as i16
            );
            prop_assert_eq!(
                Saturating::convert::<u8, i64>(v),
                v.clamp(0, u8::MAX as i64) as u8
            );
        }

        #[test]
        fn prop_add_is_clamped_exact_sum(a in any::<i32>(), b in any::<i32>()) {
            let exact = a as i64 + b as i64;
            prop_assert_eq!(
                Saturating::apply::<AddOp, i32>(a, b) as i64,
                exact.clamp(i32::MIN as i64, i32::MAX as i64)
            );
        }

        #[test]
        fn prop_mul_is_clamped_exact_product(a in any::<i16>(), b in any::<i16>()) {
            let exact = a as i32 * b as i32;
            prop_assert_eq!(
                Saturating::apply::<MultiplyOp, i16>(a, b) as i32,
                exact.clamp(i16::MIN as i32, i16::MAX as i32)
            );
        }

        #[test]
        fn prop_sub_is_clamped_exact_difference(a in any::<u16>(), b in any::<u16>()) {
            let exact = a as i32 - b as i32;
            prop_assert_eq!(
                Saturating::apply::<SubtractOp, u16>(a, b) as i32,
                exact.clamp(0, u16::MAX as i32)
            );
        }
    }
}
