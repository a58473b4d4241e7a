// ============================================================================
// Native Policy
// Defers to the representation's own wraparound
// ============================================================================

use crate::interfaces::{
    BinaryOperator, Integer, OverflowEvent, OverflowTag, PolicyKind, ShiftOperator, UnaryOperator,
};

/// No checking: results wrap exactly like `as` casts and `wrapping_*` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Native;

impl OverflowTag for Native {
    const KIND: PolicyKind = PolicyKind::Native;

    #[inline(always)]
    fn on_overflow<R: Integer>(wrapped: R, _event: &OverflowEvent<'_>) -> R {
        wrapped
    }

    #[inline(always)]
    fn convert<D: Integer, S: Integer>(source: S) -> D {
        D::wrapping_cast(source)
    }

    #[inline(always)]
    fn convert_float<D: Integer>(value: f64) -> D {
        D::from_f64_native(value)
    }

    #[inline(always)]
    fn apply<Op: BinaryOperator, R: Integer>(lhs: R, rhs: R) -> R {
        Op::wrapping(lhs, rhs)
    }

    #[inline(always)]
    fn apply_unary<Op: UnaryOperator, R: Integer>(operand: R) -> R {
        Op::wrapping(operand)
    }

    #[inline(always)]
    fn apply_shift<Op: ShiftOperator, R: Integer>(lhs: R, amount: u32) -> R {
        Op::wrapping(lhs, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{AddOp, MultiplyOp, NegateOp, ShiftLeftOp};
    use proptest::prelude::*;

    #[test]
    fn test_convert_wraps() {
        assert_eq!(Native::convert::<u8, i32>(259), 3);
        assert_eq!(Native::convert::<u16, i32>(-123), 65413);
        assert_eq!(Native::convert::<i8, u8>(255), -1);
    }

    #[test]
    fn test_apply_wraps() {
        assert_eq!(Native::apply::<AddOp, i32>(i32::MAX, 1), i32::MIN);
        assert_eq!(Native::apply::<MultiplyOp, u8>(16, 16), 0);
        assert_eq!(Native::apply_unary::<NegateOp, u8>(1), 255);
        assert_eq!(Native::apply_shift::<ShiftLeftOp, i32>(-1_073_741_825, 1), 2_147_483_646);
    }

    #[test]
    fn test_convert_float_is_as_cast() {
        assert_eq!(Native::convert_float::<u8>(300.7), 255);
        assert_eq!(Native::convert_float::<i32>(f64::NAN), 0);
        assert_eq!(Native::convert_float::<i16>(-2.9), -2);
    }

    proptest! {
        #[test]
        fn prop_convert_matches_as_cast(v in any::<i64>()) {
            prop_assert_eq!(Native::convert::<u16, i64>(v), v as u16);
            prop_assert_eq!(Native::convert::<i8, i64>(v), v as i8);
            prop_assert_eq!(Native::convert::<u128, i64>(v), v as u128);
        }

        #[test]
        fn prop_add_matches_wrapping_add(a in any::<i32>(), b in any::<i32>()) {
            prop_assert_eq!(Native::apply::<AddOp, i32>(a, b), a.wrapping_add(b));
        }
    }
}
