// ============================================================================
// Throwing Policy
// Recoverable overflow through an unwinding panic or a Result
// ============================================================================

use crate::interfaces::{
    BinaryOperator, Integer, OperatorKind, OverflowEvent, OverflowTag, Polarity, PolicyKind,
    ShiftOperator, UnaryOperator,
};
use crate::numeric::{NumericError, NumericResult};

/// Out-of-range results raise an [`OverflowError`](crate::numeric::OverflowError).
///
/// Operators unwind with the error as the panic payload
/// (`std::panic::panic_any`), so it can be recovered with
/// `catch_unwind` and `downcast_ref::<OverflowError>()`. The `try_*`
/// functions return it instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Throwing;

impl OverflowTag for Throwing {
    const KIND: PolicyKind = PolicyKind::Throwing;

    #[cold]
    fn on_overflow<R: Integer>(_wrapped: R, event: &OverflowEvent<'_>) -> R {
        let error = event.to_error();
        tracing::debug!(%error, "raising overflow error");
        std::panic::panic_any(error)
    }
}

impl Throwing {
    /// Converts `source`, returning the overflow instead of raising it.
    pub fn try_convert<D: Integer, S: Integer>(source: S) -> NumericResult<D> {
        D::checked_cast(source).ok_or_else(|| {
            let polarity = if source.is_negative() {
                Polarity::Negative
            } else {
                Polarity::Positive
            };
            OverflowEvent::new(OperatorKind::Convert, polarity, &[&source])
                .to_error()
                .into()
        })
    }

    /// Truncates a float toward zero, returning the overflow instead of
    /// raising it.
    ///
    /// # Errors
    /// `InvalidInput` for NaN or an infinity, `Overflow` when the truncated
    /// value is outside `D`.
    pub fn try_convert_float<D: Integer>(value: f64) -> NumericResult<D> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        let truncated = value.trunc();
        if truncated >= D::MIN.as_f64() && truncated < 2f64.powi(D::DIGITS as i32) {
            return Ok(D::from_f64_native(truncated));
        }
        let polarity = if value < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Positive
        };
        Err(OverflowEvent::new(OperatorKind::Convert, polarity, &[&value])
            .to_error()
            .into())
    }

    /// Applies a binary operator, returning the overflow instead of raising it.
    ///
    /// # Errors
    /// `DivisionByZero` for a zero divisor, `Overflow` otherwise.
    pub fn try_apply<Op: BinaryOperator, R: Integer>(lhs: R, rhs: R) -> NumericResult<R> {
        if matches!(Op::KIND, OperatorKind::Divide | OperatorKind::Modulo) && rhs == R::ZERO {
            return Err(NumericError::DivisionByZero);
        }
        Op::checked(lhs, rhs).map_err(|polarity| {
            OverflowEvent::new(Op::KIND, polarity, &[&lhs, &rhs])
                .to_error()
                .into()
        })
    }

    pub fn try_apply_unary<Op: UnaryOperator, R: Integer>(operand: R) -> NumericResult<R> {
        Op::checked(operand).map_err(|polarity| {
            OverflowEvent::new(Op::KIND, polarity, &[&operand])
                .to_error()
                .into()
        })
    }

    pub fn try_apply_shift<Op: ShiftOperator, R: Integer>(lhs: R, amount: u32) -> NumericResult<R> {
        Op::checked(lhs, amount).map_err(|polarity| {
            OverflowEvent::new(Op::KIND, polarity, &[&lhs, &amount])
                .to_error()
                .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{AddOp, DivideOp, NegateOp, ShiftLeftOp};
    use crate::numeric::OverflowError;
    use std::panic;

    #[test]
    fn test_overflow_unwinds_with_error_payload() {
        let payload = panic::catch_unwind(|| Throwing::apply::<AddOp, i32>(i32::MAX, 1))
            .expect_err("overflow must unwind");
        let error = payload
            .downcast_ref::<OverflowError>()
            .expect("payload is an OverflowError");
        assert_eq!(error.operator, OperatorKind::Add);
        assert_eq!(error.polarity, Polarity::Positive);
        assert_eq!(error.to_string(), "positive overflow in add(2147483647, 1)");
    }

    #[test]
    fn test_in_range_results_pass_through() {
        assert_eq!(Throwing::convert::<u8, i32>(200), 200);
        assert_eq!(Throwing::apply::<AddOp, i32>(40, 2), 42);
    }

    #[test]
    fn test_try_convert() {
        assert_eq!(Throwing::try_convert::<u8, i32>(255), Ok(255));
        match Throwing::try_convert::<u16, i32>(-123) {
            Err(NumericError::Overflow(error)) => {
                assert_eq!(error.polarity, Polarity::Negative);
                assert_eq!(error.operands.as_slice(), &["-123".to_string()]);
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_try_convert_float() {
        assert_eq!(Throwing::try_convert_float::<i16>(-2.75), Ok(-2));
        assert_eq!(Throwing::try_convert_float::<u8>(255.9), Ok(255));
        assert_eq!(Throwing::try_convert_float::<i32>(f64::NAN), Err(NumericError::InvalidInput));
        assert_eq!(
            Throwing::try_convert_float::<i32>(f64::NEG_INFINITY),
            Err(NumericError::InvalidInput)
        );
        match Throwing::try_convert_float::<u8>(256.0) {
            Err(NumericError::Overflow(error)) => {
                assert_eq!(error.operator, OperatorKind::Convert);
                assert_eq!(error.polarity, Polarity::Positive);
                assert_eq!(error.operands.as_slice(), &["256".to_string()]);
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_try_apply() {
        assert_eq!(Throwing::try_apply::<DivideOp, i32>(1, 0), Err(NumericError::DivisionByZero));
        assert!(Throwing::try_apply::<AddOp, u8>(250, 6).is_err());
        assert_eq!(Throwing::try_apply_unary::<NegateOp, i8>(5), Ok(-5));
        assert!(matches!(
            Throwing::try_apply_shift::<ShiftLeftOp, i32>(-1_073_741_825, 1),
            Err(NumericError::Overflow(OverflowError { polarity: Polarity::Negative, .. }))
        ));
    }
}
