// ============================================================================
// Scale Arithmetic
// Moving a significand between exponents of one radix
// ============================================================================

use crate::interfaces::{Integer, OperatorKind, OverflowEvent, OverflowTag, Polarity};
use std::fmt;

/// `radix^exponent` in `W`, `None` when it does not fit.
pub fn checked_power<W: Integer>(radix: u32, exponent: u32) -> Option<W> {
    let base = W::from_radix(radix)?;
    let mut power = W::ONE;
    for _ in 0..exponent {
        power = power.checked_mul(&base)?;
    }
    Some(power)
}

/// `radix^exponent` modulo `2^BITS`, by squaring.
fn wrapping_power<W: Integer>(radix: u32, mut exponent: u32) -> W {
    let mut base = W::wrapping_cast(radix);
    let mut power = W::ONE;
    while exponent > 0 {
        if exponent & 1 == 1 {
            power = power.wrapping_mul(&base);
        }
        base = base.wrapping_mul(&base);
        exponent >>= 1;
    }
    power
}

/// Re-expresses `significand * radix^from` at exponent `to`.
///
/// Moving to a higher exponent divides and truncates toward zero. Moving to
/// a lower exponent multiplies; when the product leaves `W` the error holds
/// the wrapped product and the overflow direction.
pub fn rescale<W: Integer>(
    significand: W,
    from: i32,
    to: i32,
    radix: u32,
) -> Result<W, (W, Polarity)> {
    if from == to || significand == W::ZERO {
        return Ok(significand);
    }
    let steps = (i64::from(from) - i64::from(to)).unsigned_abs();
    let steps = u32::try_from(steps).unwrap_or(u32::MAX);

    if to < from {
        checked_power::<W>(radix, steps)
            .and_then(|power| significand.checked_mul(&power))
            .ok_or_else(|| {
                let polarity = if significand.is_negative() {
                    Polarity::Negative
                } else {
                    Polarity::Positive
                };
                (
                    significand.wrapping_mul(&wrapping_power::<W>(radix, steps)),
                    polarity,
                )
            })
    } else {
        // stepwise, so that radix powers beyond W's range still truncate correctly
        let Some(base) = W::from_radix(radix) else {
            return Ok(W::ZERO);
        };
        let mut value = significand;
        for _ in 0..steps {
            if value == W::ZERO {
                break;
            }
            value = value / base;
        }
        Ok(value)
    }
}

/// Narrows an intermediate result into `D` under the policy `T`.
///
/// Both an intermediate that already overflowed and one that does not fit
/// `D` are reported as an overflow of `operator` on `operands`.
pub fn narrow<T: OverflowTag, D: Integer, W: Integer>(
    result: Result<W, (W, Polarity)>,
    operator: OperatorKind,
    operands: &[&dyn fmt::Display],
) -> D {
    let (wrapped, polarity) = match result {
        Ok(value) => match D::checked_cast(value) {
            Some(fits) => return fits,
            None if value.is_negative() => (value, Polarity::Negative),
            None => (value, Polarity::Positive),
        },
        Err(overflowed) => overflowed,
    };
    T::on_overflow(
        D::wrapping_cast(wrapped),
        &OverflowEvent::new(operator, polarity, operands),
    )
}

/// Moves `value` from exponent `from` to exponent `to` and narrows it
/// into `D` under the policy `T`.
///
/// Growing the significand happens in `D::Wider`, so a value that ends up
/// fitting `D` is never lost to an intermediate overflow.
pub fn rescale_into<T: OverflowTag, D: Integer, S: Integer>(
    value: S,
    from: i32,
    to: i32,
    radix: u32,
    operator: OperatorKind,
    operands: &[&dyn fmt::Display],
) -> D {
    if to >= from {
        return narrow::<T, D, S>(rescale::<S>(value, from, to, radix), operator, operands);
    }
    match <D::Wider as Integer>::checked_cast(value) {
        Some(wide) => narrow::<T, D, D::Wider>(
            rescale::<D::Wider>(wide, from, to, radix),
            operator,
            operands,
        ),
        None => {
            // already beyond D::Wider, so S is the wider of the two
            let wrapped = match rescale::<S>(value, from, to, radix) {
                Ok(value) | Err((value, _)) => value,
            };
            let polarity = if value.is_negative() {
                Polarity::Negative
            } else {
                Polarity::Positive
            };
            T::on_overflow(
                D::wrapping_cast(wrapped),
                &OverflowEvent::new(operator, polarity, operands),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_power() {
        assert_eq!(checked_power::<i32>(10, 9), Some(1_000_000_000));
        assert_eq!(checked_power::<i32>(10, 10), None);
        assert_eq!(checked_power::<u8>(2, 7), Some(128));
        assert_eq!(checked_power::<i8>(2, 7), None);
    }

    #[test]
    fn test_rescale_down_multiplies() {
        assert_eq!(rescale::<i32>(3, 0, -2, 10), Ok(300));
        assert_eq!(rescale::<i32>(-3, 1, -1, 2), Ok(-12));
    }

    #[test]
    fn test_rescale_up_truncates_toward_zero() {
        assert_eq!(rescale::<i32>(-7, -1, 0, 2), Ok(-3));
        assert_eq!(rescale::<i32>(7, -1, 0, 2), Ok(3));
        assert_eq!(rescale::<i8>(i8::MIN, 0, 7, 2), Ok(-1));
        assert_eq!(rescale::<i8>(i8::MIN, 0, 8, 2), Ok(0));
        assert_eq!(rescale::<i64>(123_456, -3, 0, 10), Ok(123));
    }

    #[test]
    fn test_narrow_applies_policy() {
        use crate::overflow::{Native, Saturating};
        let operand = 100i8;
        let fits: i8 = narrow::<Saturating, i8, i16>(Ok(-5), OperatorKind::Multiply, &[&operand]);
        assert_eq!(fits, -5);
        let clamped: i8 = narrow::<Saturating, i8, i16>(Ok(300), OperatorKind::Multiply, &[&operand]);
        assert_eq!(clamped, i8::MAX);
        let failed: i8 = narrow::<Saturating, i8, i16>(
            Err((0, Polarity::Negative)),
            OperatorKind::Multiply,
            &[&operand],
        );
        assert_eq!(failed, i8::MIN);
        let wrapped: u8 = narrow::<Native, u8, u16>(Ok(300), OperatorKind::Convert, &[&operand]);
        assert_eq!(wrapped, 44);
    }

    #[test]
    fn test_rescale_into_uses_destination_headroom() {
        use crate::overflow::{Native, Saturating};
        let value = 1i8;
        // 2^40 overflows the source but fits the destination
        let wide: i64 = rescale_into::<Saturating, i64, i8>(value, 0, -40, 2, OperatorKind::Convert, &[&value]);
        assert_eq!(wide, 1 << 40);
        let clamped: i16 = rescale_into::<Saturating, i16, i8>(-3, 0, -15, 2, OperatorKind::Convert, &[&value]);
        assert_eq!(clamped, i16::MIN);
        let big = i64::MAX;
        let wrapped: i8 = rescale_into::<Native, i8, i64>(big, 0, -1, 2, OperatorKind::Convert, &[&big]);
        assert_eq!(wrapped, -2);
        let shrunk: u8 = rescale_into::<Saturating, u8, u32>(1000, 0, 2, 10, OperatorKind::Convert, &[&big]);
        assert_eq!(shrunk, 10);
    }

    #[test]
    fn test_rescale_overflow_reports_wrapped_value() {
        assert_eq!(
            rescale::<i8>(100, 0, -1, 2),
            Err((-56, Polarity::Positive))
        );
        assert_eq!(
            rescale::<i16>(-1, 0, -20, 2),
            Err((0, Polarity::Negative))
        );
    }
}
