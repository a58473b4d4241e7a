// ============================================================================
// Scaled Integer Rules
// Resolve impls for fixed-point values and their plain or float peers
// ============================================================================

use super::resolution::{Resolve, Rule};
use crate::interfaces::{
    AddOp, ArithmeticOperator, BinaryOperator, DivideOp, Integer, ModuloOp, MultiplyOp, Number,
    OperatorKind, OverflowEvent, OverflowTag, Polarity, PolicyKind, SubtractOp,
};
use crate::numeric::{narrow, rescale, rescale_into, ScaledInteger};

/// An arithmetic operator on significands that carry an exponent.
///
/// The result is the significand of `lhs <op> rhs` at `lhs_exponent`, so
/// `*` and `/` keep the left operand's type. For a result whose exponent is
/// the sum or difference of the operands' exponents, use
/// [`ScaledInteger::multiply`] and [`ScaledInteger::divide`].
pub trait ScaledOperator: ArithmeticOperator {
    fn scaled<T: OverflowTag, R: Integer>(
        lhs: R,
        lhs_exponent: i32,
        rhs: R,
        rhs_exponent: i32,
        radix: u32,
    ) -> R;
}

/// `rhs` moved to the left operand's exponent.
#[inline]
fn aligned<T: OverflowTag, R: Integer>(rhs: R, from: i32, to: i32, radix: u32) -> R {
    rescale_into::<T, R, R>(rhs, from, to, radix, OperatorKind::Convert, &[&rhs])
}

macro_rules! aligned_operator {
    ($($op:ty),*) => {$(
        impl ScaledOperator for $op {
            #[inline]
            fn scaled<T: OverflowTag, R: Integer>(
                lhs: R,
                lhs_exponent: i32,
                rhs: R,
                rhs_exponent: i32,
                radix: u32,
            ) -> R {
                T::apply::<$op, R>(lhs, aligned::<T, R>(rhs, rhs_exponent, lhs_exponent, radix))
            }
        }
    )*};
}

aligned_operator!(AddOp, SubtractOp, ModuloOp);

impl ScaledOperator for MultiplyOp {
    /// Exact product in the widened representation, then back to the left
    /// operand's exponent.
    fn scaled<T: OverflowTag, R: Integer>(
        lhs: R,
        lhs_exponent: i32,
        rhs: R,
        rhs_exponent: i32,
        radix: u32,
    ) -> R {
        let (a, b) = (lhs.widen(), rhs.widen());
        match MultiplyOp::checked(a, b) {
            Ok(product) => rescale_into::<T, R, R::Wider>(
                product,
                lhs_exponent.saturating_add(rhs_exponent),
                lhs_exponent,
                radix,
                OperatorKind::Multiply,
                &[&lhs, &rhs],
            ),
            Err(polarity) => T::on_overflow(
                R::wrapping_cast(MultiplyOp::wrapping(a, b)),
                &OverflowEvent::new(OperatorKind::Multiply, polarity, &[&lhs, &rhs]),
            ),
        }
    }
}

impl ScaledOperator for DivideOp {
    /// The dividend gains the divisor's fractional digits before dividing,
    /// so the quotient keeps the left operand's resolution.
    ///
    /// # Panics
    /// On a zero divisor.
    fn scaled<T: OverflowTag, R: Integer>(
        lhs: R,
        _lhs_exponent: i32,
        rhs: R,
        rhs_exponent: i32,
        radix: u32,
    ) -> R {
        let polarity = if lhs.is_negative() != rhs.is_negative() {
            Polarity::Negative
        } else {
            Polarity::Positive
        };
        let divisor = rhs.widen();
        let quotient = rescale::<R::Wider>(lhs.widen(), 0, rhs_exponent.min(0), radix)
            .map_err(|(wrapped, _)| (wrapped, polarity))
            .and_then(|dividend| {
                DivideOp::checked(dividend, divisor)
                    .map_err(|polarity| (DivideOp::wrapping(dividend, divisor), polarity))
            });
        let quotient = if rhs_exponent > 0 {
            quotient.and_then(|q| rescale::<R::Wider>(q, 0, rhs_exponent, radix))
        } else {
            quotient
        };
        narrow::<T, R, R::Wider>(quotient, OperatorKind::Divide, &[&lhs, &rhs])
    }
}

// ============================================================================
// Rule 1: floating peer
// ============================================================================

macro_rules! floating_peer {
    ($($float:ty),*) => {$(
        impl<Op, N, const EXPONENT: i32, const RADIX: u32> Resolve<Op, $float>
            for ScaledInteger<N, EXPONENT, RADIX>
        where
            Op: ArithmeticOperator,
            N: Number,
        {
            const RULE: Rule = Rule::FloatingPeer;
            const POLICY: Option<PolicyKind> = None;
            type Output = $float;

            #[inline]
            fn resolve(lhs: Self, rhs: $float) -> $float {
                Op::floating(lhs.to_f64() as $float, rhs)
            }
        }

        impl<Op, N, const EXPONENT: i32, const RADIX: u32>
            Resolve<Op, ScaledInteger<N, EXPONENT, RADIX>> for $float
        where
            Op: ArithmeticOperator,
            N: Number,
        {
            const RULE: Rule = Rule::FloatingPeer;
            const POLICY: Option<PolicyKind> = None;
            type Output = $float;

            #[inline]
            fn resolve(lhs: $float, rhs: ScaledInteger<N, EXPONENT, RADIX>) -> $float {
                Op::floating(lhs, rhs.to_f64() as $float)
            }
        }
    )*};
}

floating_peer!(f32, f64);

// ============================================================================
// Rules 2 and 3: a plain integer becomes a value of the scaled type
// ============================================================================

macro_rules! lift_plain {
    ($($plain:ty),*) => {$(
        impl<Op, N, const EXPONENT: i32, const RADIX: u32> Resolve<Op, $plain>
            for ScaledInteger<N, EXPONENT, RADIX>
        where
            Op: ScaledOperator,
            N: Number,
            N::Rep: From<$plain>,
        {
            const RULE: Rule = Rule::LiftPlainRhs;
            const POLICY: Option<PolicyKind> = Some(<N::Tag as OverflowTag>::KIND);
            type Output = Self;

            #[inline]
            fn resolve(lhs: Self, rhs: $plain) -> Self {
                <Self as Resolve<Op>>::resolve(lhs, Self::from_integer(rhs))
            }
        }

        impl<Op, N, const EXPONENT: i32, const RADIX: u32>
            Resolve<Op, ScaledInteger<N, EXPONENT, RADIX>> for $plain
        where
            Op: ScaledOperator,
            N: Number,
            N::Rep: From<$plain>,
        {
            const RULE: Rule = Rule::LiftPlainLhs;
            const POLICY: Option<PolicyKind> = Some(<N::Tag as OverflowTag>::KIND);
            type Output = ScaledInteger<N, EXPONENT, RADIX>;

            #[inline]
            fn resolve(
                lhs: $plain,
                rhs: ScaledInteger<N, EXPONENT, RADIX>,
            ) -> ScaledInteger<N, EXPONENT, RADIX> {
                let lhs = ScaledInteger::<N, EXPONENT, RADIX>::from_integer(lhs);
                <ScaledInteger<N, EXPONENT, RADIX> as Resolve<Op>>::resolve(lhs, rhs)
            }
        }
    )*};
}

lift_plain!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

// ============================================================================
// Rule 4: two scaled values of one number type and radix
// ============================================================================

impl<Op, N, const E1: i32, const E2: i32, const RADIX: u32> Resolve<Op, ScaledInteger<N, E2, RADIX>>
    for ScaledInteger<N, E1, RADIX>
where
    Op: ScaledOperator,
    N: Number,
{
    const RULE: Rule = Rule::FamilyCombine;
    const POLICY: Option<PolicyKind> = Some(<N::Tag as OverflowTag>::KIND);
    type Output = Self;

    #[inline]
    fn resolve(lhs: Self, rhs: ScaledInteger<N, E2, RADIX>) -> Self {
        Self::from_significand(Op::scaled::<N::Tag, N::Rep>(
            lhs.significand(),
            E1,
            rhs.significand(),
            E2,
            RADIX,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::resolution::resolution;
    use crate::numeric::{
        Decimal64, OverflowError, Q16_16, SaturatingQ16_16, ScaledInteger, ThrowingInteger,
    };
    use std::panic;

    fn q(value: f64) -> Q16_16 {
        Q16_16::from_f64(value)
    }

    #[test]
    fn test_same_scale_arithmetic() {
        assert_eq!((q(1.5) + q(2.25)).to_f64(), 3.75);
        assert_eq!((q(1.5) - q(2.25)).to_f64(), -0.75);
        assert_eq!((q(1.5) * q(2.5)).to_f64(), 3.75);
        assert_eq!((q(3.75) / q(1.5)).to_f64(), 2.5);
        assert_eq!((q(3.75) % q(1.5)).to_f64(), 0.75);
        assert_eq!((q(-1.5) * q(2.5)).to_f64(), -3.75);
    }

    #[test]
    fn test_mixed_exponents_take_the_left_scale() {
        let half = ScaledInteger::<i32, -8>::from_significand(128);
        let sum: Q16_16 = q(1.5) + half;
        assert_eq!(sum.to_f64(), 2.0);

        let two_and_a_half = ScaledInteger::<i32, -8>::from_significand(640);
        assert_eq!((q(1.5) * two_and_a_half).significand(), 245_760);
        let one_and_a_half = ScaledInteger::<i32, -8>::from_significand(384);
        assert_eq!((q(3.75) / one_and_a_half).significand(), 163_840);
    }

    #[test]
    fn test_decimal_arithmetic() {
        let price = Decimal64::<-2>::from_significand(1999);
        let total = price * 3i32;
        assert_eq!(total.significand(), 5997);
        let share = total / 4i32;
        assert_eq!(share.to_string(), "14.99");
    }

    #[test]
    fn test_plain_operands_are_lifted() {
        assert_eq!((1i32 - q(0.5)).to_f64(), 0.5);
        assert_eq!((10i32 / q(4.0)).to_f64(), 2.5);
        assert_eq!((q(0.25) + 1i16).to_f64(), 1.25);
        assert_eq!((q(0.25) * 4u8).to_f64(), 1.0);
    }

    #[test]
    fn test_floating_peer() {
        let product: f64 = q(1.5) * 2.0f64;
        assert_eq!(product, 3.0);
        let sum: f32 = 0.25f32 + q(1.5);
        assert_eq!(sum, 1.75);
    }

    #[test]
    fn test_saturating_scaled_overflow() {
        let max = SaturatingQ16_16::max_value();
        assert_eq!(max + 1i32, max);
        assert_eq!((max * SaturatingQ16_16::from_integer(2i32)), max);
        assert_eq!(
            SaturatingQ16_16::lowest() * SaturatingQ16_16::from_integer(2i32),
            SaturatingQ16_16::lowest()
        );
        assert_eq!(
            (SaturatingQ16_16::from_integer(1000i32) / SaturatingQ16_16::from_f64(0.001))
                .significand(),
            i32::MAX
        );
    }

    #[test]
    fn test_throwing_scaled_overflow_reports_operator() {
        type Throwing8_8 = ScaledInteger<ThrowingInteger<i16>, -8>;
        let max = Throwing8_8::max_value();
        let payload = panic::catch_unwind(|| max * 2i16).expect_err("must overflow");
        let error = payload
            .downcast_ref::<OverflowError>()
            .expect("OverflowError payload");
        assert_eq!(error.operator, OperatorKind::Multiply);
        assert_eq!(error.polarity, Polarity::Positive);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_division_by_zero_panics() {
        let _ = q(1.0) / Q16_16::from_significand(0);
    }

    #[test]
    fn test_rule_selection() {
        assert_eq!(resolution::<AddOp, Q16_16, Q16_16>().rule, Rule::FamilyCombine);
        assert_eq!(resolution::<AddOp, Q16_16, i16>().rule, Rule::LiftPlainRhs);
        assert_eq!(resolution::<MultiplyOp, u8, Q16_16>().rule, Rule::LiftPlainLhs);
        assert_eq!(resolution::<DivideOp, Q16_16, f32>().rule, Rule::FloatingPeer);
        assert_eq!(
            resolution::<AddOp, SaturatingQ16_16, i32>().policy,
            Some(PolicyKind::Saturating)
        );
    }
}
