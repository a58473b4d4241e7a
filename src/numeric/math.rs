// ============================================================================
// Elementary Functions
// Fixed-point exp2 and float-backed placeholders for the rest
// ============================================================================

use super::scaled::narrow;
use super::scaled_integer::ScaledInteger;
use crate::interfaces::{Integer, Number, OperatorKind, Polarity};

/// `c` in Q0.64, rounded.
const fn q64(c: f64) -> u64 {
    (c * 18_446_744_073_709_551_616.0 + 0.5) as u64
}

/// Minimax coefficients of `2^f - 1 = a1 f + a2 f^2 + ... + a7 f^7` on
/// `[0, 1)`, lowest order first.
const EXP2_COEFFICIENTS: [u64; 7] = [
    q64(0.693_147_186_083_882_5),
    q64(0.240_226_384_618_112_9),
    q64(0.055_505_126_858_894_846),
    q64(0.009_614_017_013_719_252),
    q64(0.001_342_263_479_755_856_4),
    q64(0.000_143_523_142_263_138_36),
    q64(0.000_021_498_763_160_402_416),
];

/// `2^f - 1` for a Q0.64 fraction, in Q0.64.
fn exp2_fraction(fraction: u128) -> u128 {
    let mut acc = 0u128;
    for &coefficient in EXP2_COEFFICIENTS.iter().rev() {
        acc = u128::from(coefficient) + ((acc * fraction) >> 64);
    }
    (acc * fraction) >> 64
}

/// Binary exponential, accurate to about one unit in the last place for
/// representations up to 32 bits.
///
/// Results below one unit in the last place become that unit. Results
/// beyond the representation follow its overflow policy.
///
/// # Example
/// ```
/// use scaled_numeric::numeric::{math, Q16_16};
///
/// assert_eq!(math::exp2(Q16_16::from_integer(3i32)).to_f64(), 8.0);
/// assert_eq!(math::exp2(Q16_16::from_integer(-1i32)).to_f64(), 0.5);
/// ```
pub fn exp2<N: Number, const EXPONENT: i32>(
    x: ScaledInteger<N, EXPONENT, 2>,
) -> ScaledInteger<N, EXPONENT, 2> {
    let significand = x.significand();
    let overflow = |wrapped: u128| {
        ScaledInteger::<N, EXPONENT, 2>::from_significand(narrow::<N::Tag, N::Rep, u128>(
            Err((wrapped, Polarity::Positive)),
            OperatorKind::ShiftLeft,
            &[&significand],
        ))
    };
    let Some(value) = <i128 as Integer>::checked_cast(significand) else {
        return overflow(0);
    };

    // integer part and Q0.64 fraction of x
    let (floored, fraction) = if EXPONENT < 0 {
        let shift = EXPONENT.unsigned_abs();
        if shift >= 127 {
            (if value < 0 { -1 } else { 0 }, 0)
        } else {
            let floored = value >> shift;
            let bits = (value - (floored << shift)) as u128;
            let fraction = if shift <= 64 {
                bits << (64 - shift)
            } else {
                bits >> (shift - 64)
            };
            (floored, fraction)
        }
    } else {
        let scaled = 1i128
            .checked_shl(EXPONENT.unsigned_abs())
            .filter(|&unit| unit > 0)
            .and_then(|unit| value.checked_mul(unit));
        match scaled {
            Some(floored) => (floored, 0),
            None if value < 0 => (i128::MIN, 0),
            None => return overflow(0),
        }
    };

    if floored <= i128::from(EXPONENT) {
        return ScaledInteger::from_significand(<N::Rep as Integer>::ONE);
    }

    let mantissa = (1u128 << 64) + exp2_fraction(fraction);
    let shift = floored - i128::from(EXPONENT) - 64;
    let result = if shift < 0 {
        Ok(mantissa >> shift.unsigned_abs())
    } else if shift < 63 {
        Ok(mantissa << shift)
    } else {
        let wrapped = u32::try_from(shift)
            .ok()
            .and_then(|shift| mantissa.checked_shl(shift))
            .unwrap_or(0);
        Err((wrapped, Polarity::Positive))
    };
    ScaledInteger::from_significand(narrow::<N::Tag, N::Rep, u128>(
        result,
        OperatorKind::ShiftLeft,
        &[&significand],
    ))
}

// ============================================================================
// Float-backed placeholders
// ============================================================================

macro_rules! through_f64 {
    ($($(#[$doc:meta])* $name:ident;)*) => {$(
        $(#[$doc])*
        pub fn $name<N: Number, const EXPONENT: i32, const RADIX: u32>(
            x: ScaledInteger<N, EXPONENT, RADIX>,
        ) -> ScaledInteger<N, EXPONENT, RADIX> {
            ScaledInteger::from_f64(x.to_f64().$name())
        }
    )*};
}

through_f64! {
    /// Sine, computed in `f64`.
    sin;
    /// Cosine, computed in `f64`.
    cos;
    /// Natural exponential, computed in `f64`.
    exp;
    /// Square root, computed in `f64`; negative input gives zero.
    sqrt;
}
