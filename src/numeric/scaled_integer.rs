// ============================================================================
// Scaled Integer
// Fixed-point value: a significand under a compile-time exponent and radix
// ============================================================================

use super::descale::descale;
use super::errors::{NumericError, NumericResult};
use super::overflow_integer::SaturatingInteger;
use super::scaled::{narrow, rescale, rescale_into};
use crate::domain::NumericDescriptor;
use crate::interfaces::{
    DivideOp, Integer, MultiplyOp, NegateOp, Number, OperatorKind, OverflowEvent, OverflowTag,
    Polarity,
};
use num_traits::WrappingSub;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value `significand * RADIX^EXPONENT`.
///
/// `N` is the significand's number type: a plain primitive (native
/// wraparound) or an [`OverflowInteger`](super::OverflowInteger), whose
/// policy then governs every overflow of this type. Exponent and radix
/// exist only in the type, so the layout is exactly that of `N`.
///
/// # Example
/// ```
/// use scaled_numeric::numeric::Q16_16;
///
/// let x = Q16_16::from_f64(1.5);
/// assert_eq!(x.significand(), 98_304);
///
/// let product = x * Q16_16::from_f64(2.5);
/// assert_eq!(product.to_f64(), 3.75);
///
/// // re-expressed in decimal hundredths
/// let cents = x.convert::<i64, -2, 10>();
/// assert_eq!(cents.significand(), 150);
/// assert_eq!(cents.to_string(), "1.50");
/// ```
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[repr(transparent)]
pub struct ScaledInteger<N, const EXPONENT: i32, const RADIX: u32 = 2> {
    significand: N,
}

/// Signed 16.16 binary fixed-point.
pub type Q16_16 = ScaledInteger<i32, -16>;

/// Q16.16 clamping on overflow.
pub type SaturatingQ16_16 = ScaledInteger<SaturatingInteger<i32>, -16>;

/// Signed 8.8 binary fixed-point.
pub type Q8_8 = ScaledInteger<i16, -8>;

/// Decimal fixed-point on `i64`; `Decimal64<-2>` counts hundredths.
pub type Decimal64<const EXPONENT: i32> = ScaledInteger<i64, EXPONENT, 10>;

pub type SaturatingDecimal64<const EXPONENT: i32> =
    ScaledInteger<SaturatingInteger<i64>, EXPONENT, 10>;

impl<N: Number, const EXPONENT: i32, const RADIX: u32> ScaledInteger<N, EXPONENT, RADIX> {
    /// Wraps a significand without any check.
    #[inline]
    pub const fn from_rep(significand: N) -> Self {
        const { assert!(RADIX >= 2, "radix must be at least 2") };
        Self { significand }
    }

    /// Wraps a raw significand without any check.
    #[inline]
    pub fn from_significand(significand: N::Rep) -> Self {
        Self::from_rep(N::from_rep(significand))
    }

    #[inline]
    pub fn rep(self) -> N {
        self.significand
    }

    #[inline]
    pub fn significand(self) -> N::Rep {
        self.significand.to_rep()
    }

    /// The integer `value`, under this type's policy.
    pub fn from_integer<S: Integer>(value: S) -> Self {
        Self::from_significand(rescale_into::<N::Tag, N::Rep, S>(
            value,
            0,
            EXPONENT,
            RADIX,
            OperatorKind::Convert,
            &[&value],
        ))
    }

    /// Integer part, truncated toward zero.
    pub fn to_integer(self) -> N::Rep {
        let significand = self.significand();
        rescale_into::<N::Tag, N::Rep, N::Rep>(
            significand,
            EXPONENT,
            0,
            RADIX,
            OperatorKind::Convert,
            &[&significand],
        )
    }

    /// Nearest lower-magnitude value to `value`. NaN becomes zero.
    pub fn from_f64(value: f64) -> Self {
        let scale = f64::from(RADIX).powi(EXPONENT.saturating_neg());
        Self::from_significand(N::Tag::convert_float::<N::Rep>(value * scale))
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.significand().as_f64() * f64::from(RADIX).powi(EXPONENT)
    }

    /// Re-expresses this value as `ScaledInteger<M, E2, R2>`.
    ///
    /// A different radix goes through [`descale`]; the destination's policy
    /// governs overflow and digits below the destination's exponent are
    /// truncated toward zero. A value too large for the conversion itself
    /// overflows with a wrapped value of zero.
    pub fn convert<M: Number, const E2: i32, const R2: u32>(self) -> ScaledInteger<M, E2, R2> {
        let significand = self.significand();
        let rep = if RADIX == R2 {
            rescale_into::<M::Tag, M::Rep, N::Rep>(
                significand,
                EXPONENT,
                E2,
                RADIX,
                OperatorKind::Convert,
                &[&significand],
            )
        } else {
            match descale::<N::Rep, R2>(significand, EXPONENT, RADIX) {
                Ok(descaled) => rescale_into::<M::Tag, M::Rep, <N::Rep as Integer>::Wider>(
                    descaled.significand,
                    descaled.exponent,
                    E2,
                    R2,
                    OperatorKind::Convert,
                    &[&significand],
                ),
                // beyond the intermediate, so no wrapped value is known
                Err(polarity) => narrow::<M::Tag, M::Rep, M::Rep>(
                    Err((<M::Rep as Integer>::ZERO, polarity)),
                    OperatorKind::Convert,
                    &[&significand],
                ),
            }
        };
        ScaledInteger::from_significand(rep)
    }

    /// Largest integer not above this one, at exponent 0.
    ///
    /// Binary radix only. A negative exponent shifts the significand right,
    /// rounding toward negative infinity. A positive exponent is already
    /// integral; moving it to exponent 0 follows the policy on overflow.
    pub fn floor(self) -> ScaledInteger<N, 0, RADIX> {
        const { assert!(RADIX == 2, "floor requires a binary radix") };
        if EXPONENT >= 0 {
            return self.convert();
        }

        let significand = self.significand();
        let shift = EXPONENT.unsigned_abs();
        let floored = if shift < <N::Rep as Integer>::BITS {
            significand >> shift as usize
        } else if significand.is_negative() {
            <N::Rep as Integer>::ZERO.wrapping_sub(&<N::Rep as Integer>::ONE)
        } else {
            <N::Rep as Integer>::ZERO
        };
        ScaledInteger::from_significand(floored)
    }

    pub fn abs(self) -> Self {
        let significand = self.significand();
        if significand.is_negative() {
            Self::from_significand(N::Tag::apply_unary::<NegateOp, N::Rep>(significand))
        } else {
            self
        }
    }

    /// Significand product; the exponents add.
    ///
    /// The `*` operator keeps this value's exponent instead.
    pub fn multiply<const E2: i32, const OUT: i32>(
        self,
        rhs: ScaledInteger<N, E2, RADIX>,
    ) -> ScaledInteger<N, OUT, RADIX> {
        const { assert!(EXPONENT + E2 == OUT, "product exponent must be the sum") };
        ScaledInteger::from_significand(N::Tag::apply::<MultiplyOp, N::Rep>(
            self.significand(),
            rhs.significand(),
        ))
    }

    /// Significand quotient, truncated toward zero; the exponents subtract.
    pub fn divide<const E2: i32, const OUT: i32>(
        self,
        rhs: ScaledInteger<N, E2, RADIX>,
    ) -> ScaledInteger<N, OUT, RADIX> {
        const { assert!(EXPONENT - E2 == OUT, "quotient exponent must be the difference") };
        ScaledInteger::from_significand(N::Tag::apply::<DivideOp, N::Rep>(
            self.significand(),
            rhs.significand(),
        ))
    }

    pub fn descriptor() -> NumericDescriptor {
        NumericDescriptor::new(
            <N::Rep as Integer>::NAME.to_string(),
            <N::Rep as Integer>::BITS,
            <N::Rep as Integer>::SIGNED,
        )
        .with_scale(EXPONENT, RADIX)
        .with_policy(<N::Tag as OverflowTag>::KIND)
    }
}

// ============================================================================
// Limits
// ============================================================================

impl<N: Number, const EXPONENT: i32, const RADIX: u32> ScaledInteger<N, EXPONENT, RADIX> {
    pub fn max_value() -> Self {
        Self::from_significand(<N::Rep as Integer>::MAX)
    }

    pub fn lowest() -> Self {
        Self::from_significand(<N::Rep as Integer>::MIN)
    }

    /// Smallest positive value: one unit in the last place.
    pub fn min_positive() -> Self {
        Self::from_significand(<N::Rep as Integer>::ONE)
    }

    pub fn epsilon() -> Self {
        Self::min_positive()
    }

    /// No infinity exists; the sentinel is zero.
    pub fn infinity() -> Self {
        Self::from_significand(<N::Rep as Integer>::ZERO)
    }

    /// No NaN exists; the sentinel is zero.
    pub fn quiet_nan() -> Self {
        Self::from_significand(<N::Rep as Integer>::ZERO)
    }
}

// ============================================================================
// Decimal Conversion (API boundaries)
// ============================================================================

fn overflow_error(value: &dyn fmt::Display, negative: bool) -> NumericError {
    let polarity = if negative {
        Polarity::Negative
    } else {
        Polarity::Positive
    };
    NumericError::Overflow(
        OverflowEvent::new(OperatorKind::Convert, polarity, &[value]).to_error(),
    )
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> ScaledInteger<N, EXPONENT, RADIX> {
    /// Conversion to `rust_decimal::Decimal` through [`descale`]; decimal
    /// digits finer than the representation can resolve are truncated.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the value needs more than 28 fractional digits
    /// - `Overflow` if the value exceeds the decimal's 96-bit mantissa
    pub fn to_decimal(self) -> NumericResult<Decimal> {
        let descaled = descale::<N::Rep, 10>(self.significand(), EXPONENT, RADIX)
            .map_err(|polarity| overflow_error(&self, polarity == Polarity::Negative))?;
        let negative = descaled.significand.is_negative();
        let mut mantissa = <i128 as Integer>::checked_cast(descaled.significand)
            .ok_or_else(|| overflow_error(&self, negative))?;

        let scale = if descaled.exponent < 0 {
            descaled.exponent.unsigned_abs()
        } else {
            for _ in 0..descaled.exponent {
                mantissa = mantissa
                    .checked_mul(10)
                    .ok_or_else(|| overflow_error(&self, negative))?;
            }
            0
        };
        if scale > 28 {
            return Err(NumericError::PrecisionLoss);
        }
        Decimal::try_from_i128_with_scale(mantissa, scale)
            .map_err(|_| overflow_error(&self, negative))
    }

    /// Exact conversion from `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - `PrecisionLoss` if `d` is not a multiple of this type's unit
    /// - `Overflow` if the value is too large
    pub fn from_decimal(d: Decimal) -> NumericResult<Self> {
        let d = d.normalize();
        let negative = d.is_sign_negative();
        let radix = i128::from(RADIX);
        let mut numerator = d.mantissa();
        let mut denominator = 10i128.pow(d.scale());

        for _ in 0..EXPONENT.unsigned_abs() {
            if EXPONENT < 0 {
                numerator = numerator
                    .checked_mul(radix)
                    .ok_or_else(|| overflow_error(&d, negative))?;
            } else {
                match denominator.checked_mul(radix) {
                    Some(value) => denominator = value,
                    None if numerator == 0 => break,
                    None => return Err(NumericError::PrecisionLoss),
                }
            }
        }

        if numerator % denominator != 0 {
            return Err(NumericError::PrecisionLoss);
        }
        let significand = <N::Rep as Integer>::checked_cast(numerator / denominator)
            .ok_or_else(|| overflow_error(&d, negative))?;
        Ok(Self::from_significand(significand))
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Orders two significands of one radix by first moving both to the lower
/// exponent. A side that leaves the widened range is decided by its sign.
fn compare_scaled<R: Integer>(
    lhs: R,
    lhs_exponent: i32,
    rhs: R,
    rhs_exponent: i32,
    radix: u32,
) -> Ordering {
    let target = lhs_exponent.min(rhs_exponent);
    let lhs = rescale::<R::Wider>(lhs.widen(), lhs_exponent, target, radix);
    let rhs = rescale::<R::Wider>(rhs.widen(), rhs_exponent, target, radix);
    let beyond = |polarity: Polarity| match polarity {
        Polarity::Positive => Ordering::Greater,
        Polarity::Negative => Ordering::Less,
    };
    match (lhs, rhs) {
        (Ok(lhs), Ok(rhs)) => lhs.cmp(&rhs),
        (Err((_, polarity)), Ok(_)) => beyond(polarity),
        (Ok(_), Err((_, polarity))) => beyond(polarity).reverse(),
        (Err((_, lhs)), Err((_, rhs))) => beyond(lhs).cmp(&beyond(rhs)),
    }
}

impl<N: Number, const E1: i32, const E2: i32, const RADIX: u32>
    PartialEq<ScaledInteger<N, E2, RADIX>> for ScaledInteger<N, E1, RADIX>
{
    fn eq(&self, other: &ScaledInteger<N, E2, RADIX>) -> bool {
        if E1 == E2 {
            return self.significand() == other.significand();
        }
        compare_scaled(self.significand(), E1, other.significand(), E2, RADIX) == Ordering::Equal
    }
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> Eq for ScaledInteger<N, EXPONENT, RADIX> {}

impl<N: Number, const E1: i32, const E2: i32, const RADIX: u32>
    PartialOrd<ScaledInteger<N, E2, RADIX>> for ScaledInteger<N, E1, RADIX>
{
    fn partial_cmp(&self, other: &ScaledInteger<N, E2, RADIX>) -> Option<Ordering> {
        Some(compare_scaled(
            self.significand(),
            E1,
            other.significand(),
            E2,
            RADIX,
        ))
    }
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> Ord for ScaledInteger<N, EXPONENT, RADIX> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.significand().cmp(&other.significand())
    }
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> Hash for ScaledInteger<N, EXPONENT, RADIX> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significand().hash(state);
    }
}

// ============================================================================
// Formatting
// ============================================================================

impl<N: Number, const EXPONENT: i32, const RADIX: u32> fmt::Display
    for ScaledInteger<N, EXPONENT, RADIX>
{
    /// Positional decimal of the descaled value, or `significand*radix^exponent`
    /// when the value is too large to descale.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match descale::<N::Rep, 10>(self.significand(), EXPONENT, RADIX) {
            Ok(decimal) => f.pad(&decimal.to_string()),
            Err(_) => f.pad(&format!("{}*{}^{}", self.significand(), RADIX, EXPONENT)),
        }
    }
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> fmt::Debug
    for ScaledInteger<N, EXPONENT, RADIX>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScaledInteger({}, {})", self, Self::descriptor())
    }
}
