// ============================================================================
// Overflow Integer
// An integer representation paired with a compile-time overflow policy
// ============================================================================

use super::errors::NumericResult;
use crate::interfaces::{
    AddOp, DivideOp, Integer, ModuloOp, MultiplyOp, NegateOp, Number, OverflowTag, ShiftLeftOp,
    SubtractOp,
};
use crate::overflow::{Native, Saturating, Throwing, Trapping};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer of representation `R` whose arithmetic follows the policy `T`.
///
/// The tag is part of the type and carries no storage, so the layout is
/// exactly that of `R`. Operators are resolved by the engine
/// (see [`crate::engine`]): mixing with a plain primitive adopts this
/// value's tag, mixing with a float yields a float, and mixing two tags of
/// different families does not compile.
///
/// # Example
/// ```
/// use scaled_numeric::numeric::SaturatingInteger;
///
/// let x = SaturatingInteger::<i32>::from_rep(i32::MAX);
/// assert_eq!((x + 1i32).rep(), i32::MAX);
///
/// let small = SaturatingInteger::<u8>::new(259i32);
/// assert_eq!(small.rep(), 255);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[repr(transparent)]
pub struct OverflowInteger<R, T = Native> {
    rep: R,
    #[cfg_attr(feature = "serde", serde(skip))]
    tag: PhantomData<T>,
}

pub type NativeInteger<R> = OverflowInteger<R, Native>;
pub type SaturatingInteger<R> = OverflowInteger<R, Saturating>;
pub type TrappingInteger<R> = OverflowInteger<R, Trapping>;
pub type ThrowingInteger<R> = OverflowInteger<R, Throwing>;

impl<R: Integer, T: OverflowTag> OverflowInteger<R, T> {
    pub const MIN: Self = Self::from_rep(R::MIN);
    pub const MAX: Self = Self::from_rep(R::MAX);
    pub const ZERO: Self = Self::from_rep(R::ZERO);
    pub const ONE: Self = Self::from_rep(R::ONE);

    /// Wraps a raw value without any check.
    #[inline]
    pub const fn from_rep(rep: R) -> Self {
        Self {
            rep,
            tag: PhantomData,
        }
    }

    /// Converts `value` into this representation, applying the policy when
    /// it is out of range.
    #[inline]
    pub fn new<S: Integer>(value: S) -> Self {
        Self::from_rep(T::convert::<R, S>(value))
    }

    /// Converts any number, with this type's policy governing the range.
    #[inline]
    pub fn convert_from<N: Number>(value: N) -> Self {
        Self::new(value.to_rep())
    }

    /// Truncates a float toward zero. NaN becomes zero.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self::from_rep(T::convert_float::<R>(value))
    }

    #[inline]
    pub fn rep(self) -> R {
        self.rep
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.rep.as_f64()
    }

    /// Absolute value; `MIN` of a signed representation overflows positively.
    #[inline]
    pub fn abs(self) -> Self {
        if self.rep.is_negative() {
            Self::from_rep(T::apply_unary::<NegateOp, R>(self.rep))
        } else {
            self
        }
    }

    /// Same value under another policy.
    #[inline]
    pub fn with_tag<U: OverflowTag>(self) -> OverflowInteger<R, U> {
        OverflowInteger::from_rep(self.rep)
    }

    /// Same value in another representation, under this policy.
    #[inline]
    pub fn cast<R2: Integer>(self) -> OverflowInteger<R2, T> {
        OverflowInteger::new(self.rep)
    }
}

impl<R: Integer> OverflowInteger<R, Throwing> {
    /// Conversion that reports overflow as an error.
    pub fn try_new<S: Integer>(value: S) -> NumericResult<Self> {
        Throwing::try_convert::<R, S>(value).map(Self::from_rep)
    }

    /// Float conversion that reports NaN, infinities and overflow as errors.
    pub fn try_from_f64(value: f64) -> NumericResult<Self> {
        Throwing::try_convert_float::<R>(value).map(Self::from_rep)
    }

    pub fn try_add(self, rhs: Self) -> NumericResult<Self> {
        Throwing::try_apply::<AddOp, R>(self.rep, rhs.rep).map(Self::from_rep)
    }

    pub fn try_sub(self, rhs: Self) -> NumericResult<Self> {
        Throwing::try_apply::<SubtractOp, R>(self.rep, rhs.rep).map(Self::from_rep)
    }

    pub fn try_mul(self, rhs: Self) -> NumericResult<Self> {
        Throwing::try_apply::<MultiplyOp, R>(self.rep, rhs.rep).map(Self::from_rep)
    }

    /// # Errors
    /// `DivisionByZero` for a zero divisor, `Overflow` for `MIN / -1`.
    pub fn try_div(self, rhs: Self) -> NumericResult<Self> {
        Throwing::try_apply::<DivideOp, R>(self.rep, rhs.rep).map(Self::from_rep)
    }

    pub fn try_rem(self, rhs: Self) -> NumericResult<Self> {
        Throwing::try_apply::<ModuloOp, R>(self.rep, rhs.rep).map(Self::from_rep)
    }

    pub fn try_neg(self) -> NumericResult<Self> {
        Throwing::try_apply_unary::<NegateOp, R>(self.rep).map(Self::from_rep)
    }

    pub fn try_shl(self, amount: u32) -> NumericResult<Self> {
        Throwing::try_apply_shift::<ShiftLeftOp, R>(self.rep, amount).map(Self::from_rep)
    }
}

impl<R: Integer, T: OverflowTag> Number for OverflowInteger<R, T> {
    type Rep = R;
    type Tag = T;

    #[inline]
    fn to_rep(self) -> R {
        self.rep
    }

    #[inline]
    fn from_rep(rep: R) -> Self {
        OverflowInteger::from_rep(rep)
    }
}

// ============================================================================
// Comparison with the raw representation
// ============================================================================

impl<R: Integer, T: OverflowTag> PartialEq<R> for OverflowInteger<R, T> {
    #[inline]
    fn eq(&self, other: &R) -> bool {
        self.rep == *other
    }
}

impl<R: Integer, T: OverflowTag> PartialOrd<R> for OverflowInteger<R, T> {
    #[inline]
    fn partial_cmp(&self, other: &R) -> Option<Ordering> {
        self.rep.partial_cmp(other)
    }
}

// ============================================================================
// Lossless construction from narrower primitives
// ============================================================================

macro_rules! lossless_from {
    ($($wide:ty => [$($narrow:ty),*];)*) => {$($(
        impl<T: OverflowTag> From<$narrow> for OverflowInteger<$wide, T> {
            #[inline]
            fn from(value: $narrow) -> Self {
                Self::from_rep(<$wide>::from(value))
            }
        }
    )*)*};
}

lossless_from! {
    i8 => [i8];
    i16 => [i8, i16, u8];
    i32 => [i8, i16, i32, u8, u16];
    i64 => [i8, i16, i32, i64, u8, u16, u32];
    i128 => [i8, i16, i32, i64, i128, u8, u16, u32, u64];
    u8 => [u8];
    u16 => [u8, u16];
    u32 => [u8, u16, u32];
    u64 => [u8, u16, u32, u64];
    u128 => [u8, u16, u32, u64, u128];
}

// ============================================================================
// Formatting
// ============================================================================

impl<R: Integer, T: OverflowTag> fmt::Display for OverflowInteger<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rep, f)
    }
}

impl<R: Integer, T: OverflowTag> fmt::Debug for OverflowInteger<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverflowInteger<{}, {}>({})", R::NAME, T::KIND, self.rep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;

    #[test]
    fn test_new_applies_policy() {
        assert_eq!(SaturatingInteger::<u8>::new(259i32).rep(), 255);
        assert_eq!(SaturatingInteger::<u16>::new(-123i32).rep(), 0);
        assert_eq!(NativeInteger::<u8>::new(259i32).rep(), 3);
        assert_eq!(NativeInteger::<u16>::new(-123i32).rep(), 65413);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(SaturatingInteger::<i8>::from_f64(1e6).rep(), i8::MAX);
        assert_eq!(SaturatingInteger::<i8>::from_f64(-7.9).rep(), -7);
        assert_eq!(SaturatingInteger::<i8>::from_f64(f64::NAN).rep(), 0);
        assert_eq!(NativeInteger::<i32>::from_f64(2.5).to_f64(), 2.0);
    }

    #[test]
    fn test_abs() {
        assert_eq!(SaturatingInteger::<i8>::from_rep(-5).abs().rep(), 5);
        assert_eq!(SaturatingInteger::<i8>::MIN.abs(), SaturatingInteger::<i8>::MAX);
        assert_eq!(NativeInteger::<i8>::MIN.abs().rep(), i8::MIN);
    }

    #[test]
    fn test_convert_from_and_cast() {
        let wide = SaturatingInteger::<i64>::from_rep(1 << 40);
        assert_eq!(SaturatingInteger::<i32>::convert_from(wide).rep(), i32::MAX);
        assert_eq!(wide.cast::<i16>().rep(), i16::MAX);
        assert_eq!(SaturatingInteger::<u8>::convert_from(-3i64).rep(), 0);
    }

    #[test]
    fn test_with_tag_keeps_rep() {
        let x = NativeInteger::<i16>::from_rep(-9);
        let y: SaturatingInteger<i16> = x.with_tag();
        assert_eq!(y.rep(), -9);
    }

    #[test]
    fn test_lossless_from() {
        let x: TrappingInteger<i64> = 7u32.into();
        assert_eq!(x.rep(), 7);
        let y = SaturatingInteger::<i32>::from(-3i16);
        assert_eq!(y, -3i32);
    }

    #[test]
    fn test_throwing_try_methods() {
        let max = ThrowingInteger::<i32>::MAX;
        let one = ThrowingInteger::<i32>::ONE;
        assert!(matches!(max.try_add(one), Err(NumericError::Overflow(_))));
        assert_eq!(one.try_add(one).map(|v| v.rep()), Ok(2));
        assert_eq!(one.try_div(ThrowingInteger::ZERO), Err(NumericError::DivisionByZero));
        assert!(ThrowingInteger::<i32>::MIN.try_neg().is_err());
        assert!(ThrowingInteger::<u8>::try_new(300i32).is_err());
        assert!(ThrowingInteger::<i32>::from_rep(-1_073_741_825).try_shl(1).is_err());
    }

    #[test]
    fn test_throwing_try_from_f64() {
        assert_eq!(ThrowingInteger::<i8>::try_from_f64(-127.5).map(|v| v.rep()), Ok(-127));
        assert_eq!(ThrowingInteger::<i8>::try_from_f64(f64::NAN), Err(NumericError::InvalidInput));
        assert!(matches!(
            ThrowingInteger::<i8>::try_from_f64(-129.0),
            Err(NumericError::Overflow(_))
        ));
    }

    #[test]
    fn test_compare_with_rep() {
        let x = SaturatingInteger::<i32>::from_rep(10);
        assert!(x > 9i32);
        assert!(x == 10i32);
        assert!(x < SaturatingInteger::from_rep(11));
    }

    #[test]
    fn test_formatting() {
        let x = SaturatingInteger::<i16>::from_rep(-42);
        assert_eq!(x.to_string(), "-42");
        assert_eq!(format!("{x:?}"), "OverflowInteger<i16, saturating>(-42)");
    }

    #[test]
    fn test_layout_is_transparent() {
        assert_eq!(
            std::mem::size_of::<TrappingInteger<i32>>(),
            std::mem::size_of::<i32>()
        );
    }
}
