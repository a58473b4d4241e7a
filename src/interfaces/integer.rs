// ============================================================================
// Integer Representation Interface
// The narrow contract the arithmetic layer consumes from its storage backend
// ============================================================================

use num_traits::{
    CheckedNeg, CheckedRem, NumCast, PrimInt, WrappingAdd, WrappingMul, WrappingNeg, WrappingShl,
    WrappingShr, WrappingSub,
};
use std::fmt;
use std::hash::Hash;

/// A raw integer representation that numeric types can be layered on.
///
/// Everything the overflow policies, the operator engine and the descale
/// algorithm need from a representation goes through this trait: raw
/// arithmetic (via `num-traits`), bit width, signedness, bounds, lossless
/// widening and the two cast flavours (checked and wrapping).
///
/// Implemented for every primitive integer from `i8`/`u8` up to
/// `i128`/`u128`.
pub trait Integer:
    PrimInt
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + WrappingShl
    + WrappingShr
    + CheckedNeg
    + CheckedRem
    + Default
    + Hash
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Type name used in descriptors and diagnostics.
    const NAME: &'static str;

    /// Total width in bits.
    const BITS: u32;

    /// Number of value bits, excluding the sign bit.
    const DIGITS: u32;

    /// Whether negative values are representable.
    const SIGNED: bool;

    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;
    const ONE: Self;

    /// Next representation of the same signedness with at least twice the
    /// digits. The widest representations are their own `Wider`.
    type Wider: Integer;

    /// Lossless conversion into [`Self::Wider`].
    fn widen(self) -> Self::Wider;

    /// Two's complement bit pattern, sign-extended to 128 bits.
    fn to_bits128(self) -> u128;

    /// Keeps the low [`Self::BITS`] bits of `bits` (`as`-cast semantics).
    fn wrap_from_bits128(bits: u128) -> Self;

    /// Float conversion with `as`-cast semantics (saturating, NaN to zero).
    fn from_f64_native(value: f64) -> Self;

    #[inline]
    fn is_negative(self) -> bool {
        Self::SIGNED && self < Self::ZERO
    }

    /// Exact conversion from another representation, `None` when out of range.
    #[inline]
    fn checked_cast<S: Integer>(source: S) -> Option<Self> {
        <Self as NumCast>::from(source)
    }

    /// Conversion from another representation by two's complement wraparound.
    #[inline]
    fn wrapping_cast<S: Integer>(source: S) -> Self {
        Self::wrap_from_bits128(source.to_bits128())
    }

    /// A radix as a value of this representation, if it fits.
    #[inline]
    fn from_radix(radix: u32) -> Option<Self> {
        <Self as NumCast>::from(radix)
    }

    /// Nearest `f64`.
    #[inline]
    fn as_f64(self) -> f64 {
        num_traits::ToPrimitive::to_f64(&self).unwrap_or(0.0)
    }
}

/// Number of bits needed to hold `value`.
#[inline]
pub const fn used_digits(value: u32) -> u32 {
    u32::BITS - value.leading_zeros()
}

macro_rules! impl_signed {
    ($($t:ty => $wide:ty),* $(,)?) => {$(
        impl Integer for $t {
            const NAME: &'static str = stringify!($t);
            const BITS: u32 = <$t>::BITS;
            const DIGITS: u32 = <$t>::BITS - 1;
            const SIGNED: bool = true;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            type Wider = $wide;

            #[inline]
            fn widen(self) -> $wide {
                <$wide as From<$t>>::from(self)
            }

            #[inline]
            fn to_bits128(self) -> u128 {
                self as i128 as u128
            }

            #[inline]
            fn wrap_from_bits128(bits: u128) -> Self {
                bits as $t
            }

            #[inline]
            fn from_f64_native(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty => $wide:ty),* $(,)?) => {$(
        impl Integer for $t {
            const NAME: &'static str = stringify!($t);
            const BITS: u32 = <$t>::BITS;
            const DIGITS: u32 = <$t>::BITS;
            const SIGNED: bool = false;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            type Wider = $wide;

            #[inline]
            fn widen(self) -> $wide {
                <$wide as From<$t>>::from(self)
            }

            #[inline]
            fn to_bits128(self) -> u128 {
                self as u128
            }

            #[inline]
            fn wrap_from_bits128(bits: u128) -> Self {
                bits as $t
            }

            #[inline]
            fn from_f64_native(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_signed!(i8 => i16, i16 => i32, i32 => i64, i64 => i128, i128 => i128);
impl_unsigned!(u8 => u16, u16 => u32, u32 => u64, u64 => u128, u128 => u128);
