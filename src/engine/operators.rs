// ============================================================================
// Operator Bindings
// std::ops impls forwarding to the resolution rules
// ============================================================================

use super::resolution::Resolve;
use crate::interfaces::{
    AddOp, BitAndOp, BitNotOp, BitOrOp, BitXorOp, DivideOp, Integer, ModuloOp, MultiplyOp,
    NegateOp, Number, OverflowTag, ShiftLeftOp, ShiftRightOp, SubtractOp,
};
use crate::numeric::{OverflowInteger, ScaledInteger};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

macro_rules! binary_operators {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident => $op:ty;)*) => {$(
        impl<R, T, Rhs> $trait<Rhs> for OverflowInteger<R, T>
        where
            R: Integer,
            T: OverflowTag,
            Self: Resolve<$op, Rhs>,
        {
            type Output = <Self as Resolve<$op, Rhs>>::Output;

            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                <Self as Resolve<$op, Rhs>>::resolve(self, rhs)
            }
        }

        impl<R, T, Rhs> $assign<Rhs> for OverflowInteger<R, T>
        where
            R: Integer,
            T: OverflowTag,
            Self: Resolve<$op, Rhs, Output = Self>,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: Rhs) {
                *self = <Self as Resolve<$op, Rhs>>::resolve(*self, rhs);
            }
        }

        plain_lhs!($trait::$method => $op; i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);
    )*};
}

macro_rules! plain_lhs {
    ($trait:ident::$method:ident => $op:ty; $($plain:ty),*) => {$(
        impl<R, T> $trait<OverflowInteger<R, T>> for $plain
        where
            R: Integer,
            T: OverflowTag,
            $plain: Resolve<$op, OverflowInteger<R, T>>,
        {
            type Output = <$plain as Resolve<$op, OverflowInteger<R, T>>>::Output;

            #[inline]
            fn $method(self, rhs: OverflowInteger<R, T>) -> Self::Output {
                <$plain as Resolve<$op, OverflowInteger<R, T>>>::resolve(self, rhs)
            }
        }
    )*};
}

binary_operators! {
    Add::add, AddAssign::add_assign => AddOp;
    Sub::sub, SubAssign::sub_assign => SubtractOp;
    Mul::mul, MulAssign::mul_assign => MultiplyOp;
    Div::div, DivAssign::div_assign => DivideOp;
    Rem::rem, RemAssign::rem_assign => ModuloOp;
    BitAnd::bitand, BitAndAssign::bitand_assign => BitAndOp;
    BitOr::bitor, BitOrAssign::bitor_assign => BitOrOp;
    BitXor::bitxor, BitXorAssign::bitxor_assign => BitXorOp;
}

// ============================================================================
// Shifts: the amount is a bit count, not a peer operand
// ============================================================================

impl<R: Integer, T: OverflowTag> Shl<u32> for OverflowInteger<R, T> {
    type Output = Self;

    #[inline]
    fn shl(self, amount: u32) -> Self {
        Self::from_rep(T::apply_shift::<ShiftLeftOp, R>(self.rep(), amount))
    }
}

impl<R: Integer, T: OverflowTag> Shr<u32> for OverflowInteger<R, T> {
    type Output = Self;

    #[inline]
    fn shr(self, amount: u32) -> Self {
        Self::from_rep(T::apply_shift::<ShiftRightOp, R>(self.rep(), amount))
    }
}

impl<R: Integer, T: OverflowTag> ShlAssign<u32> for OverflowInteger<R, T> {
    #[inline]
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl<R: Integer, T: OverflowTag> ShrAssign<u32> for OverflowInteger<R, T> {
    #[inline]
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}

// ============================================================================
// Unary
// ============================================================================

impl<R: Integer, T: OverflowTag> Neg for OverflowInteger<R, T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_rep(T::apply_unary::<NegateOp, R>(self.rep()))
    }
}

impl<R: Integer, T: OverflowTag> Not for OverflowInteger<R, T> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_rep(T::apply_unary::<BitNotOp, R>(self.rep()))
    }
}

// ============================================================================
// Scaled integers
// ============================================================================

// Results take the left operand's exponent; `ScaledInteger::multiply` and
// `ScaledInteger::divide` add or subtract exponents instead.
macro_rules! scaled_operators {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident => $op:ty;)*) => {$(
        impl<N, Rhs, const EXPONENT: i32, const RADIX: u32> $trait<Rhs>
            for ScaledInteger<N, EXPONENT, RADIX>
        where
            N: Number,
            Self: Resolve<$op, Rhs>,
        {
            type Output = <Self as Resolve<$op, Rhs>>::Output;

            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                <Self as Resolve<$op, Rhs>>::resolve(self, rhs)
            }
        }

        impl<N, Rhs, const EXPONENT: i32, const RADIX: u32> $assign<Rhs>
            for ScaledInteger<N, EXPONENT, RADIX>
        where
            N: Number,
            Self: Resolve<$op, Rhs, Output = Self>,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: Rhs) {
                *self = <Self as Resolve<$op, Rhs>>::resolve(*self, rhs);
            }
        }

        scaled_plain_lhs!($trait::$method => $op; i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);
    )*};
}

macro_rules! scaled_plain_lhs {
    ($trait:ident::$method:ident => $op:ty; $($plain:ty),*) => {$(
        impl<N, const EXPONENT: i32, const RADIX: u32> $trait<ScaledInteger<N, EXPONENT, RADIX>>
            for $plain
        where
            N: Number,
            $plain: Resolve<$op, ScaledInteger<N, EXPONENT, RADIX>>,
        {
            type Output = <$plain as Resolve<$op, ScaledInteger<N, EXPONENT, RADIX>>>::Output;

            #[inline]
            fn $method(self, rhs: ScaledInteger<N, EXPONENT, RADIX>) -> Self::Output {
                <$plain as Resolve<$op, ScaledInteger<N, EXPONENT, RADIX>>>::resolve(self, rhs)
            }
        }
    )*};
}

scaled_operators! {
    Add::add, AddAssign::add_assign => AddOp;
    Sub::sub, SubAssign::sub_assign => SubtractOp;
    Mul::mul, MulAssign::mul_assign => MultiplyOp;
    Div::div, DivAssign::div_assign => DivideOp;
    Rem::rem, RemAssign::rem_assign => ModuloOp;
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> Neg for ScaledInteger<N, EXPONENT, RADIX> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_significand(N::Tag::apply_unary::<NegateOp, N::Rep>(self.significand()))
    }
}

/// Shifts move the significand, scaling by powers of two.
impl<N: Number, const EXPONENT: i32, const RADIX: u32> Shl<u32>
    for ScaledInteger<N, EXPONENT, RADIX>
{
    type Output = Self;

    #[inline]
    fn shl(self, amount: u32) -> Self {
        Self::from_significand(N::Tag::apply_shift::<ShiftLeftOp, N::Rep>(
            self.significand(),
            amount,
        ))
    }
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> Shr<u32>
    for ScaledInteger<N, EXPONENT, RADIX>
{
    type Output = Self;

    #[inline]
    fn shr(self, amount: u32) -> Self {
        Self::from_significand(N::Tag::apply_shift::<ShiftRightOp, N::Rep>(
            self.significand(),
            amount,
        ))
    }
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> ShlAssign<u32>
    for ScaledInteger<N, EXPONENT, RADIX>
{
    #[inline]
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl<N: Number, const EXPONENT: i32, const RADIX: u32> ShrAssign<u32>
    for ScaledInteger<N, EXPONENT, RADIX>
{
    #[inline]
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}

#[cfg(test)]
mod tests {
    use crate::numeric::{
        NativeInteger, OverflowError, OverflowInteger, Q16_16, SaturatingInteger,
        SaturatingQ16_16, ThrowingInteger,
    };
    use crate::overflow::{Native, Saturating};
    use quickcheck::quickcheck;
    use std::panic;

    type Sat32 = SaturatingInteger<i32>;

    #[test]
    fn test_saturating_add_clamps() {
        assert_eq!((Sat32::MAX + Sat32::ONE).rep(), i32::MAX);
        assert_eq!((Sat32::MAX + 1i32).rep(), i32::MAX);
        assert_eq!((Sat32::MIN - 1i32).rep(), i32::MIN);
    }

    #[test]
    fn test_tagged_with_plain_keeps_tag_for_every_operator() {
        let x = Sat32::from_rep(i32::MAX);

        let sum: Sat32 = x + 1i32;
        let difference: Sat32 = -2i32 - x;
        let product: Sat32 = x * 2i16;
        let quotient: Sat32 = Sat32::MIN / -1i32;
        let remainder: Sat32 = 7u8 % Sat32::from_rep(4);
        let and: Sat32 = x & 0xFFi32;
        let or: Sat32 = 1u16 | Sat32::ZERO;
        let xor: Sat32 = x ^ -1i32;

        assert_eq!(sum.rep(), i32::MAX);
        assert_eq!(difference.rep(), i32::MIN);
        assert_eq!(product.rep(), i32::MAX);
        assert_eq!(quotient.rep(), i32::MAX);
        assert_eq!(remainder.rep(), 3);
        assert_eq!(and.rep(), 0xFF);
        assert_eq!(or.rep(), 1);
        assert_eq!(xor.rep(), i32::MIN);
    }

    #[test]
    fn test_native_wraps() {
        let x = NativeInteger::<u8>::from_rep(250);
        assert_eq!((x + 10u8).rep(), 4);
        assert_eq!((-x).rep(), 6);
    }

    #[test]
    fn test_float_peer_yields_float() {
        let x = Sat32::from_rep(3);
        let y: f64 = x * 0.5f64;
        let z: f32 = 1.5f32 + x;
        assert_eq!(y, 1.5);
        assert_eq!(z, 4.5);
    }

    #[test]
    fn test_mixed_width_same_family() {
        let narrow = SaturatingInteger::<i8>::from_rep(100);
        let wide = SaturatingInteger::<i16>::from_rep(300);
        let sum: SaturatingInteger<i16> = narrow + wide;
        assert_eq!(sum.rep(), 400);
    }

    #[test]
    fn test_compound_assignment() {
        let mut x = SaturatingInteger::<u8>::from_rep(200);
        x += 100u8;
        assert_eq!(x.rep(), 255);
        x -= SaturatingInteger::<u8>::from_rep(55);
        assert_eq!(x.rep(), 200);
        x /= 3u8;
        assert_eq!(x.rep(), 66);
        x %= 7u8;
        assert_eq!(x.rep(), 3);
        x <<= 7;
        assert_eq!(x.rep(), 255);
        x >>= 4;
        assert_eq!(x.rep(), 15);
        x *= 20u8;
        assert_eq!(x.rep(), 255);
    }

    #[test]
    fn test_shift_left_saturates_by_sign() {
        let negative = Sat32::from_rep(-1_073_741_825);
        assert_eq!((negative << 1).rep(), i32::MIN);
        let positive = SaturatingInteger::<u8>::from_rep(0x81);
        assert_eq!((positive << 1).rep(), u8::MAX);
    }

    #[test]
    fn test_unary() {
        assert_eq!((-Sat32::MIN).rep(), i32::MAX);
        assert_eq!((-SaturatingInteger::<u16>::from_rep(9)).rep(), 0);
        assert_eq!((!SaturatingInteger::<u8>::from_rep(0x0F)).rep(), 0xF0);
    }

    #[test]
    fn test_throwing_operator_unwinds() {
        let x = ThrowingInteger::<i16>::from_rep(i16::MAX);
        let payload = panic::catch_unwind(|| x * 2i16).expect_err("must overflow");
        let error = payload
            .downcast_ref::<OverflowError>()
            .expect("OverflowError payload");
        assert_eq!(error.to_string(), "positive overflow in multiply(32767, 2)");
    }

    #[test]
    fn test_scaled_compound_assignment() {
        let mut x = Q16_16::from_f64(1.5);
        x += Q16_16::from_f64(0.25);
        assert_eq!(x.to_f64(), 1.75);
        x *= 2i32;
        assert_eq!(x.to_f64(), 3.5);
        x -= 1u8;
        assert_eq!(x.to_f64(), 2.5);
        x /= Q16_16::from_f64(0.5);
        assert_eq!(x.to_f64(), 5.0);
        x %= 3i32;
        assert_eq!(x.to_f64(), 2.0);
        x <<= 2;
        assert_eq!(x.to_f64(), 8.0);
        x >>= 3;
        assert_eq!(x.to_f64(), 1.0);
    }

    #[test]
    fn test_scaled_unary_and_shift() {
        assert_eq!((-Q16_16::from_f64(1.5)).to_f64(), -1.5);
        assert_eq!(-SaturatingQ16_16::lowest(), SaturatingQ16_16::max_value());
        assert_eq!(SaturatingQ16_16::from_integer(20_000i32) << 1, SaturatingQ16_16::max_value());
        assert_eq!((Q16_16::from_f64(-1.0) >> 1).to_f64(), -0.5);
    }

    quickcheck! {
        fn same_family_combines_to_same_family(a: i32, b: i32) -> bool {
            let sum: OverflowInteger<i32, Saturating> =
                SaturatingInteger::from_rep(a) + SaturatingInteger::from_rep(b);
            sum.rep() == a.saturating_add(b)
        }

        fn native_matches_wrapping(a: i64, b: i64) -> bool {
            let product: OverflowInteger<i64, Native> =
                NativeInteger::from_rep(a) * NativeInteger::from_rep(b);
            product.rep() == a.wrapping_mul(b)
        }

        fn scaled_addition_is_commutative(a: i32, b: i32) -> bool {
            let (x, y) = (SaturatingQ16_16::from_significand(a), SaturatingQ16_16::from_significand(b));
            x + y == y + x
        }

        fn plain_lhs_matches_plain_rhs(a: i16, b: i16) -> bool {
            let x = SaturatingInteger::<i16>::from_rep(b);
            (a + x).rep() == (SaturatingInteger::<i16>::from_rep(a) + b).rep()
        }
    }
}
