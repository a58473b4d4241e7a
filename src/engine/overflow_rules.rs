// ============================================================================
// Overflow Integer Rules
// Resolve impls for policy-tagged integers and their plain or float peers
// ============================================================================

use super::resolution::{Resolve, Rule};
use crate::interfaces::{
    to_floating, ArithmeticOperator, BinaryOperator, Combine, Integer, OverflowTag, PolicyKind,
};
use crate::numeric::OverflowInteger;

// ============================================================================
// Rule 1: floating peer
// ============================================================================

macro_rules! floating_peer {
    ($($float:ty),*) => {$(
        impl<Op, R, T> Resolve<Op, $float> for OverflowInteger<R, T>
        where
            Op: ArithmeticOperator,
            R: Integer,
            T: OverflowTag,
        {
            const RULE: Rule = Rule::FloatingPeer;
            const POLICY: Option<PolicyKind> = None;
            type Output = $float;

            #[inline]
            fn resolve(lhs: Self, rhs: $float) -> $float {
                Op::floating(to_floating::<$float, R>(lhs.rep()), rhs)
            }
        }

        impl<Op, R, T> Resolve<Op, OverflowInteger<R, T>> for $float
        where
            Op: ArithmeticOperator,
            R: Integer,
            T: OverflowTag,
        {
            const RULE: Rule = Rule::FloatingPeer;
            const POLICY: Option<PolicyKind> = None;
            type Output = $float;

            #[inline]
            fn resolve(lhs: $float, rhs: OverflowInteger<R, T>) -> $float {
                Op::floating(lhs, to_floating::<$float, R>(rhs.rep()))
            }
        }
    )*};
}

floating_peer!(f32, f64);

// ============================================================================
// Rules 2 and 3: lift a plain operand of lower or equal rank
// ============================================================================

macro_rules! lift_plain {
    ($wide:ty => [$($narrow:ty),*]) => {$(
        impl<Op, T> Resolve<Op, $narrow> for OverflowInteger<$wide, T>
        where
            Op: BinaryOperator,
            T: OverflowTag,
        {
            const RULE: Rule = Rule::LiftPlainRhs;
            const POLICY: Option<PolicyKind> = Some(T::KIND);
            type Output = OverflowInteger<$wide, T>;

            #[inline]
            fn resolve(lhs: Self, rhs: $narrow) -> Self::Output {
                OverflowInteger::from_rep(T::apply::<Op, $wide>(lhs.rep(), <$wide>::from(rhs)))
            }
        }

        impl<Op, T> Resolve<Op, OverflowInteger<$wide, T>> for $narrow
        where
            Op: BinaryOperator,
            T: OverflowTag,
        {
            const RULE: Rule = Rule::LiftPlainLhs;
            const POLICY: Option<PolicyKind> = Some(T::KIND);
            type Output = OverflowInteger<$wide, T>;

            #[inline]
            fn resolve(lhs: $narrow, rhs: OverflowInteger<$wide, T>) -> Self::Output {
                OverflowInteger::from_rep(T::apply::<Op, $wide>(<$wide>::from(lhs), rhs.rep()))
            }
        }
    )*};
}

// ============================================================================
// Rule 4: two tagged operands of one family
// ============================================================================

impl<Op, R, T1, T2> Resolve<Op, OverflowInteger<R, T2>> for OverflowInteger<R, T1>
where
    Op: BinaryOperator,
    R: Integer,
    T1: Combine<T2>,
    T2: OverflowTag,
{
    const RULE: Rule = Rule::FamilyCombine;
    const POLICY: Option<PolicyKind> = Some(<T1::Output as OverflowTag>::KIND);
    type Output = OverflowInteger<R, T1::Output>;

    #[inline]
    fn resolve(lhs: Self, rhs: OverflowInteger<R, T2>) -> Self::Output {
        OverflowInteger::from_rep(<T1::Output as OverflowTag>::apply::<Op, R>(
            lhs.rep(),
            rhs.rep(),
        ))
    }
}

/// Family combination across representations: the narrower operand is
/// widened first, so the result takes the wider representation.
macro_rules! widen_tagged {
    ($wide:ty => [$($narrow:ty),*]) => {$(
        impl<Op, T1, T2> Resolve<Op, OverflowInteger<$narrow, T2>> for OverflowInteger<$wide, T1>
        where
            Op: BinaryOperator,
            T1: Combine<T2>,
            T2: OverflowTag,
        {
            const RULE: Rule = Rule::FamilyCombine;
            const POLICY: Option<PolicyKind> = Some(<T1::Output as OverflowTag>::KIND);
            type Output = OverflowInteger<$wide, T1::Output>;

            #[inline]
            fn resolve(lhs: Self, rhs: OverflowInteger<$narrow, T2>) -> Self::Output {
                OverflowInteger::from_rep(<T1::Output as OverflowTag>::apply::<Op, $wide>(
                    lhs.rep(),
                    <$wide>::from(rhs.rep()),
                ))
            }
        }

        impl<Op, T1, T2> Resolve<Op, OverflowInteger<$wide, T2>> for OverflowInteger<$narrow, T1>
        where
            Op: BinaryOperator,
            T1: Combine<T2>,
            T2: OverflowTag,
        {
            const RULE: Rule = Rule::FamilyCombine;
            const POLICY: Option<PolicyKind> = Some(<T1::Output as OverflowTag>::KIND);
            type Output = OverflowInteger<$wide, T1::Output>;

            #[inline]
            fn resolve(lhs: Self, rhs: OverflowInteger<$wide, T2>) -> Self::Output {
                OverflowInteger::from_rep(<T1::Output as OverflowTag>::apply::<Op, $wide>(
                    <$wide>::from(lhs.rep()),
                    rhs.rep(),
                ))
            }
        }
    )*};
}

macro_rules! rank_table {
    ($($wide:ty => [$($narrow:ty),*];)*) => {$(
        lift_plain!($wide => [$wide $(, $narrow)*]);
        widen_tagged!($wide => [$($narrow),*]);
    )*};
}

// Each representation with the strictly narrower ones it holds losslessly.
rank_table! {
    i8 => [];
    i16 => [i8, u8];
    i32 => [i8, i16, u8, u16];
    i64 => [i8, i16, i32, u8, u16, u32];
    i128 => [i8, i16, i32, i64, u8, u16, u32, u64];
    u8 => [];
    u16 => [u8];
    u32 => [u8, u16];
    u64 => [u8, u16, u32];
    u128 => [u8, u16, u32, u64];
}
