// ============================================================================
// Number Interface
// Uniform view of plain and policy-tagged integers
// ============================================================================

use super::integer::Integer;
use super::overflow_tag::OverflowTag;
use crate::overflow::Native;
use std::fmt;

/// A value with a raw integer representation and an overflow policy.
///
/// Plain primitives are numbers with the [`Native`] policy, which lets a
/// scaled type sit directly on `i32` as well as on a policy-tagged integer.
pub trait Number: Copy + Default + PartialEq + Eq + PartialOrd + fmt::Debug + Send + Sync + 'static {
    type Rep: Integer;
    type Tag: OverflowTag;

    fn to_rep(self) -> Self::Rep;

    fn from_rep(rep: Self::Rep) -> Self;
}

macro_rules! plain_number {
    ($($t:ty),*) => {$(
        impl Number for $t {
            type Rep = $t;
            type Tag = Native;

            #[inline]
            fn to_rep(self) -> $t {
                self
            }

            #[inline]
            fn from_rep(rep: $t) -> Self {
                rep
            }
        }
    )*};
}

plain_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);
