// ============================================================================
// Operator Descriptors
// Zero-sized markers naming each operator, its arity and its polarity rule
// ============================================================================

use super::integer::Integer;
use super::overflow_tag::Polarity;
use num_traits::Float;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Runtime name of an operator, carried by overflow diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    Negate,
    BitNot,
    /// Conversion between representations (or from a float)
    Convert,
    Compare,
}

impl OperatorKind {
    /// Number of operands the operator takes.
    pub const fn arity(self) -> u8 {
        match self {
            OperatorKind::Negate | OperatorKind::BitNot | OperatorKind::Convert => 1,
            _ => 2,
        }
    }

    /// Source-level spelling of the operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Add => "+",
            OperatorKind::Subtract => "-",
            OperatorKind::Multiply => "*",
            OperatorKind::Divide => "/",
            OperatorKind::Modulo => "%",
            OperatorKind::BitAnd => "&",
            OperatorKind::BitOr => "|",
            OperatorKind::BitXor => "^",
            OperatorKind::ShiftLeft => "<<",
            OperatorKind::ShiftRight => ">>",
            OperatorKind::Negate => "-",
            OperatorKind::BitNot => "!",
            OperatorKind::Convert => "as",
            OperatorKind::Compare => "<=>",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorKind::Add => "add",
            OperatorKind::Subtract => "subtract",
            OperatorKind::Multiply => "multiply",
            OperatorKind::Divide => "divide",
            OperatorKind::Modulo => "modulo",
            OperatorKind::BitAnd => "bit_and",
            OperatorKind::BitOr => "bit_or",
            OperatorKind::BitXor => "bit_xor",
            OperatorKind::ShiftLeft => "shift_left",
            OperatorKind::ShiftRight => "shift_right",
            OperatorKind::Negate => "negate",
            OperatorKind::BitNot => "bit_not",
            OperatorKind::Convert => "convert",
            OperatorKind::Compare => "compare",
        };
        f.write_str(name)
    }
}

/// Common supertrait of every operator descriptor.
pub trait Operator: Copy + Default + fmt::Debug + Send + Sync + 'static {
    const KIND: OperatorKind;
}

/// An operator over two operands of the same representation.
pub trait BinaryOperator: Operator {
    /// Result under two's complement wraparound.
    fn wrapping<R: Integer>(lhs: R, rhs: R) -> R;

    /// Exact result, or the direction in which it leaves `R`'s range.
    fn checked<R: Integer>(lhs: R, rhs: R) -> Result<R, Polarity>;
}

/// A binary operator that also exists on floating values.
pub trait ArithmeticOperator: BinaryOperator {
    fn floating<F: Float>(lhs: F, rhs: F) -> F;
}

/// An operator over a single operand.
pub trait UnaryOperator: Operator {
    fn wrapping<R: Integer>(operand: R) -> R;

    fn checked<R: Integer>(operand: R) -> Result<R, Polarity>;
}

/// A shift: the left operand is a value, the right one a bit count.
pub trait ShiftOperator: Operator {
    fn wrapping<R: Integer>(lhs: R, amount: u32) -> R;

    fn checked<R: Integer>(lhs: R, amount: u32) -> Result<R, Polarity>;
}

macro_rules! descriptor {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {$(
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Operator for $name {
            const KIND: OperatorKind = OperatorKind::$kind;
        }
    )*};
}

descriptor! {
    /// `lhs + rhs`
    AddOp => Add;
    /// `lhs - rhs`
    SubtractOp => Subtract;
    /// `lhs * rhs`
    MultiplyOp => Multiply;
    /// `lhs / rhs`, truncating toward zero
    DivideOp => Divide;
    /// `lhs % rhs`, sign of the dividend
    ModuloOp => Modulo;
    /// `lhs & rhs`
    BitAndOp => BitAnd;
    /// `lhs | rhs`
    BitOrOp => BitOr;
    /// `lhs ^ rhs`
    BitXorOp => BitXor;
    /// `lhs << amount`
    ShiftLeftOp => ShiftLeft;
    /// `lhs >> amount`, arithmetic for signed representations
    ShiftRightOp => ShiftRight;
    /// `-operand`
    NegateOp => Negate;
    /// `!operand`
    BitNotOp => BitNot;
}

#[inline]
fn minus_one<R: Integer>() -> R {
    R::ZERO.wrapping_sub(&R::ONE)
}

#[inline]
fn guard_divisor<R: Integer>(rhs: R) {
    if rhs == R::ZERO {
        panic!("attempt to divide by zero");
    }
}

impl BinaryOperator for AddOp {
    #[inline]
    fn wrapping<R: Integer>(lhs: R, rhs: R) -> R {
        lhs.wrapping_add(&rhs)
    }

    #[inline]
    fn checked<R: Integer>(lhs: R, rhs: R) -> Result<R, Polarity> {
        lhs.checked_add(&rhs).ok_or(if rhs > R::ZERO {
            Polarity::Positive
        } else {
            Polarity::Negative
        })
    }
}

impl ArithmeticOperator for AddOp {
    #[inline]
    fn floating<F: Float>(lhs: F, rhs: F) -> F {
        lhs + rhs
    }
}

impl BinaryOperator for SubtractOp {
    #[inline]
    fn wrapping<R: Integer>(lhs: R, rhs: R) -> R {
        lhs.wrapping_sub(&rhs)
    }

    #[inline]
    fn checked<R: Integer>(lhs: R, rhs: R) -> Result<R, Polarity> {
        lhs.checked_sub(&rhs).ok_or(if rhs < R::ZERO {
            Polarity::Positive
        } else {
            Polarity::Negative
        })
    }
}

impl ArithmeticOperator for SubtractOp {
    #[inline]
    fn floating<F: Float>(lhs: F, rhs: F) -> F {
        lhs - rhs
    }
}

impl BinaryOperator for MultiplyOp {
    #[inline]
    fn wrapping<R: Integer>(lhs: R, rhs: R) -> R {
        lhs.wrapping_mul(&rhs)
    }

    #[inline]
    fn checked<R: Integer>(lhs: R, rhs: R) -> Result<R, Polarity> {
        lhs.checked_mul(&rhs)
            .ok_or(if lhs.is_negative() == rhs.is_negative() {
                Polarity::Positive
            } else {
                Polarity::Negative
            })
    }
}

impl ArithmeticOperator for MultiplyOp {
    #[inline]
    fn floating<F: Float>(lhs: F, rhs: F) -> F {
        lhs * rhs
    }
}

impl BinaryOperator for DivideOp {
    #[inline]
    fn wrapping<R: Integer>(lhs: R, rhs: R) -> R {
        guard_divisor(rhs);
        if R::SIGNED && rhs == minus_one::<R>() {
            lhs.wrapping_neg()
        } else {
            lhs / rhs
        }
    }

    #[inline]
    fn checked<R: Integer>(lhs: R, rhs: R) -> Result<R, Polarity> {
        guard_divisor(rhs);
        // only MIN / -1 leaves the range
        lhs.checked_div(&rhs).ok_or(Polarity::Positive)
    }
}

impl ArithmeticOperator for DivideOp {
    #[inline]
    fn floating<F: Float>(lhs: F, rhs: F) -> F {
        lhs / rhs
    }
}

impl BinaryOperator for ModuloOp {
    #[inline]
    fn wrapping<R: Integer>(lhs: R, rhs: R) -> R {
        guard_divisor(rhs);
        lhs.checked_rem(&rhs).unwrap_or(R::ZERO)
    }

    #[inline]
    fn checked<R: Integer>(lhs: R, rhs: R) -> Result<R, Polarity> {
        // MIN % -1 is mathematically zero, so the remainder never overflows
        Ok(Self::wrapping(lhs, rhs))
    }
}

impl ArithmeticOperator for ModuloOp {
    #[inline]
    fn floating<F: Float>(lhs: F, rhs: F) -> F {
        lhs % rhs
    }
}

macro_rules! bitwise {
    ($($name:ident => $op:tt;)*) => {$(
        impl BinaryOperator for $name {
            #[inline]
            fn wrapping<R: Integer>(lhs: R, rhs: R) -> R {
                lhs $op rhs
            }

            #[inline]
            fn checked<R: Integer>(lhs: R, rhs: R) -> Result<R, Polarity> {
                Ok(lhs $op rhs)
            }
        }
    )*};
}

bitwise! {
    BitAndOp => &;
    BitOrOp => |;
    BitXorOp => ^;
}

impl ShiftOperator for ShiftLeftOp {
    #[inline]
    fn wrapping<R: Integer>(lhs: R, amount: u32) -> R {
        lhs.wrapping_shl(amount)
    }

    /// Overflows when any significant bit (or the sign) is shifted out.
    /// Unsigned operands only overflow positively; signed operands overflow
    /// in the direction of their sign.
    #[inline]
    fn checked<R: Integer>(lhs: R, amount: u32) -> Result<R, Polarity> {
        if lhs == R::ZERO {
            return Ok(lhs);
        }
        let polarity = if lhs.is_negative() {
            Polarity::Negative
        } else {
            Polarity::Positive
        };
        if amount >= R::BITS {
            return Err(polarity);
        }
        let shifted = lhs << amount as usize;
        if shifted >> amount as usize == lhs {
            Ok(shifted)
        } else {
            Err(polarity)
        }
    }
}

impl ShiftOperator for ShiftRightOp {
    #[inline]
    fn wrapping<R: Integer>(lhs: R, amount: u32) -> R {
        lhs.wrapping_shr(amount)
    }

    #[inline]
    fn checked<R: Integer>(lhs: R, amount: u32) -> Result<R, Polarity> {
        if amount >= R::BITS {
            // every value bit is shifted out; the sign remains
            return Ok(if lhs.is_negative() {
                minus_one::<R>()
            } else {
                R::ZERO
            });
        }
        Ok(lhs >> amount as usize)
    }
}

impl UnaryOperator for NegateOp {
    #[inline]
    fn wrapping<R: Integer>(operand: R) -> R {
        operand.wrapping_neg()
    }

    /// Signed `MIN` overflows positively; any non-zero unsigned value
    /// overflows negatively.
    #[inline]
    fn checked<R: Integer>(operand: R) -> Result<R, Polarity> {
        operand.checked_neg().ok_or(if R::SIGNED {
            Polarity::Positive
        } else {
            Polarity::Negative
        })
    }
}

impl UnaryOperator for BitNotOp {
    #[inline]
    fn wrapping<R: Integer>(operand: R) -> R {
        !operand
    }

    #[inline]
    fn checked<R: Integer>(operand: R) -> Result<R, Polarity> {
        Ok(!operand)
    }
}

/// Converts a raw value into a float peer.
#[inline]
pub fn to_floating<F: Float, R: Integer>(value: R) -> F {
    F::from(value).unwrap_or_else(|| {
        if value.is_negative() {
            F::neg_infinity()
        } else {
            F::infinity()
        }
    })
}
