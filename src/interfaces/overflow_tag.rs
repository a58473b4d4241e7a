// ============================================================================
// Overflow Tag Interface
// Capability set every overflow policy implements
// ============================================================================

use super::integer::Integer;
use super::operator::{BinaryOperator, OperatorKind, ShiftOperator, UnaryOperator};
use crate::numeric::OverflowError;
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction in which an exact result left the representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Above `MAX`
    Positive,
    /// Below `MIN`
    Negative,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// Runtime name of an overflow policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolicyKind {
    Native,
    Trapping,
    Saturating,
    Throwing,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Native => write!(f, "native"),
            PolicyKind::Trapping => write!(f, "trapping"),
            PolicyKind::Saturating => write!(f, "saturating"),
            PolicyKind::Throwing => write!(f, "throwing"),
        }
    }
}

/// Borrowed description of an overflow, handed to [`OverflowTag::on_overflow`].
///
/// Operands are kept as `Display` references so that formatting only
/// happens on the policies that report the event.
#[derive(Clone, Copy)]
pub struct OverflowEvent<'a> {
    pub operator: OperatorKind,
    pub polarity: Polarity,
    pub operands: &'a [&'a dyn fmt::Display],
}

impl<'a> OverflowEvent<'a> {
    #[inline]
    pub fn new(
        operator: OperatorKind,
        polarity: Polarity,
        operands: &'a [&'a dyn fmt::Display],
    ) -> Self {
        Self {
            operator,
            polarity,
            operands,
        }
    }

    /// Owned error value carrying the same information.
    pub fn to_error(&self) -> OverflowError {
        OverflowError {
            operator: self.operator,
            polarity: self.polarity,
            operands: self
                .operands
                .iter()
                .map(|operand| operand.to_string())
                .collect::<SmallVec<[String; 2]>>(),
        }
    }
}

impl fmt::Display for OverflowEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} overflow in {}(", self.polarity, self.operator)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{operand}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for OverflowEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverflowEvent({self})")
    }
}

/// A zero-sized overflow policy.
///
/// Implementors only decide what an out-of-range result becomes
/// ([`on_overflow`](Self::on_overflow)); detection is shared by the default
/// `convert`/`apply` methods, which consult the operator's polarity rule.
/// [`Native`](crate::overflow::Native) overrides the defaults to skip
/// detection entirely.
pub trait OverflowTag:
    Copy + Default + fmt::Debug + Eq + Ord + Hash + Send + Sync + 'static
{
    const KIND: PolicyKind;

    /// Value to produce for `event`. `wrapped` is the two's complement result.
    fn on_overflow<R: Integer>(wrapped: R, event: &OverflowEvent<'_>) -> R;

    /// Best representable `D` for `source`.
    #[inline]
    fn convert<D: Integer, S: Integer>(source: S) -> D {
        match D::checked_cast(source) {
            Some(value) => value,
            None => {
                let polarity = if source.is_negative() {
                    Polarity::Negative
                } else {
                    Polarity::Positive
                };
                Self::on_overflow(
                    D::wrapping_cast(source),
                    &OverflowEvent::new(OperatorKind::Convert, polarity, &[&source]),
                )
            }
        }
    }

    /// Truncating conversion from a float. NaN maps to zero.
    #[inline]
    fn convert_float<D: Integer>(value: f64) -> D {
        if value.is_nan() {
            return D::ZERO;
        }
        let truncated = value.trunc();
        let upper = 2f64.powi(D::DIGITS as i32);
        if truncated >= D::MIN.as_f64() && truncated < upper {
            return D::from_f64_native(truncated);
        }
        let polarity = if value < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Positive
        };
        Self::on_overflow(
            D::from_f64_native(value),
            &OverflowEvent::new(OperatorKind::Convert, polarity, &[&value]),
        )
    }

    #[inline]
    fn apply<Op: BinaryOperator, R: Integer>(lhs: R, rhs: R) -> R {
        match Op::checked(lhs, rhs) {
            Ok(result) => result,
            Err(polarity) => Self::on_overflow(
                Op::wrapping(lhs, rhs),
                &OverflowEvent::new(Op::KIND, polarity, &[&lhs, &rhs]),
            ),
        }
    }

    #[inline]
    fn apply_unary<Op: UnaryOperator, R: Integer>(operand: R) -> R {
        match Op::checked(operand) {
            Ok(result) => result,
            Err(polarity) => Self::on_overflow(
                Op::wrapping(operand),
                &OverflowEvent::new(Op::KIND, polarity, &[&operand]),
            ),
        }
    }

    #[inline]
    fn apply_shift<Op: ShiftOperator, R: Integer>(lhs: R, amount: u32) -> R {
        match Op::checked(lhs, amount) {
            Ok(result) => result,
            Err(polarity) => Self::on_overflow(
                Op::wrapping(lhs, amount),
                &OverflowEvent::new(Op::KIND, polarity, &[&lhs, &amount]),
            ),
        }
    }
}

/// Tag family combination: which tag the result of `Self ⊕ Other` carries.
///
/// Only tags of the same family combine. Mixing families has no impl and
/// is rejected at compile time.
pub trait Combine<Other: OverflowTag>: OverflowTag {
    type Output: OverflowTag;
}

impl<T: OverflowTag> Combine<T> for T {
    type Output = T;
}
