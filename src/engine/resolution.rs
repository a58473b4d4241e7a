// ============================================================================
// Operator Resolution
// Ordered rule table deciding which implementation an operator runs
// ============================================================================

use crate::interfaces::{Operator, PolicyKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resolution rules, in precedence order.
///
/// Every accepted `(operator, lhs, rhs)` triple has exactly one
/// [`Resolve`] impl and therefore exactly one rule; trait coherence keeps
/// the rules from overlapping. A pair with no rule (for example two
/// policy-tagged operands of different families) is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rule {
    /// A float and a generic number: the number becomes a float.
    FloatingPeer = 1,
    /// Generic number on the left, losslessly liftable plain value on the right.
    LiftPlainRhs = 2,
    /// Plain value on the left, generic number on the right.
    LiftPlainLhs = 3,
    /// Two generic numbers of the same tag family.
    FamilyCombine = 4,
}

impl Rule {
    /// Position in the precedence table, starting at 1.
    pub const fn precedence(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::FloatingPeer => write!(f, "floating peer"),
            Rule::LiftPlainRhs => write!(f, "lift plain rhs"),
            Rule::LiftPlainLhs => write!(f, "lift plain lhs"),
            Rule::FamilyCombine => write!(f, "family combine"),
        }
    }
}

/// Static resolution of `Self <Op> Rhs`.
///
/// The std operator impls of every numeric type forward here, so the rule
/// and the result type are fixed at compile time and nothing is decided at
/// runtime.
pub trait Resolve<Op: Operator, Rhs = Self>: Sized {
    /// The rule this pair resolved to.
    const RULE: Rule;

    /// Overflow policy governing the result, `None` for floating results.
    const POLICY: Option<PolicyKind>;

    type Output;

    fn resolve(lhs: Self, rhs: Rhs) -> Self::Output;
}

/// Summary of how `Lhs <Op> Rhs` resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub operator: crate::interfaces::OperatorKind,
    pub rule: Rule,
    pub policy: Option<PolicyKind>,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.policy {
            Some(policy) => write!(f, "{} via {} ({})", self.operator, self.rule, policy),
            None => write!(f, "{} via {} (floating)", self.operator, self.rule),
        }
    }
}

/// Reports the resolution the compiler picked for `Lhs <Op> Rhs`.
pub const fn resolution<Op, Lhs, Rhs>() -> Resolution
where
    Op: Operator,
    Lhs: Resolve<Op, Rhs>,
{
    Resolution {
        operator: Op::KIND,
        rule: <Lhs as Resolve<Op, Rhs>>::RULE,
        policy: <Lhs as Resolve<Op, Rhs>>::POLICY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_precedence_order() {
        assert!(Rule::FloatingPeer < Rule::LiftPlainRhs);
        assert!(Rule::LiftPlainLhs < Rule::FamilyCombine);
        assert_eq!(Rule::FamilyCombine.precedence(), 4);
    }

    #[test]
    fn test_resolution_display() {
        let resolution = Resolution {
            operator: crate::interfaces::OperatorKind::Add,
            rule: Rule::LiftPlainRhs,
            policy: Some(PolicyKind::Saturating),
        };
        assert_eq!(resolution.to_string(), "add via lift plain rhs (saturating)");
    }
}
