// ============================================================================
// Numeric Descriptor
// Runtime description of a numeric type's representation, scale and policy
// ============================================================================

use crate::interfaces::PolicyKind;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes a scaled numeric type: `representation * radix^exponent`
/// under an overflow policy.
///
/// Every `ScaledInteger` reports one through `descriptor()`. Descriptors can
/// also be built by hand (for example when read from a schema) and checked
/// with [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericDescriptor {
    /// Name of the raw integer representation (e.g. "i32")
    pub representation: String,

    /// Width of the representation in bits
    pub bits: u32,

    /// Whether the representation holds negative values
    pub signed: bool,

    /// Power of the radix applied to the significand
    pub exponent: i32,

    /// Base of the scale; 2 for binary fixed-point, 10 for decimal
    pub radix: u32,

    /// Overflow policy
    pub policy: PolicyKind,
}

impl NumericDescriptor {
    /// Create a descriptor for an unscaled native integer
    pub fn new(representation: String, bits: u32, signed: bool) -> Self {
        Self {
            representation,
            bits,
            signed,
            exponent: 0,
            radix: 2,
            policy: PolicyKind::Native,
        }
    }

    /// Builder method: Set the scale
    pub fn with_scale(mut self, exponent: i32, radix: u32) -> Self {
        self.exponent = exponent;
        self.radix = radix;
        self
    }

    /// Builder method: Set the overflow policy
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Number of fractional digits (in the radix) the type carries.
    pub fn fractional_digits(&self) -> u32 {
        if self.exponent < 0 {
            self.exponent.unsigned_abs()
        } else {
            0
        }
    }

    /// Validate the descriptor
    pub fn validate(&self) -> Result<(), String> {
        if self.representation.is_empty() {
            return Err("Representation cannot be empty".to_string());
        }

        if !matches!(self.bits, 8 | 16 | 32 | 64 | 128) {
            return Err(format!("Unsupported representation width: {}", self.bits));
        }

        if self.radix < 2 {
            return Err("Radix must be at least 2".to_string());
        }

        // the intermediate used for radix conversion must hold the radix
        let room = if self.signed { self.bits - 1 } else { self.bits };
        if u64::from(self.radix) >= (1u64 << room.min(63)) {
            return Err(format!(
                "Radix {} does not fit a {}-bit representation",
                self.radix, self.bits
            ));
        }

        Ok(())
    }
}

impl fmt::Display for NumericDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} * {}^{} ({})",
            self.representation, self.radix, self.exponent, self.policy
        )
    }
}

// ============================================================================
// Preset Descriptors
// ============================================================================

impl NumericDescriptor {
    /// Q16.16 binary fixed-point on `i32`
    pub fn q16_16() -> Self {
        Self::new("i32".to_string(), 32, true).with_scale(-16, 2)
    }

    /// Decimal fixed-point on `i64` with `fraction_digits` decimal places
    pub fn decimal64(fraction_digits: u32) -> Self {
        let exponent = -i32::try_from(fraction_digits).unwrap_or(i32::MAX);
        Self::new("i64".to_string(), 64, true).with_scale(exponent, 10)
    }
}
