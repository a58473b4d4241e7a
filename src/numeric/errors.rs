// ============================================================================
// Numeric Errors
// Error types for overflow-aware and fixed-point arithmetic
// ============================================================================

use crate::interfaces::{OperatorKind, Polarity};
use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact result that did not fit its destination.
///
/// Raised by the throwing policy, either as an unwinding panic payload from
/// operators or as the error of the `try_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OverflowError {
    /// Operator that overflowed
    pub operator: OperatorKind,
    /// Direction of the overflow
    pub polarity: Polarity,
    /// Operands, formatted
    pub operands: SmallVec<[String; 2]>,
}

impl fmt::Display for OverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} overflow in {}({})",
            self.polarity,
            self.operator,
            self.operands.join(", ")
        )
    }
}

impl std::error::Error for OverflowError {}

/// Errors that can occur during numeric operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the destination's range
    Overflow(OverflowError),
    /// Attempted division by zero
    DivisionByZero,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input value is invalid (NaN, malformed descriptor)
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow(error) => write!(f, "arithmetic overflow: {error}"),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not convert value"),
        }
    }
}

impl std::error::Error for NumericError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NumericError::Overflow(error) => Some(error),
            _ => None,
        }
    }
}

impl From<OverflowError> for NumericError {
    fn from(error: OverflowError) -> Self {
        NumericError::Overflow(error)
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
