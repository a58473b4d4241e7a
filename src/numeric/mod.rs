// ============================================================================
// Numeric Module
// Policy-tagged integers, scaled fixed-point values and radix conversion
// ============================================================================
//
// This module provides:
// - OverflowInteger<R, T>: an integer representation under an overflow policy
// - ScaledInteger<N, E, R>: significand * R^E over any such number
// - descale: conversion of a scaled significand to another radix
// - math: exp2 and float-backed elementary functions
// - NumericError: error types for the recoverable paths
//
// Precision and policy are part of the type; nothing here is configured at
// runtime and every value is a plain Copy integer underneath.

mod descale;
mod errors;
mod overflow_integer;
mod scaled;
mod scaled_integer;

pub mod math;

pub use descale::{descale, descale_into, digits_needed, Descaled};
pub use errors::{NumericError, NumericResult, OverflowError};
pub use overflow_integer::{
    NativeInteger, OverflowInteger, SaturatingInteger, ThrowingInteger, TrappingInteger,
};
pub use scaled::{checked_power, narrow, rescale, rescale_into};
pub use scaled_integer::{
    Decimal64, Q16_16, Q8_8, SaturatingDecimal64, SaturatingQ16_16, ScaledInteger,
};
