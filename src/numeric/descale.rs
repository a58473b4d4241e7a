// ============================================================================
// Descale
// Radix conversion of a scaled significand through a widened intermediate
// ============================================================================
//
// Converting `significand * in_radix^in_exponent` to a power of another
// radix cannot be done in the input representation: recovering destination
// digits temporarily grows the significand. The conversion therefore runs in
// `Integer::Wider`, which has at least `DIGITS + used_digits(radix)` digits
// for every representation narrower than 128 bits. A positive input exponent
// can still need more than that; the conversion then reports the direction of
// the overflow instead of a value.

use crate::interfaces::{used_digits, Integer, Polarity};
use std::fmt;

/// `significand * RADIX^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Descaled<R, const RADIX: u32> {
    pub significand: R,
    pub exponent: i32,
}

impl<R: Integer, const RADIX: u32> Descaled<R, RADIX> {
    /// Nearest `f64` of the represented value.
    pub fn to_f64(self) -> f64 {
        self.significand.as_f64() * f64::from(RADIX).powi(self.exponent)
    }
}

impl<R: Integer, const RADIX: u32> fmt::Display for Descaled<R, RADIX> {
    /// Positional notation; exact for radix 10.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if RADIX != 10 {
            return write!(f, "{}*{}^{}", self.significand, RADIX, self.exponent);
        }
        let digits = self.significand.to_string();
        let (sign, magnitude) = match digits.strip_prefix('-') {
            Some(magnitude) => ("-", magnitude),
            None => ("", digits.as_str()),
        };
        if self.exponent >= 0 {
            let zeros = if magnitude == "0" {
                0
            } else {
                self.exponent as usize
            };
            return write!(f, "{sign}{magnitude}{:0<zeros$}", "");
        }
        let scale = self.exponent.unsigned_abs() as usize;
        let padded = format!("{magnitude:0>width$}", width = scale + 1);
        let (integer, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{integer}.{fraction}")
    }
}

#[cold]
#[inline(never)]
fn invariant_violation(detail: fmt::Arguments<'_>) -> ! {
    tracing::error!(%detail, "descale invariant violated");
    panic!("descale invariant violated: {detail}")
}

/// Digits the widened intermediate needs for converting `In` to `out_radix`.
pub const fn digits_needed(in_digits: u32, out_radix: u32) -> u32 {
    in_digits + used_digits(out_radix)
}

/// Converts `significand * in_radix^in_exponent` (held in `In`) to a power
/// of `OUT_RADIX`, working in `Out`.
///
/// `Out` must hold every value of `In`. Multiplications are bounded by
/// `Out`'s capacity and, while peeling fractional digits, by the range of
/// `In` (the true value always fits there).
///
/// # Errors
/// The sign of the value when integral input grows beyond `Out` and the
/// significand cannot shed a digit of `OUT_RADIX` first.
///
/// # Panics
/// When `Out` cannot hold the input or the radices, or when fractional input
/// needs a digit `Out` cannot hold and `in_radix % OUT_RADIX` is zero.
pub fn descale_into<Out, In, const OUT_RADIX: u32>(
    significand: In,
    in_exponent: i32,
    in_radix: u32,
) -> Result<Descaled<Out, OUT_RADIX>, Polarity>
where
    Out: Integer,
    In: Integer,
{
    let Some(mut output) = Out::checked_cast(significand) else {
        invariant_violation(format_args!(
            "{} cannot hold {} significand {}",
            Out::NAME,
            In::NAME,
            significand
        ))
    };
    let (Some(radix_in), Some(radix_out)) = (Out::from_radix(in_radix), Out::from_radix(OUT_RADIX))
    else {
        invariant_violation(format_args!(
            "{} cannot hold radix {} or {}",
            Out::NAME,
            in_radix,
            OUT_RADIX
        ))
    };

    let negative = significand.is_negative();
    let bound = Out::checked_cast(In::MAX).unwrap_or(Out::MAX);
    let lower = bound.checked_neg().unwrap_or(Out::MIN);
    let out_of_bounds = |n: Out| if negative { n < lower } else { n > bound };

    let mut exponent = 0i32;

    if in_exponent < 0 {
        for _ in 0..in_exponent.unsigned_abs() {
            if output % radix_in != Out::ZERO {
                let grown = if out_of_bounds(output) {
                    None
                } else {
                    output.checked_mul(&radix_out)
                };
                match grown {
                    Some(value) => {
                        output = value;
                        exponent -= 1;
                    },
                    None if in_radix % OUT_RADIX != 0 => {},
                    None => invariant_violation(format_args!(
                        "cannot gain a radix-{} digit for {} at radix {}",
                        OUT_RADIX, output, in_radix
                    )),
                }
            }
            output = output / radix_in;
        }
    } else if in_exponent > 0 {
        let mut remaining = in_exponent;
        while remaining != 0 {
            match output.checked_mul(&radix_in) {
                Some(value) => {
                    output = value;
                    remaining -= 1;
                },
                None if output % radix_out == Out::ZERO => {},
                None if negative => return Err(Polarity::Negative),
                None => return Err(Polarity::Positive),
            }
            if output % radix_out == Out::ZERO {
                output = output / radix_out;
                exponent += 1;
            }
        }
    }

    Ok(Descaled {
        significand: output,
        exponent,
    })
}

/// Converts `significand * in_radix^in_exponent` to a power of `OUT_RADIX`.
///
/// Equal radices and zero exponents are plain reinterpretations. Otherwise
/// the work happens in `In::Wider`; see [`descale_into`] for the errors.
///
/// # Example
/// ```
/// use scaled_numeric::numeric::descale;
///
/// // 1/16 in binary is 625 * 10^-4
/// let decimal = descale::<i32, 10>(1, -4, 2).unwrap();
/// assert_eq!((decimal.significand, decimal.exponent), (625, -4));
/// ```
pub fn descale<In: Integer, const OUT_RADIX: u32>(
    significand: In,
    in_exponent: i32,
    in_radix: u32,
) -> Result<Descaled<In::Wider, OUT_RADIX>, Polarity> {
    if in_radix == OUT_RADIX || in_exponent == 0 {
        return Ok(Descaled {
            significand: significand.widen(),
            exponent: if in_radix == OUT_RADIX { in_exponent } else { 0 },
        });
    }

    tracing::trace!(
        input = In::NAME,
        input_digits = In::DIGITS,
        digits_needed = digits_needed(In::DIGITS, OUT_RADIX),
        intermediate = <In::Wider as Integer>::NAME,
        in_radix,
        out_radix = OUT_RADIX,
        "descale through widened intermediate"
    );
    descale_into::<In::Wider, In, OUT_RADIX>(significand, in_exponent, in_radix)
}
