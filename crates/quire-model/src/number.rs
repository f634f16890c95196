//! Decimal-preserving numbers.
//!
//! [`Number`] keeps the canonical decimal text of a value rather than a binary
//! representation. This is what lets `1` and `1.0` survive a print/parse cycle
//! as two different values, and lets integers wider than `f64` round-trip
//! without loss.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ModelError;

/// A number in canonical decimal form: `-?digits(.digits)?`.
///
/// Canonicalisation drops redundant leading zeros of the integer part and
/// turns negative zero into zero. The fractional part is kept as written, so
/// equality is scale-sensitive: `1.5` and `1.50` are different numbers.
///
/// # Example
///
/// ```
/// use quire_model::Number;
///
/// let n: Number = "-005.25".parse().unwrap();
/// assert_eq!(n.as_str(), "-5.25");
/// assert!(!n.is_integer());
///
/// assert_ne!(Number::from(1), "1.0".parse::<Number>().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    repr: String,
}

impl Number {
    /// Builds a number from a finite `f64`.
    ///
    /// The result always carries a fractional part (`3.0`, not `3`), keeping
    /// floating point input distinguishable from integers. Returns `None` for
    /// NaN and infinities, which have no decimal form.
    pub fn from_f64(value: f64) -> Option<Number> {
        if !value.is_finite() {
            return None;
        }
        Some(Self::from_float_text(value.to_string()))
    }

    /// Builds a number from a finite `f32`. See [`Number::from_f64`].
    pub fn from_f32(value: f32) -> Option<Number> {
        if !value.is_finite() {
            return None;
        }
        Some(Self::from_float_text(value.to_string()))
    }

    fn from_float_text(mut text: String) -> Number {
        if !text.contains('.') {
            text.push_str(".0");
        }
        let repr = canonicalize(&text).unwrap_or(text);
        Number { repr }
    }

    /// Wraps text already validated by the JSON parser.
    pub(crate) fn from_literal(text: &str) -> Option<Number> {
        canonicalize(text).map(|repr| Number { repr })
    }

    /// The canonical decimal text.
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// Returns `true` if the number has no fractional part in its text form.
    pub fn is_integer(&self) -> bool {
        !self.repr.contains('.')
    }

    /// Returns `true` for numbers below zero.
    pub fn is_negative(&self) -> bool {
        self.repr.starts_with('-')
    }

    /// The value as `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.repr.parse().ok()
        } else {
            None
        }
    }

    /// The value as `u64`, if it is a non-negative integer that fits.
    pub fn as_u64(&self) -> Option<u64> {
        if self.is_integer() {
            self.repr.parse().ok()
        } else {
            None
        }
    }

    /// The value as `f64`. Precision may be lost for long decimals.
    pub fn as_f64(&self) -> f64 {
        // Canonical text is always valid float syntax.
        self.repr.parse().unwrap_or(f64::NAN)
    }

    /// The value as `f64`, if the float prints back to exactly this text.
    fn exact_f64(&self) -> Option<f64> {
        let n: f64 = self.repr.parse().ok()?;
        let mut text = n.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        (text == self.repr).then_some(n)
    }
}

/// Validates `-?digits(.digits)?` and returns its canonical form.
fn canonicalize(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
        return None;
    }

    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let is_zero = int_part == "0" && frac_part.map_or(true, |f| f.bytes().all(|b| b == b'0'));

    let mut repr = String::with_capacity(text.len());
    if negative && !is_zero {
        repr.push('-');
    }
    repr.push_str(int_part);
    if let Some(frac) = frac_part {
        repr.push('.');
        repr.push_str(frac);
    }
    Some(repr)
}

impl FromStr for Number {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_literal(s).ok_or_else(|| ModelError::InvalidNumber(s.to_string()))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// Integers serialize as the narrowest native integer holding them and
/// fractions as `f64` when a float prints back to the same text. Anything
/// else (`1.50`, integers wider than `u128`) serializes as its canonical text
/// so no digits are lost.
impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_integer() {
            if let Some(n) = self.as_i64() {
                return serializer.serialize_i64(n);
            }
            if let Some(n) = self.as_u64() {
                return serializer.serialize_u64(n);
            }
            if let Ok(n) = self.repr.parse::<i128>() {
                return serializer.serialize_i128(n);
            }
            if let Ok(n) = self.repr.parse::<u128>() {
                return serializer.serialize_u128(n);
            }
        } else if let Some(n) = self.exact_f64() {
            return serializer.serialize_f64(n);
        }
        serializer.serialize_str(&self.repr)
    }
}


macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number { repr: n.to_string() }
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_keep_their_text() {
        assert_eq!(Number::from(42).as_str(), "42");
        assert_eq!(Number::from(-5i64).as_str(), "-5");
        assert_eq!(Number::from(u64::MAX).as_str(), "18446744073709551615");
        assert!(Number::from(7u8).is_integer());
    }

    #[test]
    fn floats_always_carry_a_fraction() {
        assert_eq!(Number::from_f64(3.0).unwrap().as_str(), "3.0");
        assert_eq!(Number::from_f64(2.5).unwrap().as_str(), "2.5");
        assert_eq!(Number::from_f64(-0.0).unwrap().as_str(), "0.0");
        assert_eq!(Number::from_f32(0.1).unwrap().as_str(), "0.1");
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn parsing_canonicalizes() {
        assert_eq!("007".parse::<Number>().unwrap().as_str(), "7");
        assert_eq!("-0".parse::<Number>().unwrap().as_str(), "0");
        assert_eq!("-0.00".parse::<Number>().unwrap().as_str(), "0.00");
        assert_eq!("0.50".parse::<Number>().unwrap().as_str(), "0.50");
    }

    #[test]
    fn parsing_rejects_non_decimal_text() {
        for bad in ["", "-", "1.", ".5", "1e5", "+1", "1.2.3", "abc", "--1"] {
            assert!(bad.parse::<Number>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn integer_and_decimal_are_distinct() {
        let one: Number = "1".parse().unwrap();
        let one_point_zero: Number = "1.0".parse().unwrap();
        assert_ne!(one, one_point_zero);
        assert_eq!(one.as_i64(), Some(1));
        assert_eq!(one_point_zero.as_i64(), None);
        assert_eq!(one_point_zero.as_f64(), 1.0);
    }

    #[test]
    fn serialization_keeps_every_digit() {
        let to_json = |text: &str| {
            let number: Number = text.parse().unwrap();
            serde_json::to_string(&number).unwrap()
        };
        assert_eq!(to_json("-7"), "-7");
        assert_eq!(to_json("2.5"), "2.5");
        assert_eq!(to_json("3.0"), "3.0");
        let wide = "170141183460469231731687303715884105727";
        assert_eq!(to_json(wide), wide);
        assert_eq!(to_json("1.50"), r#""1.50""#);
        assert_eq!(to_json("0.1000000000000000000001"), r#""0.1000000000000000000001""#);
        assert_eq!(
            to_json("123456789012345678901234567890123456789012"),
            r#""123456789012345678901234567890123456789012""#
        );
    }

    #[test]
    fn unsigned_accessor_rejects_negatives() {
        assert_eq!(Number::from(-1).as_u64(), None);
        assert!(Number::from(-1).is_negative());
        assert_eq!(Number::from(9u32).as_u64(), Some(9));
    }
}
