//! Parsing of durations written as a run of magnitude and unit terms, such as
//! `300ms`, `1.5h` or `1h15m11s`.

use std::{error::Error as StdError, fmt, time::Duration};

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

/// Fraction digits past this many cannot change the result and are skipped.
const MAX_FRACTION_DIGITS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// Malformed input, or a total too large to represent.
    Invalid { input: String },
    MissingUnit { input: String },
    UnknownUnit { unit: String, input: String },
    /// The total is below zero, which [`Duration`] cannot hold.
    Negative { input: String },
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { input } => write!(f, "invalid duration \"{input}\""),
            Self::MissingUnit { input } => write!(f, "missing unit in duration \"{input}\""),
            Self::UnknownUnit { unit, input } => {
                write!(f, "unknown unit \"{unit}\" in duration \"{input}\"")
            }
            Self::Negative { input } => write!(f, "negative duration \"{input}\""),
        }
    }
}

impl StdError for DurationError {}

/// Parses a duration such as `1h15m11s`.
///
/// Each term is a decimal number, optionally fractional, followed by one of
/// `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. The whole string may carry a
/// leading sign, and the bare string `0` is accepted without a unit.
///
/// [`Duration`] cannot be negative, so a strictly negative total such as `-1s`
/// fails with [`DurationError::Negative`]. A negative zero such as `-0s` is
/// [`Duration::ZERO`].
///
/// ```
/// use std::time::Duration;
///
/// assert_eq!(envbind::parse_duration("1h15m11s").unwrap(), Duration::from_secs(4511));
/// assert_eq!(envbind::parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
/// assert!(envbind::parse_duration("-1s").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid {
        input: input.to_owned(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, whole_digits, after) = leading_int(rest).ok_or_else(invalid)?;
        rest = after;

        let mut fraction = 0u128;
        let mut scale = 1u128;
        let mut fraction_digits = 0;
        if let Some(after) = rest.strip_prefix('.') {
            (fraction, scale, fraction_digits, rest) = leading_fraction(after);
        }
        if whole_digits == 0 && fraction_digits == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit {
                input: input.to_owned(),
            });
        }
        let (unit, after) = rest.split_at(unit_len);
        rest = after;

        let unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_owned(),
            input: input.to_owned(),
        })?;

        let term = whole
            .checked_mul(unit)
            .and_then(|term| term.checked_add(fraction * unit / scale))
            .ok_or_else(invalid)?;
        total = total.checked_add(term).ok_or_else(invalid)?;
        if total > u128::from(u64::MAX) {
            return Err(invalid());
        }
    }

    if negative && total > 0 {
        return Err(DurationError::Negative {
            input: input.to_owned(),
        });
    }

    let total = u64::try_from(total).map_err(|_| invalid())?;
    Ok(Duration::from_nanos(total))
}

/// Consumes leading digits. Returns the value, the digit count and the rest,
/// or `None` when the value overflows.
fn leading_int(s: &str) -> Option<(u128, usize, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u128 = 0;
    for b in s[..digits].bytes() {
        value = value
            .checked_mul(10)?
            .checked_add(u128::from(b - b'0'))?;
        if value > u128::from(u64::MAX) {
            return None;
        }
    }
    Some((value, digits, &s[digits..]))
}

/// Consumes the digits after a decimal point. Returns the fraction as
/// `value / scale`, the digit count and the rest.
fn leading_fraction(s: &str) -> (u128, u128, usize, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u128 = 0;
    let mut scale: u128 = 1;
    for b in s[..digits].bytes().take(MAX_FRACTION_DIGITS) {
        value = value * 10 + u128::from(b - b'0');
        scale *= 10;
    }
    (value, scale, digits, &s[digits..])
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => NANOSECOND,
        // U+00B5 micro sign and U+03BC Greek small letter mu.
        "us" | "\u{b5}s" | "\u{3bc}s" => MICROSECOND,
        "ms" => MILLISECOND,
        "s" => SECOND,
        "m" => MINUTE,
        "h" => HOUR,
        _ => return None,
    };
    Some(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_terms() {
        assert_eq!(
            parse_duration("1h15m11s").unwrap(),
            Duration::from_secs(4511)
        );
        assert_eq!(
            parse_duration("2m3.5s").unwrap(),
            Duration::from_millis(123_500)
        );
        assert_eq!(
            parse_duration("1s500ms250us").unwrap(),
            Duration::from_micros(1_500_250)
        );
    }

    #[test]
    fn every_unit() {
        assert_eq!(parse_duration("7ns").unwrap(), Duration::from_nanos(7));
        assert_eq!(parse_duration("7us").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("7µs").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("7μs").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("7ms").unwrap(), Duration::from_millis(7));
        assert_eq!(parse_duration("7s").unwrap(), Duration::from_secs(7));
        assert_eq!(parse_duration("7m").unwrap(), Duration::from_secs(420));
        assert_eq!(parse_duration("7h").unwrap(), Duration::from_secs(25_200));
    }

    #[test]
    fn fractions() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1.s").unwrap(), Duration::from_secs(1));
        assert_eq!(
            parse_duration("0.000000001s").unwrap(),
            Duration::from_nanos(1)
        );
        assert_eq!(
            parse_duration("1.0000000000000000000000000000000001s").unwrap(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn signs_and_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-0s").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("+5s").unwrap(), Duration::from_secs(5));
        assert_eq!(
            parse_duration("-1s").unwrap_err(),
            DurationError::Negative {
                input: "-1s".into()
            }
        );
    }

    #[test]
    fn malformed_input() {
        for input in ["", "-", "s", ".s", "1..5s", "1s ", " 1s", "++1s"] {
            assert!(parse_duration(input).is_err(), "{input:?} should be rejected");
        }
        assert_eq!(
            parse_duration("10").unwrap_err(),
            DurationError::MissingUnit { input: "10".into() }
        );
        assert_eq!(
            parse_duration("3d").unwrap_err(),
            DurationError::UnknownUnit {
                unit: "d".into(),
                input: "3d".into()
            }
        );
    }

    #[test]
    fn overflow() {
        assert!(parse_duration("18446744073709551615ns").is_ok());
        assert!(matches!(
            parse_duration("18446744073709551616ns"),
            Err(DurationError::Invalid { .. })
        ));
        assert!(matches!(
            parse_duration("9999999999h"),
            Err(DurationError::Invalid { .. })
        ));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            parse_duration("1x").unwrap_err().to_string(),
            "unknown unit \"x\" in duration \"1x\""
        );
        assert_eq!(
            parse_duration("abc").unwrap_err().to_string(),
            "invalid duration \"abc\""
        );
    }
}
