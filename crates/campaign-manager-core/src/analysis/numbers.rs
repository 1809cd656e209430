//! Lenient numeric reading and two-decimal metrics

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Read a metric field. JSON numbers are taken as-is; strings are read by
/// their longest leading decimal prefix, so `"12.5%"` is 12.5 and `"abc"`
/// is absent.
pub fn parse_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Longest leading `[+-]digits[.digits][e[+-]digits]` prefix of `text`,
/// after leading whitespace
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = digits_from(end);
    let mut has_digits = end > int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Two-decimal text of `value`: nearest to the exact binary value, with
/// exact ties rounded away from zero
pub fn fixed2(value: f64) -> String {
    // Only odd multiples of 1/8 sit exactly halfway between hundredths
    let eighths = value.abs() * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let up = ((value.abs() * 100.0).floor() + 1.0) / 100.0;
        format!("{:.2}", up.copysign(value))
    } else {
        format!("{:.2}", value)
    }
}

/// Round to the two decimals a metric is displayed with
pub fn round2(value: f64) -> f64 {
    fixed2(value).parse().unwrap_or(value)
}

/// An averaged or derived metric: a value, or "N/A" when there were no
/// samples to compute it from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Computed value
    Value(f64),
    /// No valid samples
    NotApplicable,
}

impl Metric {
    /// Mean of `sum` over `count` samples
    pub fn mean(sum: f64, count: usize) -> Self {
        if count == 0 {
            Metric::NotApplicable
        } else {
            Metric::Value(sum / count as f64)
        }
    }

    /// `numerator / denominator * scale`, defined only for a positive denominator
    pub fn ratio(numerator: f64, denominator: f64, scale: f64) -> Self {
        if denominator > 0.0 {
            Metric::Value(numerator / denominator * scale)
        } else {
            Metric::NotApplicable
        }
    }

    /// The raw value, if any
    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::NotApplicable => None,
        }
    }

    /// Displayed value is below `threshold`. Never true for "N/A".
    pub fn is_below(self, threshold: f64) -> bool {
        self.value().is_some_and(|v| round2(v) < threshold)
    }

    /// Displayed value is above `threshold`. Never true for "N/A".
    pub fn is_above(self, threshold: f64) -> bool {
        self.value().is_some_and(|v| round2(v) > threshold)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => f.write_str(&fixed2(*v)),
            Metric::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Serialize a currency total as a two-decimal string
pub(crate) fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&fixed2(*value))
}

/// Serialize a count without a trailing `.0` when it is integral
pub(crate) fn count<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn prefix_parsing() {
        assert_eq!(parse_float_prefix("12.5%"), Some(12.5));
        assert_eq!(parse_float_prefix("  3"), Some(3.0));
        assert_eq!(parse_float_prefix("-0.75 EUR"), Some(-0.75));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("1,234"), Some(1.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("€100"), None);
    }

    #[test]
    fn field_values() {
        assert_eq!(parse_float(Some(&json!(42))), Some(42.0));
        assert_eq!(parse_float(Some(&json!("4.2"))), Some(4.2));
        assert_eq!(parse_float(Some(&json!(null))), None);
        assert_eq!(parse_float(Some(&json!(true))), None);
        assert_eq!(parse_float(None), None);
    }

    #[test]
    fn comparisons_use_displayed_value() {
        let ctr = Metric::Value(1.996);
        assert_eq!(ctr.to_string(), "2.00");
        assert!(!ctr.is_below(2.0));
        assert!(Metric::Value(1.994).is_below(2.0));
        assert!(!Metric::NotApplicable.is_below(2.0));
        assert!(!Metric::NotApplicable.is_above(20.0));
        assert!(Metric::Value(20.006).is_above(20.0));
    }

    #[test]
    fn halfway_hundredths_round_up() {
        assert_eq!(fixed2(0.125), "0.13");
        assert_eq!(fixed2(1.125), "1.13");
        assert_eq!(fixed2(0.375), "0.38");
        assert_eq!(fixed2(-0.125), "-0.13");
        // 2.675 is stored just below the halfway point
        assert_eq!(fixed2(2.675), "2.67");
        assert_eq!(fixed2(0.5), "0.50");
        assert_eq!(fixed2(1.996), "2.00");
        assert_eq!(round2(1.125), 1.13);
        assert_eq!(Metric::Value(0.125).to_string(), "0.13");
    }

    #[test]
    fn metric_constructors() {
        assert_eq!(Metric::mean(9.0, 3), Metric::Value(3.0));
        assert_eq!(Metric::mean(0.0, 0), Metric::NotApplicable);
        assert_eq!(Metric::ratio(10.0, 500.0, 100.0), Metric::Value(2.0));
        assert_eq!(Metric::ratio(10.0, 0.0, 100.0), Metric::NotApplicable);
        assert_eq!(serde_json::to_value(Metric::NotApplicable).unwrap(), json!("N/A"));
        assert_eq!(serde_json::to_value(Metric::Value(5.0)).unwrap(), json!("5.00"));
    }

    proptest! {
        #[test]
        fn formatted_numbers_read_back(n in -1.0e9f64..1.0e9, suffix in "[ %a-zA-Z€]{0,4}") {
            let text = format!("{}{}", n, suffix);
            prop_assert_eq!(parse_float_prefix(&text), Some(n));
        }
    }
}
