//! Heuristic conversion of raw collector output into typed values.
//!
//! Monitoring plugins scrape text from status pages and command output;
//! [`parse_scalar`] turns each field into an integer, a float, optionally a
//! boolean, or leaves it as text.

use crate::config::UtilConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

static INT_RE: OnceLock<Regex> = OnceLock::new();
static FLOAT_RE: OnceLock<Regex> = OnceLock::new();

const INT_EXPRESSION: &str = r"^-?[0-9]+$";
const FLOAT_EXPRESSION: &str = r"^-?[0-9]*\.[0-9]+$";

fn is_match(once_lock: &OnceLock<Regex>, text: &str, regex_pattern: &str) -> bool {
    once_lock
        .get_or_init(|| Regex::new(regex_pattern).expect("Invalid regex pattern"))
        .is_match(text)
}

/// A value parsed from a text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl ScalarValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value as a float; integers are widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Parse a text field into an int, float, bool or text value.
///
/// Integers are an optional `-` followed by digits; floats additionally
/// contain a single `.` followed by at least one digit (`".5"` is accepted).
/// With `parse_bool` set, `yes`/`on` and `no`/`off` (any case) become
/// booleans. Anything else, including integers too large for `i64`, is
/// returned unchanged as text.
///
/// # Examples
///
/// ```
/// use sysmon_util::scalar::{parse_scalar, ScalarValue};
///
/// assert_eq!(parse_scalar("42", false), ScalarValue::Int(42));
/// assert_eq!(parse_scalar("On", true), ScalarValue::Bool(true));
/// assert_eq!(parse_scalar("On", false), ScalarValue::Text("On".into()));
/// ```
pub fn parse_scalar(text: &str, parse_bool: bool) -> ScalarValue {
    if is_match(&INT_RE, text, INT_EXPRESSION) {
        match text.parse::<i64>() {
            Ok(v) => return ScalarValue::Int(v),
            Err(e) => {
                tracing::warn!("Integer field {:?} kept as text: {}", text, e);
                return ScalarValue::Text(text.to_string());
            }
        }
    }

    if is_match(&FLOAT_RE, text, FLOAT_EXPRESSION) {
        if let Ok(v) = text.parse::<f64>() {
            return ScalarValue::Float(v);
        }
    }

    if parse_bool {
        if text.eq_ignore_ascii_case("yes") || text.eq_ignore_ascii_case("on") {
            return ScalarValue::Bool(true);
        }
        if text.eq_ignore_ascii_case("no") || text.eq_ignore_ascii_case("off") {
            return ScalarValue::Bool(false);
        }
    }

    ScalarValue::Text(text.to_string())
}

/// Parse a text field using the boolean policy from `config`.
pub fn parse_scalar_with(text: &str, config: &UtilConfig) -> ScalarValue {
    parse_scalar(text, config.parse_bool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_scalar("42", false), ScalarValue::Int(42));
        assert_eq!(parse_scalar("-7", false), ScalarValue::Int(-7));
        assert_eq!(parse_scalar("007", false), ScalarValue::Int(7));
    }

    #[test]
    fn test_parse_floats() {
        assert_eq!(parse_scalar("3.25", false), ScalarValue::Float(3.25));
        assert_eq!(parse_scalar("-0.5", false), ScalarValue::Float(-0.5));
        assert_eq!(parse_scalar(".25", false), ScalarValue::Float(0.25));
    }

    #[test]
    fn test_parse_not_numbers() {
        assert_eq!(parse_scalar("1.", false), ScalarValue::Text("1.".into()));
        assert_eq!(parse_scalar("1.2.3", false), ScalarValue::Text("1.2.3".into()));
        assert_eq!(parse_scalar(" 42", false), ScalarValue::Text(" 42".into()));
        assert_eq!(parse_scalar("", false), ScalarValue::Text(String::new()));
    }

    #[test]
    fn test_parse_integer_overflow() {
        let huge = "123456789012345678901234567890";
        assert_eq!(parse_scalar(huge, false), ScalarValue::Text(huge.into()));
    }

    #[test]
    fn test_parse_booleans() {
        assert_eq!(parse_scalar("yes", true), ScalarValue::Bool(true));
        assert_eq!(parse_scalar("ON", true), ScalarValue::Bool(true));
        assert_eq!(parse_scalar("No", true), ScalarValue::Bool(false));
        assert_eq!(parse_scalar("off", true), ScalarValue::Bool(false));
        assert_eq!(parse_scalar("yes", false), ScalarValue::Text("yes".into()));
        assert_eq!(parse_scalar("online", true), ScalarValue::Text("online".into()));
    }

    #[test]
    fn test_parse_with_config() {
        let config = UtilConfig {
            parse_bool: true,
            ..UtilConfig::default()
        };
        assert_eq!(parse_scalar_with("off", &config), ScalarValue::Bool(false));
        assert_eq!(
            parse_scalar_with("off", &UtilConfig::default()),
            ScalarValue::Text("off".into())
        );
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(ScalarValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(ScalarValue::Float(1.5).as_i64(), None);
        assert_eq!(ScalarValue::Text("idle".into()).as_str(), Some("idle"));
        assert!(ScalarValue::Float(0.0).is_numeric());
        assert!(!ScalarValue::Bool(true).is_numeric());
    }

    #[test]
    fn test_scalar_display_and_json() {
        assert_eq!(parse_scalar("hello", false).to_string(), "hello");
        assert_eq!(
            serde_json::to_string(&parse_scalar("12", false)).unwrap(),
            "12"
        );
        let back: ScalarValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(back, ScalarValue::Float(2.5));
    }
}
