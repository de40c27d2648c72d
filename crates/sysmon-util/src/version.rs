//! Software version values for comparing the releases reported by monitored
//! services.
//!
//! A version string must begin with one or more non-negative integers joined
//! by dots and may end with an arbitrary suffix. The string is broken into
//! its components (`"2.0-beta"` becomes `[2, 0, "-beta"]`) which drive
//! equality, hashing and ordering, while the original text is kept verbatim
//! for display.

use crate::error::{Result, SysmonError};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

static VERSION_RE: OnceLock<Regex> = OnceLock::new();

const VERSION_EXPRESSION: &str = r"(?s)^(?P<version>[0-9]+(?:\.[0-9]+)*)(?P<suffix>.*)$";

fn version_regex() -> &'static Regex {
    VERSION_RE.get_or_init(|| Regex::new(VERSION_EXPRESSION).expect("Invalid regex pattern"))
}

/// A numeric version segment of any length.
///
/// Stored as its decimal digits with leading zeros removed, so `"007"` and
/// `"7"` are the same segment. Segments order by digit count first, then
/// digit by digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericSegment(String);

impl NumericSegment {
    /// Build a segment from a run of ASCII digits
    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The canonical digits, without leading zeros
    pub fn as_digits(&self) -> &str {
        &self.0
    }

    /// The value as a `u64`, if it fits
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for NumericSegment {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Ord for NumericSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NumericSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NumericSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single element of a parsed version.
///
/// Only the last component of a [`Version`] can be a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionComponent {
    /// A dot-separated numeric segment
    Number(NumericSegment),
    /// Trimmed trailing text following the numeric prefix
    Suffix(String),
}

impl VersionComponent {
    /// Get the numeric segment, if this is one
    pub fn as_number(&self) -> Option<&NumericSegment> {
        match self {
            Self::Number(n) => Some(n),
            Self::Suffix(_) => None,
        }
    }

    /// Get the numeric value, if this is a segment that fits in a `u64`
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(NumericSegment::as_u64)
    }

    /// Get the suffix text, if this is a suffix
    pub fn as_suffix(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Suffix(s) => Some(s),
        }
    }
}

impl From<u64> for VersionComponent {
    fn from(value: u64) -> Self {
        Self::Number(NumericSegment::from(value))
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Suffix(s) => f.write_str(s),
        }
    }
}

/// A parsed, comparable software version.
///
/// # Examples
///
/// ```
/// use sysmon_util::version::Version;
///
/// let old = Version::parse("1.2.3").unwrap();
/// let new = Version::parse("1.10.0").unwrap();
/// assert!(old < new);
/// assert_eq!(new.to_string(), "1.10.0");
/// ```
///
/// Numeric segments have no upper bound.
///
/// Versions that disagree on the kind of a component at the same position
/// have no natural order: `partial_cmp` returns `None` and
/// [`Version::try_cmp`] reports [`SysmonError::Comparison`]. For that reason
/// `Version` does not implement `Ord` and cannot key a `BTreeSet` or
/// `BTreeMap`; sort with [`sort_versions`] and use `HashSet`/`HashMap` for
/// keyed lookups.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<VersionComponent>,
    original: String,
}

impl Version {
    /// Parse a version string.
    ///
    /// # Errors
    ///
    /// Returns [`SysmonError::InvalidFormat`] if the text does not begin with
    /// a dotted-integer sequence.
    pub fn parse(version_str: &str) -> Result<Self> {
        let Some(caps) = version_regex().captures(version_str) else {
            tracing::debug!("Rejected version string: {:?}", version_str);
            return Err(SysmonError::invalid_format(version_str));
        };

        let mut components: Vec<VersionComponent> = caps["version"]
            .split('.')
            .map(|segment| VersionComponent::Number(NumericSegment::from_digits(segment)))
            .collect();

        let suffix = caps["suffix"].trim();
        if !suffix.is_empty() {
            components.push(VersionComponent::Suffix(suffix.to_string()));
        }

        Ok(Self {
            components,
            original: version_str.to_string(),
        })
    }

    /// All components, numeric prefix first
    pub fn components(&self) -> &[VersionComponent] {
        &self.components
    }

    /// The text this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The numeric segments, without the suffix
    pub fn numeric_prefix(&self) -> Vec<&NumericSegment> {
        self.components
            .iter()
            .filter_map(VersionComponent::as_number)
            .collect()
    }

    /// The trailing suffix, if any
    pub fn suffix(&self) -> Option<&str> {
        self.components.last().and_then(VersionComponent::as_suffix)
    }

    /// Compare two versions component by component.
    ///
    /// A version that is a strict prefix of another sorts first.
    ///
    /// # Errors
    ///
    /// Returns [`SysmonError::Comparison`] at the first position where one
    /// side holds a number and the other a suffix.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        for (index, pair) in self.components.iter().zip(&other.components).enumerate() {
            let ordering = match pair {
                (VersionComponent::Number(a), VersionComponent::Number(b)) => a.cmp(b),
                (VersionComponent::Suffix(a), VersionComponent::Suffix(b)) => a.cmp(b),
                _ => {
                    return Err(SysmonError::comparison(
                        index,
                        self.as_str(),
                        other.as_str(),
                    ));
                }
            };
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        Ok(self.components.len().cmp(&other.components.len()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for Version {
    type Err = SysmonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse and compare two version strings in one step.
///
/// # Errors
///
/// Fails if either string is not a valid version or the two are not
/// comparable.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering> {
    Version::parse(a)?.try_cmp(&Version::parse(b)?)
}

/// Sort versions in ascending order.
///
/// # Errors
///
/// Returns [`SysmonError::Comparison`] and leaves the slice untouched if any
/// two versions cannot be compared.
pub fn sort_versions(versions: &mut [Version]) -> Result<()> {
    for (i, left) in versions.iter().enumerate() {
        for right in &versions[i + 1..] {
            left.try_cmp(right)?;
        }
    }

    versions.sort_by(|a, b| a.try_cmp(b).unwrap_or(Ordering::Equal));
    Ok(())
}
