//! Null-propagating totals for counters that may be unavailable.

use std::iter::Sum;

/// Sum a sequence of optional numbers.
///
/// Returns `None` as soon as any element is `None`, otherwise the total
/// (zero for an empty sequence).
///
/// ```
/// use sysmon_util::sum::safe_sum;
///
/// assert_eq!(safe_sum([Some(1), Some(2), Some(3)]), Some(6));
/// assert_eq!(safe_sum([Some(1), None, Some(3)]), None);
/// assert_eq!(safe_sum(Vec::<Option<u64>>::new()), Some(0));
/// ```
pub fn safe_sum<T, I>(numbers: I) -> Option<T>
where
    T: Sum<T>,
    I: IntoIterator<Item = Option<T>>,
{
    numbers.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_sum_integers() {
        assert_eq!(safe_sum(vec![Some(1), Some(2), Some(3)]), Some(6));
        assert_eq!(safe_sum(vec![Some(-4i64), Some(4)]), Some(0));
    }

    #[test]
    fn test_safe_sum_with_missing_value() {
        assert_eq!(safe_sum(vec![Some(1), Some(2), None, Some(3)]), None);
        assert_eq!(safe_sum(vec![None::<u32>]), None);
    }

    #[test]
    fn test_safe_sum_empty() {
        assert_eq!(safe_sum(Vec::<Option<i32>>::new()), Some(0));
        assert_eq!(safe_sum(Vec::<Option<f64>>::new()), Some(0.0));
    }

    #[test]
    fn test_safe_sum_floats() {
        let total = safe_sum([Some(0.5f64), Some(1.25)]).unwrap();
        assert!((total - 1.75).abs() < f64::EPSILON);
    }
}
