//! Generic helpers shared by system monitoring collectors.
//!
//! This crate provides the small building blocks that collectors reach for
//! when turning raw service output into structured statistics: typed scalar
//! parsing, null-aware sums, full socket reads, auto-vivifying nested maps
//! and comparable software versions.

pub mod config;
pub mod error;
pub mod nested;
pub mod read;
pub mod scalar;
pub mod sum;
pub mod version;

pub use config::UtilConfig;
pub use error::{Result, SysmonError};
pub use nested::{NestedMap, NestedValue, StatsTree};
pub use read::{read_all, read_all_async, read_all_bytes};
pub use scalar::{parse_scalar, ScalarValue};
pub use sum::safe_sum;
pub use version::{NumericSegment, Version, VersionComponent};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::UtilConfig;
    pub use crate::error::{Result, SysmonError};
    pub use crate::nested::{NestedMap, NestedValue, StatsTree};
    pub use crate::read::{read_all, read_all_async, read_all_bytes, read_all_with};
    pub use crate::scalar::{parse_scalar, parse_scalar_with, ScalarValue};
    pub use crate::sum::safe_sum;
    pub use crate::version::{
        compare_versions, sort_versions, NumericSegment, Version, VersionComponent,
    };
}
