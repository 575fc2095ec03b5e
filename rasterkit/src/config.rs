//! Configuration for value reverse-indexing and the stretch helper.

use serde::{Deserialize, Serialize};

/// How a [`ValueIndex`](crate::ValueIndex) maps a raw value to its bucket.
///
/// The dense table gives O(1) lookup at the cost of one `u32` per value in
/// the tracked range, which is wasteful for sparse but wide value sets. The
/// hash map costs memory per distinct value only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// Dense histogram and lookup table over the value range.
    /// Ranges wider than 32-bit addressing are rejected.
    #[default]
    Dense,
    /// Hash-based counting and lookup. No range limit.
    Hashed,
    /// Dense when the range needs at most `max_dense_entries` entries,
    /// hashed otherwise.
    Auto { max_dense_entries: u64 },
}

impl LookupStrategy {
    pub fn validate(&self) {
        if let LookupStrategy::Auto { max_dense_entries } = self {
            assert!(
                *max_dense_entries > 0,
                "max_dense_entries must be positive"
            );
            assert!(
                *max_dense_entries <= u32::MAX as u64,
                "max_dense_entries must fit 32-bit addressing, got {}",
                max_dense_entries
            );
        }
    }

    /// Whether a table spanning `span` entries should be stored densely.
    pub(crate) fn prefers_dense(&self, span: u128) -> bool {
        match self {
            LookupStrategy::Dense => true,
            LookupStrategy::Hashed => false,
            LookupStrategy::Auto { max_dense_entries } => span <= *max_dense_entries as u128,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueIndexConfig {
    pub lookup: LookupStrategy,
    /// A dense lookup table filled below this ratio (tracked values / table
    /// entries) is reported with a warning.
    pub sparse_warn_ratio: f64,
}

impl Default for ValueIndexConfig {
    fn default() -> Self {
        Self {
            lookup: LookupStrategy::Dense,
            sparse_warn_ratio: 0.01,
        }
    }
}

impl ValueIndexConfig {
    pub fn hashed() -> Self {
        Self {
            lookup: LookupStrategy::Hashed,
            ..Self::default()
        }
    }

    pub fn validate(&self) {
        self.lookup.validate();
        assert!(
            (0.0..=1.0).contains(&self.sparse_warn_ratio),
            "sparse_warn_ratio must be within 0..=1, got {}",
            self.sparse_warn_ratio
        );
    }
}

/// Linear histogram stretch of one band around a known mean and standard
/// deviation, as used by [`stretch`](crate::ops::stretch).
///
/// `mean - num_std_dev * std_dev` maps to `min` and
/// `mean + num_std_dev * std_dev` maps to `max`; results are clipped to
/// `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StretchParams {
    pub num_std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// Input value excluded from the stretch.
    pub ignore_value: Option<f64>,
    /// Written where the input equals `ignore_value`.
    pub output_null: f64,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            num_std_dev: 2.0,
            min: 0.0,
            max: 255.0,
            mean: 0.0,
            std_dev: 1.0,
            ignore_value: None,
            output_null: 0.0,
        }
    }
}

impl StretchParams {
    pub fn validate(&self) {
        assert!(
            self.num_std_dev > 0.0,
            "num_std_dev must be positive, got {}",
            self.num_std_dev
        );
        assert!(
            self.std_dev > 0.0,
            "std_dev must be positive, got {}",
            self.std_dev
        );
        assert!(
            self.min <= self.max,
            "min ({}) must not exceed max ({})",
            self.min,
            self.max
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dense() {
        let config = ValueIndexConfig::default();
        assert_eq!(config.lookup, LookupStrategy::Dense);
        config.validate();
    }

    #[test]
    fn test_auto_threshold() {
        let strategy = LookupStrategy::Auto {
            max_dense_entries: 100,
        };
        assert!(strategy.prefers_dense(100));
        assert!(!strategy.prefers_dense(101));
        assert!(LookupStrategy::Dense.prefers_dense(u128::MAX));
        assert!(!LookupStrategy::Hashed.prefers_dense(1));
    }

    #[test]
    #[should_panic(expected = "max_dense_entries must fit 32-bit addressing")]
    fn test_auto_threshold_above_u32_panics() {
        LookupStrategy::Auto {
            max_dense_entries: u32::MAX as u64 + 1,
        }
        .validate();
    }

    #[test]
    #[should_panic(expected = "sparse_warn_ratio must be within 0..=1")]
    fn test_negative_warn_ratio_panics() {
        ValueIndexConfig {
            sparse_warn_ratio: -0.5,
            ..Default::default()
        }
        .validate();
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ValueIndexConfig =
            serde_json::from_str(r#"{ "lookup": { "auto": { "max_dense_entries": 4096 } } }"#)
                .unwrap();
        assert_eq!(
            config.lookup,
            LookupStrategy::Auto {
                max_dense_entries: 4096
            }
        );
        assert_eq!(config.sparse_warn_ratio, 0.01);

        let hashed: ValueIndexConfig = serde_json::from_str(r#"{ "lookup": "hashed" }"#).unwrap();
        assert_eq!(hashed, ValueIndexConfig::hashed());
    }

    #[test]
    #[should_panic(expected = "std_dev must be positive")]
    fn test_stretch_zero_std_dev_panics() {
        StretchParams {
            std_dev: 0.0,
            ..Default::default()
        }
        .validate();
    }

    #[test]
    fn test_stretch_params_from_json() {
        let params: StretchParams =
            serde_json::from_str(r#"{ "mean": 120.5, "std_dev": 14.0, "ignore_value": 0.0 }"#)
                .unwrap();
        params.validate();
        assert_eq!(params.mean, 120.5);
        assert_eq!(params.ignore_value, Some(0.0));
        assert_eq!(params.max, 255.0);
    }
}
