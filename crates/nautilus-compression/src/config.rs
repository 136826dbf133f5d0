//! Configuration for the compression stage

use crate::level::CompressionLevel;
use nautilus_core::Result;
use serde::{Deserialize, Serialize};

/// Compression configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Enable compression
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Gzip level: `-1` for the library default, `0..=9` explicit
    #[serde(default = "default_level")]
    pub level: i32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> i32 {
    CompressionLevel::DEFAULT.as_i32()
}

impl CompressionConfig {
    /// Validated [`CompressionLevel`] for this configuration.
    ///
    /// Fails with [`Error::CompressorInit`](nautilus_core::Error::CompressorInit)
    /// when `level` is out of range.
    pub fn compression_level(&self) -> Result<CompressionLevel> {
        CompressionLevel::from_i32(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nautilus_core::Error;

    #[test]
    fn test_default_config() {
        let config = CompressionConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, -1);
        assert_eq!(
            config.compression_level().unwrap(),
            CompressionLevel::DEFAULT
        );
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: CompressionConfig = serde_json::from_str("{}").unwrap();
        assert!(config.enabled);
        assert_eq!(config.level, -1);

        let config: CompressionConfig = serde_json::from_str(r#"{"level": 9}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(
            config.compression_level().unwrap(),
            CompressionLevel::BEST_COMPRESSION
        );
    }

    #[test]
    fn test_out_of_range_level_is_reported() {
        let config: CompressionConfig = serde_json::from_str(r#"{"level": 42}"#).unwrap();
        let err = config.compression_level().unwrap_err();
        assert!(matches!(err, Error::CompressorInit { level: 42 }));
    }
}
