//! Gzip compression levels

use nautilus_core::{Error, Result};

/// Validated gzip compression level, standard deflate semantics.
///
/// `-1` selects the library default and `0` stores without compression,
/// while `1..=9` trade speed for ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(i32);

impl CompressionLevel {
    /// Store only, no compression (level 0).
    pub const NO_COMPRESSION: Self = Self(0);

    /// Fastest compression (level 1).
    pub const BEST_SPEED: Self = Self(1);

    /// Best compression ratio (level 9).
    pub const BEST_COMPRESSION: Self = Self(9);

    /// Library default, balancing speed and ratio.
    pub const DEFAULT: Self = Self(-1);

    /// Validate an integer level.
    ///
    /// Accepts `-1..=9`; anything else is [`Error::CompressorInit`].
    pub fn from_i32(level: i32) -> Result<Self> {
        if (-1..=9).contains(&level) {
            Ok(Self(level))
        } else {
            Err(Error::CompressorInit { level })
        }
    }

    /// The raw integer level.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    pub(crate) fn to_flate2(self) -> flate2::Compression {
        match self.0 {
            -1 => flate2::Compression::default(),
            n => flate2::Compression::new(n as u32),
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}
