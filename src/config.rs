use core::ops::RangeInclusive;

use crate::Key;

/// Construction-time parameters of a [`crate::Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    pub key_range: RangeInclusive<Key>,
}

impl TreeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys restricted to `0..=99`, the range that fits a two-digit label.
    #[must_use]
    pub fn two_digit() -> Self {
        Self::new().with_key_range(0..=99)
    }

    #[must_use]
    pub fn with_key_range(mut self, key_range: RangeInclusive<Key>) -> Self {
        self.key_range = key_range;
        self
    }

    pub fn admits(&self, key: Key) -> bool {
        self.key_range.contains(&key)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            key_range: Key::MIN..=Key::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TreeConfig;

    #[test]
    pub fn default_admits_everything() {
        let config = TreeConfig::default();

        assert!(config.admits(0));
        assert!(config.admits(u32::MAX));
    }

    #[test]
    pub fn two_digit_bound() {
        let config = TreeConfig::two_digit();

        assert!(config.admits(0));
        assert!(config.admits(99));
        assert!(!config.admits(100));
    }
}
