use crate::bloom_filters::{AtomicBloomFilter, BloomFilter};
use crate::error::{ConfigError, Result};
use crate::hash::{HashFunctions, HashKind, DEFAULT_HASHES};
use log::warn;
use serde::{Deserialize, Serialize};

/// Construction parameters for a filter.
///
/// `k` picks the first `k` entries of `hashes`, the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// number of bits in the filter
    pub size: usize,
    /// number of hash functions applied per element
    pub k: usize,
    #[serde(default = "default_hashes")]
    pub hashes: Vec<HashKind>,
}

fn default_hashes() -> Vec<HashKind> {
    DEFAULT_HASHES.to_vec()
}

impl FilterConfig {
    pub fn new(size: usize, k: usize) -> Self {
        Self {
            size,
            k,
            hashes: default_hashes(),
        }
    }

    pub fn with_hashes<I>(mut self, hashes: I) -> Self
    where
        I: IntoIterator<Item = HashKind>,
    {
        self.hashes = hashes.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        check(self.size, self.k, self.hashes.len())
    }

    pub fn hash_functions(&self) -> HashFunctions {
        HashFunctions::from_kinds(self.hashes.iter().copied())
    }

    pub fn build(&self) -> Result<BloomFilter> {
        BloomFilter::from_config(self)
    }

    pub fn build_atomic(&self) -> Result<AtomicBloomFilter> {
        AtomicBloomFilter::from_config(self)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(10, 3)
    }
}

/// Checks `size` and `k` against the number of `available` hash functions.
pub(crate) fn check(size: usize, k: usize, available: usize) -> Result<()> {
    let res = if size == 0 {
        Err(ConfigError::ZeroSize)
    } else if k == 0 {
        Err(ConfigError::ZeroHashes)
    } else if k > available {
        Err(ConfigError::TooManyHashes { k, available })
    } else {
        Ok(())
    };
    if let Err(e) = &res {
        warn!("rejected filter configuration: {e}");
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_demo_configuration() {
        let config = FilterConfig::default();
        assert_eq!(config.size, 10);
        assert_eq!(config.k, 3);
        assert_eq!(config.hashes, DEFAULT_HASHES.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_errors() {
        assert_eq!(FilterConfig::new(0, 1).validate(), Err(ConfigError::ZeroSize));
        assert_eq!(FilterConfig::new(10, 0).validate(), Err(ConfigError::ZeroHashes));
        assert_eq!(
            FilterConfig::new(10, 4).validate(),
            Err(ConfigError::TooManyHashes { k: 4, available: 3 })
        );
        assert!(FilterConfig::new(10, 4)
            .with_hashes(HashKind::ALL)
            .validate()
            .is_ok());
    }

    #[test]
    fn build_fails_without_producing_a_filter() {
        assert!(FilterConfig::new(0, 3).build().is_err());
        assert!(FilterConfig::new(8, 5).build_atomic().is_err());
    }

    #[test]
    fn deserialize_from_json() {
        let config: FilterConfig =
            serde_json::from_str(r#"{"size": 64, "k": 2, "hashes": ["murmur", "xxh3"]}"#)
                .unwrap();
        assert_eq!(
            config,
            FilterConfig::new(64, 2).with_hashes([HashKind::Murmur3, HashKind::Xxh3])
        );

        let config: FilterConfig = serde_json::from_str(r#"{"size": 64, "k": 3}"#).unwrap();
        assert_eq!(config.hashes, DEFAULT_HASHES.to_vec());
    }

    #[test]
    fn unknown_hash_name_is_rejected() {
        let res = serde_json::from_str::<FilterConfig>(
            r#"{"size": 64, "k": 1, "hashes": ["cityhash"]}"#,
        );
        let err = res.unwrap_err().to_string();
        assert!(err.contains("cityhash"), "{err}");
    }

    #[test]
    fn serializes_hash_names() {
        let json = serde_json::to_string(&FilterConfig::default()).unwrap();
        assert_eq!(json, r#"{"size":10,"k":3,"hashes":["fnv","murmur","xxh32"]}"#);
    }
}
