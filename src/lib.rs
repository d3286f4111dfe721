//! Fixed-size Bloom filter built from a caller-chosen, ordered list of
//! 32-bit hash functions.
//!
//! ```
//! use multihash_bloom::BloomFilter;
//!
//! let mut bf = BloomFilter::new(10, 3).unwrap();
//! bf.add("yellow");
//! assert!(bf.contains("yellow"));
//! ```

pub mod bloom_filters;
pub mod config;
pub mod error;
pub mod hash;

pub use bloom_filters::{AtomicBloomFilter, BloomFilter, Filter};
pub use config::FilterConfig;
pub use error::{ConfigError, Result};
pub use hash::{HashFunction, HashFunctions, HashKind, DEFAULT_HASHES};
