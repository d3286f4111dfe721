mod atomic_bloom_filter;
mod base;
mod classical_bloom_filter;

pub use self::atomic_bloom_filter::AtomicBloomFilter;
pub use self::base::Filter;
pub use self::classical_bloom_filter::BloomFilter;
