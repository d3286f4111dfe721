//! Bloom filter that can be shared between threads.
//!
//! Bits live in `AtomicU64` words and are only ever set, never cleared, so
//! `add` is a plain `fetch_or` and `contains` a plain `load`. `Relaxed` is
//! enough: a `contains` racing an `add` of the same element may still see
//! some of its bits unset and report `false`. Every completed `add` is
//! visible to `contains` calls that happen after it.

use crate::bloom_filters::base::{indices, Filter};
use crate::bloom_filters::BloomFilter;
use crate::config::{check, FilterConfig};
use crate::error::Result;
use crate::hash::HashFunctions;
use bit_vec::BitVec;
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

const WORD_BITS: usize = u64::BITS as usize;

pub struct AtomicBloomFilter {
    m: usize,
    k: usize,

    hashes: HashFunctions,
    words: Box<[AtomicU64]>,
}

impl AtomicBloomFilter {
    pub fn new(size: usize, k: usize) -> Result<Self> {
        Self::with_hashes(size, k, HashFunctions::default())
    }

    pub fn with_hashes(size: usize, k: usize, hashes: HashFunctions) -> Result<Self> {
        check(size, k, hashes.len())?;
        debug!(
            "atomic bloom filter: size = {size}, k = {k}, hashes = {:?}",
            &hashes.names()[..k]
        );
        let num_words = size.div_ceil(WORD_BITS);
        Ok(Self {
            m: size,
            k,
            hashes,
            words: (0..num_words).map(|_| AtomicU64::new(0)).collect(),
        })
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::with_hashes(config.size, config.k, config.hash_functions())
    }

    pub fn add(&self, element: impl AsRef<[u8]>) {
        for idx in indices(&self.hashes, self.k, self.m, element.as_ref()) {
            let (word, mask) = locate(idx);
            self.words[word].fetch_or(mask, Ordering::Relaxed);
        }
    }

    pub fn contains(&self, element: impl AsRef<[u8]>) -> bool {
        indices(&self.hashes, self.k, self.m, element.as_ref()).all(|idx| self.is_set(idx))
    }

    pub fn indices<'a>(&'a self, element: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
        indices(&self.hashes, self.k, self.m, element)
    }

    pub fn is_set(&self, index: usize) -> bool {
        if index >= self.m {
            return false;
        }
        let (word, mask) = locate(index);
        self.words[word].load(Ordering::Relaxed) & mask != 0
    }

    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.load(Ordering::Relaxed) == 0)
    }

    /// Point-in-time copy as a single-threaded filter with the same hashes.
    pub fn to_bloom_filter(&self) -> BloomFilter {
        let storage = BitVec::from_fn(self.m, |idx| self.is_set(idx));
        BloomFilter::from_parts(self.k, self.hashes.clone(), storage)
    }

    pub fn size(&self) -> usize {
        self.m
    }

    pub fn num_hashes(&self) -> usize {
        self.k
    }
}

fn locate(index: usize) -> (usize, u64) {
    (index / WORD_BITS, 1u64 << (index % WORD_BITS))
}

impl Filter for AtomicBloomFilter {
    fn add(&mut self, element: &[u8]) {
        AtomicBloomFilter::add(self, element)
    }

    fn contains(&self, element: &[u8]) -> bool {
        AtomicBloomFilter::contains(self, element)
    }

    fn size(&self) -> usize {
        self.m
    }

    fn num_hashes(&self) -> usize {
        self.k
    }
}

impl Debug for AtomicBloomFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicBloomFilter")
            .field("size", &self.m)
            .field("k", &self.k)
            .field("hashes", &self.hashes)
            .field("ones", &self.count_ones())
            .finish()
    }
}
