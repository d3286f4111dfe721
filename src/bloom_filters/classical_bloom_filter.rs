use crate::bloom_filters::base::{indices, Filter};
use crate::config::{check, FilterConfig};
use crate::error::Result;
use crate::hash::HashFunctions;
use bit_vec::BitVec;
use log::debug;
use std::fmt::{Debug, Formatter};

/// Single-threaded Bloom filter over a packed bit array.
#[derive(Clone)]
pub struct BloomFilter {
    /// number of bits in a Bloom filter
    m: usize,
    /// number of hash functions
    k: usize,

    hashes: HashFunctions,
    storage: BitVec,
}

impl BloomFilter {
    /// Filter of `size` bits using the first `k` default hash functions.
    pub fn new(size: usize, k: usize) -> Result<Self> {
        Self::with_hashes(size, k, HashFunctions::default())
    }

    pub fn with_hashes(size: usize, k: usize, hashes: HashFunctions) -> Result<Self> {
        check(size, k, hashes.len())?;
        debug!(
            "bloom filter: size = {size}, k = {k}, hashes = {:?}",
            &hashes.names()[..k]
        );
        Ok(Self {
            m: size,
            k,
            hashes,
            storage: BitVec::from_elem(size, false),
        })
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::with_hashes(config.size, config.k, config.hash_functions())
    }

    pub fn add(&mut self, element: impl AsRef<[u8]>) {
        let element = element.as_ref();
        for idx in indices(&self.hashes, self.k, self.m, element) {
            self.storage.set(idx, true);
        }
    }

    pub fn contains(&self, element: impl AsRef<[u8]>) -> bool {
        let element = element.as_ref();
        indices(&self.hashes, self.k, self.m, element)
            .all(|idx| self.storage.get(idx) == Some(true))
    }

    /// Bit positions `element` maps to, one per hash function.
    pub fn indices<'a>(&'a self, element: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
        indices(&self.hashes, self.k, self.m, element)
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.storage.get(index).unwrap_or(false)
    }

    pub fn count_ones(&self) -> usize {
        self.storage.iter().filter(|bit| *bit).count()
    }

    /// `true` while no bit has been set.
    pub fn is_empty(&self) -> bool {
        self.storage.none()
    }

    pub fn as_bits(&self) -> &BitVec {
        &self.storage
    }

    pub(crate) fn from_parts(k: usize, hashes: HashFunctions, storage: BitVec) -> Self {
        Self {
            m: storage.len(),
            k,
            hashes,
            storage,
        }
    }

    pub fn size(&self) -> usize {
        self.m
    }

    pub fn num_hashes(&self) -> usize {
        self.k
    }
}

impl Filter for BloomFilter {
    fn add(&mut self, element: &[u8]) {
        BloomFilter::add(self, element)
    }

    fn contains(&self, element: &[u8]) -> bool {
        BloomFilter::contains(self, element)
    }

    fn size(&self) -> usize {
        self.m
    }

    fn num_hashes(&self) -> usize {
        self.k
    }
}

impl Debug for BloomFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("size", &self.m)
            .field("k", &self.k)
            .field("hashes", &self.hashes)
            .field("ones", &self.count_ones())
            .finish()
    }
}
