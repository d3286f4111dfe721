//! The pluggable hash function set a filter is built from.
//!
//! Every function maps an arbitrary byte sequence to a `u32`. A filter keeps
//! an ordered [`HashFunctions`] list and always applies its first `k`
//! entries in the same order, so the i-th index of an element never changes
//! for the lifetime of the filter.

use crate::error::ConfigError;
use std::fmt::{self, Debug, Display, Formatter};
use std::io::Cursor;
use std::str::FromStr;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;
use xxhash_rust::xxh32::xxh32;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash list used when the caller doesn't supply one.
pub const DEFAULT_HASHES: [HashKind; 3] =
    [HashKind::Fnv1a, HashKind::Murmur3, HashKind::Xxh32];

pub trait HashFunction: Send + Sync {
    fn hash(&self, bytes: &[u8]) -> u32;

    /// Name used in logs and `Debug` output.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> HashFunction for F
where
    F: Fn(&[u8]) -> u32 + Send + Sync,
{
    fn hash(&self, bytes: &[u8]) -> u32 {
        self(bytes)
    }
}

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashKind {
    /// 32-bit FNV-1a.
    Fnv1a,
    /// MurmurHash3 x86_32, seed 0.
    Murmur3,
    /// xxHash32, seed 0.
    Xxh32,
    /// xxh3-64 folded to 32 bits.
    Xxh3,
}

impl HashKind {
    pub const ALL: [HashKind; 4] = [
        HashKind::Fnv1a,
        HashKind::Murmur3,
        HashKind::Xxh32,
        HashKind::Xxh3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HashKind::Fnv1a => "fnv",
            HashKind::Murmur3 => "murmur",
            HashKind::Xxh32 => "xxh32",
            HashKind::Xxh3 => "xxh3",
        }
    }
}

impl HashFunction for HashKind {
    fn hash(&self, bytes: &[u8]) -> u32 {
        match self {
            HashKind::Fnv1a => fnv1a_32(bytes),
            HashKind::Murmur3 => murmur3_32(bytes),
            HashKind::Xxh32 => xxh32(bytes, 0),
            HashKind::Xxh3 => {
                let h = xxh3_64(bytes);
                (h >> 32) as u32 ^ h as u32
            }
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Display for HashKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fnv" | "fnv1a" => Ok(HashKind::Fnv1a),
            "murmur" | "murmur3" => Ok(HashKind::Murmur3),
            "xxh32" | "xxhash32" => Ok(HashKind::Xxh32),
            "xxh3" => Ok(HashKind::Xxh3),
            _ => Err(ConfigError::UnknownHash(s.to_string())),
        }
    }
}

impl TryFrom<String> for HashKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashKind> for String {
    fn from(kind: HashKind) -> Self {
        kind.as_str().to_string()
    }
}

fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |h, &b| {
        (h ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

fn murmur3_32(bytes: &[u8]) -> u32 {
    murmur3::murmur3_32(&mut Cursor::new(bytes), 0)
        .expect("reading from an in-memory slice never fails")
}

/// Ordered list of hash functions. Position `i` is hash function `i`.
#[derive(Clone)]
pub struct HashFunctions {
    functions: Vec<Arc<dyn HashFunction>>,
}

impl HashFunctions {
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = HashKind>,
    {
        kinds.into_iter().fold(Self::new(), |acc, kind| acc.with(kind))
    }

    /// Appends `function` as the next position in the list.
    pub fn with<F>(mut self, function: F) -> Self
    where
        F: HashFunction + 'static,
    {
        self.functions.push(Arc::new(function));
        self
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|h| h.name()).collect()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Arc<dyn HashFunction>> {
        self.functions.iter()
    }
}

impl Default for HashFunctions {
    fn default() -> Self {
        Self::from_kinds(DEFAULT_HASHES)
    }
}

impl Debug for HashFunctions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
