use crate::hash::HashFunctions;

pub trait Filter {
    /// Sets the bit selected by each of the `k` hash functions.
    fn add(&mut self, element: &[u8]);
    /// `false` means definitely absent, `true` means possibly present.
    fn contains(&self, element: &[u8]) -> bool;
    fn size(&self) -> usize;
    fn num_hashes(&self) -> usize;
}

/// index = h mod m
#[inline]
pub(crate) fn reduce(hash: u32, size: usize) -> usize {
    hash as usize % size
}

/// The `k` bit positions of `element`, in hash function order.
pub(crate) fn indices<'a>(
    hashes: &'a HashFunctions,
    k: usize,
    size: usize,
    element: &'a [u8],
) -> impl Iterator<Item = usize> + 'a {
    hashes
        .iter()
        .take(k)
        .map(move |h| reduce(h.hash(element), size))
}
