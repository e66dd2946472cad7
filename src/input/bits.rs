//! Fixed-capacity bit vector
//!
//! Backing storage is a boxed slice of 64-bit words sized once at
//! construction. Nothing in here grows, shrinks, or allocates after `new`,
//! except [`BitVector::xor_and`] which returns a fresh vector by contract.
//!
//! Bit indices are not range checked beyond what slice indexing does: an
//! index outside the owning word range panics, an index inside the last word
//! but past `capacity` silently touches padding bits. Callers own index
//! validity.

const WORD_BITS: usize = 64;

#[inline(always)]
const fn word_index(bit: usize) -> usize {
    bit >> 6
}

#[inline(always)]
const fn bit_mask(bit: usize) -> u64 {
    1u64 << (bit & (WORD_BITS - 1))
}

/// Boolean vector packed into 64-bit words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    bits: usize,
    words: Box<[u64]>,
}

impl BitVector {
    /// Creates a cleared vector able to hold `bits` booleans
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            words: vec![0u64; bits.div_ceil(WORD_BITS)].into_boxed_slice(),
        }
    }

    /// Number of addressable bits, fixed at construction
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bits
    }

    /// Number of backing words (`ceil(capacity / 64)`)
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Raw backing words, lowest bit indices first
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Overwrites this vector's words with `other`'s, aligned from word zero.
    ///
    /// `other` must not have more words than `self`. When it has fewer, the
    /// trailing words of `self` keep their values.
    #[inline]
    pub fn copy_from(&mut self, other: &BitVector) {
        debug_assert!(other.words.len() <= self.words.len());
        self.words[..other.words.len()].copy_from_slice(&other.words);
    }

    /// True when no bit is set
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set bits
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Smallest set bit index `>= from`, if any.
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        let mut index = word_index(from);
        if index >= self.words.len() {
            return None;
        }

        // Bits below `from` in the starting word are masked off
        let mut word = self.words[index] & (u64::MAX << (from & (WORD_BITS - 1)));
        loop {
            if word != 0 {
                return Some(index * WORD_BITS + word.trailing_zeros() as usize);
            }
            index += 1;
            if index >= self.words.len() {
                return None;
            }
            word = self.words[index];
        }
    }

    /// Writes ascending set-bit indices into `dst`, stopping when it is full.
    ///
    /// Returns the number of indices written.
    pub fn extract_set_bits(&self, dst: &mut [usize]) -> usize {
        let mut written = 0;
        let mut cursor = self.next_set_bit(0);
        while let Some(bit) = cursor {
            if written == dst.len() {
                break;
            }
            dst[written] = bit;
            written += 1;
            cursor = self.next_set_bit(bit + 1);
        }
        written
    }

    /// Returns `(self ^ other) & other`, word by word.
    ///
    /// With `self` as the previous frame and `other` as the current one the
    /// result holds exactly the 0→1 transitions. `other` must have at least
    /// as many words as `self`.
    pub fn xor_and(&self, other: &BitVector) -> BitVector {
        let mut out = BitVector::new(self.bits);
        self.xor_and_into(other, &mut out);
        out
    }

    /// Allocation-free form of [`xor_and`](Self::xor_and) writing into `dst`,
    /// which must have at least as many words as `self`.
    pub fn xor_and_into(&self, other: &BitVector, dst: &mut BitVector) {
        for (i, &word) in self.words.iter().enumerate() {
            let o = other.words[i];
            dst.words[i] = (word ^ o) & o;
        }
    }

    /// Iterates set bit indices in ascending order
    pub fn iter(&self) -> SetBits<std::iter::Copied<std::slice::Iter<'_, u64>>> {
        SetBits::new(self.words.iter().copied())
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> bool {
        self.words[word_index(index)] & bit_mask(index) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, index: usize) {
        self.words[word_index(index)] |= bit_mask(index);
    }

    #[inline(always)]
    pub fn clear(&mut self, index: usize) {
        self.words[word_index(index)] &= !bit_mask(index);
    }

    #[inline(always)]
    pub fn set_to(&mut self, index: usize, value: bool) {
        if value {
            self.set(index);
        } else {
            self.clear(index);
        }
    }

    /// Clears every bit
    #[inline]
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Replaces the first word's low 32 bits with `mask`, for devices whose
    /// native state is already a bit mask.
    #[inline]
    pub fn set_low_u32(&mut self, mask: u32) {
        self.words[0] = (self.words[0] & !(u32::MAX as u64)) | mask as u64;
    }

    /// Low 32 bits of the first word
    #[inline]
    pub fn low_u32(&self) -> u32 {
        self.words.first().map_or(0, |&w| w as u32)
    }
}

/// Ascending set-bit iterator over any word source.
///
/// Walks one word at a time and peels off the lowest set bit, so the cost is
/// proportional to the word count plus the number of set bits.
pub struct SetBits<I> {
    words: I,
    base: usize,
    current: u64,
}

impl<I: Iterator<Item = u64>> SetBits<I> {
    pub fn new(mut words: I) -> Self {
        let current = words.next().unwrap_or(0);
        Self {
            words,
            base: 0,
            current,
        }
    }
}

impl<I: Iterator<Item = u64>> Iterator for SetBits<I> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.current = self.words.next()?;
            self.base += WORD_BITS;
        }
        let bit = self.current.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.current &= self.current - 1;
        Some(self.base + bit)
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = usize;
    type IntoIter = SetBits<std::iter::Copied<std::slice::Iter<'a, u64>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
