//! Order-preserving alphabet compaction and k-gram bit packing.
//!
//! The builder maps every occurring byte to a dense rank and packs groups
//! of `k` ranks into one machine word, earlier characters in more
//! significant bits, so that comparing packed symbols agrees with
//! comparing the underlying character windows.

use crate::types::{FromUsize, Symbol};

// --------------------------------------------------
/// Fold leucine onto isoleucine. The two are isobaric and indistinguishable
/// in mass-spectrometry peptide data, so they share one rank.
pub fn fold_l_to_i(text: &mut [u8]) {
    for byte in text.iter_mut() {
        if *byte == b'L' {
            *byte = b'I';
        }
    }
}

// --------------------------------------------------
/// Dense byte-to-rank table over the bytes occurring in a text.
///
/// Ranks are assigned in ascending byte order, so for any two occurring
/// bytes `a < b` implies `rank(a) < rank(b)`. Bytes outside the expected
/// biological alphabet still get a rank; they only cost alphabet width.
#[derive(Debug)]
pub struct RankTable {
    ranks: [u8; 256],
    alphabet_len: usize,
    bits_per_char: u32,
}

impl RankTable {
    pub fn new(text: &[u8]) -> RankTable {
        let mut occurs = [false; 256];
        for &byte in text {
            occurs[byte as usize] = true;
        }

        let mut ranks = [0u8; 256];
        let mut alphabet_len: usize = 0;
        for byte in 0..256 {
            if occurs[byte] {
                ranks[byte] = alphabet_len as u8;
                alphabet_len += 1;
            }
        }

        // A one-symbol alphabet carries no information at all.
        let bits_per_char = if alphabet_len > 1 {
            (alphabet_len as u32 - 1).ilog2() + 1
        } else {
            0
        };

        RankTable {
            ranks,
            alphabet_len,
            bits_per_char,
        }
    }

    #[inline(always)]
    pub fn rank(&self, byte: u8) -> u8 {
        self.ranks[byte as usize]
    }

    /// Number of distinct bytes seen
    pub fn alphabet_len(&self) -> usize {
        self.alphabet_len
    }

    /// Bits needed to store one rank
    pub fn bits_per_char(&self) -> u32 {
        self.bits_per_char
    }
}

// --------------------------------------------------
/// Pack `sparseness` input characters into each output symbol. The output
/// has `ceil(text.len() / sparseness)` symbols; positions past the end of
/// the text contribute rank zero, the minimum, so that a window running
/// off the end sorts before any window it prefixes.
pub fn pack<S>(text: &[u8], table: &RankTable, sparseness: usize) -> Vec<S>
where
    S: Symbol + FromUsize<S>,
{
    let packed_len = text.len().div_ceil(sparseness);
    let bits = table.bits_per_char();
    let mut packed = Vec::with_capacity(packed_len);

    for i in 0..packed_len {
        let start = i * sparseness;
        let mut word: usize = 0;
        for j in 0..sparseness {
            let rank = text
                .get(start + j)
                .map_or(0, |&byte| table.rank(byte) as usize);
            word = (word << bits) | rank;
        }
        packed.push(S::from_usize(word));
    }

    packed
}
