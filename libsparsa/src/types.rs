//! Common types

use std::fmt::Debug;

// --------------------------------------------------
/// Trait to generically describe one symbol of a text: `u8` for raw
/// sequence bytes, `u16`/`u32` for packed multi-character symbols, and
/// `i64` for the name sequences produced during suffix array recursion.
pub trait Symbol: Debug + Copy + Default + Ord {
    fn to_usize(&self) -> usize;
}

impl Symbol for u8 {
    fn to_usize(&self) -> usize {
        *self as usize
    }
}

impl Symbol for u16 {
    fn to_usize(&self) -> usize {
        *self as usize
    }
}

impl Symbol for u32 {
    fn to_usize(&self) -> usize {
        *self as usize
    }
}

impl Symbol for i64 {
    fn to_usize(&self) -> usize {
        *self as usize
    }
}

// --------------------------------------------------
pub trait FromUsize<T> {
    fn from_usize(val: usize) -> T;
}

impl FromUsize<u8> for u8 {
    fn from_usize(val: usize) -> u8 {
        val as u8
    }
}

impl FromUsize<u16> for u16 {
    fn from_usize(val: usize) -> u16 {
        val as u16
    }
}

impl FromUsize<u32> for u32 {
    fn from_usize(val: usize) -> u32 {
        val as u32
    }
}

// --------------------------------------------------
/// The arguments for creating a `SparseSuffixArray`
#[derive(Clone, Debug)]
pub struct SsaBuilderArgs {
    /// Text as raw bytes. The text is owned by the builder for the whole
    /// construction and kept afterwards for order checking.
    pub text: Vec<u8>,

    /// Sparseness factor: only suffixes starting at multiples of this
    /// value are sampled. Must be at least 1.
    pub sparseness: usize,

    /// Indicates that the input is nucleotides. Protein input has `L`
    /// folded to `I` before ranking; DNA input is ranked as-is.
    pub is_dna: bool,

    /// When `true`, pack the text and induce the sparse array directly.
    /// When `false`, build the full suffix array and subsample it, which
    /// needs far more memory and serves as a reference for testing.
    pub optimized: bool,
}
