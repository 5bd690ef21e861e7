//! Sparse suffix array construction.
//!
//! The optimized path packs the text so that one packed symbol covers
//! `sparseness` characters, induces the suffix array of the packed text,
//! and scales the indices back to character positions. Packing preserves
//! lexicographic order between windows aligned on multiples of the
//! sparseness factor, so the result equals the full suffix array sampled
//! at those positions.

use crate::{
    alphabet::{self, RankTable},
    sais,
    types::SsaBuilderArgs,
};
use anyhow::{bail, Result};
use log::info;
use std::time::Instant;

// --------------------------------------------------
/// A sparse suffix array: the suffixes of `text` starting at multiples of
/// `sparseness`, in lexicographic order.
#[derive(Debug, PartialEq)]
pub struct SparseSuffixArray {
    /// The sparseness factor the array was sampled with
    pub sparseness: u8,

    /// The text the array was built over, after any protein folding
    pub text: Vec<u8>,

    /// Sampled suffix positions in lexicographic suffix order
    pub suffix_array: Vec<i64>,
}

impl SparseSuffixArray {
    pub fn new(args: SsaBuilderArgs) -> Result<SparseSuffixArray> {
        let SsaBuilderArgs {
            mut text,
            sparseness,
            is_dna,
            optimized,
        } = args;

        if sparseness < 1 {
            bail!("Sparseness factor must be at least 1");
        }
        if sparseness > u8::MAX as usize {
            bail!("Sparseness factor must be at most {}", u8::MAX);
        }

        if !is_dna {
            alphabet::fold_l_to_i(&mut text);
        }

        let now = Instant::now();
        let suffix_array = if optimized {
            build_sampled(&text, sparseness)?
        } else {
            build_full_then_sample(&text, sparseness)
        };
        info!(
            "Built sparse suffix array of len {} in {:?}",
            suffix_array.len(),
            now.elapsed()
        );

        Ok(SparseSuffixArray {
            sparseness: sparseness as u8,
            text,
            suffix_array,
        })
    }

    // --------------------------------------------------
    /// Verify that every suffix precedes its successor; returns the ranks
    /// that are out of order.
    pub fn check_order(&self) -> Vec<usize> {
        let mut errors = vec![];
        for (rank, window) in self.suffix_array.windows(2).enumerate() {
            if let [prev, cur] = window {
                let prev = &self.text[*prev as usize..];
                let cur = &self.text[*cur as usize..];
                if prev >= cur {
                    errors.push(rank);
                }
            }
        }
        errors
    }
}

// --------------------------------------------------
/// Optimized path: pack, induce over the narrowest symbol width that
/// holds one packed window, then scale the indices.
fn build_sampled(text: &[u8], sparseness: usize) -> Result<Vec<i64>> {
    if sparseness == 1 {
        return Ok(sais::suffix_array(text, sais::ALPHABET_U8));
    }

    let table = RankTable::new(text);
    let required_bits = table.bits_per_char() * sparseness as u32;
    info!(
        "Alphabet of {} characters, {} bits per packed symbol",
        table.alphabet_len(),
        required_bits
    );

    let now = Instant::now();
    let mut suffix_array = if required_bits <= 8 {
        let packed: Vec<u8> = alphabet::pack(text, &table, sparseness);
        sais::suffix_array(&packed, sais::ALPHABET_U8)
    } else if required_bits <= 16 {
        let packed: Vec<u16> = alphabet::pack(text, &table, sparseness);
        sais::suffix_array(&packed, sais::ALPHABET_U16)
    } else if required_bits <= 32 {
        let packed: Vec<u32> = alphabet::pack(text, &table, sparseness);
        // A dense 2^32 bucket array is unaffordable; size from what occurs.
        let alphabet_len = packed.iter().max().map_or(0, |&s| s as usize) + 1;
        sais::suffix_array(&packed, alphabet_len)
    } else {
        bail!(
            "Alphabet too large: {} characters at sparseness {} need {} bits per symbol",
            table.alphabet_len(),
            sparseness,
            required_bits
        );
    };
    info!("Induced suffix array over packed text in {:?}", now.elapsed());

    for pos in suffix_array.iter_mut() {
        *pos *= sparseness as i64;
    }

    Ok(suffix_array)
}

// --------------------------------------------------
/// Reference path: full suffix array, then keep the sampled positions.
fn build_full_then_sample(text: &[u8], sparseness: usize) -> Vec<i64> {
    let mut suffix_array = sais::suffix_array(text, sais::ALPHABET_U8);
    if sparseness > 1 {
        suffix_array.retain(|&pos| pos % sparseness as i64 == 0);
    }
    suffix_array
}
