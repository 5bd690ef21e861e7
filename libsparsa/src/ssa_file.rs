//! Reading and writing sparse suffix array files.
//!
//! The compressed layout is a small header followed by the bit-packed
//! entries: one byte for the entry width in bits, one byte for the
//! sparseness factor, a little-endian `u64` element count, then the
//! packed words. The uncompressed layout has no header and stores each
//! entry as a little-endian `u64`.

use crate::{bitpack, ssa_builder::SparseSuffixArray};
use anyhow::{anyhow, bail, Result};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    mem,
};

/// Header length of a compressed file: width byte, sparseness byte,
/// element count
const COMPRESSED_HEADER_LEN: usize = 2 + mem::size_of::<u64>();

// --------------------------------------------------
/// A suffix array restored from a compressed file. The text itself is not
/// stored, so this is a positional index only.
#[derive(Debug, PartialEq)]
pub struct SsaFileData {
    /// Entry width in bits
    pub bits_per_element: u8,

    /// The sparseness factor the array was sampled with
    pub sparseness: u8,

    /// Sampled suffix positions in lexicographic suffix order
    pub suffix_array: Vec<i64>,
}

// --------------------------------------------------
/// Write the array bit-packed with a header. Returns the bytes written.
pub fn write_compressed(filename: &str, ssa: &SparseSuffixArray) -> Result<usize> {
    let mut out =
        BufWriter::new(File::create(filename).map_err(|e| anyhow!("{filename}: {e}"))?);
    let bits = bitpack::bits_for(ssa.text.len());
    let mut bytes_out = 0;

    bytes_out += out.write(&[bits, ssa.sparseness])?;
    bytes_out += out.write(&(ssa.suffix_array.len() as u64).to_le_bytes())?;

    for word in bitpack::compress(&ssa.suffix_array, bits) {
        bytes_out += out.write(&word.to_le_bytes())?;
    }

    Ok(bytes_out)
}

// --------------------------------------------------
/// Write the raw entries with no header. Returns the bytes written.
pub fn write_uncompressed(filename: &str, ssa: &SparseSuffixArray) -> Result<usize> {
    let mut out =
        BufWriter::new(File::create(filename).map_err(|e| anyhow!("{filename}: {e}"))?);
    let mut bytes_out = 0;

    for &pos in &ssa.suffix_array {
        bytes_out += out.write(&(pos as u64).to_le_bytes())?;
    }

    Ok(bytes_out)
}

// --------------------------------------------------
/// Read a compressed file back into positions.
pub fn read_compressed(filename: &str) -> Result<SsaFileData> {
    let mut file = File::open(filename).map_err(|e| anyhow!("{filename}: {e}"))?;

    let mut header = [0u8; COMPRESSED_HEADER_LEN];
    file.read_exact(&mut header)
        .map_err(|e| anyhow!("{filename}: {e}"))?;
    let bits_per_element = header[0];
    let sparseness = header[1];
    let count = u64::from_le_bytes(header[2..].try_into()?) as usize;

    if bits_per_element == 0 || bits_per_element > 63 {
        bail!("{filename}: invalid entry width {bits_per_element}");
    }
    if sparseness == 0 {
        bail!("{filename}: invalid sparseness factor 0");
    }

    let mut payload = vec![];
    file.read_to_end(&mut payload)?;
    let expected_words = if count == 0 {
        0
    } else {
        // The writer always emits the word holding the final entry.
        (count * bits_per_element as usize + 63) / 64
    };
    if payload.len() < expected_words * mem::size_of::<u64>() {
        bail!("{filename}: truncated suffix array payload");
    }

    let words: Vec<u64> = payload
        .chunks_exact(mem::size_of::<u64>())
        .map(|chunk| u64::from_le_bytes(chunk.try_into().unwrap()))
        .collect();
    let suffix_array = bitpack::decompress(&words, count, bits_per_element);

    Ok(SsaFileData {
        bits_per_element,
        sparseness,
        suffix_array,
    })
}

// --------------------------------------------------
/// Read an uncompressed file back into positions.
pub fn read_uncompressed(filename: &str) -> Result<Vec<i64>> {
    let mut file = File::open(filename).map_err(|e| anyhow!("{filename}: {e}"))?;
    let mut payload = vec![];
    file.read_to_end(&mut payload)?;

    if payload.len() % mem::size_of::<u64>() != 0 {
        bail!("{filename}: length is not a multiple of 8 bytes");
    }

    Ok(payload
        .chunks_exact(mem::size_of::<u64>())
        .map(|chunk| u64::from_le_bytes(chunk.try_into().unwrap()) as i64)
        .collect())
}
