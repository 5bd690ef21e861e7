//! Fixed-width bit packing of suffix array entries.
//!
//! Entries are written most significant bit first into a stream of `u64`
//! words. The width is chosen once per array from the text length, so
//! every entry fits.

// --------------------------------------------------
/// Bits needed to address every position of a text of `text_len` bytes,
/// plus one.
pub fn bits_for(text_len: usize) -> u8 {
    if text_len < 2 {
        1
    } else {
        ((text_len - 1).ilog2() + 2) as u8
    }
}

// --------------------------------------------------
/// Pack each value into `bits` bits, concatenated across words.
pub fn compress(values: &[i64], bits: u8) -> Vec<u64> {
    debug_assert!(bits > 0 && bits < 64);
    if values.is_empty() {
        return vec![];
    }

    let width = bits as i32;
    let mut packed = Vec::with_capacity((values.len() * bits as usize).div_ceil(64));
    let mut word: u64 = 0;
    let mut shift: i32 = 64 - width;

    for &value in values {
        let value = value as u64;
        if shift < 0 {
            // The value straddles a word boundary: high bits close out
            // the current word, low bits open the next.
            word |= value >> (-shift) as u32;
            packed.push(word);
            word = 0;
            shift += 64;
        }
        word |= value << shift as u32;
        shift -= width;
    }
    packed.push(word);

    packed
}

// --------------------------------------------------
/// Exact inverse of `compress` for the original element count.
pub fn decompress(words: &[u64], count: usize, bits: u8) -> Vec<i64> {
    debug_assert!(bits > 0 && bits < 64);
    let width = bits as i32;
    let mut values = Vec::with_capacity(count);
    let mut word_index = 0;
    let mut shift: i32 = 0;

    for _ in 0..count {
        let mut value = (words[word_index] << shift as u32) >> (64 - width) as u32;
        shift += width;
        if shift >= 64 {
            word_index += 1;
            shift -= 64;
            if shift > 0 {
                value |= words[word_index] >> (64 - shift) as u32;
            }
        }
        values.push(value as i64);
    }

    values
}
