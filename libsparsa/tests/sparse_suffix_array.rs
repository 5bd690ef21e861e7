use anyhow::Result;
use libsparsa::{
    bitpack, sais,
    ssa_builder::SparseSuffixArray,
    ssa_file::{read_compressed, read_uncompressed, write_compressed, write_uncompressed},
    types::SsaBuilderArgs,
};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tempfile::NamedTempFile;

// --------------------------------------------------
fn build(text: &[u8], sparseness: usize, is_dna: bool) -> SparseSuffixArray {
    SparseSuffixArray::new(SsaBuilderArgs {
        text: text.to_vec(),
        sparseness,
        is_dna,
        optimized: true,
    })
    .unwrap()
}

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

fn random_protein(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let amino = b"ACDEFGHIKLMNPQRSTVWY";
    (0..len)
        .map(|_| amino[rng.gen_range(0..amino.len())])
        .collect()
}

// --------------------------------------------------
#[test]
fn sampled_suffixes_are_sorted_and_complete() {
    let mut rng = StdRng::seed_from_u64(17);
    for len in [1usize, 2, 17, 1000] {
        let text = random_dna(&mut rng, len);
        for sparseness in 1..=4usize {
            let ssa = build(&text, sparseness, true);

            // Every sampled position exactly once
            let mut positions = ssa.suffix_array.clone();
            positions.sort_unstable();
            let expected: Vec<i64> = (0..len as i64)
                .step_by(sparseness)
                .collect();
            assert_eq!(positions, expected, "len {len} sparseness {sparseness}");

            // Adjacent suffixes strictly increasing
            for window in ssa.suffix_array.windows(2) {
                let a = &text[window[0] as usize..];
                let b = &text[window[1] as usize..];
                assert!(a < b, "len {len} sparseness {sparseness}");
            }
        }
    }
}

// --------------------------------------------------
#[test]
fn sparseness_one_equals_full_suffix_array() {
    let mut rng = StdRng::seed_from_u64(19);
    let text = random_protein(&mut rng, 2000);

    let ssa = build(&text, 1, true);

    let mut expected: Vec<i64> = (0..text.len() as i64).collect();
    expected.sort_unstable_by_key(|&pos| &text[pos as usize..]);
    assert_eq!(ssa.suffix_array, expected);
}

// --------------------------------------------------
#[test]
fn engine_widths_agree_on_shared_input() {
    // The same two-symbol text as u8, u16, and u32 streams must produce
    // one answer.
    let mut rng = StdRng::seed_from_u64(29);
    let bytes: Vec<u8> = (0..800).map(|_| rng.gen_range(0..2u8)).collect();
    let wides: Vec<u16> = bytes.iter().map(|&b| b as u16).collect();
    let wider: Vec<u32> = bytes.iter().map(|&b| b as u32).collect();

    let narrow = sais::suffix_array(&bytes, sais::ALPHABET_U8);
    assert_eq!(sais::suffix_array(&wides, sais::ALPHABET_U16), narrow);
    assert_eq!(sais::suffix_array(&wider, 2), narrow);
}

// --------------------------------------------------
#[test]
fn compressed_file_round_trips() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(31);
    let text = random_protein(&mut rng, 3000);

    for sparseness in [1usize, 2, 3] {
        let ssa = build(&text, sparseness, false);
        let outfile = NamedTempFile::new()?;
        let outpath = outfile.path().to_str().unwrap();

        write_compressed(outpath, &ssa)?;
        let restored = read_compressed(outpath)?;

        assert_eq!(restored.sparseness, sparseness as u8);
        assert_eq!(restored.bits_per_element, bitpack::bits_for(text.len()));
        assert_eq!(restored.suffix_array, ssa.suffix_array);
    }
    Ok(())
}

// --------------------------------------------------
#[test]
fn uncompressed_file_round_trips() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(37);
    let text = random_dna(&mut rng, 777);

    let ssa = build(&text, 3, true);
    let outfile = NamedTempFile::new()?;
    let outpath = outfile.path().to_str().unwrap();

    let bytes_out = write_uncompressed(outpath, &ssa)?;
    assert_eq!(bytes_out, ssa.suffix_array.len() * 8);
    assert_eq!(read_uncompressed(outpath)?, ssa.suffix_array);
    Ok(())
}

// --------------------------------------------------
#[test]
fn compressed_file_golden_bytes() -> Result<()> {
    // GATTACA at sparseness one: suffix array [6, 4, 1, 5, 0, 3, 2],
    // four bits each, packed from the high bit down.
    let ssa = build(b"GATTACA", 1, true);
    assert_eq!(ssa.suffix_array, [6, 4, 1, 5, 0, 3, 2]);

    let outfile = NamedTempFile::new()?;
    let outpath = outfile.path().to_str().unwrap();
    write_compressed(outpath, &ssa)?;

    let bytes = std::fs::read(outpath)?;
    let mut expected = vec![4u8, 1];
    expected.extend(7u64.to_le_bytes());
    let word: u64 = (6 << 60) | (4 << 56) | (1 << 52) | (5 << 48) | (3 << 40) | (2 << 36);
    expected.extend(word.to_le_bytes());
    assert_eq!(bytes, expected);
    Ok(())
}

// --------------------------------------------------
#[test]
fn compression_shrinks_large_arrays() {
    let mut rng = StdRng::seed_from_u64(41);
    let text = random_dna(&mut rng, 1 << 14);
    let ssa = build(&text, 2, true);

    let bits = bitpack::bits_for(text.len());
    assert_eq!(bits, 15);

    let packed = bitpack::compress(&ssa.suffix_array, bits);
    assert!(packed.len() * 8 < ssa.suffix_array.len() * 8 / 4);
    assert_eq!(
        bitpack::decompress(&packed, ssa.suffix_array.len(), bits),
        ssa.suffix_array
    );
}
