use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

use crate::alignment_block::AlignmentBlock;
use crate::iupac::{mask_to_symbol, nucleotide_mask, GAP, NUCLEOTIDES};

/// Creates a test alignment block we can verify is working.
/// The primary gets flanking gaps plus internal gap runs of mixed lengths, and each secondary is the underlying sequence with occasional ambiguity codes.
/// # Arguments
/// * `seq_len` - the alignment length
/// * `num_secondaries` - the number of secondary sequences to generate
/// * `gap_rate` - per-column chance of opening a gap run in the primary
/// * `ambiguity_rate` - per-column chance of replacing a base with an ambiguity code, applied to every sequence
pub fn generate_block(seq_len: usize, num_secondaries: usize, gap_rate: f64, ambiguity_rate: f64) -> AlignmentBlock {
    assert!(seq_len > 0);
    assert!((0.0..=1.0).contains(&gap_rate));
    assert!((0.0..=1.0).contains(&ambiguity_rate));

    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let base_distribution = Uniform::new(0, NUCLEOTIDES.len());
    let mask_distribution = Uniform::new(1_u8, 16);
    let rate_distribution = Uniform::new(0.0, 1.0);
    let flank_distribution = Uniform::new(0, (seq_len / 10).max(1));
    let run_distribution = Uniform::new(1, 300);

    let truth: Vec<u8> = (0..seq_len)
        .map(|_i| NUCLEOTIDES[rng.sample(base_distribution)])
        .collect();

    // adds noise to a copy of the truth
    let ambiguate = |rng: &mut rand::rngs::StdRng| -> Vec<u8> {
        truth.iter()
            .map(|&c| {
                if rng.sample(rate_distribution) < ambiguity_rate {
                    // some code that still covers the true base, up to and including N
                    mask_to_symbol(rng.sample(mask_distribution) | nucleotide_mask(c).unwrap_or(0))
                } else {
                    c
                }
            })
            .collect()
    };

    let mut primary = ambiguate(&mut rng);
    let leading = rng.sample(flank_distribution);
    let trailing = rng.sample(flank_distribution);
    primary[..leading].fill(GAP);
    primary[seq_len - trailing..].fill(GAP);

    let mut index = leading;
    while index < seq_len {
        if rng.sample(rate_distribution) < gap_rate {
            let run_len = rng.sample(run_distribution);
            let run_end = (index + run_len).min(seq_len);
            primary[index..run_end].fill(GAP);
            index = run_end;
        }
        index += 1;
    }

    let secondaries: Vec<(String, Vec<u8>)> = (0..num_secondaries)
        .map(|i| (format!("secondary_{}", i + 1), ambiguate(&mut rng)))
        .collect();

    match AlignmentBlock::new("primary", primary, secondaries) {
        Ok(block) => block,
        Err(e) => panic!("generated an invalid block: {e}")
    }
}
