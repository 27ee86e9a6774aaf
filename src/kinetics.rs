//! Estimation of per-codon ribosomal pause times.
//!
//! The pause model is a fixed weighted sum over the nucleotide composition
//! of each codon, scaled by 100 with an additive offset.  The weights were
//! fitted against E. coli ribosome profiling data (Hussmann et al. 2021)
//! and are treated as constants here.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::sequences;

/// Per-nucleotide weights and additive offset of the pause model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub w_a: f64,
    pub w_c: f64,
    pub w_g: f64,
    pub w_t: f64,
    /// Additive offset in milliseconds.
    pub offset: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            w_a: 0.481,
            w_c: 0.334,
            w_g: 0.654,
            w_t: 0.009,
            offset: 60.0,
        }
    }
}

/// Configuration for the kinetic estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub constants: PhysicalConstants,
    /// Whether to attach `trna_scarcity` to entries whose codon has a known
    /// tRNA abundance.
    pub annotate_scarcity: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            constants: PhysicalConstants::default(),
            annotate_scarcity: true,
        }
    }
}

/// One row of a kinetic pause profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// Codon position within the tokenized sequence.
    pub codon_index: usize,
    /// The codon itself, over the canonical alphabet.
    pub codon: String,
    /// Estimated pause time in milliseconds, rounded to 2 decimal places.
    pub pause_ms: f64,
    /// Reciprocal tRNA abundance, where known; stop and unrecognized codons
    /// carry no abundance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trna_scarcity: Option<f64>,
}

lazy_static::lazy_static! {
    /// Relative tRNA abundance per sense codon in E. coli.
    ///
    /// Hussmann et al. (2021).  The dataset ships 59 codons; cysteine codons
    /// and stops are absent and fail the lookup.
    pub static ref TRNA_ABUNDANCE_VEC: Vec<(&'static str, f64)> = vec![
        ("TTT", 0.0271),
        ("TTC", 0.0384),
        ("TTA", 0.0125),
        ("TTG", 0.0253),
        ("TCT", 0.0152),
        ("TCC", 0.0212),
        ("TCA", 0.0131),
        ("TCG", 0.0127),
        ("TAT", 0.0234),
        ("TAC", 0.0326),
        ("CTT", 0.0227),
        ("CTC", 0.0211),
        ("CTA", 0.0076),
        ("CTG", 0.0716),
        ("CCT", 0.0107),
        ("CCC", 0.0048),
        ("CCA", 0.0079),
        ("CCG", 0.0191),
        ("CAT", 0.0214),
        ("CAC", 0.0326),
        ("CAA", 0.0206),
        ("CAG", 0.0487),
        ("CGT", 0.0230),
        ("CGC", 0.0298),
        ("CGA", 0.0048),
        ("CGG", 0.0057),
        ("ATT", 0.0323),
        ("ATC", 0.0558),
        ("ATA", 0.0058),
        ("ATG", 0.0427),
        ("ACT", 0.0204),
        ("ACC", 0.0423),
        ("ACA", 0.0123),
        ("ACG", 0.0221),
        ("AAT", 0.0289),
        ("AAC", 0.0494),
        ("AAG", 0.0573),
        ("AAA", 0.0520),
        ("AGT", 0.0145),
        ("AGC", 0.0261),
        ("AGA", 0.0039),
        ("AGG", 0.0037),
        ("GTT", 0.0346),
        ("GTC", 0.0336),
        ("GTA", 0.0226),
        ("GTG", 0.0360),
        ("GCT", 0.0365),
        ("GCC", 0.0560),
        ("GCA", 0.0342),
        ("GCG", 0.0465),
        ("GAT", 0.0368),
        ("GAC", 0.0487),
        ("GAA", 0.0478),
        ("GAG", 0.0633),
        ("GGT", 0.0204),
        ("GGC", 0.0401),
        ("GGA", 0.0084),
        ("GGG", 0.0116),
        ("TGG", 0.0175),
    ];

    static ref TRNA_ABUNDANCE: AHashMap<&'static str, f64> =
        TRNA_ABUNDANCE_VEC.iter().copied().collect();
}

/// Looks up the relative tRNA abundance of a codon.
///
/// Case- and U/T-insensitive; `None` for stop codons and codons outside the
/// abundance dataset.
pub fn trna_abundance(codon: &str) -> Option<f64> {
    let codon = sequences::normalize(codon);
    TRNA_ABUNDANCE.get(codon.as_str()).copied()
}

/// Estimates per-codon ribosomal pause times.
pub struct Estimator {
    config: Config,
}

impl Estimator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Computes the kinetic pause profile of a nucleotide sequence.
    ///
    /// One entry per codon in input order, including stop and unrecognized
    /// codons; no filtering happens here.  Pure function of the input and
    /// the configured constants.
    pub fn profile(&self, sequence: &str) -> Vec<ProfileEntry> {
        let w = &self.config.constants;
        sequences::tokenize(sequence)
            .into_iter()
            .enumerate()
            .map(|(codon_index, codon)| {
                let (mut n_a, mut n_c, mut n_g, mut n_t) = (0u32, 0u32, 0u32, 0u32);
                for c in codon.bytes() {
                    match c {
                        b'A' => n_a += 1,
                        b'C' => n_c += 1,
                        b'G' => n_g += 1,
                        b'T' => n_t += 1,
                        _ => (),
                    }
                }
                let weighted = f64::from(n_a) * w.w_a
                    + f64::from(n_c) * w.w_c
                    + f64::from(n_g) * w.w_g
                    + f64::from(n_t) * w.w_t;
                let pause_ms = round2(weighted * 100.0 + w.offset);
                let trna_scarcity = if self.config.annotate_scarcity {
                    TRNA_ABUNDANCE
                        .get(codon.as_str())
                        .map(|abundance| 1.0 / abundance)
                } else {
                    None
                };
                ProfileEntry {
                    codon_index,
                    codon,
                    pause_ms,
                    trna_scarcity,
                }
            })
            .collect()
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn alanine_codon_pause() {
        let profile = Estimator::default().profile("GCT");
        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0].codon_index, 0);
        assert_eq!(profile[0].codon, "GCT");
        // (1*0.481 + 1*0.334 + 1*0.654 + 0*0.009) * 100 + 60
        assert_eq!(profile[0].pause_ms, 206.9);
    }

    #[test]
    fn profile_is_case_and_alphabet_invariant() {
        let estimator = Estimator::default();
        let dna = estimator.profile("GCTAAATGA");
        let rna = estimator.profile("gcuaaauga");
        assert_eq!(dna, rna);
    }

    #[test]
    fn profile_keeps_stop_and_unknown_codons() {
        let profile = Estimator::default().profile("GCTTGANNN");
        assert_eq!(profile.len(), 3);
        assert_eq!(profile[1].codon, "TGA");
        assert_eq!(profile[2].codon, "NNN");
        // Unknown characters contribute no nucleotide counts.
        assert_eq!(profile[2].pause_ms, 60.0);
    }

    #[test]
    fn scarcity_annotation() {
        let profile = Estimator::default().profile("CTGTGA");
        assert_eq!(profile[0].trna_scarcity, Some(1.0 / 0.0716));
        // Stop codons carry no abundance.
        assert_eq!(profile[1].trna_scarcity, None);

        let config = Config {
            annotate_scarcity: false,
            ..Default::default()
        };
        let bare = Estimator::new(config).profile("CTG");
        assert_eq!(bare[0].trna_scarcity, None);
    }

    #[test]
    fn abundance_lookup() {
        assert_eq!(trna_abundance("CTG"), Some(0.0716));
        assert_eq!(trna_abundance("cug"), Some(0.0716));
        assert_eq!(trna_abundance("TAA"), None);
        assert_eq!(trna_abundance("XYZ"), None);
    }

    #[test]
    fn abundance_table_shape() {
        assert_eq!(TRNA_ABUNDANCE_VEC.len(), 59);
        for (codon, abundance) in TRNA_ABUNDANCE_VEC.iter() {
            assert_eq!(codon.len(), 3);
            assert!(*abundance > 0.0);
        }
    }
}
