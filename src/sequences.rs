//! Utility code for working with nucleotide sequences and codons.
//!
//! The canonical internal alphabet is DNA: all input is uppercased and
//! `U`/`u` is mapped to `T` before any other processing.  Codon tables and
//! learned grammar keys use the same alphabet throughout.

use indexmap::IndexMap;

lazy_static::lazy_static! {
    /// Mapping for DNA characters for normalization.
    static ref DNA_ASCII_MAP: [u8; 256] = {
        let mut result = [0; 256];

        for c in 0..=255 {
            if c == b'u' || c == b'U' {
                result[c as usize] = b'T';
            } else if c.is_ascii_lowercase() {
                result[c as usize] = c.to_ascii_uppercase();
            } else {
                result[c as usize] = c;
            }
        }

        result
    };
}

lazy_static::lazy_static! {
    /// Synonymous codons per 1-letter amino acid (`*` for stop).
    ///
    /// Standard genetic code.  The order within each codon set is fixed and
    /// serves as the deterministic tie-break order for codon optimization.
    pub static ref AA1_TO_CODONS_VEC: Vec<(char, Vec<&'static str>)> = vec![
        ('A', vec!["GCT", "GCC", "GCA", "GCG"]),
        ('R', vec!["CGT", "CGC", "CGA", "CGG", "AGA", "AGG"]),
        ('N', vec!["AAT", "AAC"]),
        ('D', vec!["GAT", "GAC"]),
        ('C', vec!["TGT", "TGC"]),
        ('Q', vec!["CAA", "CAG"]),
        ('E', vec!["GAA", "GAG"]),
        ('G', vec!["GGT", "GGC", "GGA", "GGG"]),
        ('H', vec!["CAT", "CAC"]),
        ('I', vec!["ATT", "ATC", "ATA"]),
        ('L', vec!["TTA", "TTG", "CTT", "CTC", "CTA", "CTG"]),
        ('K', vec!["AAA", "AAG"]),
        ('M', vec!["ATG"]),
        ('F', vec!["TTT", "TTC"]),
        ('P', vec!["CCT", "CCC", "CCA", "CCG"]),
        ('S', vec!["TCT", "TCC", "TCA", "TCG", "AGT", "AGC"]),
        ('T', vec!["ACT", "ACC", "ACA", "ACG"]),
        ('W', vec!["TGG"]),
        ('Y', vec!["TAT", "TAC"]),
        ('V', vec!["GTT", "GTC", "GTA", "GTG"]),
        ('*', vec!["TAA", "TAG", "TGA"]),
    ];

    /// Lookup from amino acid to its synonymous codons, preserving set order.
    pub static ref AA1_TO_CODONS: IndexMap<char, Vec<&'static str>> =
        AA1_TO_CODONS_VEC.iter().cloned().collect();
}

/// Start codon of the standard genetic code.
pub const START_CODON: &str = "ATG";

/// Stop codons of the standard genetic code.
pub const STOP_CODONS: &[&str] = &["TAA", "TAG", "TGA"];

/// Normalizes a nucleotide sequence to the canonical DNA alphabet.
///
/// Uppercases the input and maps `U` to `T`.  Characters outside the
/// nucleotide alphabet are uppercased and passed through; they fail codon
/// lookups downstream rather than erroring here.
///
/// # Args
///
/// * `seq` -- A nucleotide sequence in either DNA or RNA spelling.
///
/// # Returns
///
/// The sequence over the canonical alphabet.
pub fn normalize(seq: &str) -> String {
    let mut result = Vec::with_capacity(seq.len());
    for c in seq.bytes() {
        result.push(DNA_ASCII_MAP[c as usize]);
    }
    String::from_utf8(result).expect("normalization maps ASCII to ASCII")
}

/// Splits a nucleotide sequence into codon tokens.
///
/// The sequence is normalized first, then cut into non-overlapping
/// 3-character tokens from the start.  A trailing remainder of 1 or 2
/// characters is silently dropped.  Empty input yields an empty vector.
pub fn tokenize(seq: &str) -> Vec<String> {
    let dna = normalize(seq);
    dna.as_bytes()
        .chunks_exact(3)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

/// Returns the synonymous codon set for a 1-letter amino acid, if known.
pub fn synonymous_codons(aa: char) -> Option<&'static [&'static str]> {
    AA1_TO_CODONS.get(&aa).map(|codons| codons.as_slice())
}

/// Whether the (normalized) codon is the canonical start codon.
pub fn is_start_codon(codon: &str) -> bool {
    codon == START_CODON
}

/// Whether the (normalized) codon is a stop codon.
pub fn is_stop_codon(codon: &str) -> bool {
    STOP_CODONS.contains(&codon)
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn normalization() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("acgt"), "ACGT");
        assert_eq!(normalize("ACGU"), "ACGT");
        assert_eq!(normalize("augUAA"), "ATGTAA");
        // Unknown characters pass through uppercased.
        assert_eq!(normalize("acgx-"), "ACGX-");
    }

    #[rstest]
    #[case("", 0)]
    #[case("A", 0)]
    #[case("AT", 0)]
    #[case("ATG", 1)]
    #[case("ATGA", 1)]
    #[case("ATGAA", 1)]
    #[case("ATGAAA", 2)]
    #[case("ATGAAACCCGGGTTT", 5)]
    fn tokenize_length(#[case] seq: &str, #[case] expected: usize) {
        let codons = tokenize(seq);
        assert_eq!(codons.len(), expected);
        assert_eq!(codons.len(), seq.len() / 3);
        assert!(codons.iter().all(|codon| codon.len() == 3));
    }

    #[test]
    fn tokenize_rna_input() {
        assert_eq!(tokenize("augaaa"), vec!["ATG", "AAA"]);
        assert_eq!(tokenize("AUGAAA"), tokenize("atgaaa"));
    }

    #[test]
    fn codon_table_shape() {
        // 20 amino acids plus stop.
        assert_eq!(AA1_TO_CODONS.len(), 21);
        let total: usize = AA1_TO_CODONS.values().map(|codons| codons.len()).sum();
        assert_eq!(total, 64);
        for codons in AA1_TO_CODONS.values() {
            assert!(!codons.is_empty());
            for codon in codons {
                assert_eq!(codon.len(), 3);
                assert!(codon.bytes().all(|c| b"ACGT".contains(&c)));
            }
        }
    }

    #[test]
    fn codon_classification() {
        assert!(is_start_codon("ATG"));
        assert!(!is_start_codon("TTG"));
        assert!(is_stop_codon("TAA"));
        assert!(is_stop_codon("TAG"));
        assert!(is_stop_codon("TGA"));
        assert!(!is_stop_codon("TGG"));
    }

    #[test]
    fn synonymous_codon_lookup() {
        assert_eq!(synonymous_codons('K'), Some(["AAA", "AAG"].as_slice()));
        assert_eq!(synonymous_codons('*').map(<[_]>::len), Some(3));
        assert_eq!(synonymous_codons('B'), None);
    }
}
