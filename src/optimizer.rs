//! Reverse design of a DNA sequence for a protein under a learned grammar.
//!
//! For each amino acid of the protein the synonymous codon with the highest
//! derived single-codon frequency is chosen.  Ties break deterministically
//! towards the codon listed first in the codon table, so repeated runs over
//! a fixed grammar produce identical output.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{grammar::Grammar, sequences};

/// Single-codon usage table derived from a grammar.
pub struct CodonUsage {
    frequencies: AHashMap<String, u64>,
}

impl CodonUsage {
    /// Derives the table by crediting every subroutine count to each codon
    /// the key contains.
    pub fn from_grammar(grammar: &Grammar) -> Self {
        Self {
            frequencies: grammar.codon_frequencies(),
        }
    }

    /// Derived frequency of a codon (0 if never observed).
    pub fn frequency(&self, codon: &str) -> u64 {
        self.frequencies.get(codon).copied().unwrap_or(0)
    }
}

/// Result of a codon optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimized {
    pub optimized_dna: String,
}

/// Builds the DNA sequence encoding `protein` with the codons preferred
/// under `grammar`.
///
/// Input is uppercased; symbols without a codon-table entry are skipped, so
/// the output covers only the recognized amino acids (3 nucleotides each).
pub fn optimize_sequence(protein: &str, grammar: &Grammar) -> Optimized {
    let usage = CodonUsage::from_grammar(grammar);
    let mut optimized_dna = String::with_capacity(protein.len() * 3);
    for aa in protein.chars().map(|c| c.to_ascii_uppercase()) {
        let Some(codons) = sequences::synonymous_codons(aa) else {
            continue;
        };
        // Codon sets are non-empty by construction; strict comparison keeps
        // the first-listed codon on ties.
        let mut best = codons[0];
        for &codon in codons.iter().skip(1) {
            if usage.frequency(codon) > usage.frequency(best) {
                best = codon;
            }
        }
        optimized_dna.push_str(best);
    }
    Optimized { optimized_dna }
}
