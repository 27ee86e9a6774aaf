//! Detection of grammatically anomalous codon runs.
//!
//! Two detection strategies exist and are selected via [`Config`]: the
//! subroutine strategy flags 2-/3-codon windows absent from the learned
//! grammar and collapses overlapping findings so only the maximal
//! anomalous span per region is reported; the transition strategy flags
//! codon pairs whose successor was never observed after the current codon
//! during learning.

use serde::{Deserialize, Serialize};

use crate::{
    grammar::{subroutine_key, Grammar, WINDOW_SIZES},
    sequences,
};

/// Kind of a reported anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// A 2-codon subroutine absent from the grammar.
    Pair,
    /// A 3-codon subroutine absent from the grammar.
    Triplet,
    /// A codon transition outside the learned successor set.
    Transition,
}

impl AnomalyKind {
    fn for_window(size: usize) -> Self {
        match size {
            2 => AnomalyKind::Pair,
            _ => AnomalyKind::Triplet,
        }
    }
}

/// A codon run flagged as anomalous under a grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Starting codon index within the tokenized sequence.
    pub position: usize,
    /// The offending subroutine (space-joined codons).
    pub subroutine: String,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
}

/// Detection strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionStrategy {
    /// Flag 2-/3-codon subroutines absent from the grammar.
    #[default]
    Subroutine,
    /// Flag codon transitions outside the learned successor sets.
    Transition,
}

impl DetectionStrategy {
    pub fn detector(&self) -> Box<dyn Detector + Send + Sync> {
        match self {
            DetectionStrategy::Subroutine => Box::new(SubroutineDetector),
            DetectionStrategy::Transition => Box::new(TransitionDetector),
        }
    }
}

/// Trait for anomaly detectors.
pub trait Detector {
    /// Detects anomalies in a tokenized sequence under the given grammar.
    fn detect(&self, codons: &[String], grammar: &Grammar) -> Vec<Anomaly>;
}

/// Flags subroutines absent from the grammar.
pub struct SubroutineDetector;

impl Detector for SubroutineDetector {
    fn detect(&self, codons: &[String], grammar: &Grammar) -> Vec<Anomaly> {
        let mut candidates = Vec::new();
        for size in WINDOW_SIZES {
            // A grammar with no vocabulary of this window length cannot
            // judge windows of that length.
            if codons.len() < size || !grammar.has_subroutines_of(size) {
                continue;
            }
            for (start, window) in codons.windows(size).enumerate() {
                let key = subroutine_key(window);
                if !grammar.contains(&key) {
                    candidates.push((start, size, key));
                }
            }
        }
        collapse(candidates, codons.len())
    }
}

/// Collapses overlapping candidates: longer spans win, and a candidate is
/// dropped when its starting position is already covered by an accepted
/// span.  Accepted anomalies come back sorted by position.
fn collapse(mut candidates: Vec<(usize, usize, String)>, codon_count: usize) -> Vec<Anomaly> {
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut covered = vec![false; codon_count];
    let mut accepted = Vec::new();
    for (start, size, key) in candidates {
        if covered[start] {
            continue;
        }
        for flag in covered.iter_mut().skip(start).take(size) {
            *flag = true;
        }
        accepted.push(Anomaly {
            position: start,
            subroutine: key,
            kind: AnomalyKind::for_window(size),
        });
    }

    accepted.sort_by_key(|anomaly| anomaly.position);
    accepted
}

/// Flags transitions whose successor codon was never observed after the
/// current codon during learning.
pub struct TransitionDetector;

impl Detector for TransitionDetector {
    fn detect(&self, codons: &[String], grammar: &Grammar) -> Vec<Anomaly> {
        let mut result = Vec::new();
        for (position, pair) in codons.windows(2).enumerate() {
            if !grammar.allows_transition(&pair[0], &pair[1]) {
                result.push(Anomaly {
                    position,
                    subroutine: subroutine_key(pair),
                    kind: AnomalyKind::Transition,
                });
            }
        }
        result
    }
}

/// Configuration for the analyzer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub strategy: DetectionStrategy,
}

/// Analyzes sequences against a learned grammar.
pub struct Analyzer {
    detector: Box<dyn Detector + Send + Sync>,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        Self {
            detector: config.strategy.detector(),
        }
    }

    /// Tokenizes the sequence and reports anomalies under the grammar.
    ///
    /// An organism with no grammar at all is the caller's concern; this
    /// takes the grammar that exists and an empty result genuinely means
    /// "no anomalies found".
    pub fn analyze(&self, sequence: &str, grammar: &Grammar) -> Vec<Anomaly> {
        self.detector.detect(&sequences::tokenize(sequence), grammar)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn in_grammar_sequence_is_clean() {
        let grammar = Grammar::learn(&["AAACCCGGGTTT"]);
        let anomalies = Analyzer::default().analyze("AAACCCGGG", &grammar);
        assert_eq!(anomalies, vec![]);
    }

    #[test]
    fn absent_pair_is_flagged() {
        // Pair-only grammar: {"AAA AAA": 5, "AAA CCC": 1}.  Of the two pair
        // windows of AAACCCAAA, only "CCC AAA" is absent.
        let corpus = vec!["AAAAAA"; 5]
            .into_iter()
            .chain(std::iter::once("AAACCC"))
            .collect::<Vec<_>>();
        let grammar = Grammar::learn(&corpus);
        assert_eq!(grammar.count("AAA AAA"), 5);
        assert_eq!(grammar.count("AAA CCC"), 1);

        let anomalies = Analyzer::default().analyze("AAACCCAAA", &grammar);
        assert_eq!(
            anomalies,
            vec![Anomaly {
                position: 1,
                subroutine: "CCC AAA".to_string(),
                kind: AnomalyKind::Pair,
            }]
        );
    }

    #[test]
    fn nested_pair_collapses_into_triplet() {
        // Both the 3-window at 0 and the 2-windows at 0 and 1 are absent;
        // only the longer span at 0 may be reported.
        let grammar = Grammar::learn(&["TTTTTTTTT"]);
        let anomalies = Analyzer::default().analyze("AAACCCGGG", &grammar);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].position, 0);
        assert_eq!(anomalies[0].subroutine, "AAA CCC GGG");
        assert_eq!(anomalies[0].kind, AnomalyKind::Triplet);
    }

    #[test]
    fn anomalies_sorted_by_position() {
        let grammar = Grammar::learn(&["TTTTTTTTT"]);
        let anomalies = Analyzer::default().analyze("AAACCCGGGTTTAAA", &grammar);
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].position, 0);
        assert_eq!(anomalies[0].subroutine, "AAA CCC GGG");
        assert_eq!(anomalies[0].kind, AnomalyKind::Triplet);
        assert_eq!(anomalies[1].position, 3);
        assert_eq!(anomalies[1].subroutine, "TTT AAA");
        assert_eq!(anomalies[1].kind, AnomalyKind::Pair);
    }

    #[test]
    fn short_sequences_yield_nothing() {
        let grammar = Grammar::learn(&["AAACCC"]);
        let analyzer = Analyzer::default();
        assert_eq!(analyzer.analyze("", &grammar), vec![]);
        assert_eq!(analyzer.analyze("AAA", &grammar), vec![]);
        assert_eq!(analyzer.analyze("AA", &grammar), vec![]);
    }

    #[test]
    fn transition_strategy_flags_unseen_successor() {
        let grammar = Grammar::learn(&["ATGAAACCC"]);
        let analyzer = Analyzer::new(Config {
            strategy: DetectionStrategy::Transition,
        });

        assert_eq!(analyzer.analyze("ATGAAACCC", &grammar), vec![]);

        let anomalies = analyzer.analyze("ATGCCC", &grammar);
        assert_eq!(
            anomalies,
            vec![Anomaly {
                position: 0,
                subroutine: "ATG CCC".to_string(),
                kind: AnomalyKind::Transition,
            }]
        );
    }

    #[test]
    fn anomaly_wire_format() -> anyhow::Result<()> {
        let anomaly = Anomaly {
            position: 1,
            subroutine: "CCC AAA".to_string(),
            kind: AnomalyKind::Pair,
        };
        let json = serde_json::to_value(&anomaly)?;
        assert_eq!(
            json,
            serde_json::json!({
                "position": 1,
                "subroutine": "CCC AAA",
                "type": "pair",
            })
        );
        Ok(())
    }
}
