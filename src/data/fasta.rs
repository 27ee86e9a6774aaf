//! Corpus access from local FASTA files.
//!
//! One file per organism: `<base_dir>/<organism>.fasta`, optionally
//! gzip-ed as `<organism>.fasta.gz`.

use std::{
    io::BufReader,
    path::{Path, PathBuf},
    time::Instant,
};

use bio::io::fasta;

use crate::data::{error::Error, interface};

/// Configuration for the `data::fasta::Provider`.
#[derive(Debug, PartialEq, Clone)]
pub struct Config {
    /// Directory holding one FASTA file per organism.
    pub base_dir: String,
}

/// Provides training corpora from per-organism FASTA files.
pub struct Provider {
    config: Config,
}

impl Provider {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn corpus_path(&self, organism: &str) -> Option<PathBuf> {
        for suffix in [".fasta", ".fasta.gz"] {
            let path = Path::new(&self.config.base_dir).join(format!("{}{}", organism, suffix));
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    fn read_records(path: &Path) -> Result<Vec<String>, Error> {
        let display = path.display().to_string();
        let file =
            std::fs::File::open(path).map_err(|_e| Error::CorpusOpen(display.clone()))?;
        if display.ends_with(".gz") {
            Self::collect(
                fasta::Reader::new(flate2::bufread::GzDecoder::new(BufReader::new(file))),
                &display,
            )
        } else {
            Self::collect(fasta::Reader::new(file), &display)
        }
    }

    fn collect<R: std::io::Read>(
        reader: fasta::Reader<BufReader<R>>,
        path: &str,
    ) -> Result<Vec<String>, Error> {
        let mut result = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|_e| Error::CorpusParse(path.to_string()))?;
            result.push(String::from_utf8_lossy(record.seq()).into_owned());
        }
        Ok(result)
    }
}

impl interface::Provider for Provider {
    fn organisms(&self) -> Vec<String> {
        let mut result = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&self.config.base_dir) {
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(stem) = name
                    .strip_suffix(".fasta.gz")
                    .or_else(|| name.strip_suffix(".fasta"))
                {
                    result.push(stem.to_string());
                }
            }
        }
        result.sort();
        result.dedup();
        result
    }

    fn load_corpus(&self, organism: &str) -> Result<Vec<String>, Error> {
        let path = self
            .corpus_path(organism)
            .ok_or_else(|| Error::NoCorpusFound(organism.to_string()))?;
        let start = Instant::now();
        let records = Self::read_records(&path)?;
        log::debug!(
            "loaded {} training sequences for {} from {:?} in {:?}",
            records.len(),
            organism,
            path,
            start.elapsed()
        );
        Ok(records)
    }
}
