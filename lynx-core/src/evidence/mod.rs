//! Similarity evidence for candidate genes.
//!
//! The pipeline never aligns sequences itself. Candidates are translated
//! into a [`QueryBatch`], handed to an [`EvidenceSource`], and the returned
//! scores are attached back to the genes by identifier.
//!
//! ## Batch format
//!
//! Batches are protein FASTA with one entry per candidate, the location
//! appended to the identifier and sequence lines wrapped at 50 columns:
//!
//! ```text
//! >chromosome~3~1:4301-5720
//! MKRLTVDELAQHLGISRQTVSRW...
//! ```
//!
//! ## Modules
//!
//! - [`blast`]: BLAST XML (`-outfmt 5`) reports

pub mod blast;

pub use blast::*;

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{debug, warn};
use sha2::{Digest, Sha256};

use crate::algorithms::extension::ExtensionCandidates;
use crate::constants::{INTERGENIC_FALLBACK_PREFIX, INTERGENIC_PREFIX, LINE_WIDTH};
use crate::interval::Location;
use crate::sequence::{Genome, coding_sequence, translate};
use crate::types::{Evidence, Gene, LynxError, Origin};

/// Scores returned by a collaborator, keyed by batch identifier.
pub type EvidenceMap = HashMap<String, Evidence>;

/// Identifier of the prediction at `index` (0-based), `genome~N`.
pub fn predicted_identifier(genome: &Genome, index: usize) -> String {
    format!("{}~{}", genome.name, index + 1)
}

/// Prefix of intergenic identifiers, chosen so that it never equals the
/// genome name and cannot collide with predicted identifiers.
pub fn intergenic_prefix(genome: &Genome) -> &'static str {
    if genome.name == INTERGENIC_PREFIX {
        INTERGENIC_FALLBACK_PREFIX
    } else {
        INTERGENIC_PREFIX
    }
}

/// One translated candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub identifier: String,
    pub location: Location,
    pub protein: String,
}

/// Candidates submitted together to an evidence source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryBatch {
    entries: Vec<BatchEntry>,
}

impl QueryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translate `location` and add it under `identifier`.
    pub fn push_translated(
        &mut self,
        genome: &[u8],
        identifier: String,
        location: Location,
    ) -> Result<(), LynxError> {
        let protein = translate(&coding_sequence(genome, &location)?)?;
        self.entries.push(BatchEntry {
            identifier,
            location,
            protein,
        });
        Ok(())
    }

    /// Like [`QueryBatch::push_translated`], logging and skipping failures.
    fn push_or_skip(&mut self, genome: &[u8], identifier: String, location: Location) {
        if let Err(error) = self.push_translated(genome, identifier.clone(), location) {
            warn!("Skipping {} at {}: {}", identifier, location, error);
        }
    }

    /// Batch of predicted genes, named `genome~N` in prediction order.
    ///
    /// Predictions that cannot be translated are left out; their numbers
    /// are not reused.
    pub fn predicted_batch(genome: &Genome, locations: &[Location]) -> Self {
        let mut batch = Self::new();
        for (index, location) in locations.iter().enumerate() {
            let identifier = predicted_identifier(genome, index);
            batch.push_or_skip(&genome.sequence, identifier, *location);
        }
        batch
    }

    /// Batch of upstream extensions, named `gene~N` with one counter shared
    /// by all genes.
    pub fn extension_batch(genome: &Genome, extensions: &[ExtensionCandidates]) -> Self {
        let mut batch = Self::new();
        let mut counter = 0;
        for extension in extensions {
            for &start in &extension.starts {
                counter += 1;
                let identifier = format!("{}~{}", extension.identifier, counter);
                let location = Location {
                    start,
                    stop: extension.location.stop,
                };
                batch.push_or_skip(&genome.sequence, identifier, location);
            }
        }
        batch
    }

    /// Batch of intergenic ORFs, named `intergenic~N`.
    pub fn intergenic_batch(genome: &Genome, locations: &[Location]) -> Self {
        let prefix = intergenic_prefix(genome);
        let mut batch = Self::new();
        for (index, location) in locations.iter().enumerate() {
            let identifier = format!("{}~{}", prefix, index + 1);
            batch.push_or_skip(&genome.sequence, identifier, *location);
        }
        batch
    }

    /// Protein FASTA text of the batch.
    pub fn to_fasta(&self) -> String {
        let mut fasta = String::new();
        for entry in &self.entries {
            fasta.push_str(&format!(">{}:{}\n", entry.identifier, entry.location));
            let protein = entry.protein.as_bytes();
            for line in protein.chunks(LINE_WIDTH) {
                fasta.push_str(&String::from_utf8_lossy(line));
                fasta.push('\n');
            }
        }
        fasta
    }

    pub fn write_fasta<W: Write>(&self, writer: &mut W) -> Result<(), LynxError> {
        writer.write_all(self.to_fasta().as_bytes())?;
        Ok(())
    }

    /// Hex SHA-256 of the batch FASTA, stable across runs.
    pub fn digest(&self) -> String {
        format!("{:x}", Sha256::digest(self.to_fasta().as_bytes()))
    }

    /// Gene records for every entry, scored from `evidence`.
    ///
    /// Entries the source did not report carry no evidence.
    pub fn into_genes(self, evidence: &EvidenceMap, origin: Origin) -> Vec<Gene> {
        self.entries
            .into_iter()
            .map(|entry| {
                let score = evidence
                    .get(&entry.identifier)
                    .cloned()
                    .unwrap_or_default();
                Gene::new(entry.identifier, entry.location, origin).with_evidence(score)
            })
            .collect()
    }
}

/// Something that scores candidate proteins, such as a BLAST search.
pub trait EvidenceSource: Send + Sync {
    fn evaluate(&self, batch: &QueryBatch) -> Result<EvidenceMap, LynxError>;
}

/// A source with nothing to report. Every candidate stays unscored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvidence;

impl EvidenceSource for NoEvidence {
    fn evaluate(&self, _batch: &QueryBatch) -> Result<EvidenceMap, LynxError> {
        Ok(EvidenceMap::new())
    }
}

/// Scores known ahead of time, typically parsed from earlier search results.
#[derive(Debug, Clone, Default)]
pub struct StaticEvidence {
    scores: EvidenceMap,
}

impl StaticEvidence {
    pub fn new(scores: EvidenceMap) -> Self {
        Self { scores }
    }

    /// Merge the iterations of several BLAST XML reports. Later files win.
    pub fn from_blast_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, LynxError> {
        let mut scores = EvidenceMap::new();
        for path in paths {
            let parsed = read_blast_xml(path)?;
            debug!(
                "{} BLAST iterations in {}",
                parsed.len(),
                path.as_ref().display()
            );
            scores.extend(parsed);
        }
        Ok(Self { scores })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl EvidenceSource for StaticEvidence {
    fn evaluate(&self, batch: &QueryBatch) -> Result<EvidenceMap, LynxError> {
        Ok(batch
            .entries()
            .iter()
            .filter_map(|entry| {
                self.scores
                    .get(&entry.identifier)
                    .map(|evidence| (entry.identifier.clone(), evidence.clone()))
            })
            .collect())
    }
}

/// Remembers the results of another source by batch content.
///
/// Identical batches are evaluated once. The key is the batch digest, so
/// the cache never depends on file names or locations.
pub struct EvidenceCache<S> {
    source: S,
    results: Mutex<HashMap<String, EvidenceMap>>,
}

impl<S: EvidenceSource> EvidenceCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            results: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct batches seen so far.
    pub fn len(&self) -> usize {
        self.results.lock().map(|results| results.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: EvidenceSource> EvidenceSource for EvidenceCache<S> {
    fn evaluate(&self, batch: &QueryBatch) -> Result<EvidenceMap, LynxError> {
        let key = batch.digest();
        let poisoned = || LynxError::CollaboratorError("evidence cache lock poisoned".to_string());

        if let Some(cached) = self.results.lock().map_err(|_| poisoned())?.get(&key) {
            debug!("Evidence cache hit for batch {}", &key[..12]);
            return Ok(cached.clone());
        }

        let evaluated = self.source.evaluate(batch)?;
        self.results
            .lock()
            .map_err(|_| poisoned())?
            .insert(key, evaluated.clone());
        Ok(evaluated)
    }
}
