use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::algorithms::extension::{ResolverSettings, apply_extensions, find_readable_extensions};
use crate::algorithms::intergenic::{
    find_readable_intergenic_orfs, open_regions, remove_common_stops,
};
use crate::algorithms::scaffolds::refine_scaffolds;
use crate::algorithms::signals::filter_signals;
use crate::config::AnnotationConfig;
use crate::evidence::{EvidenceMap, EvidenceSource, NoEvidence, QueryBatch, predicted_identifier};
use crate::external::{
    GenePredictor, SignalSource, StaticSignals, StaticTransferRnas, TransferRnaSource,
};
use crate::interval::Location;
use crate::results::{AnnotationResults, AnnotationStatistics, SequenceInfo};
use crate::sequence::{Genome, gc_content, read_genomes};
use crate::types::{Gene, LynxError, Origin, TranscriptionSignal};

/// The external tools an annotation run relies on.
///
/// Only the gene predictor is mandatory. Without evidence every candidate
/// scores as having no hit, and without signal or tRNA reports those
/// feature lists stay empty.
///
/// # Examples
///
/// ```rust
/// use lynx_core::engine::Collaborators;
/// use lynx_core::evidence::StaticEvidence;
/// use lynx_core::external::OrfFilePredictor;
/// use lynx_core::interval::Location;
///
/// let predictor = OrfFilePredictor::new(vec![Location::new(31, 126).unwrap()]);
/// let collaborators = Collaborators::new(predictor)
///     .with_evidence(StaticEvidence::default());
/// ```
pub struct Collaborators {
    pub predictor: Box<dyn GenePredictor>,
    pub evidence: Box<dyn EvidenceSource>,
    pub signals: Box<dyn SignalSource>,
    pub transfer_rnas: Box<dyn TransferRnaSource>,
}

impl Collaborators {
    pub fn new<P: GenePredictor + 'static>(predictor: P) -> Self {
        Self {
            predictor: Box::new(predictor),
            evidence: Box::new(NoEvidence),
            signals: Box::new(StaticSignals::default()),
            transfer_rnas: Box::new(StaticTransferRnas::default()),
        }
    }

    pub fn with_evidence<E: EvidenceSource + 'static>(mut self, evidence: E) -> Self {
        self.evidence = Box::new(evidence);
        self
    }

    pub fn with_signals<S: SignalSource + 'static>(mut self, signals: S) -> Self {
        self.signals = Box::new(signals);
        self
    }

    pub fn with_transfer_rnas<T: TransferRnaSource + 'static>(mut self, transfer_rnas: T) -> Self {
        self.transfer_rnas = Box::new(transfer_rnas);
        self
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Runs the full annotation pipeline over genomes.
///
/// The stages run in a fixed order:
///
/// 1. Predict genes and score them
/// 2. Score upstream extensions and keep the better start
/// 3. Scan the uncovered regions of both strands for ORFs and score them
/// 4. Merge extended and intergenic genes
/// 5. Resolve conflicts between opposite-strand scaffolds
/// 6. Filter promoters and terminators against the surviving genes
/// 7. Collect transfer RNAs
///
/// A gene whose codon scan meets an unreadable base is skipped by the stage
/// that scans it and kept otherwise.
///
/// # Examples
///
/// ```rust
/// use lynx_core::{Annotator, AnnotationConfig};
/// use lynx_core::engine::Collaborators;
/// use lynx_core::external::OrfFilePredictor;
/// use lynx_core::interval::Location;
/// use lynx_core::sequence::Genome;
///
/// let sequence = format!("{}ATG{}TAA{}", "CCC".repeat(10), "GCT".repeat(30), "CCC".repeat(10));
/// let genome = Genome::new("test_genome", None, sequence.as_bytes())?;
///
/// let predictor = OrfFilePredictor::new(vec![Location::new(31, 126)?]);
/// let annotator = Annotator::new(AnnotationConfig::default(), Collaborators::new(predictor));
/// let results = annotator.annotate(&genome)?;
///
/// assert_eq!(results.genes.len(), 1);
/// assert_eq!(results.genes[0].identifier, "test_genome~1");
/// # Ok::<(), lynx_core::types::LynxError>(())
/// ```
#[derive(Debug)]
pub struct Annotator {
    pub config: AnnotationConfig,
    collaborators: Collaborators,
}

impl Annotator {
    pub fn new(config: AnnotationConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Annotate one genome.
    ///
    /// # Errors
    ///
    /// Returns [`LynxError`] if a collaborator fails, if the merged gene set
    /// holds a duplicate identifier, or if an opposite-strand conflict cannot
    /// be resolved and [`AnnotationConfig::fail_on_unresolved_conflicts`] is
    /// set.
    pub fn annotate(&self, genome: &Genome) -> Result<AnnotationResults, LynxError> {
        let mut statistics = AnnotationStatistics::default();
        self.progress(format_args!("Annotating {} ({} bp)", genome.name, genome.len()));

        let predicted = self.predict_genes(genome)?;
        statistics.predicted = predicted.len();
        self.progress(format_args!("{}: {} predicted genes", genome.name, predicted.len()));

        let extended = self.extend_genes(genome, predicted, &mut statistics)?;
        self.progress(format_args!(
            "{}: {} genes extended upstream",
            genome.name, statistics.extended
        ));

        let intergenic = self.find_intergenic_genes(genome, &extended, &mut statistics)?;
        self.progress(format_args!(
            "{}: {} intergenic genes",
            genome.name,
            intergenic.len()
        ));

        let merged = merge_genes(extended, intergenic)?;
        let refined = refine_scaffolds(
            merged.clone(),
            self.config.scaffolding_distance,
            self.config.conflict_overlap_tolerance,
        );
        statistics.removed_by_scaffolds = merged.len() - refined.genes.len();
        if self.config.fail_on_unresolved_conflicts
            && let Some(conflict) = refined.unresolved.first()
        {
            return Err(conflict.to_error());
        }
        self.progress(format_args!(
            "{}: {} genes after scaffold refinement",
            genome.name,
            refined.genes.len()
        ));

        let signals = self.find_signals(genome, &merged)?;
        statistics.signals_found = signals.len();
        let mut promoters = Vec::new();
        let mut terminators = Vec::new();
        for signal in filter_signals(&refined.genes, &signals, self.config.signal_proximity) {
            match signal {
                TranscriptionSignal::Promoter(promoter) => promoters.push(promoter),
                TranscriptionSignal::Terminator(terminator) => terminators.push(terminator),
            }
        }
        self.progress(format_args!(
            "{}: {} promoters and {} terminators kept",
            genome.name,
            promoters.len(),
            terminators.len()
        ));

        let transfer_rnas = self.collaborators.transfer_rnas.transfer_rnas(genome)?;

        Ok(AnnotationResults {
            sequence_info: SequenceInfo {
                name: genome.name.clone(),
                description: genome.description.clone(),
                length: genome.len(),
                gc_content: gc_content(&genome.sequence),
                num_genes: refined.genes.len(),
            },
            genes: refined.genes,
            promoters,
            terminators,
            transfer_rnas,
            unresolved_conflicts: refined.unresolved,
            statistics,
        })
    }

    /// Annotate several genomes in parallel.
    ///
    /// Runs on a dedicated pool when [`AnnotationConfig::num_threads`] is set.
    pub fn annotate_all(&self, genomes: &[Genome]) -> Result<Vec<AnnotationResults>, LynxError> {
        let run = || {
            genomes
                .par_iter()
                .map(|genome| self.annotate(genome))
                .collect::<Result<Vec<_>, _>>()
        };

        match self.config.num_threads {
            Some(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| {
                    LynxError::CollaboratorError(format!("Failed to configure thread pool: {}", e))
                })?
                .install(run),
            None => run(),
        }
    }

    /// Annotate every record of a FASTA file.
    pub fn annotate_fasta_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<AnnotationResults>, LynxError> {
        let genomes = read_genomes(path)?;
        self.annotate_all(&genomes)
    }

    fn progress(&self, message: fmt::Arguments<'_>) {
        if !self.config.quiet {
            info!("{}", message);
        }
    }

    fn evaluate(&self, batch: &QueryBatch) -> Result<EvidenceMap, LynxError> {
        if batch.is_empty() {
            return Ok(EvidenceMap::new());
        }
        self.collaborators.evidence.evaluate(batch)
    }

    fn evidence_for(&self, batch: QueryBatch, origin: Origin) -> Result<Vec<Gene>, LynxError> {
        let evidence = self.evaluate(&batch)?;
        Ok(batch.into_genes(&evidence, origin))
    }

    fn predict_genes(&self, genome: &Genome) -> Result<Vec<Gene>, LynxError> {
        let genome_length = genome.length();
        let locations: Vec<Location> = self
            .collaborators
            .predictor
            .predict(genome)?
            .into_iter()
            .filter(|location| {
                let valid = location.start != location.stop && location.fits_within(genome_length);
                if !valid {
                    warn!(
                        "{}: dropping prediction {} outside 1..={}",
                        genome.name, location, genome_length
                    );
                }
                valid
            })
            .collect();

        // Untranslatable predictions stay in the gene set without evidence
        let evidence = self.evaluate(&QueryBatch::predicted_batch(genome, &locations))?;
        Ok(locations
            .iter()
            .enumerate()
            .map(|(index, location)| {
                let identifier = predicted_identifier(genome, index);
                let gene_evidence = evidence.get(&identifier).cloned().unwrap_or_default();
                Gene::new(identifier, *location, Origin::Predicted).with_evidence(gene_evidence)
            })
            .collect())
    }

    fn extend_genes(
        &self,
        genome: &Genome,
        genes: Vec<Gene>,
        statistics: &mut AnnotationStatistics,
    ) -> Result<Vec<Gene>, LynxError> {
        let genome_length = genome.length();
        let mut extensions = find_readable_extensions(&genome.sequence, &genes);
        extensions.retain(|candidates| !candidates.starts.is_empty());

        let batch = QueryBatch::extension_batch(genome, &extensions);
        statistics.extension_candidates = batch.len();
        let candidates = self.evidence_for(batch, Origin::Extended)?;

        let settings = ResolverSettings::from(&self.config);
        let resolved = apply_extensions(genome_length, &genes, &candidates, &settings);
        statistics.extended = resolved
            .iter()
            .filter(|gene| gene.origin == Origin::Extended)
            .count();
        Ok(resolved)
    }

    fn find_intergenic_genes(
        &self,
        genome: &Genome,
        genes: &[Gene],
        statistics: &mut AnnotationStatistics,
    ) -> Result<Vec<Gene>, LynxError> {
        let genome_length = genome.length();
        let min_length = self.config.min_length;
        let regions = open_regions(genome_length, genes, min_length);
        debug!(
            "{}: {} forward and {} reverse open regions",
            genome.name,
            regions.forward.len(),
            regions.reverse.len()
        );

        let locations = find_readable_intergenic_orfs(&genome.sequence, &regions, min_length);

        let batch = QueryBatch::intergenic_batch(genome, &locations);
        statistics.intergenic_candidates = batch.len();
        let intergenic = remove_common_stops(self.evidence_for(batch, Origin::IntergenicDerived)?);
        statistics.intergenic = intergenic.len();
        Ok(intergenic)
    }

    fn find_signals(
        &self,
        genome: &Genome,
        genes: &[Gene],
    ) -> Result<Vec<TranscriptionSignal>, LynxError> {
        let cutoff = self.config.promoter_score_cutoff;
        let promoters = self
            .collaborators
            .signals
            .promoters(genome)?
            .into_iter()
            .filter(|promoter| promoter.score > cutoff)
            .map(TranscriptionSignal::Promoter);
        let terminators = self
            .collaborators
            .signals
            .terminators(genome, genes)?
            .into_iter()
            .map(TranscriptionSignal::Terminator);
        Ok(promoters.chain(terminators).collect())
    }
}

/// Concatenate two gene sets whose identifiers must not collide.
pub fn merge_genes(first: Vec<Gene>, second: Vec<Gene>) -> Result<Vec<Gene>, LynxError> {
    let mut seen = HashSet::new();
    let merged: Vec<Gene> = first.into_iter().chain(second).collect();
    for gene in &merged {
        if !seen.insert(gene.identifier.as_str()) {
            return Err(LynxError::DuplicateIdentifier(gene.identifier.clone()));
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{EvidenceMap, StaticEvidence};
    use crate::external::OrfFilePredictor;
    use crate::types::{Evidence, Promoter, Terminator};

    /// One forward gene at 31..126 flanked by 30 bp of `CCC` on each side.
    fn create_test_genome() -> Genome {
        let sequence = format!(
            "{}ATG{}TAA{}",
            "CCC".repeat(10),
            "GCT".repeat(30),
            "CCC".repeat(10)
        );
        Genome::new("test_genome", None, sequence.as_bytes()).unwrap()
    }

    fn create_test_annotator(config: AnnotationConfig, locations: Vec<Location>) -> Annotator {
        Annotator::new(config, Collaborators::new(OrfFilePredictor::new(locations)))
    }

    struct FixedSignals {
        promoters: Vec<Promoter>,
        terminators: Vec<Terminator>,
    }

    impl SignalSource for FixedSignals {
        fn promoters(&self, _genome: &Genome) -> Result<Vec<Promoter>, LynxError> {
            Ok(self.promoters.clone())
        }

        fn terminators(
            &self,
            _genome: &Genome,
            _genes: &[Gene],
        ) -> Result<Vec<Terminator>, LynxError> {
            Ok(self.terminators.clone())
        }
    }

    fn create_promoter(start: i64, stop: i64, score: f64) -> Promoter {
        let location = Location::new(start, stop).unwrap();
        Promoter {
            location,
            position: stop,
            score,
            minus_10: location,
            minus_35: location,
        }
    }

    fn create_terminator(start: i64, stop: i64) -> Terminator {
        Terminator {
            location: Location::new(start, stop).unwrap(),
            confidence: 90,
            hairpin_score: -10.0,
            tail_score: -3.0,
        }
    }

    #[test]
    fn test_annotate_single_gene() {
        let genome = create_test_genome();
        let mut scores = EvidenceMap::new();
        scores.insert("test_genome~1".to_string(), Evidence::with_e_value(1e-30));

        let annotator = Annotator::new(
            AnnotationConfig::default(),
            Collaborators::new(OrfFilePredictor::new(vec![Location::new(31, 126).unwrap()]))
                .with_evidence(StaticEvidence::new(scores)),
        );
        let results = annotator.annotate(&genome).unwrap();

        assert_eq!(results.genes.len(), 1);
        let gene = &results.genes[0];
        assert_eq!(gene.identifier, "test_genome~1");
        assert_eq!(gene.location, Location::new(31, 126).unwrap());
        assert_eq!(gene.origin, Origin::Predicted);
        assert_eq!(gene.e_value(), 1e-30);

        assert_eq!(results.sequence_info.length, 156);
        assert_eq!(results.sequence_info.num_genes, 1);
        assert_eq!(results.statistics.predicted, 1);
        assert_eq!(results.statistics.extension_candidates, 0);
        assert_eq!(results.statistics.intergenic_candidates, 0);
        assert!(results.unresolved_conflicts.is_empty());
    }

    #[test]
    fn test_predictions_outside_genome_are_dropped() {
        let genome = create_test_genome();
        let annotator = create_test_annotator(
            AnnotationConfig::default(),
            vec![Location::new(31, 126).unwrap(), Location::new(100, 158).unwrap()],
        );
        let results = annotator.annotate(&genome).unwrap();

        assert_eq!(results.statistics.predicted, 1);
        assert_eq!(results.genes.len(), 1);
    }

    #[test]
    fn test_annotate_without_predictions() {
        let genome = create_test_genome();
        let annotator = create_test_annotator(AnnotationConfig::default(), Vec::new());
        let results = annotator.annotate(&genome).unwrap();

        // The only ORF is 96 bp, below the default minimum length
        assert!(results.genes.is_empty());
        assert_eq!(results.statistics.intergenic, 0);
    }

    #[test]
    fn test_intergenic_gene_found_below_minimum_length_setting() {
        let genome = create_test_genome();
        let config = AnnotationConfig {
            min_length: 50,
            ..Default::default()
        };
        let annotator = create_test_annotator(config, Vec::new());
        let results = annotator.annotate(&genome).unwrap();

        assert_eq!(results.genes.len(), 1);
        let gene = &results.genes[0];
        assert_eq!(gene.identifier, "intergenic~1");
        assert_eq!(gene.location, Location::new(31, 126).unwrap());
        assert_eq!(gene.origin, Origin::IntergenicDerived);
    }

    #[test]
    fn test_intergenic_identifiers_on_genome_named_intergenic() {
        let test_genome = create_test_genome();
        let genome = Genome::new("intergenic", None, &test_genome.sequence).unwrap();
        let config = AnnotationConfig {
            min_length: 50,
            ..Default::default()
        };
        let annotator = create_test_annotator(config, Vec::new());
        let results = annotator.annotate(&genome).unwrap();

        assert_eq!(results.genes.len(), 1);
        assert_eq!(results.genes[0].identifier, "intergenic_orf~1");
    }

    #[test]
    fn test_untranslatable_prediction_is_kept_without_evidence() {
        let sequence = format!(
            "{}ATG{}GNT{}TAA{}",
            "CCC".repeat(10),
            "GCT".repeat(14),
            "GCT".repeat(15),
            "CCC".repeat(10)
        );
        let genome = Genome::new("test_genome", None, sequence.as_bytes()).unwrap();
        let annotator = create_test_annotator(
            AnnotationConfig::default(),
            vec![Location::new(31, 126).unwrap()],
        );
        let results = annotator.annotate(&genome).unwrap();

        assert_eq!(results.statistics.predicted, 1);
        assert_eq!(results.genes.len(), 1);
        let gene = &results.genes[0];
        assert_eq!(gene.identifier, "test_genome~1");
        assert_eq!(gene.origin, Origin::Predicted);
        assert!(!gene.evidence.has_hit());
    }

    #[test]
    fn test_signals_filtered_against_genes() {
        let genome = create_test_genome();
        let signals = FixedSignals {
            promoters: vec![
                create_promoter(10, 25, 2.5),
                create_promoter(12, 20, -1.0),
                create_promoter(60, 80, 3.0),
            ],
            terminators: vec![
                create_terminator(130, 150),
                create_terminator(20, 28),
            ],
        };
        let annotator = Annotator::new(
            AnnotationConfig::default(),
            Collaborators::new(OrfFilePredictor::new(vec![Location::new(31, 126).unwrap()]))
                .with_signals(signals),
        );
        let results = annotator.annotate(&genome).unwrap();

        assert_eq!(results.statistics.signals_found, 4);
        assert_eq!(results.promoters, vec![create_promoter(10, 25, 2.5)]);
        assert_eq!(results.terminators, vec![create_terminator(20, 28)]);
    }

    #[test]
    fn test_opposite_strand_collision_is_reported() {
        let genome = create_test_genome();
        let locations = vec![Location::new(31, 126).unwrap(), Location::new(120, 40).unwrap()];

        let lenient = create_test_annotator(AnnotationConfig::default(), locations.clone());
        let results = lenient.annotate(&genome).unwrap();
        assert!(!results.unresolved_conflicts.is_empty());

        let strict = create_test_annotator(
            AnnotationConfig {
                fail_on_unresolved_conflicts: true,
                ..Default::default()
            },
            locations,
        );
        assert!(matches!(
            strict.annotate(&genome),
            Err(LynxError::AmbiguousConflict { .. })
        ));
    }

    #[test]
    fn test_merge_rejects_duplicate_identifiers() {
        let location = Location::new(1, 90).unwrap();
        let first = vec![Gene::new("x", location, Origin::Predicted)];
        let second = vec![Gene::new("x", location, Origin::IntergenicDerived)];

        assert!(matches!(
            merge_genes(first, second),
            Err(LynxError::DuplicateIdentifier(identifier)) if identifier == "x"
        ));
    }

    #[test]
    fn test_annotate_all_with_dedicated_pool() {
        let genomes = vec![create_test_genome(), create_test_genome()];
        let config = AnnotationConfig {
            num_threads: Some(2),
            ..Default::default()
        };
        let annotator = create_test_annotator(config, vec![Location::new(31, 126).unwrap()]);
        let results = annotator.annotate_all(&genomes).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], results[1]);
    }
}
