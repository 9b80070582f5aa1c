use crate::algorithms::scaffolds::UnresolvedConflict;
use crate::types::{Gene, Promoter, Terminator, TransferRna};

/// Annotation of one genome.
///
/// # Fields
///
/// - `genes`: refined genes, forward strand scaffolds first
/// - `promoters`, `terminators`: signals that survived the proximity filter
/// - `transfer_rnas`: as reported by the tRNA scanner
/// - `unresolved_conflicts`: opposite-strand overlaps no rule could settle
///
/// # Examples
///
/// ```rust,no_run
/// use lynx_core::{Annotator, AnnotationConfig};
/// use lynx_core::engine::Collaborators;
/// use lynx_core::external::OrfFilePredictor;
/// use lynx_core::sequence::read_genomes;
///
/// let predictor = OrfFilePredictor::from_file("genome.orf")?;
/// let annotator = Annotator::new(AnnotationConfig::default(), Collaborators::new(predictor));
/// let genome = read_genomes("genome.fasta")?.remove(0);
/// let results = annotator.annotate(&genome)?;
///
/// println!("{}: {} genes", results.sequence_info.name, results.genes.len());
/// println!("GC%: {:.2}", results.sequence_info.gc_content * 100.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationResults {
    pub sequence_info: SequenceInfo,
    pub genes: Vec<Gene>,
    pub promoters: Vec<Promoter>,
    pub terminators: Vec<Terminator>,
    pub transfer_rnas: Vec<TransferRna>,
    /// Empty unless two predicted scaffolds collide
    pub unresolved_conflicts: Vec<UnresolvedConflict>,
    pub statistics: AnnotationStatistics,
}

/// Information about an annotated sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceInfo {
    /// First word of the FASTA header
    pub name: String,
    pub description: Option<String>,
    /// Length in base pairs
    pub length: usize,
    /// GC content as a fraction (0.0 to 1.0)
    pub gc_content: f64,
    /// Number of genes in the final annotation
    pub num_genes: usize,
}

/// Gene counts recorded as the stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnnotationStatistics {
    /// Valid intervals returned by the gene predictor
    pub predicted: usize,
    /// Upstream starts submitted for scoring
    pub extension_candidates: usize,
    /// Genes whose start was moved upstream
    pub extended: usize,
    /// Intergenic ORFs submitted for scoring
    pub intergenic_candidates: usize,
    /// Intergenic genes kept after stop deduplication
    pub intergenic: usize,
    /// Genes dropped while resolving scaffold conflicts
    pub removed_by_scaffolds: usize,
    /// Promoters and terminators before the proximity filter
    pub signals_found: usize,
}
