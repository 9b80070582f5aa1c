use crate::constants::{
    DEFAULT_CONFLICT_OVERLAP_TOLERANCE, DEFAULT_EVALUE_TIE_TOLERANCE,
    DEFAULT_EXTENSION_GAP_THRESHOLD, DEFAULT_MIN_LENGTH, DEFAULT_PROMOTER_SCORE_CUTOFF,
    DEFAULT_SCAFFOLDING_DISTANCE, DEFAULT_SIGNAL_PROXIMITY,
};

/// Output format options for annotation results.
///
/// # Formats
///
/// - **Artemis**: Feature table with colour qualifiers followed by the sequence
/// - **GFF**: General Feature Format version 3
/// - **Summary**: Tab-delimited table of the final genes and their evidence
///
/// # Examples
///
/// ```rust
/// use lynx_core::config::{AnnotationConfig, OutputFormat};
///
/// let config = AnnotationConfig {
///     output_format: OutputFormat::Gff,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Artemis-readable feature table.
    ///
    /// Promoters, terminators, tRNAs and CDS features with `/colour`
    /// qualifiers, followed by an `ORIGIN` block holding the genome.
    Artemis,

    /// General Feature Format version 3.
    Gff,

    /// Tab-delimited gene summary.
    ///
    /// One row per gene with its coordinates, origin and best hit.
    Summary,
}

/// Configuration settings for an annotation run.
///
/// Every threshold used by the refinement stages lives here so that callers
/// can tune them without touching the algorithms. The defaults reproduce the
/// behaviour of the historical pipeline.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use lynx_core::config::AnnotationConfig;
///
/// let config = AnnotationConfig::default();
/// assert_eq!(config.min_length, 100);
/// ```
///
/// ## Tighter scaffolds, strict conflict handling
///
/// ```rust
/// use lynx_core::config::AnnotationConfig;
///
/// let config = AnnotationConfig {
///     scaffolding_distance: 50,
///     fail_on_unresolved_conflicts: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct AnnotationConfig {
    /// Minimum length of intergenic regions and intergenic ORFs.
    ///
    /// **Default**: `100`
    pub min_length: i64,

    /// Genes closer than this on the same strand are merged into one scaffold.
    ///
    /// **Default**: `100`
    pub scaffolding_distance: i64,

    /// Promoters whose score does not exceed this value are discarded.
    ///
    /// **Default**: `0.0`
    pub promoter_score_cutoff: f64,

    /// Gap to the previous gene below which an extension is judged on length.
    ///
    /// **Default**: `100`
    pub extension_gap_threshold: i64,

    /// E-values closer than this count as tied when comparing extensions.
    ///
    /// **Default**: `1e-5`
    pub evalue_tie_tolerance: f64,

    /// Maximum distance from a signal's centre to the nearest gene start.
    ///
    /// **Default**: `100`
    pub signal_proximity: i64,

    /// Overlap between opposite-strand scaffolds that is still tolerated.
    ///
    /// **Default**: `3`
    pub conflict_overlap_tolerance: i64,

    /// Return an error instead of a warning when two scaffolds anchored by
    /// predicted genes cannot be separated.
    ///
    /// **Default**: `false`
    pub fail_on_unresolved_conflicts: bool,

    /// Suppress informational log output.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Output format for annotation results.
    ///
    /// **Default**: [`OutputFormat::Artemis`]
    pub output_format: OutputFormat,

    /// Number of threads used when annotating several genomes.
    ///
    /// **Default**: `None` (use all available cores)
    pub num_threads: Option<usize>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            scaffolding_distance: DEFAULT_SCAFFOLDING_DISTANCE,
            promoter_score_cutoff: DEFAULT_PROMOTER_SCORE_CUTOFF,
            extension_gap_threshold: DEFAULT_EXTENSION_GAP_THRESHOLD,
            evalue_tie_tolerance: DEFAULT_EVALUE_TIE_TOLERANCE,
            signal_proximity: DEFAULT_SIGNAL_PROXIMITY,
            conflict_overlap_tolerance: DEFAULT_CONFLICT_OVERLAP_TOLERANCE,
            fail_on_unresolved_conflicts: false,
            quiet: false,
            output_format: OutputFormat::Artemis,
            num_threads: None,
        }
    }
}
