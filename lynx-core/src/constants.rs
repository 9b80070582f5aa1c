// =============================================================================
// =============================================================================

/// Version string for Lynx
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name written into the source column of GFF output
pub const SOURCE_NAME: &str = "lynx";

// =============================================================================
// =============================================================================

/// Length of a codon in base pairs
pub const CODON_LENGTH: i64 = 3;

/// Number of reading frames scanned per strand
pub const READING_FRAMES: i64 = 3;

/// Codons that open a reading frame
pub const START_CODONS: [&[u8; 3]; 3] = [b"ATG", b"GTG", b"TTG"];

/// Codons that close a reading frame
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TGA", b"TAA", b"TAG"];

/// Amino acids for every codon, indexed `16 * first + 4 * second + third`
/// with bases ordered A, C, G, T. Stop codons map to `*`.
pub const CODON_TABLE: &[u8; 64] =
    b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";

/// Identifier prefix of genes found between the predictions
pub const INTERGENIC_PREFIX: &str = "intergenic";

/// Replaces [`INTERGENIC_PREFIX`] for a genome that carries that name
pub const INTERGENIC_FALLBACK_PREFIX: &str = "intergenic_orf";

/// Width of sequence lines in FASTA batches and feature tables
pub const LINE_WIDTH: usize = 50;

// =============================================================================
// =============================================================================

/// Minimum length of intergenic regions and open reading frames
pub const DEFAULT_MIN_LENGTH: i64 = 100;

/// Maximum distance between genes merged into one scaffold
pub const DEFAULT_SCAFFOLDING_DISTANCE: i64 = 100;

/// Promoters scoring at or below this value are discarded
pub const DEFAULT_PROMOTER_SCORE_CUTOFF: f64 = 0.0;

/// Extensions that land closer than this to the previous gene prefer length over score
pub const DEFAULT_EXTENSION_GAP_THRESHOLD: i64 = 100;

/// E-values closer than this are treated as equal when picking an extension
pub const DEFAULT_EVALUE_TIE_TOLERANCE: f64 = 1e-5;

/// Signals must lie this close to the start of a gene to survive filtering
pub const DEFAULT_SIGNAL_PROXIMITY: i64 = 100;

/// Opposite-strand scaffolds overlapping by more than this are in conflict
pub const DEFAULT_CONFLICT_OVERLAP_TOLERANCE: i64 = 3;

// =============================================================================
// =============================================================================

/// Artemis colour of genes kept as predicted
pub const PREDICTED_COLOUR: &str = "0 255 255";

/// Artemis colour of genes replaced by an upstream extension
pub const EXTENDED_COLOUR: &str = "0 255 0";

/// Artemis colour of genes found between the initial predictions
pub const INTERGENIC_COLOUR: &str = "160 32 240";

/// Artemis colour of promoter boxes
pub const PROMOTER_COLOUR: &str = "255 0 255";
