use std::fmt;

use bio::bio_types::strand::Strand;
use thiserror::Error;

use crate::constants::{EXTENDED_COLOUR, INTERGENIC_COLOUR, PREDICTED_COLOUR};
use crate::interval::Location;

/// How a gene entered the final annotation.
///
/// Only [`Origin::IntergenicDerived`] genes may be discarded when resolving
/// conflicts between opposite-strand scaffolds.
///
/// # Examples
///
/// ```rust
/// use lynx_core::types::Origin;
///
/// assert!(Origin::IntergenicDerived.is_removable());
/// assert!(!Origin::Predicted.is_removable());
/// assert_eq!(Origin::Extended.colour(), "0 255 0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Reported by the gene predictor and kept as is
    #[default]
    Predicted,
    /// Predicted gene replaced by an upstream start
    Extended,
    /// Found in a region the predictor left empty
    IntergenicDerived,
}

impl Origin {
    /// Free-text note written to feature tables.
    pub const fn note(self) -> &'static str {
        match self {
            Origin::Predicted => "",
            Origin::Extended => "Extended",
            Origin::IntergenicDerived => "Intergenic",
        }
    }

    /// Artemis `/colour` triple.
    pub const fn colour(self) -> &'static str {
        match self {
            Origin::Predicted => PREDICTED_COLOUR,
            Origin::Extended => EXTENDED_COLOUR,
            Origin::IntergenicDerived => INTERGENIC_COLOUR,
        }
    }

    pub const fn is_removable(self) -> bool {
        matches!(self, Origin::IntergenicDerived)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Origin::Predicted => "Predicted",
            Origin::Extended => "Extended",
            Origin::IntergenicDerived => "Intergenic",
        };
        write!(f, "{}", name)
    }
}

/// Best database hit carried alongside a score.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HitAnnotation {
    pub hit_id: Option<String>,
    pub title: Option<String>,
    pub organism: Option<String>,
    pub bit_score: f64,
    pub identity: f64,
    pub alignment_length: u32,
    /// Number of hits reported for the query
    pub num_hits: usize,
}

/// Similarity evidence for one gene.
///
/// Lower e-values are better. A gene without a hit carries positive
/// infinity, which compares worse than any real score.
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    pub e_value: f64,
    pub annotation: HitAnnotation,
}

impl Evidence {
    /// Evidence for a query that found nothing.
    pub fn none() -> Self {
        Self {
            e_value: f64::INFINITY,
            annotation: HitAnnotation::default(),
        }
    }

    pub fn with_e_value(e_value: f64) -> Self {
        Self {
            e_value,
            annotation: HitAnnotation::default(),
        }
    }

    pub fn has_hit(&self) -> bool {
        self.e_value.is_finite()
    }
}

impl Default for Evidence {
    fn default() -> Self {
        Self::none()
    }
}

/// A gene record flowing through the refinement stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    /// Unique within one annotation run
    pub identifier: String,
    pub location: Location,
    pub evidence: Evidence,
    pub origin: Origin,
}

impl Gene {
    pub fn new(identifier: impl Into<String>, location: Location, origin: Origin) -> Self {
        Self {
            identifier: identifier.into(),
            location,
            evidence: Evidence::none(),
            origin,
        }
    }

    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn e_value(&self) -> f64 {
        self.evidence.e_value
    }

    pub fn length(&self) -> i64 {
        self.location.length()
    }

    pub fn strand(&self) -> Strand {
        self.location.strand()
    }

    pub fn is_forward(&self) -> bool {
        self.location.is_forward()
    }

    pub fn is_intergenic(&self) -> bool {
        self.origin == Origin::IntergenicDerived
    }

    /// Product name of the best hit, if any.
    pub fn title(&self) -> Option<&str> {
        self.evidence.annotation.title.as_deref()
    }
}

/// Anything positioned on the genome that can be kept or discarded by the
/// signal filter.
pub trait Signal {
    fn location(&self) -> Location;
}

/// A promoter reported by a promoter predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct Promoter {
    /// Extent of both boxes together
    pub location: Location,
    /// Position reported for the transcription start
    pub position: i64,
    pub score: f64,
    pub minus_10: Location,
    pub minus_35: Location,
}

impl Signal for Promoter {
    fn location(&self) -> Location {
        self.location
    }
}

/// A rho-independent terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminator {
    pub location: Location,
    pub confidence: u32,
    pub hairpin_score: f64,
    pub tail_score: f64,
}

impl Signal for Terminator {
    fn location(&self) -> Location {
        self.location
    }
}

/// Promoters and terminators filtered together.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionSignal {
    Promoter(Promoter),
    Terminator(Terminator),
}

impl Signal for TranscriptionSignal {
    fn location(&self) -> Location {
        match self {
            TranscriptionSignal::Promoter(promoter) => promoter.location,
            TranscriptionSignal::Terminator(terminator) => terminator.location,
        }
    }
}

/// A transfer RNA gene.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRna {
    pub location: Location,
    /// Amino acid carried, as reported by the scanner
    pub kind: String,
    pub anti_codon: String,
    pub cove_score: f64,
}

/// Errors that can occur during annotation
#[derive(Error, Debug)]
pub enum LynxError {
    /// A codon window contained a symbol outside `A`, `C`, `G`, `T`
    #[error("Unknown codon {codon:?} at position {position}")]
    UnknownCodon { codon: String, position: usize },
    /// An interval whose ends coincide has no strand
    #[error("Degenerate interval: {start}-{stop}")]
    DegenerateInterval { start: i64, stop: i64 },
    /// Two scaffolds anchored by predicted genes overlap beyond tolerance
    #[error("Unresolved conflict between forward scaffold [{forward}] and reverse scaffold [{reverse}]")]
    AmbiguousConflict { forward: String, reverse: String },
    /// Two genes in one run share an identifier
    #[error("Duplicate gene identifier: {0}")]
    DuplicateIdentifier(String),
    /// Invalid input sequence format or content
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),
    /// Error parsing collaborator output
    #[error("Parse error: {0}")]
    ParseError(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Malformed similarity search XML
    #[error("XML error: {0}")]
    XmlError(String),
    /// A collaborator could not produce its result
    #[error("Collaborator failed: {0}")]
    CollaboratorError(String),
}

impl From<regex::Error> for LynxError {
    fn from(error: regex::Error) -> Self {
        LynxError::ParseError(error.to_string())
    }
}
