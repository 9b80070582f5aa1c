//! Boundaries to the tools the pipeline depends on but never runs itself.
//!
//! Each external step is a trait so that the orchestrator can be driven by
//! live tools, cached reports or test doubles alike. The parsers in the
//! submodules turn the text each tool writes into typed records.
//!
//! ## Modules
//!
//! - [`genemark`]: GeneMark `.orf` FASTA headers
//! - [`bprom`]: BPROM promoter reports
//! - [`transterm`]: TransTermHP terminator reports and `.crd` gene files
//! - [`trnascan`]: tRNAscan-SE tabular output
//!
//! ## File-backed collaborators
//!
//! [`OrfFilePredictor`], [`StaticSignals`] and [`StaticTransferRnas`] serve
//! reports produced ahead of time. A report that was not supplied yields an
//! empty result.

pub mod bprom;
pub mod genemark;
pub mod transterm;
pub mod trnascan;

pub use bprom::*;
pub use genemark::*;
pub use transterm::*;
pub use trnascan::*;

use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::interval::Location;
use crate::sequence::Genome;
use crate::types::{Gene, LynxError, Promoter, Terminator, TransferRna};

/// Produces the initial gene intervals of a genome.
pub trait GenePredictor: Send + Sync {
    fn predict(&self, genome: &Genome) -> Result<Vec<Location>, LynxError>;
}

/// Produces promoters and terminators.
pub trait SignalSource: Send + Sync {
    fn promoters(&self, genome: &Genome) -> Result<Vec<Promoter>, LynxError>;

    /// Terminators near `genes`, the gene set at the time of the search.
    fn terminators(&self, genome: &Genome, genes: &[Gene]) -> Result<Vec<Terminator>, LynxError>;
}

/// Produces transfer RNA genes.
pub trait TransferRnaSource: Send + Sync {
    fn transfer_rnas(&self, genome: &Genome) -> Result<Vec<TransferRna>, LynxError>;
}

/// Predictions read from a GeneMark `.orf` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrfFilePredictor {
    locations: Vec<Location>,
}

impl OrfFilePredictor {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LynxError> {
        Ok(Self::new(read_orf_file(path)?))
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }
}

impl GenePredictor for OrfFilePredictor {
    fn predict(&self, genome: &Genome) -> Result<Vec<Location>, LynxError> {
        debug!(
            "{}: {} predicted intervals from file",
            genome.name,
            self.locations.len()
        );
        Ok(self.locations.clone())
    }
}

/// Promoter and terminator reports produced ahead of time.
///
/// The reverse BPROM report is the one run on the reverse complement of the
/// genome; its coordinates are mapped back when promoters are requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticSignals {
    forward_promoters: Vec<Promoter>,
    reverse_promoters: Vec<Promoter>,
    terminators: Vec<Terminator>,
}

impl StaticSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promoters from a BPROM report of the genome as given.
    pub fn with_forward_report(mut self, report: &str) -> Result<Self, LynxError> {
        self.forward_promoters = parse_bprom(report)?;
        Ok(self)
    }

    /// Promoters from a BPROM report of the reverse complement.
    pub fn with_reverse_report(mut self, report: &str) -> Result<Self, LynxError> {
        self.reverse_promoters = parse_bprom(report)?;
        Ok(self)
    }

    pub fn with_terminator_report(mut self, report: &str) -> Result<Self, LynxError> {
        self.terminators = parse_transterm(report)?;
        Ok(self)
    }

    /// Load whichever reports are given.
    pub fn from_files(
        forward: Option<&Path>,
        reverse: Option<&Path>,
        terminators: Option<&Path>,
    ) -> Result<Self, LynxError> {
        let mut signals = Self::new();
        if let Some(path) = forward {
            signals = signals.with_forward_report(&std::fs::read_to_string(path)?)?;
        }
        if let Some(path) = reverse {
            signals = signals.with_reverse_report(&std::fs::read_to_string(path)?)?;
        }
        if let Some(path) = terminators {
            signals = signals.with_terminator_report(&std::fs::read_to_string(path)?)?;
        }
        Ok(signals)
    }
}

impl SignalSource for StaticSignals {
    fn promoters(&self, genome: &Genome) -> Result<Vec<Promoter>, LynxError> {
        let genome_length = genome.length();
        Ok(self
            .forward_promoters
            .iter()
            .cloned()
            .chain(
                self.reverse_promoters
                    .iter()
                    .map(|promoter| reverse_promoter(genome_length, promoter)),
            )
            .collect())
    }

    fn terminators(&self, _genome: &Genome, genes: &[Gene]) -> Result<Vec<Terminator>, LynxError> {
        debug!(
            "{} terminators reported for {} genes",
            self.terminators.len(),
            genes.len()
        );
        Ok(self.terminators.clone())
    }
}

/// Transfer RNAs from a tRNAscan-SE report produced ahead of time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticTransferRnas {
    transfer_rnas: Vec<TransferRna>,
}

impl StaticTransferRnas {
    pub fn new(transfer_rnas: Vec<TransferRna>) -> Self {
        Self { transfer_rnas }
    }

    pub fn from_report(report: &str) -> Result<Self, LynxError> {
        Ok(Self::new(parse_trnascan(report)?))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LynxError> {
        Self::from_report(&std::fs::read_to_string(path)?)
    }
}

impl TransferRnaSource for StaticTransferRnas {
    fn transfer_rnas(&self, _genome: &Genome) -> Result<Vec<TransferRna>, LynxError> {
        Ok(self.transfer_rnas.clone())
    }
}

/// Parse one captured field of a report line.
pub(crate) fn parse_field<T: FromStr>(text: &str, field: &str) -> Result<T, LynxError> {
    text.trim()
        .parse()
        .map_err(|_| LynxError::ParseError(format!("invalid {} {:?}", field, text)))
}
