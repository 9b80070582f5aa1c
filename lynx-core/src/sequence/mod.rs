//! Nucleotide sequences and codon-level operations.
//!
//! ## Overview
//!
//! Genomes are stored as uppercase ASCII. Every scanning stage works on
//! three-symbol windows, classified as start, stop or sense codons.
//!
//! - Start codons: `ATG`, `GTG`, `TTG`
//! - Stop codons: `TGA`, `TAA`, `TAG`
//!
//! A window holding any symbol other than `A`, `C`, `G` or `T` cannot be
//! classified and is reported as [`LynxError::UnknownCodon`].
//!
//! ## Modules
//!
//! - [`io`]: FASTA file reading
//!
//! ## Examples
//!
//! ```rust
//! use lynx_core::sequence::{classify_at, reverse_complement, translate, CodonClass};
//!
//! let sequence = b"ATGGCTTAA";
//! assert_eq!(classify_at(sequence, 0).unwrap(), Some(CodonClass::Start));
//! assert_eq!(classify_at(sequence, 6).unwrap(), Some(CodonClass::Stop));
//! assert_eq!(translate(sequence).unwrap(), "MA*");
//! assert_eq!(reverse_complement(b"ATGC"), b"GCAT".to_vec());
//! ```

pub mod io;

pub use io::*;

use crate::constants::{CODON_TABLE, START_CODONS, STOP_CODONS};
use crate::interval::Location;
use crate::types::LynxError;

/// Role of a codon when scanning reading frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodonClass {
    Start,
    Stop,
    /// Any other complete codon
    Sense,
}

/// A named genome sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    pub name: String,
    pub description: Option<String>,
    /// Uppercase nucleotides
    pub sequence: Vec<u8>,
}

impl Genome {
    /// Build a genome, uppercasing the sequence and dropping whitespace.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        sequence: &[u8],
    ) -> Result<Self, LynxError> {
        let name = name.into();
        let sequence: Vec<u8> = sequence
            .iter()
            .filter(|base| !base.is_ascii_whitespace())
            .map(u8::to_ascii_uppercase)
            .collect();

        if sequence.is_empty() {
            return Err(LynxError::InvalidSequence(format!(
                "genome {} has no sequence",
                name
            )));
        }

        Ok(Self {
            name,
            description,
            sequence,
        })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Length as a genome coordinate.
    pub fn length(&self) -> i64 {
        self.sequence.len() as i64
    }
}

/// Classify one three-symbol window.
pub fn classify_codon(codon: &[u8]) -> Result<CodonClass, LynxError> {
    if codon.len() != 3 || !codon.iter().all(|base| b"ACGT".contains(base)) {
        return Err(LynxError::UnknownCodon {
            codon: String::from_utf8_lossy(codon).into_owned(),
            position: 0,
        });
    }
    if STOP_CODONS.iter().any(|stop| stop.as_slice() == codon) {
        Ok(CodonClass::Stop)
    } else if START_CODONS.iter().any(|start| start.as_slice() == codon) {
        Ok(CodonClass::Start)
    } else {
        Ok(CodonClass::Sense)
    }
}

/// Classify the codon beginning at 0-based `index`.
///
/// Returns `Ok(None)` when fewer than three symbols remain.
pub fn classify_at(sequence: &[u8], index: usize) -> Result<Option<CodonClass>, LynxError> {
    let Some(window) = sequence.get(index..index + 3) else {
        return Ok(None);
    };
    classify_codon(window)
        .map(Some)
        .map_err(|error| with_position(error, index))
}

/// Classify the reverse complement of the window beginning at 0-based `index`.
///
/// This is the codon read on the reverse strand whose last base sits at
/// `index`.
pub fn classify_reverse_at(
    sequence: &[u8],
    index: usize,
) -> Result<Option<CodonClass>, LynxError> {
    let Some(window) = sequence.get(index..index + 3) else {
        return Ok(None);
    };
    classify_codon(&reverse_complement(window))
        .map(Some)
        .map_err(|error| with_position(error, index))
}

fn with_position(error: LynxError, index: usize) -> LynxError {
    match error {
        LynxError::UnknownCodon { codon, .. } => LynxError::UnknownCodon {
            codon,
            position: index,
        },
        other => other,
    }
}

/// Complement of a single base. Unknown symbols become `N`.
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        _ => b'N',
    }
}

/// Reverse complement of a sequence.
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().map(|&base| complement(base)).collect()
}

fn base_index(base: u8) -> Option<usize> {
    match base {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Translate a nucleotide sequence with the standard genetic code.
///
/// Translation works codon by codon from the first base; one or two trailing
/// bases that do not form a full codon are ignored. Stop codons translate
/// to `*`.
pub fn translate(sequence: &[u8]) -> Result<String, LynxError> {
    let mut protein = String::with_capacity(sequence.len() / 3);
    for (codon_number, codon) in sequence.chunks_exact(3).enumerate() {
        let index = codon
            .iter()
            .try_fold(0usize, |acc, &base| base_index(base).map(|b| acc * 4 + b))
            .ok_or_else(|| LynxError::UnknownCodon {
                codon: String::from_utf8_lossy(codon).into_owned(),
                position: codon_number * 3,
            })?;
        protein.push(CODON_TABLE[index] as char);
    }
    Ok(protein)
}

/// Nucleotides read along `location`, reverse complemented on the reverse strand.
pub fn coding_sequence(genome: &[u8], location: &Location) -> Result<Vec<u8>, LynxError> {
    let low = location.low();
    let high = location.high();
    if low < 1 || high as usize > genome.len() {
        return Err(LynxError::InvalidSequence(format!(
            "location {} lies outside a genome of {} bp",
            location,
            genome.len()
        )));
    }
    let slice = &genome[(low - 1) as usize..high as usize];
    if location.is_forward() {
        Ok(slice.to_vec())
    } else {
        Ok(reverse_complement(slice))
    }
}

/// Fraction of `G` and `C` among all symbols.
pub fn gc_content(sequence: &[u8]) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let gc = sequence
        .iter()
        .filter(|&&base| base == b'G' || base == b'C')
        .count();
    gc as f64 / sequence.len() as f64
}
