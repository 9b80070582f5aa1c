use log::{debug, warn};

use crate::algorithms::extension::StopBounds;
use crate::constants::CODON_LENGTH;
use crate::interval::Location;
use crate::sequence::{CodonClass, classify_at, classify_reverse_at};
use crate::types::{Gene, LynxError};

/// Upstream start candidates for one gene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionCandidates {
    pub identifier: String,
    pub location: Location,
    /// 1-based start coordinates, nearest to the original start first
    pub starts: Vec<i64>,
}

/// Enumerate upstream start candidates for every gene.
///
/// Fails on the first gene whose upstream walk meets an unreadable codon.
pub fn find_extensions(
    sequence: &[u8],
    genes: &[Gene],
) -> Result<Vec<ExtensionCandidates>, LynxError> {
    let bounds = StopBounds::from_genes(genes, sequence.len() as i64);
    genes
        .iter()
        .map(|gene| {
            Ok(ExtensionCandidates {
                identifier: gene.identifier.clone(),
                location: gene.location,
                starts: gene_extensions(sequence, gene, &bounds)?,
            })
        })
        .collect()
}

/// Like [`find_extensions`], but a gene whose upstream walk meets an
/// unreadable codon is logged and left without candidates.
pub fn find_readable_extensions(sequence: &[u8], genes: &[Gene]) -> Vec<ExtensionCandidates> {
    let bounds = StopBounds::from_genes(genes, sequence.len() as i64);
    genes
        .iter()
        .filter_map(|gene| match gene_extensions(sequence, gene, &bounds) {
            Ok(starts) => Some(ExtensionCandidates {
                identifier: gene.identifier.clone(),
                location: gene.location,
                starts,
            }),
            Err(error) => {
                warn!("Skipping extension of {}: {}", gene.identifier, error);
                None
            }
        })
        .collect()
}

/// Walk upstream in frame from `gene`'s start and collect start codons.
///
/// The walk ends at the first in-frame stop codon, at the sequence edge, or
/// right after recording a start codon that reaches the bound.
pub fn gene_extensions(
    sequence: &[u8],
    gene: &Gene,
    bounds: &StopBounds,
) -> Result<Vec<i64>, LynxError> {
    let bound = bounds.bound_for(&gene.location);
    let starts = if gene.location.is_forward() {
        forward_extensions(sequence, gene.location.start, bound)?
    } else {
        reverse_extensions(sequence, gene.location.start, bound)?
    };
    debug!(
        "{}: {} upstream starts before bound {}",
        gene.identifier,
        starts.len(),
        bound
    );
    Ok(starts)
}

fn forward_extensions(sequence: &[u8], start: i64, bound: i64) -> Result<Vec<i64>, LynxError> {
    let mut starts = Vec::new();
    // 1-based position of the last base of the codon under inspection
    let mut end = start - 1;
    while end >= CODON_LENGTH {
        match classify_at(sequence, (end - CODON_LENGTH) as usize)? {
            Some(CodonClass::Start) => {
                starts.push(end - 2);
                if end <= bound - 1 {
                    break;
                }
            }
            Some(CodonClass::Stop) => break,
            _ => {}
        }
        end -= CODON_LENGTH;
    }
    Ok(starts)
}

fn reverse_extensions(sequence: &[u8], start: i64, bound: i64) -> Result<Vec<i64>, LynxError> {
    let length = sequence.len() as i64;
    let mut starts = Vec::new();
    // 0-based index of the lowest base of the codon under inspection
    let mut index = start;
    while index < length {
        match classify_reverse_at(sequence, index as usize)? {
            Some(CodonClass::Start) => {
                starts.push(index + CODON_LENGTH);
                if index >= bound - 1 {
                    break;
                }
            }
            Some(CodonClass::Stop) => break,
            _ => {}
        }
        index += CODON_LENGTH;
    }
    Ok(starts)
}
