use log::warn;

use crate::algorithms::intergenic::{OpenRegions, Region};
use crate::constants::{CODON_LENGTH, READING_FRAMES};
use crate::interval::Location;
use crate::sequence::{CodonClass, classify_at, reverse_complement};
use crate::types::LynxError;

/// An open reading frame on the scanned sequence, 0-based and half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenReadingFrame {
    pub start: i64,
    pub stop: i64,
}

impl OpenReadingFrame {
    pub fn length(&self) -> i64 {
        self.stop - self.start
    }

    /// Genome location of an ORF found on the forward strand.
    pub fn forward_location(&self) -> Location {
        Location {
            start: self.start + 1,
            stop: self.stop,
        }
    }

    /// Genome location of an ORF found on the reverse complement.
    pub fn reverse_location(&self, genome_length: i64) -> Location {
        Location {
            start: genome_length - self.start,
            stop: genome_length - self.stop + 1,
        }
    }
}

/// Scan one region for ORFs in all three frames.
///
/// Each frame is walked backwards from the top of the region, extended by the
/// inset into the gene above. The most recent stop codon pairs with every
/// start codon found below it. A frame is abandoned once a stop, or a start
/// closing an ORF, is met at or below the bottom of the region.
pub fn region_orfs(sequence: &[u8], region: &Region) -> Result<Vec<OpenReadingFrame>, LynxError> {
    let inset = region.stop_inset();
    let mut orfs = Vec::new();

    for frame in 0..READING_FRAMES {
        let mut pending_stop = None;
        // 1-based position of the last base of the codon under inspection
        let mut end = region.stop + frame + inset;
        while end > 0 {
            if end >= CODON_LENGTH {
                match classify_at(sequence, (end - CODON_LENGTH) as usize)? {
                    Some(CodonClass::Stop) => {
                        pending_stop = Some(end);
                        if end <= region.start {
                            break;
                        }
                    }
                    Some(CodonClass::Start) => {
                        if let Some(stop) = pending_stop
                            && end < region.stop
                        {
                            orfs.push(OpenReadingFrame {
                                start: end - CODON_LENGTH,
                                stop,
                            });
                            if end <= region.start {
                                break;
                            }
                        }
                    }
                    _ => {}
                }
            }
            end -= CODON_LENGTH;
        }
    }

    Ok(orfs)
}

/// ORFs longer than `min_length` across all regions of one sequence.
///
/// Fails on the first region holding an unreadable codon.
pub fn find_potential_genes(
    sequence: &[u8],
    regions: &[Region],
    min_length: i64,
) -> Result<Vec<OpenReadingFrame>, LynxError> {
    let mut orfs = Vec::new();
    for region in regions {
        orfs.extend(region_orfs(sequence, region)?);
    }
    orfs.retain(|orf| orf.length() > min_length);
    Ok(orfs)
}

/// Like [`find_potential_genes`], but a region holding an unreadable codon
/// is logged and skipped.
pub fn find_readable_potential_genes(
    sequence: &[u8],
    regions: &[Region],
    min_length: i64,
) -> Vec<OpenReadingFrame> {
    let mut orfs = Vec::new();
    for region in regions {
        match region_orfs(sequence, region) {
            Ok(found) => orfs.extend(found),
            Err(error) => warn!(
                "Skipping intergenic region {}..{}: {}",
                region.start, region.stop, error
            ),
        }
    }
    orfs.retain(|orf| orf.length() > min_length);
    orfs
}

/// ORFs of both strands as genome locations, forward strand first.
pub fn find_intergenic_orfs(
    sequence: &[u8],
    regions: &OpenRegions,
    min_length: i64,
) -> Result<Vec<Location>, LynxError> {
    let reverse_sequence = reverse_complement(sequence);
    let forward = find_potential_genes(sequence, &regions.forward, min_length)?;
    let reverse = find_potential_genes(&reverse_sequence, &regions.reverse, min_length)?;
    Ok(genome_locations(sequence.len() as i64, &forward, &reverse))
}

/// Like [`find_intergenic_orfs`], skipping regions with unreadable codons.
pub fn find_readable_intergenic_orfs(
    sequence: &[u8],
    regions: &OpenRegions,
    min_length: i64,
) -> Vec<Location> {
    let reverse_sequence = reverse_complement(sequence);
    let forward = find_readable_potential_genes(sequence, &regions.forward, min_length);
    let reverse = find_readable_potential_genes(&reverse_sequence, &regions.reverse, min_length);
    genome_locations(sequence.len() as i64, &forward, &reverse)
}

fn genome_locations(
    genome_length: i64,
    forward: &[OpenReadingFrame],
    reverse: &[OpenReadingFrame],
) -> Vec<Location> {
    forward
        .iter()
        .map(OpenReadingFrame::forward_location)
        .chain(reverse.iter().map(|orf| orf.reverse_location(genome_length)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::intergenic::open_regions;
    use crate::types::{Gene, Origin};

    fn create_test_sequence(codons: &[&str]) -> Vec<u8> {
        codons.concat().into_bytes()
    }

    /// Starts at codons 2 and 5 share the stop at codon 8.
    fn create_nested_orf_sequence() -> Vec<u8> {
        let mut codons = vec!["GCT"; 20];
        codons[2] = "ATG";
        codons[5] = "ATG";
        codons[8] = "TAA";
        create_test_sequence(&codons)
    }

    #[test]
    fn test_nested_starts_share_a_stop() {
        let sequence = create_nested_orf_sequence();
        let region = Region::whole(sequence.len() as i64);

        let orfs = find_potential_genes(&sequence, &[region], 10).unwrap();
        assert_eq!(
            orfs,
            vec![
                OpenReadingFrame { start: 15, stop: 27 },
                OpenReadingFrame { start: 6, stop: 27 },
            ]
        );
    }

    #[test]
    fn test_min_length_filters_orfs() {
        let sequence = create_nested_orf_sequence();
        let region = Region::whole(sequence.len() as i64);

        let orfs = find_potential_genes(&sequence, &[region], 12).unwrap();
        assert_eq!(orfs, vec![OpenReadingFrame { start: 6, stop: 27 }]);
    }

    #[test]
    fn test_start_without_downstream_stop_is_ignored() {
        let mut codons = vec!["GCT"; 20];
        codons[4] = "TAA";
        codons[10] = "ATG";
        let sequence = create_test_sequence(&codons);
        let region = Region::whole(sequence.len() as i64);

        let orfs = find_potential_genes(&sequence, &[region], 0).unwrap();
        assert!(orfs.is_empty());
    }

    #[test]
    fn test_walk_ends_at_region_start() {
        // The region covers codons 10..20; the stop at codon 4 sits below it
        // and closes the frame, so the start at codon 1 is never paired
        let mut codons = vec!["GCT"; 20];
        codons[1] = "ATG";
        codons[4] = "TAA";
        let sequence = create_test_sequence(&codons);
        let region = Region {
            start: 30,
            stop: 60,
            start_gene: None,
            stop_gene: None,
        };

        let orfs = region_orfs(&sequence, &region).unwrap();
        assert!(orfs.is_empty());
    }

    #[test]
    fn test_orf_may_start_below_region() {
        // A stop inside the region pairs with the first start below it
        let mut codons = vec!["GCT"; 20];
        codons[6] = "ATG";
        codons[2] = "ATG";
        codons[15] = "TAG";
        let sequence = create_test_sequence(&codons);
        let region = Region {
            start: 30,
            stop: 60,
            start_gene: None,
            stop_gene: None,
        };

        let orfs = region_orfs(&sequence, &region).unwrap();
        assert_eq!(orfs, vec![OpenReadingFrame { start: 18, stop: 48 }]);
    }

    #[test]
    fn test_reverse_strand_maps_back_to_genome() {
        let forward = create_nested_orf_sequence();
        let genome = reverse_complement(&forward);
        let length = genome.len() as i64;
        let regions = OpenRegions {
            forward: Vec::new(),
            reverse: vec![Region::whole(length)],
        };

        let locations = find_intergenic_orfs(&genome, &regions, 10).unwrap();
        assert_eq!(
            locations,
            vec![
                Location { start: 45, stop: 34 },
                Location { start: 54, stop: 34 },
            ]
        );
    }

    #[test]
    fn test_forward_location_is_one_based() {
        let orf = OpenReadingFrame { start: 6, stop: 24 };
        assert_eq!(orf.forward_location(), Location { start: 7, stop: 24 });
    }

    #[test]
    fn test_orfs_found_between_genes() {
        let mut codons = vec!["GCT"; 100];
        codons[40] = "ATG";
        codons[70] = "TGA";
        let sequence = create_test_sequence(&codons);
        let genes = vec![
            Gene::new("a", Location::new(1, 90).unwrap(), Origin::Predicted),
            Gene::new("b", Location::new(271, 300).unwrap(), Origin::Predicted),
        ];
        let regions = open_regions(300, &genes, 30);

        let locations = find_intergenic_orfs(&sequence, &regions, 30).unwrap();
        assert_eq!(locations, vec![Location { start: 121, stop: 213 }]);
    }

    #[test]
    fn test_unreadable_region_is_skipped() {
        let mut codons = vec!["GCT"; 40];
        codons[2] = "ATG";
        codons[5] = "ATG";
        codons[8] = "TAA";
        codons[30] = "GNT";
        let sequence = create_test_sequence(&codons);
        let readable = Region {
            start: 0,
            stop: 30,
            start_gene: None,
            stop_gene: None,
        };
        let unreadable = Region {
            start: 80,
            stop: 120,
            start_gene: None,
            stop_gene: None,
        };
        let regions = [readable, unreadable];

        assert!(matches!(
            find_potential_genes(&sequence, &regions, 10),
            Err(LynxError::UnknownCodon { .. })
        ));
        let orfs = find_readable_potential_genes(&sequence, &regions, 10);
        assert_eq!(
            orfs,
            vec![
                OpenReadingFrame { start: 15, stop: 27 },
                OpenReadingFrame { start: 6, stop: 27 },
            ]
        );
    }
}
