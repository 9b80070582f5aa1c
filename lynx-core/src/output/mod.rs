//! Output formatting for annotation results.
//!
//! ## Supported Formats
//!
//! - **Artemis**: Feature table followed by the genome, readable by Artemis
//! - **GFF3**: General Feature Format version 3
//! - **Summary**: One tab-separated row per gene with its best hit
//!
//! ## Examples
//!
//! ```rust,no_run
//! use lynx_core::{Annotator, AnnotationConfig};
//! use lynx_core::config::OutputFormat;
//! use lynx_core::engine::Collaborators;
//! use lynx_core::external::OrfFilePredictor;
//! use lynx_core::output::write_results;
//! use lynx_core::sequence::read_genomes;
//! use std::fs::File;
//!
//! let genome = read_genomes("genome.fasta")?.remove(0);
//! let predictor = OrfFilePredictor::from_file("genome.orf")?;
//! let annotator = Annotator::new(AnnotationConfig::default(), Collaborators::new(predictor));
//! let results = annotator.annotate(&genome)?;
//!
//! let mut artemis = File::create("genome.art")?;
//! write_results(&mut artemis, &results, &genome, OutputFormat::Artemis)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;

use crate::config::OutputFormat;
use crate::results::AnnotationResults;
use crate::sequence::Genome;
use crate::types::LynxError;

mod formats {
    pub mod artemis;
    pub mod gff;
    pub mod summary;
}

pub use formats::artemis::write_artemis_format;
pub use formats::gff::write_gff_format;
pub use formats::summary::write_summary_format;

/// Writes annotation results in the specified format.
///
/// `genome` supplies the sequence block of the Artemis format and is
/// otherwise unused.
///
/// # Errors
///
/// Returns [`LynxError`] if writing fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    results: &AnnotationResults,
    genome: &Genome,
    format: OutputFormat,
) -> Result<(), LynxError> {
    match format {
        OutputFormat::Artemis => write_artemis_format(writer, results, genome),
        OutputFormat::Gff => write_gff_format(writer, results),
        OutputFormat::Summary => write_summary_format(writer, results),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::interval::Location;
    use crate::results::{AnnotationStatistics, SequenceInfo};
    use crate::types::{
        Evidence, Gene, HitAnnotation, Origin, Promoter, Terminator, TransferRna,
    };

    pub(crate) fn create_test_genome() -> Genome {
        Genome::new("test_genome", None, &b"ACGT".repeat(30)).unwrap()
    }

    pub(crate) fn create_test_results() -> AnnotationResults {
        let hit = Evidence {
            e_value: 1e-30,
            annotation: HitAnnotation {
                hit_id: Some("gi|16128008".to_string()),
                title: Some("hypothetical protein".to_string()),
                organism: Some("Escherichia coli".to_string()),
                bit_score: 120.5,
                identity: 0.9,
                alignment_length: 30,
                num_hits: 3,
            },
        };
        let genes = vec![
            Gene::new("test_genome~1", Location::new(10, 60).unwrap(), Origin::Predicted)
                .with_evidence(hit),
            Gene::new("test_genome~2~4", Location::new(110, 71).unwrap(), Origin::Extended),
        ];

        AnnotationResults {
            sequence_info: SequenceInfo {
                name: "test_genome".to_string(),
                description: None,
                length: 120,
                gc_content: 0.5,
                num_genes: genes.len(),
            },
            genes,
            promoters: vec![Promoter {
                location: Location::new(2, 9).unwrap(),
                position: 9,
                score: 2.5,
                minus_10: Location::new(6, 9).unwrap(),
                minus_35: Location::new(2, 4).unwrap(),
            }],
            terminators: vec![Terminator {
                location: Location::new(70, 62).unwrap(),
                confidence: 93,
                hairpin_score: -11.5,
                tail_score: -3.25,
            }],
            transfer_rnas: vec![TransferRna {
                location: Location::new(112, 118).unwrap(),
                kind: "Ala".to_string(),
                anti_codon: "TGC".to_string(),
                cove_score: 74.23,
            }],
            unresolved_conflicts: Vec::new(),
            statistics: AnnotationStatistics::default(),
        }
    }

    #[test]
    fn test_write_results_dispatches_on_format() {
        let results = create_test_results();
        let genome = create_test_genome();

        let mut artemis = Vec::new();
        write_results(&mut artemis, &results, &genome, OutputFormat::Artemis).unwrap();
        assert!(String::from_utf8(artemis).unwrap().contains("ORIGIN"));

        let mut gff = Vec::new();
        write_results(&mut gff, &results, &genome, OutputFormat::Gff).unwrap();
        assert!(String::from_utf8(gff).unwrap().starts_with("##gff-version 3\n"));

        let mut summary = Vec::new();
        write_results(&mut summary, &results, &genome, OutputFormat::Summary).unwrap();
        assert!(String::from_utf8(summary).unwrap().starts_with("identifier\t"));
    }
}
