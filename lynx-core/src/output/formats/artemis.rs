use std::io::Write;

use crate::constants::{LINE_WIDTH, PROMOTER_COLOUR};
use crate::interval::Location;
use crate::results::AnnotationResults;
use crate::sequence::Genome;
use crate::types::LynxError;

/// Qualifiers start one column after the feature key field
const QUALIFIER_INDENT: &str = "                            ";

/// Write results as an Artemis feature table followed by the genome.
///
/// Features are grouped by kind: promoter boxes, terminators, tRNA genes and
/// finally coding sequences.
pub fn write_artemis_format<W: Write>(
    writer: &mut W,
    results: &AnnotationResults,
    genome: &Genome,
) -> Result<(), LynxError> {
    for promoter in &results.promoters {
        let boxes = [
            ("-10_signal", promoter.minus_10),
            ("-35_signal", promoter.minus_35),
        ];
        for (key, location) in boxes {
            write_feature(writer, key, &location)?;
            writeln!(
                writer,
                "{}/note=Promoter Position:{}\tScore:{}",
                QUALIFIER_INDENT, promoter.position, promoter.score
            )?;
            writeln!(writer, "{}/colour={}", QUALIFIER_INDENT, PROMOTER_COLOUR)?;
        }
    }

    for terminator in &results.terminators {
        write_feature(writer, "terminator", &terminator.location)?;
        writeln!(
            writer,
            "{}/note=\"confidence:{}\thp_score:{}\ttail_score:{}\"",
            QUALIFIER_INDENT,
            terminator.confidence,
            terminator.hairpin_score,
            terminator.tail_score
        )?;
    }

    for transfer_rna in &results.transfer_rnas {
        write_feature(writer, "gene", &transfer_rna.location)?;
        writeln!(
            writer,
            "{}/note=\"type:{}\tanti codon:{}\tcove_score:{}\"",
            QUALIFIER_INDENT,
            transfer_rna.kind,
            transfer_rna.anti_codon,
            transfer_rna.cove_score
        )?;
    }

    for gene in &results.genes {
        write_feature(writer, "CDS", &gene.location)?;
        writeln!(
            writer,
            "{}/gene=\"{}\"",
            QUALIFIER_INDENT,
            gene.title().unwrap_or(gene.identifier.as_str())
        )?;
        if !gene.origin.note().is_empty() {
            writeln!(writer, "{}/note=\"{}\"", QUALIFIER_INDENT, gene.origin.note())?;
        }
        writeln!(writer, "{}/colour={}", QUALIFIER_INDENT, gene.origin.colour())?;
    }

    write!(writer, "\nORIGIN\n\n")?;
    for line in genome.sequence.chunks(LINE_WIDTH) {
        writer.write_all(line)?;
        writeln!(writer)?;
    }
    Ok(())
}

fn write_feature<W: Write>(
    writer: &mut W,
    key: &str,
    location: &Location,
) -> Result<(), LynxError> {
    if location.is_forward() {
        writeln!(writer, "     {:<23}{}..{}", key, location.low(), location.high())?;
    } else {
        writeln!(
            writer,
            "     {:<23}complement({}..{})",
            key,
            location.low(),
            location.high()
        )?;
    }
    Ok(())
}
