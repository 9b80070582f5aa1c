use std::io::Write;

use bio::bio_types::strand::Strand;

use crate::constants::{SOURCE_NAME, VERSION};
use crate::interval::Location;
use crate::results::AnnotationResults;
use crate::types::LynxError;

struct FeatureLine {
    kind: &'static str,
    location: Location,
    score: String,
    phase: &'static str,
    attributes: String,
}

/// Write results in GFF3 format, features sorted by their left end.
pub fn write_gff_format<W: Write>(
    writer: &mut W,
    results: &AnnotationResults,
) -> Result<(), LynxError> {
    let name = escape(&results.sequence_info.name);
    writeln!(writer, "##gff-version 3")?;
    writeln!(
        writer,
        "##sequence-region {} 1 {}",
        name, results.sequence_info.length
    )?;
    writeln!(
        writer,
        "# Annotation: version={}.v{};gc_cont={:.2};genes={}",
        SOURCE_NAME,
        VERSION,
        results.sequence_info.gc_content * 100.0,
        results.sequence_info.num_genes
    )?;

    let mut features = Vec::new();
    for (index, promoter) in results.promoters.iter().enumerate() {
        features.push(FeatureLine {
            kind: "promoter",
            location: promoter.location,
            score: promoter.score.to_string(),
            phase: ".",
            attributes: format!("ID=promoter_{};position={}", index + 1, promoter.position),
        });
    }
    for (index, terminator) in results.terminators.iter().enumerate() {
        features.push(FeatureLine {
            kind: "terminator",
            location: terminator.location,
            score: terminator.confidence.to_string(),
            phase: ".",
            attributes: format!(
                "ID=terminator_{};hairpin_score={};tail_score={}",
                index + 1,
                terminator.hairpin_score,
                terminator.tail_score
            ),
        });
    }
    for (index, transfer_rna) in results.transfer_rnas.iter().enumerate() {
        features.push(FeatureLine {
            kind: "tRNA",
            location: transfer_rna.location,
            score: transfer_rna.cove_score.to_string(),
            phase: ".",
            attributes: format!(
                "ID=trna_{};product=tRNA-{};anticodon={}",
                index + 1,
                escape(&transfer_rna.kind),
                escape(&transfer_rna.anti_codon)
            ),
        });
    }
    for gene in &results.genes {
        let score = if gene.evidence.has_hit() {
            format!("{:.3e}", gene.e_value())
        } else {
            ".".to_string()
        };
        let mut attributes = format!("ID={};origin={}", escape(&gene.identifier), gene.origin);
        if let Some(title) = gene.title() {
            attributes.push_str(&format!(";product={}", escape(title)));
        }
        if let Some(organism) = &gene.evidence.annotation.organism {
            attributes.push_str(&format!(";organism={}", escape(organism)));
        }
        features.push(FeatureLine {
            kind: "CDS",
            location: gene.location,
            score,
            phase: "0",
            attributes,
        });
    }
    features.sort_by_key(|feature| feature.location.low());

    for feature in &features {
        let strand = match feature.location.strand() {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unknown => '.',
        };
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            name,
            SOURCE_NAME,
            feature.kind,
            feature.location.low(),
            feature.location.high(),
            feature.score,
            strand,
            feature.phase,
            feature.attributes
        )?;
    }
    Ok(())
}

/// Percent-encode the characters GFF3 reserves in columns and attributes.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            ';' => escaped.push_str("%3B"),
            '=' => escaped.push_str("%3D"),
            '&' => escaped.push_str("%26"),
            ',' => escaped.push_str("%2C"),
            '%' => escaped.push_str("%25"),
            '\t' => escaped.push_str("%09"),
            '\n' => escaped.push_str("%0A"),
            '\r' => escaped.push_str("%0D"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::create_test_results;

    fn render() -> String {
        let mut buffer = Vec::new();
        write_gff_format(&mut buffer, &create_test_results()).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_gff_header() {
        let output = render();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "##gff-version 3");
        assert_eq!(lines[1], "##sequence-region test_genome 1 120");
        assert!(lines[2].starts_with("# Annotation: version=lynx.v"));
        assert!(lines[2].ends_with(";gc_cont=50.00;genes=2"));
    }

    #[test]
    fn test_gff_features_sorted_by_position() {
        let output = render();
        let kinds: Vec<&str> = output
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.split('\t').nth(2).unwrap())
            .collect();

        assert_eq!(kinds, vec!["promoter", "CDS", "terminator", "CDS", "tRNA"]);
    }

    #[test]
    fn test_gff_gene_entries() {
        let output = render();

        assert!(output.contains(
            "test_genome\tlynx\tCDS\t10\t60\t1.000e-30\t+\t0\tID=test_genome~1;origin=Predicted;product=hypothetical protein;organism=Escherichia coli\n"
        ));
        assert!(output.contains(
            "test_genome\tlynx\tCDS\t71\t110\t.\t-\t0\tID=test_genome~2~4;origin=Extended\n"
        ));
        assert!(output.contains(
            "test_genome\tlynx\tterminator\t62\t70\t93\t-\t.\tID=terminator_1;hairpin_score=-11.5;tail_score=-3.25\n"
        ));
    }

    #[test]
    fn test_gff_escapes_reserved_characters() {
        assert_eq!(escape("a;b=c,d"), "a%3Bb%3Dc%2Cd");
        assert_eq!(escape("50% GC"), "50%25 GC");
        assert_eq!(escape("plain"), "plain");
    }
}
