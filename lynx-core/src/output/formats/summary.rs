use std::io::Write;

use crate::results::AnnotationResults;
use crate::types::LynxError;

const HEADER: &str = "identifier\tstart\tstop\tstrand\torigin\te_value\thit_id\ttitle\torganism";

/// Write one tab-separated row per gene. Missing values are written as `-`.
pub fn write_summary_format<W: Write>(
    writer: &mut W,
    results: &AnnotationResults,
) -> Result<(), LynxError> {
    writeln!(writer, "{}", HEADER)?;

    for gene in &results.genes {
        let annotation = &gene.evidence.annotation;
        let e_value = if gene.evidence.has_hit() {
            format!("{:e}", gene.e_value())
        } else {
            "-".to_string()
        };
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            gene.identifier,
            gene.location.start,
            gene.location.stop,
            if gene.is_forward() { '+' } else { '-' },
            gene.origin,
            e_value,
            field(annotation.hit_id.as_deref()),
            field(annotation.title.as_deref()),
            field(annotation.organism.as_deref()),
        )?;
    }
    Ok(())
}

fn field(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_string(), |text| text.replace('\t', " "))
}
