//! TransTermHP terminator reports and the gene coordinate files it reads.
//!
//! Terminators are reported on `TERM` lines:
//!
//! ```text
//!   TERM 1         4342 - 4366     +      F    93 -11.5 -3.00373 | opp_overlap 4342
//! ```
//!
//! The two coordinates are given in reading direction, so reverse strand
//! terminators have the higher coordinate first.

use std::io::Write;

use log::warn;
use regex::Regex;

use crate::external::parse_field;
use crate::interval::Location;
use crate::types::{Gene, LynxError, Terminator};

/// Terminators of a report, in report order.
pub fn parse_transterm(report: &str) -> Result<Vec<Terminator>, LynxError> {
    let term_pattern = Regex::new(
        r"\s+TERM\s+\d+\s+(\d+)\s+-\s+(\d+)\s+[+-]\s+\S+\s+(\d+)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)",
    )?;
    let mut terminators = Vec::new();

    for captures in term_pattern.captures_iter(report) {
        let start = parse_field(&captures[1], "terminator start")?;
        let stop = parse_field(&captures[2], "terminator stop")?;
        let location = match Location::new(start, stop) {
            Ok(location) => location,
            Err(error) => {
                warn!("Skipping terminator: {}", error);
                continue;
            }
        };
        terminators.push(Terminator {
            location,
            confidence: parse_field(&captures[3], "confidence")?,
            hairpin_score: parse_field(&captures[4], "hairpin score")?,
            tail_score: parse_field(&captures[5], "tail score")?,
        });
    }

    Ok(terminators)
}

/// Write genes as a TransTermHP coordinate file.
///
/// One `gene<TAB>start<TAB>stop<TAB>sequence` line per gene.
pub fn write_coordinates<W: Write>(
    writer: &mut W,
    sequence_name: &str,
    genes: &[Gene],
) -> Result<(), LynxError> {
    for gene in genes {
        writeln!(
            writer,
            "gene\t{}\t{}\t{}",
            gene.location.start, gene.location.stop, sequence_name
        )?;
    }
    Ok(())
}
