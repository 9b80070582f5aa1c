//! GeneMark `.orf` output.
//!
//! Only the FASTA headers matter. Each one names the ORF and ends with its
//! coordinates in reading direction:
//!
//! ```text
//! >orf_00003 ... , 4301 - 5720
//! ```

use std::path::Path;

use log::warn;
use regex::Regex;

use crate::external::parse_field;
use crate::interval::Location;
use crate::types::LynxError;

pub fn read_orf_file<P: AsRef<Path>>(path: P) -> Result<Vec<Location>, LynxError> {
    parse_orf_headers(&std::fs::read_to_string(path)?)
}

/// Locations of every ORF header, in file order.
///
/// Headers whose ends coincide are skipped. Intervals outside the genome are
/// kept here; the caller knows the genome length.
pub fn parse_orf_headers(text: &str) -> Result<Vec<Location>, LynxError> {
    let header_pattern = Regex::new(r">orf_(\d+).*, (\d+) - (\d+)")?;
    let mut locations = Vec::new();

    for line in text.lines().filter(|line| line.starts_with('>')) {
        let Some(captures) = header_pattern.captures(line) else {
            continue;
        };
        let start = parse_field(&captures[2], "ORF start")?;
        let stop = parse_field(&captures[3], "ORF stop")?;
        match Location::new(start, stop) {
            Ok(location) => locations.push(location),
            Err(error) => warn!("Skipping orf_{}: {}", &captures[1], error),
        }
    }

    Ok(locations)
}
