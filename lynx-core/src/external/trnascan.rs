//! tRNAscan-SE tabular output.
//!
//! ```text
//! Sequence   tRNA   Bounds   tRNA  Anti   Intron Bounds  Cove
//! Name       #      Begin    End   Type   Codon  Begin  End   Score
//! --------   ----   -----    ----  ----   -----  -----  ----  -----
//! genome     1      1234     1307  Ala    TGC    0      0     74.23
//! ```

use regex::Regex;

use crate::external::parse_field;
use crate::interval::Location;
use crate::types::{LynxError, TransferRna};

/// Transfer RNAs of a report. Header and malformed lines are ignored.
pub fn parse_trnascan(report: &str) -> Result<Vec<TransferRna>, LynxError> {
    let line_pattern = Regex::new(
        r"^.+\s+\d+\s+(\d+)\s+(\d+)\s+(\w+)\s+([ACTG?]+)\s+\d+\s+\d+\s+(\d*\.\d*)",
    )?;
    let mut transfer_rnas = Vec::new();

    for line in report.lines() {
        let Some(captures) = line_pattern.captures(line) else {
            continue;
        };
        let start = parse_field(&captures[1], "tRNA begin")?;
        let stop = parse_field(&captures[2], "tRNA end")?;
        transfer_rnas.push(TransferRna {
            location: Location::new(start, stop)?,
            kind: captures[3].to_string(),
            anti_codon: captures[4].to_string(),
            cove_score: parse_field(&captures[5], "cove score")?,
        });
    }

    Ok(transfer_rnas)
}
