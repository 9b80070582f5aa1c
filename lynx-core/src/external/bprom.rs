//! BPROM promoter reports.
//!
//! A report lists each promoter as three lines:
//!
//! ```text
//!  Promoter Pos:    807 LDF-  0.76
//!    -10 box at pos.    792 GGGTATAAT  Score    63
//!    -35 box at pos.    768 TTGTTT  Score    22
//! ```
//!
//! Each box spans `pos..pos + len(box)` and the promoter spans both boxes.

use regex::Regex;

use crate::external::parse_field;
use crate::interval::Location;
use crate::types::{LynxError, Promoter};

/// Promoters of a report, in report order.
///
/// Each promoter line opens a record that the `-10` and `-35` lines after
/// it complete. A promoter missing either box is ignored.
pub fn parse_bprom(report: &str) -> Result<Vec<Promoter>, LynxError> {
    let promoter_pattern = Regex::new(r"^\s*Promoter\s+Pos:\s+(\d+)\s+LDF-\s+(-?\d+\.?\d*)")?;
    let box_pattern =
        Regex::new(r"^\s*(-10|-35)\s+box\s+at\s+pos\.\s+(\d+)\s+([ACGT]+)\s+Score\s+-?\d+")?;

    let mut promoters = Vec::new();
    let mut pending: Option<PendingPromoter> = None;

    for line in report.lines() {
        if let Some(head) = promoter_pattern.captures(line) {
            if let Some(previous) = pending.take() {
                promoters.extend(previous.finish()?);
            }
            pending = Some(PendingPromoter {
                position: parse_field(&head[1], "promoter position")?,
                score: parse_field(&head[2], "promoter score")?,
                minus_10: None,
                minus_35: None,
            });
        } else if let Some(signal) = box_pattern.captures(line)
            && let Some(current) = pending.as_mut()
        {
            let location = signal_box(&signal[2], &signal[3])?;
            if &signal[1] == "-10" {
                current.minus_10 = Some(location);
            } else {
                current.minus_35 = Some(location);
            }
        }
    }
    if let Some(last) = pending {
        promoters.extend(last.finish()?);
    }

    Ok(promoters)
}

struct PendingPromoter {
    position: i64,
    score: f64,
    minus_10: Option<Location>,
    minus_35: Option<Location>,
}

impl PendingPromoter {
    fn finish(self) -> Result<Option<Promoter>, LynxError> {
        let (Some(minus_10), Some(minus_35)) = (self.minus_10, self.minus_35) else {
            return Ok(None);
        };
        let low = minus_10.low().min(minus_35.low());
        let high = minus_10.high().max(minus_35.high());

        Ok(Some(Promoter {
            location: Location::new(low, high)?,
            position: self.position,
            score: self.score,
            minus_10,
            minus_35,
        }))
    }
}

fn signal_box(position: &str, motif: &str) -> Result<Location, LynxError> {
    let start: i64 = parse_field(position, "box position")?;
    Location::new(start, start + motif.len() as i64)
}

/// Map a promoter found on the reverse complement back onto the genome.
pub fn reverse_promoter(genome_length: i64, promoter: &Promoter) -> Promoter {
    Promoter {
        location: promoter.location.mirrored(genome_length),
        position: genome_length + 1 - promoter.position,
        score: promoter.score,
        minus_10: promoter.minus_10.mirrored(genome_length),
        minus_35: promoter.minus_35.mirrored(genome_length),
    }
}
