//! BLAST XML report (`-outfmt 5`) parsing.
//!
//! Each `Iteration` is one query. Its `Iteration_query-def` carries the
//! batch identifier and location as `identifier:start-stop`. The best hit
//! of an iteration is the one whose best HSP has the lowest e-value.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::evidence::EvidenceMap;
use crate::interval::Location;
use crate::types::{Evidence, HitAnnotation, LynxError};

/// One query of a BLAST report.
#[derive(Debug, Clone, PartialEq)]
pub struct BlastIteration {
    pub identifier: String,
    pub location: Option<Location>,
    pub evidence: Evidence,
}

pub fn read_blast_xml<P: AsRef<Path>>(path: P) -> Result<EvidenceMap, LynxError> {
    let text = std::fs::read_to_string(path)?;
    parse_blast_evidence(&text)
}

/// Evidence per query identifier. Later iterations for the same query win.
pub fn parse_blast_evidence(xml: &str) -> Result<EvidenceMap, LynxError> {
    Ok(parse_blast_xml(xml)?
        .into_iter()
        .map(|iteration| (iteration.identifier, iteration.evidence))
        .collect())
}

pub fn parse_blast_xml(xml: &str) -> Result<Vec<BlastIteration>, LynxError> {
    let parsed: BlastOutputXml = quick_xml::de::from_str(xml)
        .map_err(|e| LynxError::XmlError(format!("Malformed BLAST XML: {e}")))?;
    let title_pattern = Regex::new(r"([^\[]+)\[([^\]]+)")?;

    parsed
        .iterations
        .map(|iterations| iterations.iterations)
        .unwrap_or_default()
        .iter()
        .map(|iteration| convert_iteration(iteration, &title_pattern))
        .collect()
}

fn convert_iteration(
    iteration: &IterationXml,
    title_pattern: &Regex,
) -> Result<BlastIteration, LynxError> {
    let query = iteration
        .query_def
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| LynxError::XmlError("Iteration without Iteration_query-def".to_string()))?;
    let (identifier, location) = split_query(query)?;

    let hits = iteration
        .hits
        .as_ref()
        .map(|hits| hits.hits.as_slice())
        .unwrap_or_default();

    let mut best: Option<(f64, HitAnnotation)> = None;
    for hit in hits {
        let Some((e_value, annotation)) = convert_hit(hit, title_pattern)? else {
            continue;
        };
        if best.as_ref().is_none_or(|(current, _)| e_value < *current) {
            best = Some((e_value, annotation));
        }
    }

    let evidence = match best {
        Some((e_value, mut annotation)) => {
            annotation.num_hits = hits.len();
            Evidence {
                e_value,
                annotation,
            }
        }
        None => Evidence::none(),
    };

    Ok(BlastIteration {
        identifier,
        location,
        evidence,
    })
}

/// Split `identifier:start-stop`. Queries without a location keep the
/// whole definition as identifier.
fn split_query(query: &str) -> Result<(String, Option<Location>), LynxError> {
    let Some((identifier, coordinates)) = query.rsplit_once(':') else {
        return Ok((query.to_string(), None));
    };
    let Some((start, stop)) = coordinates.split_once('-') else {
        return Ok((query.to_string(), None));
    };
    let parse = |value: &str| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| LynxError::ParseError(format!("query location {query:?}: {e}")))
    };
    let location = Location::new(parse(start)?, parse(stop)?)?;
    Ok((identifier.to_string(), Some(location)))
}

fn convert_hit(
    hit: &HitXml,
    title_pattern: &Regex,
) -> Result<Option<(f64, HitAnnotation)>, LynxError> {
    let hsps = hit
        .hsps
        .as_ref()
        .map(|hsps| hsps.hsps.as_slice())
        .unwrap_or_default();

    let mut best: Option<(f64, &HspXml)> = None;
    for hsp in hsps {
        let e_value = parse_number(hsp.evalue.as_deref(), "Hsp_evalue")?.unwrap_or(f64::INFINITY);
        if best.is_none_or(|(current, _)| e_value < current) {
            best = Some((e_value, hsp));
        }
    }
    let Some((e_value, hsp)) = best else {
        return Ok(None);
    };

    let definition = hit.definition.as_deref().unwrap_or("").trim();
    let (title, organism) = match title_pattern.captures(definition) {
        Some(captures) => (
            captures[1].trim().to_string(),
            Some(captures[2].trim().to_string()),
        ),
        None => (definition.to_string(), None),
    };

    let annotation = HitAnnotation {
        hit_id: hit.id.as_deref().map(|id| id.trim().to_string()),
        title: Some(title).filter(|title| !title.is_empty()),
        organism,
        bit_score: parse_number(hsp.bit_score.as_deref(), "Hsp_bit-score")?.unwrap_or(0.0),
        identity: parse_number(hsp.identity.as_deref(), "Hsp_identity")?.unwrap_or(0.0),
        alignment_length: parse_number(hsp.align_len.as_deref(), "Hsp_align-len")?
            .map(|length| length as u32)
            .unwrap_or(0),
        num_hits: 0,
    };
    Ok(Some((e_value, annotation)))
}

fn parse_number(value: Option<&str>, field: &str) -> Result<Option<f64>, LynxError> {
    value
        .map(|text| {
            text.trim()
                .parse::<f64>()
                .map_err(|e| LynxError::XmlError(format!("{field} {text:?}: {e}")))
        })
        .transpose()
}

#[derive(Debug, Deserialize)]
#[serde(rename = "BlastOutput")]
struct BlastOutputXml {
    #[serde(rename = "BlastOutput_iterations")]
    iterations: Option<IterationsXml>,
}

#[derive(Debug, Deserialize)]
struct IterationsXml {
    #[serde(rename = "Iteration", default)]
    iterations: Vec<IterationXml>,
}

#[derive(Debug, Deserialize)]
struct IterationXml {
    #[serde(rename = "Iteration_query-def")]
    query_def: Option<String>,
    #[serde(rename = "Iteration_hits")]
    hits: Option<HitsXml>,
}

#[derive(Debug, Deserialize)]
struct HitsXml {
    #[serde(rename = "Hit", default)]
    hits: Vec<HitXml>,
}

#[derive(Debug, Deserialize)]
struct HitXml {
    #[serde(rename = "Hit_id")]
    id: Option<String>,
    #[serde(rename = "Hit_def")]
    definition: Option<String>,
    #[serde(rename = "Hit_hsps")]
    hsps: Option<HspsXml>,
}

#[derive(Debug, Deserialize)]
struct HspsXml {
    #[serde(rename = "Hsp", default)]
    hsps: Vec<HspXml>,
}

#[derive(Debug, Deserialize)]
struct HspXml {
    #[serde(rename = "Hsp_bit-score")]
    bit_score: Option<String>,
    #[serde(rename = "Hsp_evalue")]
    evalue: Option<String>,
    #[serde(rename = "Hsp_identity")]
    identity: Option<String>,
    #[serde(rename = "Hsp_align-len")]
    align_len: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0"?>
<!DOCTYPE BlastOutput PUBLIC "-//NCBI//NCBI BlastOutput/EN" "http://www.ncbi.nlm.nih.gov/dtd/NCBI_BlastOutput.dtd">
<BlastOutput>
  <BlastOutput_program>blastp</BlastOutput_program>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_iter-num>1</Iteration_iter-num>
      <Iteration_query-def>chr~1:301-1200</Iteration_query-def>
      <Iteration_hits>
        <Hit>
          <Hit_num>1</Hit_num>
          <Hit_id>gi|15646|ref|NP_001.1|</Hit_id>
          <Hit_def>DNA polymerase III subunit beta [Escherichia coli K-12]</Hit_def>
          <Hit_hsps>
            <Hsp>
              <Hsp_num>1</Hsp_num>
              <Hsp_bit-score>410.2</Hsp_bit-score>
              <Hsp_evalue>1.5e-80</Hsp_evalue>
              <Hsp_identity>280</Hsp_identity>
              <Hsp_align-len>299</Hsp_align-len>
            </Hsp>
          </Hit_hsps>
        </Hit>
        <Hit>
          <Hit_num>2</Hit_num>
          <Hit_id>gi|99|ref|NP_002.1|</Hit_id>
          <Hit_def>hypothetical protein</Hit_def>
          <Hit_hsps>
            <Hsp>
              <Hsp_bit-score>30.1</Hsp_bit-score>
              <Hsp_evalue>0.02</Hsp_evalue>
              <Hsp_identity>20</Hsp_identity>
              <Hsp_align-len>60</Hsp_align-len>
            </Hsp>
          </Hit_hsps>
        </Hit>
      </Iteration_hits>
    </Iteration>
    <Iteration>
      <Iteration_iter-num>2</Iteration_iter-num>
      <Iteration_query-def>chr~2:900-601</Iteration_query-def>
      <Iteration_hits>
      </Iteration_hits>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>
"#;

    #[test]
    fn test_parse_best_hit() {
        let iterations = parse_blast_xml(REPORT).unwrap();
        assert_eq!(iterations.len(), 2);

        let first = &iterations[0];
        assert_eq!(first.identifier, "chr~1");
        assert_eq!(first.location, Some(Location { start: 301, stop: 1200 }));
        assert_eq!(first.evidence.e_value, 1.5e-80);

        let annotation = &first.evidence.annotation;
        assert_eq!(annotation.title.as_deref(), Some("DNA polymerase III subunit beta"));
        assert_eq!(annotation.organism.as_deref(), Some("Escherichia coli K-12"));
        assert_eq!(annotation.hit_id.as_deref(), Some("gi|15646|ref|NP_001.1|"));
        assert_eq!(annotation.bit_score, 410.2);
        assert_eq!(annotation.alignment_length, 299);
        assert_eq!(annotation.num_hits, 2);
    }

    #[test]
    fn test_query_without_hits_has_no_evidence() {
        let evidence = parse_blast_evidence(REPORT).unwrap();
        let second = &evidence["chr~2"];
        assert!(!second.has_hit());
        assert_eq!(second.annotation.num_hits, 0);
    }

    #[test]
    fn test_title_without_organism() {
        let pattern = Regex::new(r"([^\[]+)\[([^\]]+)").unwrap();
        let hit = HitXml {
            id: None,
            definition: Some("hypothetical protein".to_string()),
            hsps: Some(HspsXml {
                hsps: vec![HspXml {
                    bit_score: None,
                    evalue: Some("1e-5".to_string()),
                    identity: None,
                    align_len: None,
                }],
            }),
        };
        let (e_value, annotation) = convert_hit(&hit, &pattern).unwrap().unwrap();
        assert_eq!(e_value, 1e-5);
        assert_eq!(annotation.title.as_deref(), Some("hypothetical protein"));
        assert_eq!(annotation.organism, None);
    }

    #[test]
    fn test_split_query_without_location() {
        let (identifier, location) = split_query("contig_7").unwrap();
        assert_eq!(identifier, "contig_7");
        assert_eq!(location, None);
    }

    #[test]
    fn test_malformed_xml_is_reported() {
        let result = parse_blast_xml("<BlastOutput><BlastOutput_iterations>");
        assert!(matches!(result, Err(LynxError::XmlError(_))));
    }

    #[test]
    fn test_read_blast_xml_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), REPORT).unwrap();
        let evidence = read_blast_xml(file.path()).unwrap();
        assert_eq!(evidence.len(), 2);
    }
}
