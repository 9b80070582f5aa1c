use std::collections::HashMap;

use log::debug;

use crate::algorithms::extension::StopBounds;
use crate::config::AnnotationConfig;
use crate::types::{Gene, Origin};

/// Thresholds used when comparing an extension with the current best gene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    /// Candidates closer than this to the bound are judged on length
    pub gap_threshold: i64,
    /// E-values closer than this are treated as equal
    pub tie_tolerance: f64,
}

impl From<&AnnotationConfig> for ResolverSettings {
    fn from(config: &AnnotationConfig) -> Self {
        Self {
            gap_threshold: config.extension_gap_threshold,
            tie_tolerance: config.evalue_tie_tolerance,
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from(&AnnotationConfig::default())
    }
}

/// Identifier of the gene a candidate was derived from.
///
/// Candidates are named `parent~N`; anything without a numeric suffix has
/// no parent.
pub fn parent_identifier(identifier: &str) -> Option<&str> {
    let (parent, suffix) = identifier.rsplit_once('~')?;
    suffix.parse::<u64>().ok().map(|_| parent)
}

/// Replace genes with their best scored extension.
///
/// `candidates` are the scored extensions, named after the gene they extend.
/// Genes keep their input order. A gene is replaced only when a candidate
/// beats it, and the replacement keeps the candidate identifier with an
/// [`Origin::Extended`] tag.
pub fn apply_extensions(
    genome_length: i64,
    genes: &[Gene],
    candidates: &[Gene],
    settings: &ResolverSettings,
) -> Vec<Gene> {
    let bounds = StopBounds::from_genes(genes, genome_length);

    let mut by_parent: HashMap<&str, Vec<&Gene>> = HashMap::new();
    for candidate in candidates {
        if let Some(parent) = parent_identifier(&candidate.identifier) {
            by_parent.entry(parent).or_default().push(candidate);
        }
    }

    genes
        .iter()
        .map(|gene| {
            let Some(options) = by_parent.get(gene.identifier.as_str()) else {
                return gene.clone();
            };
            let bound = bounds.bound_for(&gene.location);
            let best = options.iter().fold(gene, |current, candidate| {
                prefer(current, candidate, bound, settings)
            });

            if std::ptr::eq(best, gene) {
                gene.clone()
            } else {
                debug!(
                    "{} extended from {} to {}",
                    gene.identifier, gene.location, best.location
                );
                Gene {
                    origin: Origin::Extended,
                    ..best.clone()
                }
            }
        })
        .collect()
}

/// Pick between the current best gene and one candidate. Ties keep `current`.
fn prefer<'a>(
    current: &'a Gene,
    candidate: &'a Gene,
    bound: i64,
    settings: &ResolverSettings,
) -> &'a Gene {
    let gap = if candidate.location.is_forward() {
        candidate.location.start - bound
    } else {
        bound - candidate.location.start
    };

    if gap < 0 {
        let overshoot = |gene: &Gene| (gene.location.start - bound).abs();
        if overshoot(candidate) < overshoot(current) {
            candidate
        } else {
            current
        }
    } else if gap < settings.gap_threshold
        || scores_tied(current.e_value(), candidate.e_value(), settings.tie_tolerance)
    {
        if candidate.length() > current.length() {
            candidate
        } else {
            current
        }
    } else if candidate.e_value() < current.e_value() {
        candidate
    } else {
        current
    }
}

fn scores_tied(a: f64, b: f64, tolerance: f64) -> bool {
    let difference = a - b;
    difference.is_nan() || difference.abs() < tolerance
}
