use log::{debug, warn};

use crate::algorithms::scaffolds::{Scaffold, StrandScaffolds};
use crate::interval::{Span, overlap_amount};
use crate::types::{Gene, LynxError};

/// Two scaffolds anchored by predicted genes that still overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedConflict {
    pub forward: Span,
    pub reverse: Span,
    pub overlap: i64,
    /// Comma-separated member identifiers
    pub forward_genes: String,
    pub reverse_genes: String,
}

impl UnresolvedConflict {
    pub fn to_error(&self) -> LynxError {
        LynxError::AmbiguousConflict {
            forward: self.forward_genes.clone(),
            reverse: self.reverse_genes.clone(),
        }
    }
}

/// Surviving scaffolds and the conflicts left standing between them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScaffoldResolution {
    pub scaffolds: StrandScaffolds,
    pub unresolved: Vec<UnresolvedConflict>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Reverse,
}

enum Outcome {
    Separated,
    ForwardDropped,
    ReverseDropped,
    Ambiguous(UnresolvedConflict),
}

/// Resolve overlaps between forward and reverse scaffolds.
///
/// Every forward scaffold is checked against every reverse scaffold still
/// standing, in order. While a pair overlaps by more than
/// `overlap_tolerance`, the shortest intergenic gene at the facing ends is
/// removed. Predicted and extended genes are never removed; a pair where
/// both sides hold such genes and nothing else can go is left as an
/// [`UnresolvedConflict`].
pub fn filter_scaffolds(scaffolds: StrandScaffolds, overlap_tolerance: i64) -> ScaffoldResolution {
    let mut forward: Vec<Option<Scaffold>> = scaffolds.forward.into_iter().map(Some).collect();
    let mut reverse: Vec<Option<Scaffold>> = scaffolds.reverse.into_iter().map(Some).collect();
    let mut unresolved = Vec::new();

    for forward_slot in forward.iter_mut() {
        for reverse_slot in reverse.iter_mut() {
            let (Some(forward_scaffold), Some(reverse_scaffold)) =
                (forward_slot.as_mut(), reverse_slot.as_mut())
            else {
                continue;
            };

            match separate(forward_scaffold, reverse_scaffold, overlap_tolerance) {
                Outcome::Separated => {}
                Outcome::ReverseDropped => *reverse_slot = None,
                Outcome::ForwardDropped => {
                    *forward_slot = None;
                    break;
                }
                Outcome::Ambiguous(conflict) => {
                    warn!(
                        "Unresolved overlap of {} bp between forward scaffold {} [{}] and reverse scaffold {} [{}]",
                        conflict.overlap,
                        conflict.forward,
                        conflict.forward_genes,
                        conflict.reverse,
                        conflict.reverse_genes
                    );
                    unresolved.push(conflict);
                }
            }
        }
    }

    ScaffoldResolution {
        scaffolds: StrandScaffolds {
            forward: forward.into_iter().flatten().collect(),
            reverse: reverse.into_iter().flatten().collect(),
        },
        unresolved,
    }
}

fn separate(forward: &mut Scaffold, reverse: &mut Scaffold, overlap_tolerance: i64) -> Outcome {
    loop {
        let overlap = match overlap_amount(&forward.span, &reverse.span) {
            Some(overlap) if overlap > overlap_tolerance => overlap,
            _ => return Outcome::Separated,
        };

        let forward_anchored = forward.has_predicted();
        let reverse_anchored = reverse.has_predicted();
        let forward_leads = forward.midpoint() < reverse.midpoint();
        let forward_last = forward.genes.len() - 1;
        let reverse_last = reverse.genes.len() - 1;

        // Members at the ends of the two scaffolds that face each other
        let facing = match (forward_leads, forward_anchored, reverse_anchored) {
            (true, true, false) => vec![(Side::Reverse, 0)],
            (true, false, true) => vec![(Side::Forward, forward_last)],
            (true, _, _) => vec![(Side::Forward, forward_last), (Side::Reverse, 0)],
            (false, true, false) => vec![(Side::Reverse, reverse_last)],
            (false, false, true) => vec![(Side::Forward, 0)],
            (false, _, _) => vec![(Side::Reverse, reverse_last), (Side::Forward, 0)],
        };

        let removal = facing
            .into_iter()
            .filter(|&(side, index)| member(forward, reverse, side, index).origin.is_removable())
            .min_by_key(|&(side, index)| member(forward, reverse, side, index).length());

        match removal {
            Some((Side::Forward, index)) => {
                let gene = forward.genes.remove(index);
                debug!("Removed {} from forward scaffold {}", gene.identifier, forward.span);
                if forward.genes.is_empty() {
                    return Outcome::ForwardDropped;
                }
                forward.refit();
            }
            Some((Side::Reverse, index)) => {
                let gene = reverse.genes.remove(index);
                debug!("Removed {} from reverse scaffold {}", gene.identifier, reverse.span);
                if reverse.genes.is_empty() {
                    return Outcome::ReverseDropped;
                }
                reverse.refit();
            }
            None if forward_anchored && reverse_anchored => {
                return Outcome::Ambiguous(UnresolvedConflict {
                    forward: forward.span,
                    reverse: reverse.span,
                    overlap,
                    forward_genes: forward.identifiers(),
                    reverse_genes: reverse.identifiers(),
                });
            }
            None => {
                return if forward.length() < reverse.length() {
                    debug!("Dropped forward scaffold {}", forward.span);
                    Outcome::ForwardDropped
                } else {
                    debug!("Dropped reverse scaffold {}", reverse.span);
                    Outcome::ReverseDropped
                };
            }
        }
    }
}

fn member<'a>(forward: &'a Scaffold, reverse: &'a Scaffold, side: Side, index: usize) -> &'a Gene {
    match side {
        Side::Forward => &forward.genes[index],
        Side::Reverse => &reverse.genes[index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::scaffolds::extract_scaffolds;
    use crate::interval::Location;
    use crate::types::Origin;

    fn create_test_gene(identifier: &str, start: i64, stop: i64, origin: Origin) -> Gene {
        Gene::new(identifier, Location::new(start, stop).unwrap(), origin)
    }

    fn identifiers(scaffolds: &[Scaffold]) -> Vec<String> {
        scaffolds.iter().map(Scaffold::identifiers).collect()
    }

    #[test]
    fn test_predicted_forward_beats_intergenic_reverse() {
        let scaffolds = extract_scaffolds(
            vec![
                create_test_gene("predicted", 10, 50, Origin::Predicted),
                create_test_gene("intergenic~1", 60, 30, Origin::IntergenicDerived),
            ],
            5,
        );
        let resolution = filter_scaffolds(scaffolds, 3);

        assert_eq!(identifiers(&resolution.scaffolds.forward), vec!["predicted"]);
        assert!(resolution.scaffolds.reverse.is_empty());
        assert!(resolution.unresolved.is_empty());
    }

    #[test]
    fn test_trims_intergenic_genes_until_separated() {
        let scaffolds = StrandScaffolds {
            forward: extract_scaffolds(
                vec![
                    create_test_gene("intergenic~1", 100, 300, Origin::IntergenicDerived),
                    create_test_gene("intergenic~2", 350, 600, Origin::IntergenicDerived),
                ],
                100,
            )
            .forward,
            reverse: extract_scaffolds(
                vec![create_test_gene("predicted", 900, 550, Origin::Predicted)],
                100,
            )
            .reverse,
        };
        let resolution = filter_scaffolds(scaffolds, 3);

        assert_eq!(identifiers(&resolution.scaffolds.forward), vec!["intergenic~1"]);
        assert_eq!(resolution.scaffolds.forward[0].span, Span::new(100, 300));
        assert_eq!(identifiers(&resolution.scaffolds.reverse), vec!["predicted"]);
    }

    #[test]
    fn test_shortest_intergenic_gene_goes_first() {
        let scaffolds = extract_scaffolds(
            vec![
                create_test_gene("intergenic~1", 100, 400, Origin::IntergenicDerived),
                create_test_gene("intergenic~2", 500, 380, Origin::IntergenicDerived),
            ],
            10,
        );
        let resolution = filter_scaffolds(scaffolds, 3);

        assert_eq!(identifiers(&resolution.scaffolds.forward), vec!["intergenic~1"]);
        assert!(resolution.scaffolds.reverse.is_empty());
    }

    #[test]
    fn test_small_overlap_is_tolerated() {
        let scaffolds = extract_scaffolds(
            vec![
                create_test_gene("forward", 100, 300, Origin::Predicted),
                create_test_gene("intergenic~1", 500, 297, Origin::IntergenicDerived),
            ],
            10,
        );
        let resolution = filter_scaffolds(scaffolds, 3);

        assert_eq!(resolution.scaffolds.forward.len(), 1);
        assert_eq!(resolution.scaffolds.reverse.len(), 1);
    }

    #[test]
    fn test_anchored_scaffolds_report_conflict() {
        let scaffolds = extract_scaffolds(
            vec![
                create_test_gene("forward", 100, 500, Origin::Predicted),
                create_test_gene("reverse", 800, 400, Origin::Extended),
            ],
            10,
        );
        let resolution = filter_scaffolds(scaffolds, 3);

        assert_eq!(resolution.scaffolds.forward.len(), 1);
        assert_eq!(resolution.scaffolds.reverse.len(), 1);
        assert_eq!(resolution.unresolved.len(), 1);

        let conflict = &resolution.unresolved[0];
        assert_eq!(conflict.overlap, 100);
        assert_eq!(conflict.forward_genes, "forward");
        assert_eq!(conflict.reverse_genes, "reverse");
        assert!(matches!(
            conflict.to_error(),
            LynxError::AmbiguousConflict { .. }
        ));
    }

    #[test]
    fn test_dropped_forward_scaffold_skips_remaining_pairs() {
        let scaffolds = extract_scaffolds(
            vec![
                create_test_gene("intergenic~1", 100, 300, Origin::IntergenicDerived),
                create_test_gene("left", 350, 200, Origin::Predicted),
                create_test_gene("right", 700, 290, Origin::Predicted),
            ],
            10,
        );
        assert_eq!(scaffolds.reverse.len(), 2);
        let resolution = filter_scaffolds(scaffolds, 3);

        assert!(resolution.scaffolds.forward.is_empty());
        assert_eq!(identifiers(&resolution.scaffolds.reverse), vec!["left", "right"]);
    }

    #[test]
    fn test_removal_on_trailing_side() {
        // The reverse scaffold sits to the left, so its last member faces
        // the forward scaffold
        let scaffolds = StrandScaffolds {
            forward: extract_scaffolds(
                vec![create_test_gene("predicted", 500, 900, Origin::Predicted)],
                100,
            )
            .forward,
            reverse: extract_scaffolds(
                vec![
                    create_test_gene("intergenic~1", 300, 100, Origin::IntergenicDerived),
                    create_test_gene("intergenic~2", 600, 350, Origin::IntergenicDerived),
                ],
                100,
            )
            .reverse,
        };
        let resolution = filter_scaffolds(scaffolds, 3);

        assert_eq!(identifiers(&resolution.scaffolds.reverse), vec!["intergenic~1"]);
        assert_eq!(resolution.scaffolds.reverse[0].span, Span::new(100, 300));
    }
}
