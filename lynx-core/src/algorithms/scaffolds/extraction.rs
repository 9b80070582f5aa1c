use crate::algorithms::scaffolds::{Scaffold, StrandScaffolds};
use crate::types::Gene;

/// Group genes into scaffolds, one strand at a time.
///
/// Each gene starts a scaffold of its own, which then absorbs every existing
/// scaffold whose start lies within `scaffolding_distance` of its stop or
/// whose stop lies within that distance of its start. Absorbing restarts the
/// search from the first scaffold until nothing more merges; the result is
/// appended after the untouched scaffolds. Members end up ordered by
/// midpoint, with input order breaking ties.
///
/// # Examples
///
/// ```rust
/// use lynx_core::algorithms::scaffolds::extract_scaffolds;
/// use lynx_core::interval::Location;
/// use lynx_core::types::{Gene, Origin};
///
/// let genes = vec![
///     Gene::new("a", Location::new(1, 30).unwrap(), Origin::Predicted),
///     Gene::new("b", Location::new(40, 70).unwrap(), Origin::Predicted),
/// ];
/// assert_eq!(extract_scaffolds(genes.clone(), 15).forward.len(), 1);
/// assert_eq!(extract_scaffolds(genes, 5).forward.len(), 2);
/// ```
pub fn extract_scaffolds<I>(genes: I, scaffolding_distance: i64) -> StrandScaffolds
where
    I: IntoIterator<Item = Gene>,
{
    let mut scaffolds = StrandScaffolds::default();

    for gene in genes {
        let strand = if gene.location.is_forward() {
            &mut scaffolds.forward
        } else {
            &mut scaffolds.reverse
        };

        let mut scaffold = Scaffold::from_gene(gene);
        while let Some(index) = strand
            .iter()
            .position(|existing| within_reach(&scaffold, existing, scaffolding_distance))
        {
            let existing = strand.remove(index);
            scaffold.span.cover(&existing.span);
            scaffold.genes.extend(existing.genes);
        }
        strand.push(scaffold);
    }

    for scaffold in scaffolds.forward.iter_mut().chain(scaffolds.reverse.iter_mut()) {
        scaffold.genes.sort_by_key(|gene| gene.location.midpoint());
    }

    scaffolds
}

fn within_reach(scaffold: &Scaffold, existing: &Scaffold, distance: i64) -> bool {
    (scaffold.span.stop - existing.span.start).abs() < distance
        || (scaffold.span.start - existing.span.stop).abs() < distance
}
