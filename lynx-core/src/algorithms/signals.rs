use crate::interval::Location;
use crate::types::{Gene, Signal};

/// Keep signals that sit just outside a gene on their own strand.
///
/// A signal survives when its midpoint lies strictly inside no gene of the
/// same strand and closer than `proximity` to the start of at least one.
/// Forward survivors come first, then reverse survivors, each in input
/// order. Signals without a strand are dropped.
///
/// # Examples
///
/// ```rust
/// use lynx_core::algorithms::signals::filter_signals;
/// use lynx_core::interval::Location;
/// use lynx_core::types::{Gene, Origin, Terminator};
///
/// let genes = vec![Gene::new("g", Location::new(800, 1400).unwrap(), Origin::Predicted)];
/// let near = Terminator {
///     location: Location::new(700, 760).unwrap(),
///     confidence: 100,
///     hairpin_score: -12.0,
///     tail_score: -4.5,
/// };
/// let far = Terminator {
///     location: Location::new(480, 520).unwrap(),
///     ..near.clone()
/// };
///
/// let kept = filter_signals(&genes, &[near.clone(), far], 100);
/// assert_eq!(kept, vec![near]);
/// ```
pub fn filter_signals<S>(genes: &[Gene], signals: &[S], proximity: i64) -> Vec<S>
where
    S: Signal + Clone,
{
    let (forward_genes, reverse_genes): (Vec<&Gene>, Vec<&Gene>) =
        genes.iter().partition(|gene| gene.location.is_forward());

    let forward = signals
        .iter()
        .filter(|signal| signal.location().is_forward())
        .filter(|signal| survives(&signal.location(), &forward_genes, proximity));
    let reverse = signals
        .iter()
        .filter(|signal| signal.location().is_reverse())
        .filter(|signal| survives(&signal.location(), &reverse_genes, proximity));

    forward.chain(reverse).cloned().collect()
}

fn survives(location: &Location, genes: &[&Gene], proximity: i64) -> bool {
    let center = location.midpoint();
    let inside_gene = genes
        .iter()
        .any(|gene| gene.location.strictly_contains(center));
    let near_start = genes
        .iter()
        .any(|gene| (gene.location.start - center).abs() < proximity);
    !inside_gene && near_start
}
