//! Genes in the regions the predictor left empty.
//!
//! [`regions`] carves the predicted genes out of both strands. [`orfs`] scans
//! what is left for open reading frames. Once scored, ORFs sharing a stop
//! codon are reduced to one by [`remove_common_stops`].

pub mod orfs;
pub mod regions;

pub use orfs::*;
pub use regions::*;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::types::{Gene, Origin};

/// Keep one gene per stop coordinate and strand.
///
/// Within a group the lower e-value wins; when the difference is undefined
/// because neither gene has a hit, the longer gene wins. Earlier genes win
/// ties. Survivors are tagged [`Origin::IntergenicDerived`] and keep the
/// order in which their stop was first seen.
pub fn remove_common_stops(genes: Vec<Gene>) -> Vec<Gene> {
    let mut order = Vec::new();
    let mut best: HashMap<(bool, i64), Gene> = HashMap::new();

    for gene in genes {
        let key = (gene.location.is_forward(), gene.location.stop);
        match best.entry(key) {
            Entry::Vacant(entry) => {
                order.push(key);
                entry.insert(gene);
            }
            Entry::Occupied(mut entry) => {
                if replaces(entry.get(), &gene) {
                    entry.insert(gene);
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| best.remove(&key))
        .map(|gene| Gene {
            origin: Origin::IntergenicDerived,
            ..gene
        })
        .collect()
}

fn replaces(current: &Gene, challenger: &Gene) -> bool {
    if (current.e_value() - challenger.e_value()).is_nan() {
        challenger.length() > current.length()
    } else {
        challenger.e_value() < current.e_value()
    }
}
