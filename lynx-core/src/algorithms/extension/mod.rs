//! Alternative upstream starts for predicted genes.
//!
//! [`finder`] enumerates in-frame start codons upstream of each gene, up to
//! the stop of the previous gene on the same strand. Once the candidates are
//! scored, [`resolver`] decides which one replaces the original start.

pub mod finder;
pub mod resolver;

pub use finder::*;
pub use resolver::*;

use crate::interval::Location;
use crate::types::Gene;

/// Stop coordinates of the genes on each strand, used to bound extensions.
///
/// The forward list holds the high end of every forward gene plus the
/// sentinel `1`; the reverse list holds the low end of every reverse gene
/// plus the sentinel `L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopBounds {
    forward: Vec<i64>,
    reverse: Vec<i64>,
    genome_length: i64,
}

impl StopBounds {
    pub fn from_genes<'a, I>(genes: I, genome_length: i64) -> Self
    where
        I: IntoIterator<Item = &'a Gene>,
    {
        let mut forward = vec![1];
        let mut reverse = vec![genome_length];
        for gene in genes {
            if gene.location.is_forward() {
                forward.push(gene.location.stop);
            } else {
                reverse.push(gene.location.stop);
            }
        }
        forward.sort_unstable();
        forward.dedup();
        reverse.sort_unstable();
        reverse.dedup();

        Self {
            forward,
            reverse,
            genome_length,
        }
    }

    /// Nearest same-strand stop upstream of `location.start`.
    ///
    /// Falls back to the sequence boundary when no stop lies upstream.
    pub fn bound_for(&self, location: &Location) -> i64 {
        if location.is_forward() {
            let index = self.forward.partition_point(|&stop| stop < location.start);
            if index == 0 {
                1
            } else {
                self.forward[index - 1]
            }
        } else {
            let index = self.reverse.partition_point(|&stop| stop <= location.start);
            self.reverse
                .get(index)
                .copied()
                .unwrap_or(self.genome_length)
        }
    }
}
