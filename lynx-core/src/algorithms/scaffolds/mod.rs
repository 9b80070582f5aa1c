//! Same-strand gene runs and the conflicts between them.
//!
//! Genes within the scaffolding distance of each other on one strand form a
//! scaffold. Forward and reverse scaffolds that overlap are then trimmed of
//! intergenic genes until they no longer collide.

pub mod conflicts;
pub mod extraction;

pub use conflicts::*;
pub use extraction::*;

use crate::interval::Span;
use crate::types::Gene;

/// A run of neighbouring genes on one strand.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaffold {
    pub span: Span,
    /// Members ordered by midpoint
    pub genes: Vec<Gene>,
}

impl Scaffold {
    pub fn from_gene(gene: Gene) -> Self {
        Self {
            span: gene.location.span(),
            genes: vec![gene],
        }
    }

    /// Whether any member came from somewhere other than the intergenic search.
    pub fn has_predicted(&self) -> bool {
        self.genes.iter().any(|gene| !gene.origin.is_removable())
    }

    pub fn midpoint(&self) -> i64 {
        self.span.midpoint()
    }

    pub fn length(&self) -> i64 {
        self.span.length()
    }

    /// Shrink or grow the span to exactly cover the members.
    fn refit(&mut self) {
        let mut spans = self.genes.iter().map(|gene| gene.location.span());
        if let Some(mut span) = spans.next() {
            for other in spans {
                span.cover(&other);
            }
            self.span = span;
        }
    }

    pub fn identifiers(&self) -> String {
        self.genes
            .iter()
            .map(|gene| gene.identifier.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Scaffolds of both strands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrandScaffolds {
    pub forward: Vec<Scaffold>,
    pub reverse: Vec<Scaffold>,
}

impl StrandScaffolds {
    /// Members of forward scaffolds followed by members of reverse scaffolds.
    pub fn into_genes(self) -> Vec<Gene> {
        self.forward
            .into_iter()
            .chain(self.reverse)
            .flat_map(|scaffold| scaffold.genes)
            .collect()
    }
}

/// Genes left after scaffold conflicts were resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RefinedGenes {
    pub genes: Vec<Gene>,
    pub unresolved: Vec<UnresolvedConflict>,
}

/// Build scaffolds, resolve their conflicts and flatten the survivors.
pub fn refine_scaffolds(
    genes: Vec<Gene>,
    scaffolding_distance: i64,
    overlap_tolerance: i64,
) -> RefinedGenes {
    let scaffolds = extract_scaffolds(genes, scaffolding_distance);
    let resolution = filter_scaffolds(scaffolds, overlap_tolerance);
    RefinedGenes {
        genes: resolution.scaffolds.into_genes(),
        unresolved: resolution.unresolved,
    }
}
