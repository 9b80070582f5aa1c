use log::debug;

use crate::types::{Gene, LynxError};

/// A stretch of one strand not covered by any gene.
///
/// Coordinates are 0-based and half-open on the scanned sequence. Reverse
/// regions live on the reverse complement of the genome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region<'a> {
    pub start: i64,
    pub stop: i64,
    /// Gene whose end bounds the region from below
    pub start_gene: Option<&'a Gene>,
    /// Gene whose start bounds the region from above
    pub stop_gene: Option<&'a Gene>,
}

impl<'a> Region<'a> {
    /// The whole sequence, bounded by nothing.
    pub fn whole(genome_length: i64) -> Self {
        Self {
            start: 0,
            stop: genome_length,
            start_gene: None,
            stop_gene: None,
        }
    }

    /// Half the length of the gene bounding the region from above.
    ///
    /// ORFs found in the region may run this far into that gene.
    pub fn stop_inset(&self) -> i64 {
        self.stop_gene.map_or(0, |gene| gene.length() / 2)
    }

    pub fn span_length(&self) -> i64 {
        self.stop - self.start
    }

    /// Span plus the inset into the gene above.
    pub fn effective_length(&self) -> i64 {
        self.span_length() + self.stop_inset()
    }

    /// The pieces of this region left after removing `bottom..top`.
    fn cut(self, bottom: i64, top: i64, gene: &'a Gene) -> Vec<Region<'a>> {
        let below = Region {
            stop: bottom,
            stop_gene: Some(gene),
            ..self
        };
        let above = Region {
            start: top,
            start_gene: Some(gene),
            ..self
        };

        if bottom < self.stop && self.stop <= top {
            vec![below]
        } else if bottom <= self.start && self.start < top {
            vec![above]
        } else if self.start < bottom && top < self.stop {
            vec![below, above]
        } else {
            vec![self]
        }
    }
}

/// Intergenic regions of both strands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenRegions<'a> {
    pub forward: Vec<Region<'a>>,
    pub reverse: Vec<Region<'a>>,
}

/// Carve every gene out of the genome and return what is left.
///
/// Genes are applied in input order. Reverse genes cut the reverse strand in
/// reverse-complement coordinates. After each gene, and once more at the
/// end, regions whose effective length does not exceed `min_length` are
/// dropped, as are regions left with no span at all.
///
/// # Examples
///
/// ```rust
/// use lynx_core::algorithms::intergenic::open_regions;
/// use lynx_core::interval::Location;
/// use lynx_core::types::{Gene, Origin};
///
/// let genes = vec![Gene::new("g", Location::new(401, 600).unwrap(), Origin::Predicted)];
/// let regions = open_regions(1000, &genes, 100);
///
/// assert_eq!(regions.forward.len(), 2);
/// assert_eq!((regions.forward[0].start, regions.forward[0].stop), (0, 401));
/// assert_eq!((regions.forward[1].start, regions.forward[1].stop), (600, 1000));
/// assert_eq!(regions.reverse.len(), 1);
/// ```
pub fn open_regions(genome_length: i64, genes: &[Gene], min_length: i64) -> OpenRegions<'_> {
    let mut forward = vec![Region::whole(genome_length)];
    let mut reverse = vec![Region::whole(genome_length)];

    for gene in genes {
        let (regions, bottom, top) = if gene.location.is_forward() {
            (&mut forward, gene.location.start, gene.location.stop)
        } else {
            (
                &mut reverse,
                genome_length - gene.location.start + 1,
                genome_length - gene.location.stop + 1,
            )
        };
        let cut: Vec<Region> = regions
            .drain(..)
            .flat_map(|region| region.cut(bottom, top, gene))
            .collect();
        *regions = retain_usable(cut, min_length);
    }

    OpenRegions {
        forward: retain_usable(forward, min_length),
        reverse: retain_usable(reverse, min_length),
    }
}

fn retain_usable(regions: Vec<Region<'_>>, min_length: i64) -> Vec<Region<'_>> {
    regions
        .into_iter()
        .filter(|region| {
            if region.span_length() <= 0 {
                let error = LynxError::DegenerateInterval {
                    start: region.start,
                    stop: region.stop,
                };
                debug!("Dropping intergenic region: {}", error);
                return false;
            }
            region.effective_length() > min_length
        })
        .collect()
}
