//! Strand-aware intervals on a genome.
//!
//! Locations are 1-based and inclusive at both ends. The strand of a location
//! is implied by the order of its ends: reading starts at `start` and ends at
//! `stop`, so a reverse-strand gene keeps its high coordinate in `start`.

use std::fmt;

use bio::bio_types::strand::Strand;

use crate::types::LynxError;

/// A directed stretch of the genome.
///
/// `start < stop` describes the forward strand, `start > stop` the reverse
/// strand. Equal ends carry no strand and are rejected by [`Location::new`].
///
/// # Examples
///
/// ```rust
/// use lynx_core::interval::Location;
///
/// let gene = Location::new(1000, 700).unwrap();
/// assert!(!gene.is_forward());
/// assert_eq!(gene.low(), 700);
/// assert_eq!(gene.midpoint(), 850);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Position where reading begins
    pub start: i64,
    /// Position where reading ends
    pub stop: i64,
}

impl Location {
    /// Create a location, rejecting intervals without a strand.
    pub fn new(start: i64, stop: i64) -> Result<Self, LynxError> {
        if start == stop {
            return Err(LynxError::DegenerateInterval { start, stop });
        }
        Ok(Self { start, stop })
    }

    pub fn strand(&self) -> Strand {
        match self.start.cmp(&self.stop) {
            std::cmp::Ordering::Less => Strand::Forward,
            std::cmp::Ordering::Greater => Strand::Reverse,
            std::cmp::Ordering::Equal => Strand::Unknown,
        }
    }

    pub fn is_forward(&self) -> bool {
        self.start < self.stop
    }

    pub fn is_reverse(&self) -> bool {
        self.start > self.stop
    }

    pub fn low(&self) -> i64 {
        self.start.min(self.stop)
    }

    pub fn high(&self) -> i64 {
        self.start.max(self.stop)
    }

    /// Distance between the two ends.
    pub fn length(&self) -> i64 {
        (self.stop - self.start).abs()
    }

    pub fn midpoint(&self) -> i64 {
        midpoint(self.start, self.stop)
    }

    /// The undirected extent of this location.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.stop)
    }

    /// Whether `position` lies strictly inside the location.
    pub fn strictly_contains(&self, position: i64) -> bool {
        self.low() < position && position < self.high()
    }

    /// Whether both ends lie within `1..=genome_length`.
    pub fn fits_within(&self, genome_length: i64) -> bool {
        self.low() >= 1 && self.high() <= genome_length
    }

    /// Map this location onto the reverse complement of a genome.
    pub fn mirrored(&self, genome_length: i64) -> Self {
        Self {
            start: genome_length + 1 - self.start,
            stop: genome_length + 1 - self.stop,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.stop)
    }
}

/// An undirected interval with `start <= stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: i64,
    pub stop: i64,
}

impl Span {
    /// Create a span from two ends given in either order.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            start: a.min(b),
            stop: a.max(b),
        }
    }

    pub fn length(&self) -> i64 {
        self.stop - self.start
    }

    pub fn midpoint(&self) -> i64 {
        midpoint(self.start, self.stop)
    }

    /// Grow this span to cover `other` as well.
    pub fn cover(&mut self, other: &Span) {
        self.start = self.start.min(other.start);
        self.stop = self.stop.max(other.stop);
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}

/// Floor of the mean of two coordinates.
pub fn midpoint(a: i64, b: i64) -> i64 {
    (a + b).div_euclid(2)
}

/// Amount by which two spans overlap, or `None` when they are disjoint.
///
/// Partial overlaps measure the shared stretch; containment measures the
/// inner span. Spans that only touch at one coordinate overlap by zero.
///
/// # Examples
///
/// ```rust
/// use lynx_core::interval::{overlap_amount, Span};
///
/// assert_eq!(overlap_amount(&Span::new(100, 300), &Span::new(250, 400)), Some(50));
/// assert_eq!(overlap_amount(&Span::new(100, 300), &Span::new(150, 200)), Some(50));
/// assert_eq!(overlap_amount(&Span::new(100, 300), &Span::new(301, 400)), None);
/// ```
pub fn overlap_amount(a: &Span, b: &Span) -> Option<i64> {
    if a.start < b.start && b.start <= a.stop && a.stop < b.stop {
        Some(a.stop - b.start)
    } else if b.start < a.start && a.start <= b.stop && b.stop < a.stop {
        Some(b.stop - a.start)
    } else if a.start <= b.start && b.stop <= a.stop {
        Some(b.length())
    } else if b.start <= a.start && a.stop <= b.stop {
        Some(a.length())
    } else {
        None
    }
}
