//! Coordinate-geometry stages of the annotation pipeline.
//!
//! Each stage is a deterministic function over gene records and the genome
//! sequence. Stages never call collaborators themselves; scoring happens in
//! between them, driven by [`crate::engine::Annotator`].
//!
//! ## Modules
//!
//! - [`extension`]: Upstream start candidates and the choice between them
//! - [`intergenic`]: Gaps left by the predictor and the ORFs inside them
//! - [`scaffolds`]: Same-strand gene runs and opposite-strand conflicts
//! - [`signals`]: Promoter and terminator filtering
//!
//! ## Pipeline Overview
//!
//! 1. **Extension**: Walk upstream in frame from every predicted start
//! 2. **Resolution**: Pick the best scored candidate per gene
//! 3. **Intergenic search**: Carve out uncovered regions and scan them
//!    for open reading frames
//! 4. **Scaffolding**: Merge nearby genes and remove intergenic genes that
//!    collide with the opposite strand
//! 5. **Signal filtering**: Keep signals near gene starts

pub mod extension;
pub mod intergenic;
pub mod scaffolds;
pub mod signals;
