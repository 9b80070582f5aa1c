//! # Lynx - Prokaryotic Genome Annotation
//!
//! Refines the gene calls of an ab initio predictor into a finished
//! prokaryotic annotation. Starts are moved upstream when similarity
//! evidence favours a longer protein, genes the predictor missed are
//! recovered from the gaps between its calls, and colliding genes on
//! opposite strands are reconciled. Promoters, terminators and tRNAs are
//! then placed around the result.
//!
//! ## Overview
//!
//! The crate never runs external programs. Gene prediction, similarity
//! search and signal detection are collaborators behind traits
//! ([`external::GenePredictor`], [`evidence::EvidenceSource`],
//! [`external::SignalSource`], [`external::TransferRnaSource`]). Parsers for
//! the reports of GeneMark, BLAST, BPROM, TransTermHP and tRNAscan-SE let
//! precomputed results drive a run.
//!
//! ## Quick Start
//!
//! ```rust
//! use lynx_core::{Annotator, AnnotationConfig};
//! use lynx_core::engine::Collaborators;
//! use lynx_core::external::OrfFilePredictor;
//! use lynx_core::interval::Location;
//! use lynx_core::sequence::Genome;
//!
//! let sequence = format!("{}ATG{}TAA{}", "CCC".repeat(10), "GCT".repeat(30), "CCC".repeat(10));
//! let genome = Genome::new("test_genome", None, sequence.as_bytes())?;
//!
//! let predictor = OrfFilePredictor::new(vec![Location::new(31, 126)?]);
//! let annotator = Annotator::new(AnnotationConfig::default(), Collaborators::new(predictor));
//! let results = annotator.annotate(&genome)?;
//!
//! println!("Annotated {} genes", results.genes.len());
//! # Ok::<(), lynx_core::types::LynxError>(())
//! ```
//!
//! ## Coordinates
//!
//! Gene, signal and tRNA locations are 1-based and inclusive. The order of
//! the two ends gives the strand: forward features have `start < stop`,
//! reverse features `start > stop`. Internal scan regions are 0-based and
//! half-open.
//!
//! ## Module Organization
//!
//! - [`config`]: Thresholds and output options
//! - [`engine`]: The annotation pipeline
//! - [`types`]: Genes, signals and errors
//! - [`interval`]: Strand-aware locations and overlap arithmetic
//! - [`sequence`]: Genome loading and codon classification
//! - [`algorithms`]: Extension, intergenic search, scaffolds, signal filter
//! - [`evidence`]: Query batches and similarity evidence
//! - [`external`]: Collaborator traits and report parsers
//! - [`output`]: Artemis, GFF3 and summary writers
//! - [`results`]: Annotation results
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, LynxError>`](types::LynxError).

pub mod algorithms;
pub mod config;
pub mod constants;
pub mod engine;
pub mod evidence;
pub mod external;
pub mod interval;
pub mod output;
pub mod results;
pub mod sequence;
pub mod types;

pub use config::AnnotationConfig;
pub use engine::Annotator;
pub use types::LynxError;
