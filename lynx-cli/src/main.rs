//! # Lynx CLI - Command-Line Genome Annotation
//!
//! Turns a genome and the reports of its gene predictor, similarity search
//! and signal finders into a refined annotation.
//!
//! ## Usage
//!
//! ```bash
//! # Refine GeneMark calls with BLAST evidence, write an Artemis file
//! lynx -i genome.fasta -g genome.orf -b initial.xml -b extended.xml -o genome.art
//!
//! # Add promoters, terminators and tRNAs, write GFF3
//! lynx -i genome.fasta -g genome.orf -b blast.xml \
//!     --bprom-forward genome.forward.bprom --bprom-reverse genome.reverse.bprom \
//!     --transterm genome.tt --trnascan genome.trna -f gff -o genome.gff
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Genome FASTA file
//! - `-g, --genes <FILE>`: GeneMark `.orf` predictions
//! - `-b, --blast <FILE>`: BLAST XML report, repeatable
//! - `--bprom-forward <FILE>`, `--bprom-reverse <FILE>`: BPROM reports
//! - `--transterm <FILE>`: TransTermHP report
//! - `--trnascan <FILE>`: tRNAscan-SE report
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-f, --format <FORMAT>`: artemis, gff or summary (default: artemis)
//! - `--crd <FILE>`: Also write the final genes as a TransTermHP coordinate file
//! - `-l, --min-length <BP>`, `-c, --scaffolding-distance <BP>`,
//!   `-p, --promoter-score-cutoff <SCORE>`: Thresholds
//! - `--strict-conflicts`: Fail on unresolvable opposite-strand overlaps
//! - `-q, --quiet`, `-v, --verbose`: Logging

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};
use log::warn;
use lynx_core::config::OutputFormat;
use lynx_core::engine::Collaborators;
use lynx_core::evidence::StaticEvidence;
use lynx_core::external::{
    OrfFilePredictor, StaticSignals, StaticTransferRnas, write_coordinates,
};
use lynx_core::output::write_results;
use lynx_core::sequence::read_genomes;
use lynx_core::*;

fn build_command() -> Command {
    Command::new("lynx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prokaryotic genome annotation refinement")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Genome FASTA file"),
        )
        .arg(
            Arg::new("genes")
                .short('g')
                .long("genes")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("GeneMark .orf predictions"),
        )
        .arg(
            Arg::new("blast")
                .short('b')
                .long("blast")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append)
                .help("BLAST XML report (repeatable)"),
        )
        .arg(
            Arg::new("bprom-forward")
                .long("bprom-forward")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("BPROM report of the genome"),
        )
        .arg(
            Arg::new("bprom-reverse")
                .long("bprom-reverse")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("BPROM report of the reverse complement"),
        )
        .arg(
            Arg::new("transterm")
                .long("transterm")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TransTermHP report"),
        )
        .arg(
            Arg::new("trnascan")
                .long("trnascan")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("tRNAscan-SE report"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: artemis, gff, summary")
                .default_value("artemis"),
        )
        .arg(
            Arg::new("crd")
                .long("crd")
                .value_name("FILE")
                .help("Write the final genes as a TransTermHP coordinate file"),
        )
        .arg(
            Arg::new("min-length")
                .short('l')
                .long("min-length")
                .value_name("BP")
                .value_parser(value_parser!(i64))
                .help("Minimum length of intergenic genes (default: 100)"),
        )
        .arg(
            Arg::new("scaffolding-distance")
                .short('c')
                .long("scaffolding-distance")
                .value_name("BP")
                .value_parser(value_parser!(i64))
                .help("Maximum gap between genes of one scaffold (default: 100)"),
        )
        .arg(
            Arg::new("promoter-score-cutoff")
                .short('p')
                .long("promoter-score-cutoff")
                .value_name("SCORE")
                .value_parser(value_parser!(f64))
                .help("Minimum promoter score (default: 0)"),
        )
        .arg(
            Arg::new("strict-conflicts")
                .long("strict-conflicts")
                .action(ArgAction::SetTrue)
                .help("Fail when overlapping predicted genes cannot be reconciled"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only report errors"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase logging (-v info, -vv debug)"),
        )
}

/// Main entry point for the Lynx CLI application.
///
/// Loads the genome and the collaborator reports, runs the annotation and
/// writes results in the requested format.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = build_command().get_matches();
    let quiet = matches.get_flag("quiet");

    env_logger::Builder::new()
        .filter_level(match (quiet, matches.get_count("verbose")) {
            (true, _) => log::LevelFilter::Error,
            (false, 0) => log::LevelFilter::Warn,
            (false, 1) => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let output_format = match matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("artemis")
    {
        "artemis" | "art" => OutputFormat::Artemis,
        "gff" => OutputFormat::Gff,
        "summary" | "tsv" => OutputFormat::Summary,
        _ => return Err("Invalid output format".into()),
    };

    let mut config = AnnotationConfig {
        fail_on_unresolved_conflicts: matches.get_flag("strict-conflicts"),
        quiet,
        output_format,
        ..Default::default()
    };
    if let Some(&min_length) = matches.get_one::<i64>("min-length") {
        config.min_length = min_length;
    }
    if let Some(&distance) = matches.get_one::<i64>("scaffolding-distance") {
        config.scaffolding_distance = distance;
    }
    if let Some(&cutoff) = matches.get_one::<f64>("promoter-score-cutoff") {
        config.promoter_score_cutoff = cutoff;
    }

    let input = matches
        .get_one::<PathBuf>("input")
        .ok_or("Missing input FASTA")?;
    let genes = matches
        .get_one::<PathBuf>("genes")
        .ok_or("Missing gene predictions")?;

    let mut genomes = read_genomes(input)?;
    if genomes.is_empty() {
        return Err(format!("No sequences in {}", input.display()).into());
    }
    if genomes.len() > 1 {
        warn!(
            "{} holds {} sequences; annotating only the first",
            input.display(),
            genomes.len()
        );
    }
    let genome = genomes.swap_remove(0);

    let blast_reports: Vec<PathBuf> = matches
        .get_many::<PathBuf>("blast")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let signals = StaticSignals::from_files(
        matches.get_one::<PathBuf>("bprom-forward").map(PathBuf::as_path),
        matches.get_one::<PathBuf>("bprom-reverse").map(PathBuf::as_path),
        matches.get_one::<PathBuf>("transterm").map(PathBuf::as_path),
    )?;
    let transfer_rnas = match matches.get_one::<PathBuf>("trnascan") {
        Some(path) => StaticTransferRnas::from_file(path)?,
        None => StaticTransferRnas::default(),
    };

    let collaborators = Collaborators::new(OrfFilePredictor::from_file(genes)?)
        .with_evidence(StaticEvidence::from_blast_files(&blast_reports)?)
        .with_signals(signals)
        .with_transfer_rnas(transfer_rnas);
    let annotator = Annotator::new(config, collaborators);
    let results = annotator.annotate(&genome)?;

    let mut writer: Box<dyn Write> = if let Some(output_file) = matches.get_one::<String>("output")
    {
        Box::new(BufWriter::new(File::create(output_file)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    write_results(&mut writer, &results, &genome, annotator.config.output_format)?;
    writer.flush()?;

    if let Some(crd_file) = matches.get_one::<String>("crd") {
        let mut crd = BufWriter::new(File::create(crd_file)?);
        write_coordinates(&mut crd, &genome.name, &results.genes)?;
        crd.flush()?;
    }

    if !quiet {
        eprintln!(
            "Annotation complete! {} genes ({} extended, {} intergenic), {} promoters, {} terminators, {} tRNAs.",
            results.genes.len(),
            results
                .genes
                .iter()
                .filter(|gene| gene.origin == types::Origin::Extended)
                .count(),
            results.genes.iter().filter(|gene| gene.is_intergenic()).count(),
            results.promoters.len(),
            results.terminators.len(),
            results.transfer_rnas.len()
        );
        if !results.unresolved_conflicts.is_empty() {
            eprintln!(
                "{} unresolved conflicts between opposite-strand scaffolds.",
                results.unresolved_conflicts.len()
            );
        }
    }

    Ok(())
}
