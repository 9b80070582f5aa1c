use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use bio::io::fasta;

use crate::sequence::Genome;
use crate::types::LynxError;

/// Read every record of a FASTA file as a genome.
pub fn read_genomes<P: AsRef<Path>>(path: P) -> Result<Vec<Genome>, LynxError> {
    let file = File::open(path)?;
    read_genomes_from(std::io::BufReader::new(file))
}

/// Read genomes from any buffered FASTA source.
pub fn read_genomes_from<R: BufRead>(reader: R) -> Result<Vec<Genome>, LynxError> {
    let reader = fasta::Reader::from_bufread(reader);
    let mut genomes = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| LynxError::ParseError(e.to_string()))?;
        let genome = Genome::new(record.id(), record.desc().map(String::from), record.seq())?;
        genomes.push(genome);
    }

    Ok(genomes)
}
