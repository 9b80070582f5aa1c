#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// One forward gene at 31..126: `ATG (GCT)x30 TAA` between 30 bp of `C`.
pub fn test_genome_sequence() -> String {
    format!(
        "{}ATG{}TAA{}",
        "CCC".repeat(10),
        "GCT".repeat(30),
        "CCC".repeat(10)
    )
}

pub const ORF_FILE: &str = "\
>orf_00001 ..., 31 - 126
MAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA
";

pub const BLAST_REPORT: &str = r#"<?xml version="1.0"?>
<BlastOutput>
  <BlastOutput_program>blastp</BlastOutput_program>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_iter-num>1</Iteration_iter-num>
      <Iteration_query-def>test_genome~1:31-126</Iteration_query-def>
      <Iteration_hits>
        <Hit>
          <Hit_num>1</Hit_num>
          <Hit_id>gi|16128008</Hit_id>
          <Hit_def>hypothetical protein [Escherichia coli]</Hit_def>
          <Hit_hsps>
            <Hsp>
              <Hsp_bit-score>62.4</Hsp_bit-score>
              <Hsp_evalue>1e-30</Hsp_evalue>
              <Hsp_identity>30</Hsp_identity>
              <Hsp_align-len>31</Hsp_align-len>
            </Hsp>
          </Hit_hsps>
        </Hit>
      </Iteration_hits>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>
"#;

/// A promoter spanning 2..21, centred 20 bp before the gene start.
pub const BPROM_REPORT: &str = "\
 Promoter Pos:     25 LDF-  1.50
   -10 box at pos.     15 TATAAT  Score    70
   -35 box at pos.      2 TTGACA  Score    40
";

pub const TRNASCAN_REPORT: &str = "\
Sequence\t\ttRNA\tBounds\ttRNA\tAnti\tIntron Bounds\tCove
Name    \ttRNA #\tBegin\tEnd\tType\tCodon\tBegin\tEnd\tScore
--------\t------\t----\t------\t----\t-----\t-----\t----\t------
test_genome\t1\t140\t130\tGly\tGCC\t0\t0\t61.20
";

/// Input files for one annotation run, removed on drop.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let fixture = Self { dir };
        fixture.write(
            "genome.fasta",
            &format!(">test_genome synthetic\n{}\n", test_genome_sequence()),
        );
        fixture.write("genome.orf", ORF_FILE);
        fixture.write("blast.xml", BLAST_REPORT);
        fixture.write("forward.bprom", BPROM_REPORT);
        fixture.write("genome.trna", TRNASCAN_REPORT);
        fixture
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// A `lynx` command reading the fixture genome, predictions and BLAST report.
pub fn lynx_command(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("lynx").unwrap();
    cmd.arg("-i")
        .arg(fixture.path("genome.fasta"))
        .arg("-g")
        .arg(fixture.path("genome.orf"))
        .arg("-b")
        .arg(fixture.path("blast.xml"))
        .arg("-q");
    cmd
}

/// Run to completion and return stdout.
pub fn run_lynx(mut cmd: Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

/// Replace the crate version so snapshots survive releases.
pub fn normalize_output(output: &str) -> String {
    output.replace(
        &format!("lynx.v{}", env!("CARGO_PKG_VERSION")),
        "lynx.vX",
    )
}
