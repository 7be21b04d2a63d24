//! Integration tests for the stan binary.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use rstest::*;
use seq_io::fasta::{Reader, Record};
use tempfile::TempDir;

fn stan(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stan"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to run stan")
}

/// Read a single-record FASTA file into (id, sequence).
fn read_fasta(path: &Path) -> (String, Vec<u8>) {
    let mut reader = Reader::from_path(path).expect("Failed to open FASTA");
    let record = reader.next().expect("Empty FASTA").expect("Invalid FASTA");
    let id = record.id().expect("Invalid header").to_string();
    let seq = record.full_seq().into_owned();
    assert!(reader.next().is_none());
    (id, seq)
}

#[fixture]
fn workdir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[rstest]
fn test_simulate_writes_samples(workdir: TempDir) {
    let output = stan(workdir.path(), &["simulate", "-t", "7", "-n", "13", "-s", "3"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let targets = workdir.path().join("targets");
    let neighbors = workdir.path().join("neighbors");
    for i in 1..=7 {
        let (id, seq) = read_fasta(&targets.join(format!("t{i}.fasta")));
        assert_eq!(id, format!("t{i}"));
        assert_eq!(seq.len(), 10_000);
    }
    for i in 1..=13 {
        let (id, seq) = read_fasta(&neighbors.join(format!("n{i}.fasta")));
        assert_eq!(id, format!("n{i}"));
        assert_eq!(seq.len(), 9_000);
        assert!(seq.iter().all(|b| b"ACGT".contains(b)));
    }
    assert_eq!(std::fs::read_dir(&targets).unwrap().count(), 7);
    assert_eq!(std::fs::read_dir(&neighbors).unwrap().count(), 13);
}

#[rstest]
fn test_fasta_lines_are_wrapped(workdir: TempDir) {
    let output = stan(workdir.path(), &["simulate", "-t", "1", "-n", "1", "-l", "150", "-r", "1-10", "-s", "1"]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(workdir.path().join("targets/t1.fasta")).unwrap();
    let widths: Vec<usize> = text.lines().map(str::len).collect();
    assert_eq!(widths, vec![3, 70, 70, 10]);
}

#[rstest]
fn test_same_seed_same_output(workdir: TempDir) {
    let args = ["simulate", "-t", "3", "-n", "4", "-l", "500", "-r", "101-200", "-s", "11", "-c"];
    let first = stan(workdir.path(), &args);
    let first_seq = std::fs::read(workdir.path().join("neighbors/n2.fasta")).unwrap();

    let mut args = args.to_vec();
    args.push("-o");
    let second = stan(workdir.path(), &args);
    let second_seq = std::fs::read(workdir.path().join("neighbors/n2.fasta")).unwrap();

    assert!(first.status.success() && second.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first_seq, second_seq);
}

#[rstest]
fn test_region_out_of_bounds_creates_nothing(workdir: TempDir) {
    let output = stan(workdir.path(), &["simulate", "-l", "5000"]);

    assert!(!output.status.success());
    assert!(!workdir.path().join("targets").exists());
    assert!(!workdir.path().join("neighbors").exists());
}

#[rstest]
#[case("4501-5500,5000-6000")]
#[case("10-5")]
#[case("abc")]
fn test_invalid_regions_fail(workdir: TempDir, #[case] regions: &str) {
    let output = stan(workdir.path(), &["simulate", "-r", regions]);
    assert!(!output.status.success());
    assert!(!workdir.path().join("targets").exists());
}

#[rstest]
fn test_existing_directory_requires_overwrite(workdir: TempDir) {
    let args = ["simulate", "-t", "2", "-n", "2", "-l", "100", "-r", "1-10", "-s", "2"];
    std::fs::create_dir(workdir.path().join("targets")).unwrap();
    std::fs::write(workdir.path().join("targets/stale.fasta"), ">stale\nA\n").unwrap();

    let output = stan(workdir.path(), &args);
    assert!(!output.status.success());
    assert!(!workdir.path().join("neighbors").exists());

    let mut args = args.to_vec();
    args.push("-o");
    let output = stan(workdir.path(), &args);
    assert!(output.status.success());
    assert!(!workdir.path().join("targets/stale.fasta").exists());
    assert!(workdir.path().join("targets/t2.fasta").exists());
}

#[rstest]
fn test_print_tree(workdir: TempDir) {
    let output = stan(workdir.path(), &["simulate", "-t", "3", "-n", "2", "-l", "100", "-r", "1-10", "-s", "4", "-c"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let newick = stdout.trim_end();
    assert!(newick.starts_with('(') && newick.ends_with(");"));
    for label in ["t1", "t2", "t3", "n1", "n2"] {
        assert!(newick.contains(label));
    }
}

#[rstest]
fn test_print_haplotypes(workdir: TempDir) {
    let output = stan(workdir.path(), &["simulate", "-t", "2", "-n", "3", "-s", "5", "-a"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("Positions:"));
    let positions = lines[0].split_whitespace().count() - 1;

    let labels: Vec<&str> = lines[1..].iter().map(|l| l.split_whitespace().next().unwrap_or("")).collect();
    assert_eq!(labels, vec!["t1", "t2", "n1", "n2", "n3"]);
    for line in &lines[1..] {
        let bits = line.split_whitespace().nth(1).unwrap_or("");
        assert_eq!(bits.len(), positions);
    }
}

#[rstest]
fn test_config_template_round_trip(workdir: TempDir) {
    let output = stan(workdir.path(), &["config", "-o", "stan.yaml"]);
    assert!(output.status.success());
    assert!(workdir.path().join("stan.yaml").exists());

    let output = stan(workdir.path(), &["simulate", "--config", "stan.yaml", "-t", "2", "-n", "2", "-s", "6"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(workdir.path().join("targets/t2.fasta").exists());
    assert_eq!(read_fasta(&workdir.path().join("neighbors/n1.fasta")).1.len(), 9_000);
}
