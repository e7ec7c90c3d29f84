//! Integration tests for the ampliseq binary

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(unix)]
const EXECUTABLE_NAME: &str = "ampliseq";

#[cfg(windows)]
const EXECUTABLE_NAME: &str = "ampliseq.exe";

/// Isolated HOME, config file, reads directory and work dir
struct TaskHarness {
    home: TempDir,
    config_path: PathBuf,
    reads: PathBuf,
    work_dir: PathBuf,
}

impl TaskHarness {
    fn new() -> io::Result<Self> {
        let home = TempDir::new()?;
        let config_path = home.path().join(".config").join("ampliseq").join("ampliseq.toml");
        fs::create_dir_all(config_path.parent().unwrap_or(home.path()))?;

        let reads = home.path().join("data").join("reads");
        fs::create_dir_all(&reads)?;
        fs::write(reads.join("sample1_R1.fastq.gz"), "")?;
        fs::write(reads.join("sample1_R2.fastq.gz"), "")?;

        let work_dir = home.path().join("work");
        fs::write(
            &config_path,
            format!("work_dir = \"{}\"\n", work_dir.to_string_lossy()),
        )?;

        Ok(Self {
            home,
            config_path,
            reads,
            work_dir,
        })
    }

    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ampliseq");
        cmd.env("HOME", self.home.path());
        cmd.env("AMPLISEQ_CONFIG", &self.config_path);
        cmd
    }

    fn reads(&self) -> String {
        self.reads.to_string_lossy().to_string()
    }

    fn append_config(&self, line: &str) -> io::Result<()> {
        let mut content = fs::read_to_string(&self.config_path)?;
        content.push_str(line);
        content.push('\n');
        fs::write(&self.config_path, content)
    }

    /// Replace the config file contents
    #[cfg(unix)]
    fn write_config(&self, content: &str) -> io::Result<()> {
        fs::write(&self.config_path, content)
    }

    /// Install a stand-in runner that records its arguments and fails when
    /// `--input` or `--metadata` cannot be found from its work dir
    #[cfg(unix)]
    fn install_fake_runner(&self, exit_code: i32) -> io::Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let script = self.home.path().join("fake-nextflow");
        fs::write(
            &script,
            format!(
                r#"#!/bin/sh
printf '%s\n' "$@" > args.txt
prev=""
for arg in "$@"; do
  if [ "$prev" = "--input" ] && [ ! -d "$arg" ]; then echo "missing input $arg" >&2; exit 3; fi
  if [ "$prev" = "--metadata" ] && [ ! -f "$arg" ]; then echo "missing metadata $arg" >&2; exit 4; fi
  prev="$arg"
done
mkdir -p results/multiqc
echo ok > results/multiqc/report.html
exit {}
"#,
                exit_code
            ),
        )?;
        let mut perms = fs::metadata(&script)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms)?;
        self.append_config(&format!("runner_path = \"{}\"", script.to_string_lossy()))?;
        Ok(script)
    }

    fn recorded_args(&self) -> io::Result<Vec<String>> {
        let content = fs::read_to_string(self.work_dir.join("args.txt"))?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn test_version() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ampliseq"));
}

#[test]
fn test_help() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nf-core/ampliseq"));
}

#[test]
fn test_run_help() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Usage: {} run",
            EXECUTABLE_NAME
        )));
}

#[test]
fn test_invalid_command() {
    let env = TaskHarness::new().expect("harness");
    env.command().arg("invalid").assert().failure();
}

#[test]
fn test_invalid_technology_rejected() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["run", "--readsdir", &env.reads(), "--seqtech", "nanopore"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nanopore"));
}

#[test]
fn test_dry_run_prints_command() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args([
            "run",
            "--readsdir",
            &env.reads(),
            "--fprimer",
            "GTGYCAGCMGCCGCGGTAA",
            "--rprimer",
            "GGACTACNVGGGTWTCTAAT",
            "--seqtech",
            "pacbio",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "run nf-core/ampliseq -profile charliecloud",
        ))
        .stdout(predicate::str::contains(format!("--input {}", env.reads())))
        .stdout(predicate::str::contains(format!(
            "--outdir {}",
            path_str(&env.work_dir.join("results"))
        )))
        .stdout(predicate::str::contains(
            "--FW_primer GTGYCAGCMGCCGCGGTAA --RV_primer GGACTACNVGGGTWTCTAAT --pacbio",
        ))
        .stdout(predicate::str::contains("--single_end").not());
}

#[test]
fn test_dry_run_with_test_data_uses_staging_root() {
    let env = TaskHarness::new().expect("harness");
    let staging = env.home.path().join("staging");
    let bucket = staging.join("s3").join("ampliseq_16S");
    fs::create_dir_all(&bucket).expect("mkdir staging");
    fs::write(bucket.join("metadata.tsv"), "ID\tcondition\n").expect("write metadata");
    env.append_config(&format!("staging_root = \"{}\"", path_str(&staging)))
        .expect("config");

    env.command()
        .args(["run", "--test-data", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "--input {}",
            path_str(&bucket)
        )))
        .stdout(predicate::str::contains(format!(
            "--metadata {}",
            path_str(&bucket.join("metadata.tsv"))
        )));
}

#[test]
fn test_unresolvable_input_fails() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["run", "--readsdir", "s3://ampliseq_16S/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no staging root"));
}

#[cfg(unix)]
#[test]
fn test_run_success_publishes_results() {
    let env = TaskHarness::new().expect("harness");
    env.install_fake_runner(0).expect("fake runner");

    env.command()
        .args([
            "run",
            "--readsdir",
            &env.reads(),
            "--seqtype",
            "single",
            "--itspe",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("latch:///ampliseq/results"));

    let args = env.recorded_args().expect("runner args");
    assert_eq!(args[0], "run");
    assert_eq!(args[1], "nf-core/ampliseq");
    assert!(args.contains(&"--single_end".to_string()));
    assert!(args.contains(&"--illumina_pe_its".to_string()));
    assert!(!args.contains(&"--FW_primer".to_string()));
    assert!(env.work_dir.join("results").join("multiqc").is_dir());
}

#[cfg(unix)]
#[test]
fn test_run_failure_exits_non_zero() {
    let env = TaskHarness::new().expect("harness");
    env.install_fake_runner(1).expect("fake runner");

    env.command()
        .args(["run", "--readsdir", &env.reads()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("exit code 1"));
}

#[cfg(unix)]
#[test]
fn test_run_from_params_file() {
    let env = TaskHarness::new().expect("harness");
    env.install_fake_runner(0).expect("fake runner");
    let params = env.home.path().join("params.yaml");
    fs::write(
        &params,
        format!(
            "readsdir: {}\nseqtech: novaseq\nmulti: true\n",
            env.reads()
        ),
    )
    .expect("write params");

    env.command()
        .args(["run", "--params", &path_str(&params)])
        .assert()
        .success();

    let args = env.recorded_args().expect("runner args");
    assert!(args.contains(&"--illumina_novaseq".to_string()));
    assert!(args.contains(&"--multiple_sequencing_runs".to_string()));
}

#[cfg(unix)]
fn value_after(args: &[String], flag: &str) -> Option<PathBuf> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).map(PathBuf::from)
}

#[cfg(unix)]
#[test]
fn test_run_with_relative_locations() {
    let env = TaskHarness::new().expect("harness");
    env.install_fake_runner(0).expect("fake runner");
    fs::write(env.home.path().join("data").join("metadata.tsv"), "ID\n").expect("write metadata");

    env.command()
        .current_dir(env.home.path())
        .args([
            "run",
            "--readsdir",
            "data/reads",
            "--metafile",
            "data/metadata.tsv",
        ])
        .assert()
        .success();

    let args = env.recorded_args().expect("runner args");
    let input = value_after(&args, "--input").expect("--input");
    assert!(input.is_absolute());
    assert!(input.ends_with("data/reads"));
    let metadata = value_after(&args, "--metadata").expect("--metadata");
    assert!(metadata.is_absolute());
    assert!(metadata.ends_with("data/metadata.tsv"));
}

#[cfg(unix)]
#[test]
fn test_run_with_relative_work_dir() {
    let env = TaskHarness::new().expect("harness");
    env.write_config("work_dir = \"work\"\n").expect("config");
    env.install_fake_runner(0).expect("fake runner");

    env.command()
        .current_dir(env.home.path())
        .args(["run", "--readsdir", &env.reads(), "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("latch:///ampliseq/results"));

    let args = env.recorded_args().expect("runner args");
    let work_dir = value_after(&args, "-work-dir").expect("-work-dir");
    assert!(work_dir.is_absolute());
    assert!(work_dir.ends_with("work"));
    let outdir = value_after(&args, "--outdir").expect("--outdir");
    assert_eq!(outdir, work_dir.join("results"));
    assert!(env.work_dir.join("results").join("multiqc").is_dir());
}

#[test]
fn test_parameter_flags_rejected_with_test_data() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["run", "--test-data", "--seqtech", "pacbio", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_describe_prints_metadata() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .arg("describe")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"display_name\": \"nf-core/ampliseq workflow\""))
        .stdout(predicate::str::contains("GGACTACNVGGGTWTCTAAT"));
}

#[test]
fn test_launch_plan_output() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .arg("launch-plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Test Data"))
        .stdout(predicate::str::contains("readsdir: s3://ampliseq_16S/"));
}

#[test]
fn test_config_show() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("work-dir"));
}

#[test]
fn test_config_path() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ampliseq.toml"));
}

#[test]
fn test_config_set_profile() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["config", "set", "profile", "docker"])
        .assert()
        .success();

    let content = fs::read_to_string(&env.config_path).expect("read config");
    assert!(content.contains("profile = \"docker\""));

    env.command()
        .args(["run", "--readsdir", &env.reads(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-profile docker"));
}

#[test]
fn test_config_set_unknown_key() {
    let env = TaskHarness::new().expect("harness");
    env.command()
        .args(["config", "set", "verbosity", "2"])
        .assert()
        .stderr(predicate::str::contains("Unknown config key"));
}
