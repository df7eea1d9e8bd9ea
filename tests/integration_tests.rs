use std::path::Path;
use std::process::Command;

fn ktally_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ktally"))
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

#[test]
fn cli_help_flag() {
    let output = ktally_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ktally"));
    assert!(stdout.contains("k-mer"));
}

#[test]
fn cli_version_flag() {
    let output = ktally_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_missing_args() {
    let output = ktally_cmd().output().expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required") || stderr.contains("Usage"));
}

#[test]
fn cli_invalid_k() {
    let output = ktally_cmd()
        .args(["abc", "reads.fa"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
}

#[test]
fn cli_k_zero() {
    let output = ktally_cmd()
        .args(["0", "reads.fa"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 1"));
}

#[test]
fn cli_invalid_file_path() {
    let output = ktally_cmd()
        .args(["5", "/nonexistent/path/to/file.fa"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
}

#[test]
fn cli_fasta_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), "sample.fa", ">a\nAAAA\n>b\nAAAT\n");

    let output = ktally_cmd()
        .args(["2", input.to_str().expect("utf8 path")])
        .args(["--min-count", "1", "--outdir"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary = dir.path().join("sample_run").join("sample_summary.csv");
    let text = std::fs::read_to_string(summary).expect("summary written");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["2-mers,Count", "AA,5", "AT,1"]);

    let per_seq = dir.path().join("sample_run").join("sample.csv");
    let text = std::fs::read_to_string(per_seq).expect("per-sequence table written");
    assert!(text.starts_with("Sequence,"));
}

#[test]
fn cli_fastq_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(
        dir.path(),
        "reads.fq",
        "@r1\nACGT\n+\nIIII\n@r2\nTTTT\n+\nIIII\n",
    );

    let output = ktally_cmd()
        .args(["2", input.to_str().expect("utf8 path")])
        .args(["--min-count", "1", "--quiet", "--outdir"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary = dir.path().join("reads_run").join("reads_summary.csv");
    let text = std::fs::read_to_string(summary).expect("summary written");
    // TT occurs 3 times in r2; every other 2-mer once.
    assert!(text.lines().any(|l| l == "TT,3"));
}

#[test]
fn cli_pruning_threshold_applies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), "sample.fa", ">a\nAAAA\n>b\nAAAT\n");

    let output = ktally_cmd()
        .args(["2", input.to_str().expect("utf8 path")])
        .args(["--min-count", "2", "--quiet", "--outdir"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());

    let summary = dir.path().join("sample_run").join("sample_summary.csv");
    let text = std::fs::read_to_string(summary).expect("summary written");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["2-mers,Count", "AA,5"]);
}

#[test]
fn cli_empty_input_fails_with_format_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), "empty.fa", "");

    let output = ktally_cmd()
        .args(["2", input.to_str().expect("utf8 path"), "--quiet", "--outdir"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("format error"), "{stderr}");
}

#[test]
fn cli_tsv_and_json_formats() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), "sample.fa", ">a\nAAAA\n");

    for (format, file, probe) in [
        ("tsv", "sample_summary.tsv", "AA\t3"),
        ("json", "sample_summary.json", "\"count\": 3"),
    ] {
        let output = ktally_cmd()
            .args(["2", input.to_str().expect("utf8 path")])
            .args(["--min-count", "1", "--format", format, "--quiet", "--outdir"])
            .arg(dir.path())
            .output()
            .expect("Failed to execute");
        assert!(output.status.success());

        let text = std::fs::read_to_string(dir.path().join("sample_run").join(file))
            .expect("summary written");
        assert!(text.contains(probe), "{format}: {text}");
    }
}

#[test]
fn cli_chunked_run_produces_chunk_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut content = String::new();
    for i in 0..8 {
        content.push_str(&format!(">seq{i}\nGATTACAGATTACA\n"));
    }
    let input = write_fixture(dir.path(), "many.fa", &content);

    let output = ktally_cmd()
        .args(["3", input.to_str().expect("utf8 path")])
        .args(["--min-count", "1", "--chunk-threshold", "50", "--quiet", "--outdir"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let run_dir = dir.path().join("many_run");
    assert!(run_dir.join("many_chunk0.fa").exists());
    assert!(run_dir.join("many_chunk0_summary.csv").exists());
    assert!(run_dir.join("many_summary.csv").exists());
}
