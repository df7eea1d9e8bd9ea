//! End-to-end tests of the library API.

use bytes::Bytes;
use std::path::Path;

use ktally::aggregate::aggregate;
use ktally::chunk;
use ktally::cli::SummaryFormat;
use ktally::config::Config;
use ktally::kmer::KmerLength;
use ktally::prune::significant;
use ktally::store::SequenceStore;
use ktally::TallyError;

fn write_fixture(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

fn config(path: &Path, outdir: &Path, k: usize, min_count: u64) -> Config {
    Config {
        k,
        path: path.to_path_buf(),
        min_count,
        threads: None,
        outdir: Some(outdir.to_path_buf()),
        chunk_threshold: chunk::DEFAULT_CHUNK_THRESHOLD,
        format: SummaryFormat::Csv,
    }
}

#[test]
fn pipeline_pieces_compose() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), "sample.fa", ">a\nAAAA\n>b\nAAAT\n");

    let store = SequenceStore::from_path(&input).expect("parse");
    assert_eq!(store.len(), 2);

    let k = KmerLength::new(2).expect("k");
    let agg = aggregate(&store, k, 1, None).expect("aggregate");
    assert_eq!(agg.global[&Bytes::from_static(b"AA")], 5);

    let rows = significant(&agg.global, 2);
    assert_eq!(rows, vec![(Bytes::from_static(b"AA"), 5)]);
}

#[test]
fn run_reports_outcome_and_writes_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(
        dir.path(),
        "mixed.fa",
        ">one\nGATTACA\n>two\nGATTACA\n>three\nTTTT\n",
    );

    let outcome = ktally::run::run(&config(&input, dir.path(), 3, 2)).expect("run");
    assert_eq!(outcome.sequences, 3);
    assert_eq!(outcome.chunks, 1);

    // GAT, ATT, TTA, TAC, ACA each appear twice across one/two; TTT twice in three.
    assert_eq!(outcome.significant_kmers, 6);

    let summary = std::fs::read_to_string(&outcome.summary_path).expect("summary");
    assert!(summary.lines().any(|l| l == "TTT,2"));

    let per_seq =
        std::fs::read_to_string(outcome.workdir.join("mixed.csv")).expect("per-sequence table");
    let header = per_seq.lines().next().expect("header");
    assert!(header.starts_with("Sequence,"));
    assert!(header.ends_with("length,GC_Percent,AT_Percent"));
    assert_eq!(per_seq.lines().count(), 4);
}

#[test]
fn chunked_and_unchunked_runs_agree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut content = String::new();
    for i in 0..10 {
        content.push_str(&format!(">seq{i}\nACGTACGTACGTACGT\n"));
    }
    let input = write_fixture(dir.path(), "big.fa", &content);

    let plain_dir = tempfile::tempdir().expect("tempdir");
    let plain = ktally::run::run(&config(&input, plain_dir.path(), 4, 1)).expect("plain run");

    let chunked_dir = tempfile::tempdir().expect("tempdir");
    let mut chunked_config = config(&input, chunked_dir.path(), 4, 1);
    chunked_config.chunk_threshold = 60;
    let chunked = ktally::run::run(&chunked_config).expect("chunked run");

    assert!(chunked.chunks > 1);
    assert_eq!(
        std::fs::read_to_string(&plain.summary_path).expect("plain summary"),
        std::fs::read_to_string(&chunked.summary_path).expect("chunked summary"),
    );
}

#[test]
fn format_errors_surface_from_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), "broken.fa", ">lonely\n");

    let err = ktally::run::run(&config(&input, dir.path(), 2, 1)).unwrap_err();
    assert!(matches!(err, TallyError::Format { .. }), "{err}");
}
