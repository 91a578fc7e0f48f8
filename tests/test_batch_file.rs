mod common;

use std::fs;

use seqfetch::{
    batch::retriever::BatchRetriever, entrez::format::RecordFormat, errors::SeqfetchError,
};

use crate::common::utils;

#[test]
fn test_download_to_file() {
    let path = utils::scratch_path("download.fasta");
    let retriever = BatchRetriever::new(3, RecordFormat::Fasta).expect("valid page size");
    let mut source = utils::ScriptedSource::new();

    let summary = retriever
        .retrieve_to_path(&mut source, &utils::session(), 10, &path)
        .expect("retrieval");

    assert_eq!(summary.pages, 4);
    assert_eq!(source.calls, 4);
    let text = fs::read_to_string(&path).expect("output file");
    assert_eq!(text, utils::fasta_records(0..10));
    assert_eq!(text.matches('>').count(), 10);
    fs::remove_file(&path).ok();
}

#[test]
fn test_failure_keeps_completed_pages() {
    let path = utils::scratch_path("partial.fasta");
    let retriever = BatchRetriever::new(3, RecordFormat::Fasta).expect("valid page size");
    let mut source = utils::ScriptedSource::failing_on_call(2);

    let err = retriever
        .retrieve_to_path(&mut source, &utils::session(), 10, &path)
        .unwrap_err();

    assert!(err.is_transport(), "unexpected error: {}", err);
    assert_eq!(source.calls, 2);
    // The first page was flushed despite the failure, and nothing else was written.
    let text = fs::read_to_string(&path).expect("output file");
    assert_eq!(text, utils::fasta_records(0..3));
    fs::remove_file(&path).ok();
}

#[test]
fn test_rerun_is_identical() {
    let path = utils::scratch_path("rerun.fasta");
    let retriever = BatchRetriever::new(4, RecordFormat::Fasta).expect("valid page size");

    retriever
        .retrieve_to_path(&mut utils::ScriptedSource::new(), &utils::session(), 13, &path)
        .expect("first run");
    let first = fs::read(&path).expect("output file");

    retriever
        .retrieve_to_path(&mut utils::ScriptedSource::new(), &utils::session(), 13, &path)
        .expect("second run");
    let second = fs::read(&path).expect("output file");

    assert_eq!(first, second);
    fs::remove_file(&path).ok();
}

#[test]
fn test_rerun_after_failure_replaces_partial_output() {
    let path = utils::scratch_path("resume.fasta");
    let retriever = BatchRetriever::new(2, RecordFormat::Fasta).expect("valid page size");

    let _ = retriever.retrieve_to_path(
        &mut utils::ScriptedSource::failing_on_call(3),
        &utils::session(),
        7,
        &path,
    );
    retriever
        .retrieve_to_path(&mut utils::ScriptedSource::new(), &utils::session(), 7, &path)
        .expect("second run");

    let text = fs::read_to_string(&path).expect("output file");
    assert_eq!(text, utils::fasta_records(0..7));
    fs::remove_file(&path).ok();
}

#[test]
fn test_zero_records_makes_empty_file() {
    let path = utils::scratch_path("empty.fasta");
    let retriever = BatchRetriever::new(5, RecordFormat::Fasta).expect("valid page size");
    let mut source = utils::ScriptedSource::new();

    let summary = retriever
        .retrieve_to_path(&mut source, &utils::session(), 0, &path)
        .expect("retrieval");

    assert_eq!(summary.pages, 0);
    assert_eq!(source.calls, 0);
    assert_eq!(fs::metadata(&path).expect("output file").len(), 0);
    fs::remove_file(&path).ok();
}

#[test]
fn test_unwritable_destination() {
    let mut path = utils::scratch_path("no-such-dir");
    path.push("out.fasta");
    let retriever = BatchRetriever::new(5, RecordFormat::Fasta).expect("valid page size");
    let mut source = utils::ScriptedSource::new();

    let err = retriever
        .retrieve_to_path(&mut source, &utils::session(), 8, &path)
        .unwrap_err();

    assert!(matches!(err, SeqfetchError::Sink(_)));
    // Nothing was requested since there was nowhere to put it.
    assert_eq!(source.calls, 0);
}
