//! Malformed, oddly quoted and oversized inputs

use crate::common::{CliTestRunner, TestFixture};
use csvpeek::progress::NoProgress;
use csvpeek::writer::{self, StreamingWriter};
use csvpeek::{CsvPeekError, DiffEngine, LazyTable, View};

fn project(path: &std::path::Path, view: View) -> csvpeek::Result<String> {
    let rows = writer::apply_filter_and_project(LazyTable::open(path)?, view)?;
    let mut writer = StreamingWriter::new(Vec::new());
    writer.write_projection(rows, &mut NoProgress)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).replace("\r\n", "\n"))
}

#[test]
fn test_missing_file() {
    let runner = CliTestRunner::new().unwrap();
    let missing = runner.fixture().path("nope.csv");

    let err = runner.expect_failure(&["view", missing.to_str().unwrap()]);
    assert!(matches!(err, CsvPeekError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn test_latin1_bytes_are_replaced_not_fatal() {
    let fixture = TestFixture::new().unwrap();
    let latin1 = fixture.path("latin1.csv");
    std::fs::write(&latin1, b"key,city\nk1,Z\xfcrich\nk2,Bern\n").unwrap();
    let utf8 = fixture
        .create_csv_raw("utf8.csv", "key,city\nk1,Z\u{fc}rich\nk2,Bern\n")
        .unwrap();

    let report = DiffEngine::new("key", ["city"])
        .diff_files(&latin1, &utf8, &mut NoProgress)
        .unwrap();
    assert_eq!(report.diff_keys, 0);
    assert_eq!(report.diff_extras, 1);

    let text = project(&latin1, View::new().with_select(["city"])).unwrap();
    assert_eq!(text, "city\nZ\u{FFFD}rich\nBern\n");
}

#[test]
fn test_short_row_is_a_data_error() {
    let fixture = TestFixture::new().unwrap();
    let csv = fixture.create_csv_raw("short.csv", "a,b,c\n1,2,3\n4\n").unwrap();

    let result = project(&csv, View::new().with_select(["c"]));
    assert!(matches!(result, Err(CsvPeekError::DataProcessing { .. })));
}

#[test]
fn test_quoted_cells_are_escaped_on_output() {
    let fixture = TestFixture::new().unwrap();
    let csv = fixture
        .create_csv_raw(
            "quoted.csv",
            "id,note\n1,\"hello, world\"\n2,\"say \"\"hi\"\"\"\n3,plain\n",
        )
        .unwrap();

    let text = project(&csv, View::new().with_select(["note"])).unwrap();
    assert_eq!(text, "note\n\"hello, world\"\nsay 'hi'\nplain\n");
}

#[test]
fn test_unicode_values_and_case_folded_columns() {
    let fixture = TestFixture::new().unwrap();
    let csv = fixture
        .create_csv_raw("unicode.csv", "Ville,Pays\nZürich,Schweiz\nÅrhus,Danmark\n")
        .unwrap();

    let text = project(&csv, View::new().with_select(["PAYS", "ville"])).unwrap();
    assert_eq!(text, "Pays,Ville\nSchweiz,Zürich\nDanmark,Århus\n");
}

#[test]
fn test_header_only_file() {
    let fixture = TestFixture::new().unwrap();
    let csv = fixture.create_csv_raw("empty.csv", "a,b\n").unwrap();

    let text = project(&csv, View::new().with_select(["b"])).unwrap();
    assert_eq!(text, "b\n");
}

#[test]
fn test_large_file_with_take_stops_early() {
    let fixture = TestFixture::new().unwrap();
    let csv = fixture.create_large_csv("big.csv", 10_000, 4).unwrap();

    let rows = writer::apply_filter_and_project(
        LazyTable::open(&csv).unwrap(),
        View::new().with_select(["col_3"]).with_take(3),
    )
    .unwrap();
    let mut writer = StreamingWriter::new(Vec::new());
    let summary = writer.write_projection(rows, &mut NoProgress).unwrap();

    assert_eq!(summary.rows_written, 3);
    assert!(summary.stopped_early);
    let text = String::from_utf8(writer.into_inner()).unwrap().replace("\r\n", "\n");
    assert_eq!(text, "col_3\nvalue_0_3\nvalue_1_3\nvalue_2_3\n");
}

#[test]
fn test_duplicate_header_names_resolve_to_first() {
    let fixture = TestFixture::new().unwrap();
    let csv = fixture.create_csv_raw("dup.csv", "k,v,V\n1,first,second\n").unwrap();

    let text = project(&csv, View::new().with_select(["v"])).unwrap();
    assert_eq!(text, "v\nfirst\n");
}
