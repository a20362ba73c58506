use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use fsq::query::{Attribute, Row, Scalar};

/// Builds a known directory tree and returns its root:
///
/// ```text
/// testdata/
///   bar/
///     garply/
///       grault            "grault contents"
///       xyzzy/
///         thud/
///   baz                   ""
///   foo/
///     quux                "aaaa"
///     quuz/
///       fred/
///         .gitkeep        ""
///       waldo             "waldo!"
///     qux                 "zz"
/// ```
///
/// Walks visit entries depth-first in file-name order, with the walk
/// root itself as the first entry.
fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("testdata");

    fs::create_dir_all(root.join("bar/garply/xyzzy/thud")).unwrap();
    fs::create_dir_all(root.join("foo/quuz/fred")).unwrap();
    fs::write(root.join("bar/garply/grault"), "grault contents").unwrap();
    fs::write(root.join("baz"), "").unwrap();
    fs::write(root.join("foo/quux"), "aaaa").unwrap();
    fs::write(root.join("foo/quuz/fred/.gitkeep"), "").unwrap();
    fs::write(root.join("foo/quuz/waldo"), "waldo!").unwrap();
    fs::write(root.join("foo/qux"), "zz").unwrap();

    (dir, root)
}

fn rows_for(input: &str) -> Vec<Row> {
    let mut query = fsq::parser::run(input).unwrap();
    query.execute().unwrap()
}

fn names(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .map(|row| row[&Attribute::Name].to_string())
        .collect()
}

#[test]
fn test_name_equality() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!("SELECT name FROM {} WHERE name = baz", root.display()));
    assert_eq!(names(&rows), ["baz"]);
}

#[test]
fn test_like_substring_in_walk_order() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name, size FROM {} WHERE name LIKE qu",
        root.display()
    ));

    // quux and qux are files with known sizes; quuz is a directory whose
    // reported size is platform-dependent.
    assert_eq!(names(&rows), ["quux", "quuz", "qux"]);
    assert_eq!(rows[0][&Attribute::Size], Scalar::Int(4));
    assert_eq!(rows[2][&Attribute::Size], Scalar::Int(2));
}

#[test]
fn test_mode_is_dir() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name, mode FROM {} WHERE mode IS DIR",
        root.display()
    ));

    assert_eq!(rows.len(), 8);
    for row in &rows {
        assert!(row[&Attribute::Mode].to_string().starts_with('d'));
    }
}

#[test]
fn test_rlike_anchored_pattern() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {} WHERE name RLIKE ^g.*",
        root.display()
    ));
    assert_eq!(names(&rows), ["garply", "grault"]);
}

#[test]
fn test_excluded_source_prunes_subtree() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {root}, -{root}/bar WHERE mode IS DIR",
        root = root.display()
    ));
    assert_eq!(names(&rows), ["testdata", "foo", "quuz", "fred"]);
}

#[test]
fn test_overlapping_sources_deduplicate() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {root}, {root}/foo WHERE name = waldo",
        root = root.display()
    ));
    assert_eq!(names(&rows), ["waldo"]);
}

#[test]
fn test_aliased_source_executes() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {} AS data WHERE name = baz",
        root.display()
    ));
    assert_eq!(names(&rows), ["baz"]);
}

#[test]
fn test_in_list() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {} WHERE name IN [baz, waldo]",
        root.display()
    ));
    assert_eq!(names(&rows), ["baz", "waldo"]);
}

#[test]
fn test_in_subquery() {
    let (_dir, root) = fixture();
    fs::write(root.join("bar/waldo"), "waldo!").unwrap();

    let rows = rows_for(&format!(
        "SELECT name FROM {root}/foo WHERE name IN (SELECT name FROM {root}/bar WHERE mode IS reg)",
        root = root.display()
    ));
    assert_eq!(names(&rows), ["waldo"]);
}

#[test]
fn test_negated_condition() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {}/foo WHERE NOT name LIKE qu",
        root.display()
    ));
    assert_eq!(names(&rows), ["foo", "fred", ".gitkeep", "waldo"]);
}

#[test]
fn test_parenthesized_tree() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {} WHERE mode IS reg AND (name = baz OR name = waldo)",
        root.display()
    ));
    assert_eq!(names(&rows), ["baz", "waldo"]);
}

#[test]
fn test_upper_modifier() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT upper(name) FROM {} WHERE name = baz",
        root.display()
    ));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][&Attribute::Name], Scalar::Str(String::from("BAZ")));
}

#[test]
fn test_fullpath_modifier() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT fullpath(name) FROM {} WHERE name = baz",
        root.display()
    ));
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0][&Attribute::Name],
        Scalar::Str(root.join("baz").to_string_lossy().into_owned())
    );
}

#[test]
fn test_format_size_modifier() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT format(size, kb) FROM {} WHERE name = baz",
        root.display()
    ));
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0][&Attribute::Size],
        Scalar::Str(String::from("0.000000kb"))
    );
}

#[test]
fn test_time_comparison_matches_everything() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT name FROM {} WHERE time > 'Jan 01 2020 00 00'",
        root.display()
    ));
    assert_eq!(rows.len(), 14);
}

#[test]
fn test_hash_of_empty_file() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT hash FROM {} WHERE name = baz",
        root.display()
    ));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][&Attribute::Hash], Scalar::Str(String::from("da39a3e")));
}

#[test]
fn test_hash_prefix_condition() {
    let (_dir, root) = fixture();

    // baz and .gitkeep are both empty, so they share a digest.
    let rows = rows_for(&format!(
        "SELECT name FROM {} WHERE hash = da39a3e",
        root.display()
    ));
    assert_eq!(names(&rows), ["baz", ".gitkeep"]);
}

#[test]
fn test_hash_of_directory_is_placeholder() {
    let (_dir, root) = fixture();

    let rows = rows_for(&format!(
        "SELECT hash FROM {} WHERE name = foo",
        root.display()
    ));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][&Attribute::Hash], Scalar::Str(String::from("-------")));
}

#[test]
fn test_run_with_writer_output() {
    let (_dir, root) = fixture();

    let mut out = Vec::new();
    fsq::run_with_writer(
        &format!("SELECT name, size FROM {} WHERE name = baz", root.display()),
        &mut out,
    )
    .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "baz\t0\n");
}
