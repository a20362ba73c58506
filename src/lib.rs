//! Query the filesystem with a small SQL dialect.
//!
//! A query string such as `SELECT name, size FROM . WHERE size > 1mb` is
//! tokenized and parsed into a [`query::Query`], which walks its sources and
//! yields one row per matching file. [`run`] is the whole pipeline: parse,
//! execute, render.

use std::io::{self, Write};

pub mod evaluate;
pub mod parser;
pub mod query;
pub mod repl;
pub mod tokenizer;
pub mod transform;
pub mod walk;

use thiserror::Error;

use query::Attribute;

/// Every way a query can fail, end to end.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] parser::ParseError),

    #[error("Evaluate error: {0}")]
    Evaluate(#[from] evaluate::EvaluateError),

    #[error("Transform error: {0}")]
    Transform(#[from] transform::TransformError),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses and executes `input`, printing rows to stdout.
pub fn run(input: &str) -> Result<()> {
    let stdout = io::stdout();
    run_with_writer(input, &mut stdout.lock())
}

/// Parses and executes `input`, writing one tab-separated line per matching
/// file with columns in SELECT order. Rows are buffered so the name column
/// can be left-justified to the longest name.
pub fn run_with_writer(input: &str, out: &mut impl Write) -> Result<()> {
    let mut query = parser::run(input)?;
    let rows = query.execute()?;

    let width = if query.has_attribute(Attribute::Name) {
        rows.iter()
            .filter_map(|row| row.get(&Attribute::Name))
            .map(|name| name.to_string().chars().count())
            .max()
            .unwrap_or(0)
    } else {
        0
    };

    for row in &rows {
        for (i, attribute) in query.attributes.iter().enumerate() {
            if i > 0 {
                write!(out, "\t")?;
            }
            match row.get(attribute) {
                Some(value) if *attribute == Attribute::Name => {
                    write!(out, "{:<width$}", value.to_string())?;
                }
                Some(value) => write!(out, "{value}")?,
                None => {}
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_run_writes_padded_columns() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::write(root.join("longer-name.txt"), "beta!").unwrap();

        let input = format!("SELECT name, size FROM {} WHERE mode IS reg", root.display());
        let mut out = Vec::new();
        run_with_writer(&input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "a.txt          \t5\nlonger-name.txt\t5\n");
    }

    #[test]
    fn test_run_without_name_column() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "alpha").unwrap();

        let input = format!("SELECT size FROM {} WHERE name = a.txt", root.display());
        let mut out = Vec::new();
        run_with_writer(&input, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "5\n");
    }

    #[test]
    fn test_run_surfaces_parse_errors() {
        let err = run_with_writer("SELECT name FROM", &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Parse error: unexpected EOF");
    }
}
