//! The typed query model and its execution engine.
//!
//! A parsed query holds the selected attributes with their display modifiers,
//! the sources to walk, and an optional condition tree. Executing a query
//! walks every included source, prunes excluded paths, and produces one row
//! per file that passes the condition tree.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod condition;
pub mod excluder;
pub mod modifier;
pub mod value;

pub use condition::{Condition, ConditionNode};
pub use excluder::Excluder;
pub use modifier::Modifier;
pub use value::{Attribute, Scalar, Value};

use crate::transform::format;
use crate::walk::{self, FileInfo};
use crate::Result;

/// One result row, keyed by the selected attributes.
pub type Row = HashMap<Attribute, Scalar>;

/// Included and excluded directories from the FROM clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sources {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// A parsed query, ready to execute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Selected attributes, in SELECT order, deduplicated.
    pub attributes: Vec<Attribute>,
    /// Display modifier chains per attribute, innermost first.
    pub modifiers: HashMap<Attribute, Vec<Modifier>>,
    pub sources: Sources,
    /// Alias to source directory, from `FROM path AS alias`.
    pub source_aliases: HashMap<String, String>,
    pub condition: Option<ConditionNode>,
}

impl Query {
    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Walks every included source and returns a row for each file that
    /// passes the condition tree.
    ///
    /// Sources share one seen set, so overlapping sources yield a file once.
    /// The first walk or evaluation error aborts the query.
    pub fn execute(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let excluder = Excluder::new(&self.sources.exclude);

        for source in &self.sources.include {
            log::debug!("walking {source}");
            for entry in walk::entries(source, |path| excluder.excludes(path)) {
                let info = entry?;
                if info.path == Path::new(".") {
                    continue;
                }
                if !seen.insert(info.path.clone()) {
                    continue;
                }
                if let Some(tree) = self.condition.as_mut() {
                    if !tree.evaluate(&info)? {
                        continue;
                    }
                }
                rows.push(row(&self.attributes, &self.modifiers, &info)?);
            }
        }
        Ok(rows)
    }
}

fn row(
    attributes: &[Attribute],
    modifiers: &HashMap<Attribute, Vec<Modifier>>,
    info: &FileInfo,
) -> Result<Row> {
    let mut row = Row::new();
    for &attribute in attributes {
        let mut value = format::default_value(attribute, info)?;
        if let Some(chain) = modifiers.get(&attribute) {
            for modifier in chain {
                value = format::apply(info, attribute, modifier, value)?;
            }
        }
        row.insert(attribute, value);
    }
    Ok(row)
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        for (i, attribute) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.modifiers.get(attribute) {
                Some(chain) => write!(f, "{}", modifier::wrap(&attribute.to_string(), chain))?,
                None => write!(f, "{attribute}")?,
            }
        }
        write!(f, " FROM ")?;
        let mut first = true;
        for source in &self.sources.include {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match self.source_aliases.iter().find(|(_, path)| *path == source) {
                Some((alias, _)) => write!(f, "{source} AS {alias}")?,
                None => write!(f, "{source}")?,
            }
        }
        for source in &self.sources.exclude {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "-{source}")?;
        }
        if let Some(tree) = &self.condition {
            write!(f, " WHERE {tree}")?;
        }
        Ok(())
    }
}
