//! Source exclusion matching.

use std::path::Path;

use regex::Regex;

/// Matches paths against the query's excluded sources.
///
/// Each exclusion matches itself and everything beneath it, so `.git` also
/// excludes `.git/objects/ab`. An empty exclusion list matches nothing.
#[derive(Debug)]
pub struct Excluder {
    regex: Option<Regex>,
}

impl Excluder {
    pub fn new(exclusions: &[String]) -> Self {
        if exclusions.is_empty() {
            return Excluder { regex: None };
        }
        let pattern = exclusions
            .iter()
            .map(|exclusion| {
                format!(
                    "^{}(/.*)?$",
                    regex::escape(exclusion.trim_end_matches('/'))
                )
            })
            .collect::<Vec<_>>()
            .join("|");
        // Escaped literals always compile.
        Excluder {
            regex: Regex::new(&pattern).ok(),
        }
    }

    pub fn excludes(&self, path: &Path) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(&path.to_string_lossy()),
            None => false,
        }
    }
}
