//! Modifier applications attached to attributes.

use std::fmt;

/// One value-transforming function application, e.g. the `FORMAT(size, mb)`
/// in `SELECT FORMAT(size, mb) FROM .`.
///
/// Names are stored uppercase; arguments keep the spelling they were written
/// with. A chain of modifiers is ordered innermost-first, which is also
/// application order.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub name: String,
    pub arguments: Vec<String>,
}

impl Modifier {
    pub fn new(name: &str) -> Self {
        Modifier {
            name: name.to_uppercase(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(name: &str, arguments: Vec<String>) -> Self {
        Modifier {
            name: name.to_uppercase(),
            arguments,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arguments.join(", "))
    }
}

/// Renders a modifier chain wrapped around `inner`, innermost first, so
/// `[UPPER, FORMAT(len)]` around `name` gives `FORMAT(UPPER(name), len)`.
pub(crate) fn wrap(inner: &str, modifiers: &[Modifier]) -> String {
    let mut rendered = inner.to_string();
    for modifier in modifiers {
        rendered = if modifier.arguments.is_empty() {
            format!("{}({})", modifier.name, rendered)
        } else {
            format!(
                "{}({}, {})",
                modifier.name,
                rendered,
                modifier.arguments.join(", ")
            )
        };
    }
    rendered
}
