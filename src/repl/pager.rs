//! Result paging through an external pager process.

use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Pager binaries to try, in order.
const PAGERS: [&str; 2] = ["less", "more"];

/// Pipes `text` through the first pager that launches, inheriting the
/// terminal for output. Returns false when no pager could be started, in
/// which case the caller prints directly.
pub fn page(text: &str) -> io::Result<bool> {
    for pager in PAGERS {
        let mut child = match Command::new(pager).stdin(Stdio::piped()).spawn() {
            Ok(child) => child,
            Err(_) => continue,
        };
        if let Some(mut stdin) = child.stdin.take() {
            // The pager may quit before reading everything.
            let _ = stdin.write_all(text.as_bytes());
        }
        child.wait()?;
        return Ok(true);
    }
    Ok(false)
}
