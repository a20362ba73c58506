//! Interactive shell.
//!
//! Reads statements terminated by `;` across as many lines as needed, runs
//! each through [`crate::run_with_writer`], and prints or pages the result.
//! Query errors are reported inline and the session continues.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod buffer;
pub mod pager;

pub use buffer::StatementBuffer;

const PROMPT: &str = "fsq> ";
const CONTINUATION: &str = "...> ";

/// Output taller than this goes through the pager.
const PAGE_THRESHOLD: usize = 40;

/// Runs the shell until end of input or `exit`.
pub fn start() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut buffer = StatementBuffer::new();

    loop {
        let prompt = if buffer.is_empty() { PROMPT } else { CONTINUATION };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C drops the statement in progress, not the session.
                buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        };

        if buffer.is_empty() && line.trim() == "exit" {
            break;
        }

        for statement in buffer.push_line(&line) {
            let _ = editor.add_history_entry(&statement);
            execute(&statement);
        }
    }

    println!("bye");
    Ok(())
}

/// Runs one statement, printing short output directly and paging anything
/// taller than the threshold.
fn execute(statement: &str) {
    log::debug!("statement: {statement}");

    let mut out = Vec::new();
    if let Err(err) = crate::run_with_writer(statement, &mut out) {
        eprintln!("{err}");
        return;
    }
    let out = String::from_utf8_lossy(&out);
    if out.is_empty() {
        return;
    }

    if out.lines().count() > PAGE_THRESHOLD {
        match pager::page(&out) {
            Ok(true) => return,
            Ok(false) => {}
            Err(err) => eprintln!("{err}"),
        }
    }
    print!("{out}");
}
