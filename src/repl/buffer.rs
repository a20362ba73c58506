//! Statement accumulation for the interactive shell.

/// Accumulates input lines into statements.
///
/// A `;` ends a statement only at nesting depth zero: semicolons inside
/// parens, brackets, or quoted strings stay part of the statement. Text
/// after a terminating `;` begins the next statement.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    buffer: String,
    /// Combined `(` and `[` nesting depth, ignoring quoted text.
    depth: usize,
    /// The opening quote character, while inside a quoted string.
    quote: Option<char>,
}

impl StatementBuffer {
    pub fn new() -> StatementBuffer {
        StatementBuffer::default()
    }

    /// True when no statement is in progress.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops the statement in progress.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.depth = 0;
        self.quote = None;
    }

    /// Adds one input line and returns the statements it completed, in
    /// order. Lines joining a statement in progress are separated by a
    /// single space, which also lands inside any quoted string spanning
    /// lines.
    pub fn push_line(&mut self, line: &str) -> Vec<String> {
        let mut completed = Vec::new();

        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }

        for c in line.chars() {
            match self.quote {
                Some(quote) => {
                    self.buffer.push(c);
                    if c == quote {
                        self.quote = None;
                    }
                }
                None => match c {
                    '\'' | '"' | '`' => {
                        self.quote = Some(c);
                        self.buffer.push(c);
                    }
                    '(' | '[' => {
                        self.depth += 1;
                        self.buffer.push(c);
                    }
                    ')' | ']' => {
                        self.depth = self.depth.saturating_sub(1);
                        self.buffer.push(c);
                    }
                    ';' if self.depth == 0 => {
                        let statement = self.buffer.trim().to_string();
                        self.buffer.clear();
                        if !statement.is_empty() {
                            completed.push(statement);
                        }
                    }
                    _ => self.buffer.push(c),
                },
            }
        }

        if self.buffer.trim().is_empty() {
            self.buffer.clear();
        }
        completed
    }
}
