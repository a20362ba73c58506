//! Lazy scanner that turns query text into a token stream.

use super::token::{Token, TokenKind};

/// Characters that end a bare word. Operators like `=` and `>` only act as
/// punctuation at the start of a token, so paths such as `foo-bar` or words
/// containing `=` survive as single identifiers.
fn is_word_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '\'' | '"' | '`' | '(' | ')' | '[' | ']')
}

/// A lazy tokenizer over a query string.
///
/// Two pieces of context feed back into scanning: the kinds of the two most
/// recently emitted tokens. `IN (` switches the next word into subquery
/// capture, and `IN [` switches `[` into bracket-list capture.
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    prev: [Option<TokenKind>; 2],
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Tokenizer {
            input: input.chars().collect(),
            position: 0,
            prev: [None, None],
        }
    }

    /// Scans and returns the next token, or `None` at end of input.
    pub fn next(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let c = self.current()?;

        match c {
            '(' => {
                self.advance();
                self.emit(TokenKind::OpenParen, "(")
            }
            ')' => {
                self.advance();
                self.emit(TokenKind::CloseParen, ")")
            }
            ',' => {
                self.advance();
                self.emit(TokenKind::Comma, ",")
            }
            '-' => {
                self.advance();
                self.emit(TokenKind::Hyphen, "-")
            }
            '=' => {
                self.advance();
                self.emit(TokenKind::Equals, "=")
            }
            '>' => {
                self.advance();
                if self.current() == Some('=') {
                    self.advance();
                    self.emit(TokenKind::GreaterThanEquals, ">=")
                } else {
                    self.emit(TokenKind::GreaterThan, ">")
                }
            }
            '<' => {
                self.advance();
                match self.current() {
                    Some('=') => {
                        self.advance();
                        self.emit(TokenKind::LessThanEquals, "<=")
                    }
                    Some('>') => {
                        self.advance();
                        self.emit(TokenKind::NotEquals, "<>")
                    }
                    _ => self.emit(TokenKind::LessThan, "<"),
                }
            }
            '!' => {
                self.advance();
                if self.current() == Some('=') {
                    self.advance();
                    self.emit(TokenKind::NotEquals, "!=")
                } else {
                    self.emit(TokenKind::ExclamationMark, "!")
                }
            }
            '[' => {
                self.advance();
                if self.prev[0] == Some(TokenKind::In) {
                    // `IN [a, b, c]` collapses to one identifier holding a
                    // comma-joined list; the parser splits it back apart.
                    let raw = self.read_list();
                    self.emit(TokenKind::Identifier, raw)
                } else {
                    self.emit(TokenKind::OpenBracket, "[")
                }
            }
            ']' => {
                self.advance();
                self.emit(TokenKind::CloseBracket, "]")
            }
            '\'' | '"' | '`' => {
                self.advance();
                let raw = self.read_quoted(c);
                self.emit(TokenKind::Identifier, raw)
            }
            _ => {
                let word = self.read_word();
                if self.prev[0] == Some(TokenKind::OpenParen) && self.prev[1] == Some(TokenKind::In)
                {
                    // The two previous tokens were `IN` and `(`: this word
                    // starts a subquery. Capture the full inner text; the
                    // closing paren is left for the next call.
                    let rest = self.read_subquery();
                    let raw = if rest.is_empty() {
                        word
                    } else {
                        format!("{} {}", word, rest)
                    };
                    return self.emit(TokenKind::Subquery, raw);
                }
                match TokenKind::from_keyword(&word) {
                    Some(kind) => self.emit(kind, word),
                    None => self.emit(TokenKind::Identifier, word),
                }
            }
        }
    }

    /// Scans the remaining input and returns every token.
    pub fn all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next() {
            tokens.push(token);
        }
        tokens
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn emit(&mut self, kind: TokenKind, raw: impl Into<String>) -> Option<Token> {
        self.prev = [Some(kind), self.prev[0]];
        Some(Token::new(kind, raw))
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.current() {
            if is_word_terminator(c) {
                break;
            }
            word.push(c);
            self.advance();
        }
        word
    }

    /// Reads a quoted literal up to the matching closing quote (or end of
    /// input). Runs of internal whitespace collapse to a single space; no
    /// escape sequences are interpreted.
    fn read_quoted(&mut self, quote: char) -> String {
        let mut raw = String::new();
        let mut pending_space = false;
        while let Some(c) = self.current() {
            if c == quote {
                self.advance();
                break;
            }
            if c.is_whitespace() {
                pending_space = true;
            } else {
                if pending_space {
                    raw.push(' ');
                    pending_space = false;
                }
                raw.push(c);
            }
            self.advance();
        }
        if pending_space {
            raw.push(' ');
        }
        raw
    }

    /// Reads a bracket list, returning its words comma-joined. Both commas
    /// and bare whitespace separate elements.
    fn read_list(&mut self) -> String {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            items.push(self.read_word());
            match self.current() {
                Some(']') => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
                None => break,
            }
        }
        items.join(",")
    }

    /// Reads subquery text up to the parenthesis matching the one already
    /// emitted, collapsing whitespace runs. The closing paren is not
    /// consumed.
    fn read_subquery(&mut self) -> String {
        let mut raw = String::new();
        let mut depth = 1u32;
        while let Some(c) = self.current() {
            if c == '(' {
                depth += 1;
            } else if c == ')' {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            if c.is_whitespace() {
                if !raw.ends_with(' ') {
                    raw.push(' ');
                }
            } else {
                raw.push(c);
            }
            self.advance();
        }
        raw.trim().to_string()
    }
}
