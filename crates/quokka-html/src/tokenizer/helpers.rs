//! Helper methods for the tokenizer state machine.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains the machinery shared by all states:
//! - Input handling ("Consume the next input character") with CR/CR LF
//!   normalization and exact back-stepping
//! - Lookahead ("If the next few characters are...")
//! - Text accumulation and token emission ordering
//! - Parse error routing (observer vs. strict mode)

use super::chars;
use super::core::HtmlTokenizer;
use super::error::{ErrorCode, ParseError};
use super::source::Position;
use super::token::Token;

// =============================================================================
// Input and position handling
// =============================================================================

impl HtmlTokenizer {
    /// The position of the next character to be consumed.
    pub(super) fn here(&self) -> Position {
        self.tracker.position(self.source.index())
    }

    /// "Consume the next input character."
    ///
    /// A raw CR is reported as LF; a CR immediately followed by LF absorbs
    /// the LF, so the state machine only ever sees `\n` newlines.
    pub(super) fn advance(&mut self) -> Option<char> {
        let mut c = self.source.read()?;
        if c == '\r' {
            if self.source.current() == Some('\n') {
                self.source.read();
            }
            c = '\n';
        }
        self.tracker.advance(c);
        Some(c)
    }

    /// Step back `n` logical characters.
    ///
    /// Stepping back across the LF of a CR LF pair consumes one raw position
    /// (the pair's second half); a further step crosses the CR without
    /// touching the line accounting again. This keeps positions identical to
    /// what a forward traversal from the start would report.
    pub(super) fn back(&mut self, n: usize) {
        for _ in 0..n {
            self.back_one();
        }
    }

    fn back_one(&mut self) {
        if self.source.index() == 0 {
            return;
        }
        self.source.back(1);
        let i = self.source.index();
        let raw = self.source[i];
        let followed_by_lf = i + 1 < self.source.len() && self.source[i + 1] == '\n';
        match raw {
            '\n' => self.tracker.retreat('\n'),
            // The CR half of a CR LF pair: the LF already undid the line.
            '\r' if followed_by_lf => {}
            '\r' => self.tracker.retreat('\n'),
            c => self.tracker.retreat(c),
        }
    }

    /// Restore the cursor to an absolute index previously read from the
    /// source, stepping so that line/column state stays exact. Used by the
    /// character reference back-off, where step counts are non-uniform.
    pub(super) fn seek(&mut self, index: usize) {
        while self.source.index() > index {
            self.back_one();
        }
        while self.source.index() < index {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Consume `n` characters whose values the caller has already matched.
    pub(super) fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// "If the next few characters are..." (case-sensitive lookahead).
    /// Never moves the cursor.
    pub(super) fn continues_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, p)| self.source.peek_at(i) == Some(p))
    }

    /// ASCII case-insensitive variant, for the `doctype`, `PUBLIC` and
    /// `SYSTEM` keywords. The `CDATA` sentinel must NOT use this.
    pub(super) fn continues_with_insensitive(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, p)| self.source.peek_at(i).is_some_and(|c| c.eq_ignore_ascii_case(&p)))
    }

    /// Whether the next character ends a candidate tag name: whitespace
    /// (including a not-yet-normalized CR), `/` or `>`.
    pub(super) fn next_is_tag_terminator(&self) -> bool {
        matches!(self.source.current(), Some(c) if chars::is_space(c) || c == '\r' || c == '/' || c == '>')
    }
}

// =============================================================================
// Text accumulation and emission
// =============================================================================

impl HtmlTokenizer {
    /// Append one character to the buffered text run, recording where the
    /// run began.
    pub(super) fn append(&mut self, start: Position, c: char) {
        if self.buffer.is_empty() {
            self.text_start = start;
        }
        self.buffer.push(c);
    }

    /// Append a resolved character reference (or restored literal) to the
    /// buffered text run.
    pub(super) fn append_str(&mut self, start: Position, s: &str) {
        if s.is_empty() {
            return;
        }
        if self.buffer.is_empty() {
            self.text_start = start;
        }
        self.buffer.push_str(s);
    }

    /// Turn the buffered text run into a token. The buffer keeps its
    /// capacity for the next run.
    fn take_text(&mut self) -> Token {
        let token = Token::text(self.text_start, self.buffer.clone());
        self.buffer.clear();
        token
    }

    /// Deliver a completed structural token, emitting any buffered text
    /// first. The structural token is parked and becomes the next call's
    /// result, so no token is ever emitted while the string buffer holds
    /// unassigned content.
    pub(super) fn hold(&mut self, token: Token) -> Token {
        if self.buffer.is_empty() {
            token
        } else {
            let text = self.take_text();
            self.pending = Some(token);
            text
        }
    }

    /// At end of input: flush the buffered text if any, otherwise produce
    /// the end-of-file token.
    pub(super) fn flush_or_end_of_file(&mut self) -> Token {
        if self.buffer.is_empty() {
            Token::end_of_file(self.here())
        } else {
            self.take_text()
        }
    }
}

// =============================================================================
// Error routing
// =============================================================================

impl HtmlTokenizer {
    /// Route a recoverable parse error: delivered to the observer in
    /// tolerant mode, returned as fatal in strict mode. Errors never change
    /// which token is emitted.
    pub(super) fn report(&mut self, code: ErrorCode) -> Result<(), ParseError> {
        let error = ParseError {
            code,
            position: self.here(),
        };
        if self.strict {
            return Err(error);
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&error);
        }
        Ok(())
    }
}
