//! Script data states.
//!
//! [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
//!
//! Script content layers a second state machine on top of plain raw text:
//! `<!--` enters an *escaped* layer where `-->` returns to normal, and while
//! escaped, an inner `<script` (terminated like a tag name) enters a
//! *double-escaped* layer where even `</script` is character data and only
//! exits back to the escaped layer. The same "appropriate end tag"
//! recognizer as RCDATA/RAWTEXT decides when `</script>` really closes the
//! element. This is what makes `var a = "</b>";` come out as one literal
//! text run.

use super::core::HtmlTokenizer;
use super::error::{ErrorCode, ParseError};
use super::source::Position;
use super::token::Token;

/// The escape layering. `dashes` tracking lives in the loop: `>` only
/// unescapes directly after at least two dashes.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ScriptLayer {
    Normal,
    Escaped,
    DoubleEscaped,
}

impl HtmlTokenizer {
    pub(super) fn script_data(&mut self) -> Result<Token, ParseError> {
        let mut layer = ScriptLayer::Normal;
        let mut dashes = 0u8;
        loop {
            let start = self.here();
            match self.advance() {
                Some('-') if layer != ScriptLayer::Normal => {
                    self.append(start, '-');
                    if dashes < 2 {
                        dashes += 1;
                    }
                }
                // "-->" leaves the escaped (or double-escaped) layer.
                Some('>') if layer != ScriptLayer::Normal && dashes >= 2 => {
                    self.append(start, '>');
                    layer = ScriptLayer::Normal;
                    dashes = 0;
                }
                Some('<') => {
                    dashes = 0;
                    match layer {
                        ScriptLayer::Normal => {
                            if self.source.current() == Some('!') {
                                // Escape start: "<!" followed by "--" arms
                                // the escaped layer; fewer dashes stay normal.
                                self.append(start, '<');
                                self.advance();
                                self.append(start, '!');
                                let mut entry = 0;
                                while entry < 2 && self.source.current() == Some('-') {
                                    self.advance();
                                    self.append(start, '-');
                                    entry += 1;
                                }
                                if entry == 2 {
                                    layer = ScriptLayer::Escaped;
                                    dashes = 2;
                                }
                            } else if let Some(token) = self.content_end_tag(start)? {
                                return Ok(self.hold(token));
                            }
                        }
                        ScriptLayer::Escaped => match self.source.current() {
                            // "</script>" still closes the element from the
                            // escaped layer.
                            Some('/') => {
                                if let Some(token) = self.content_end_tag(start)? {
                                    return Ok(self.hold(token));
                                }
                            }
                            // "<script" (terminated like a tag name) enters
                            // the double-escaped layer; the characters are
                            // all emitted as text either way.
                            Some(c) if c.is_ascii_alphabetic() => {
                                self.append(start, '<');
                                let name = self.consume_text_tag_name(start);
                                if self.next_is_tag_terminator() {
                                    if let Some(terminator) = self.advance() {
                                        self.append(start, terminator);
                                    }
                                    if name == "script" {
                                        layer = ScriptLayer::DoubleEscaped;
                                    }
                                }
                            }
                            _ => self.append(start, '<'),
                        },
                        ScriptLayer::DoubleEscaped => {
                            self.append(start, '<');
                            // "</script" (as text) steps back out to the
                            // escaped layer.
                            if self.source.current() == Some('/') {
                                self.advance();
                                self.append(start, '/');
                                let name = self.consume_text_tag_name(start);
                                if self.next_is_tag_terminator() {
                                    if let Some(terminator) = self.advance() {
                                        self.append(start, terminator);
                                    }
                                    if name == "script" {
                                        layer = ScriptLayer::Escaped;
                                    }
                                }
                            }
                        }
                    }
                }
                Some('\0') => {
                    dashes = 0;
                    self.report(ErrorCode::Null)?;
                    self.append(start, '\u{FFFD}');
                }
                Some(c) => {
                    dashes = 0;
                    self.append(start, c);
                }
                None => {
                    // Only an unbalanced escape construct makes this an error.
                    if layer != ScriptLayer::Normal {
                        self.report(ErrorCode::Eof)?;
                    }
                    return Ok(self.flush_or_end_of_file());
                }
            }
        }
    }

    /// Consume a run of ASCII letters that is character data either way,
    /// returning it lowercased for the `script` comparison.
    fn consume_text_tag_name(&mut self, start: Position) -> String {
        let mut name = String::new();
        while let Some(c) = self.source.current() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            self.advance();
            self.append(start, c);
            name.push(c.to_ascii_lowercase());
        }
        name
    }
}
