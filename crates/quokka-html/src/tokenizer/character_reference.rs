//! Character reference resolution.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Called from the data, RCDATA and attribute value states after a consumed
//! `&`. The resolver returns the replacement text to append; when the input
//! turns out not to be a reference after all, it restores the cursor with an
//! absolute seek (step counts are non-uniform under CR LF normalization) and
//! returns a literal `&`.

use super::chars;
use super::core::HtmlTokenizer;
use super::entities;
use super::error::{ErrorCode, ParseError};

impl HtmlTokenizer {
    /// Resolve a character reference after a consumed `&`.
    ///
    /// `allowed` is the "additional allowed character" of the calling
    /// attribute value state: the closing quote for quoted values, `>` for
    /// unquoted values, `None` outside attributes. Seeing it (or whitespace,
    /// `<`, `&`, end of input) directly after the `&` means there is no
    /// reference here, and the `&` stands for itself without error.
    pub(super) fn consume_character_reference(
        &mut self,
        allowed: Option<char>,
    ) -> Result<String, ParseError> {
        match self.source.current() {
            None => Ok(String::from("&")),
            Some(c) if chars::is_space(c) || c == '\r' || c == '<' || c == '&' => {
                Ok(String::from("&"))
            }
            Some(c) if Some(c) == allowed => Ok(String::from("&")),
            Some('#') => self.numeric_character_reference(),
            _ => self.named_character_reference(allowed),
        }
    }

    /// [§ 13.2.5.75-80 Numeric character reference states](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    ///
    /// Accepts `#` digits or `#x`/`#X` hex digits. With no digits at all the
    /// consumed `#` (and `x`) are restored and the `&` becomes literal text.
    fn numeric_character_reference(&mut self) -> Result<String, ParseError> {
        let mark = self.source.index();
        self.advance(); // '#'
        let hex = matches!(self.source.current(), Some('x' | 'X'));
        if hex {
            self.advance();
        }
        let radix = if hex { 16 } else { 10 };
        let mut value: u32 = 0;
        let mut digits = 0usize;
        while let Some(digit) = self.source.current().and_then(|c| c.to_digit(radix)) {
            self.advance();
            digits += 1;
            // Saturate: anything past U+10FFFF is equally invalid.
            value = value.saturating_mul(radix).saturating_add(digit);
        }
        if digits == 0 {
            self.report(ErrorCode::CharacterReferenceWrongNumber)?;
            self.seek(mark);
            return Ok(String::from("&"));
        }
        if self.source.current() == Some(';') {
            self.advance();
        } else {
            // The terminator stays unconsumed for the caller to re-read.
            self.report(ErrorCode::CharacterReferenceSemicolonMissing)?;
        }
        if let Some(replacement) = entities::windows_1252_remap(value) {
            self.report(ErrorCode::CharacterReferenceInvalidCode)?;
            return Ok(replacement.to_string());
        }
        if entities::is_invalid_number(value) {
            self.report(ErrorCode::CharacterReferenceInvalidNumber)?;
            return Ok(String::from('\u{FFFD}'));
        }
        if entities::is_invalid_range(value) {
            self.report(ErrorCode::CharacterReferenceInvalidRange)?;
        }
        Ok(char::from_u32(value).unwrap_or('\u{FFFD}').to_string())
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// Buffers up to 31 name characters (plus a terminating `;`), then looks
    /// up the longest prefix known to the entity table, giving back the
    /// unmatched tail. A full miss restores the cursor to just after the `&`.
    fn named_character_reference(&mut self, allowed: Option<char>) -> Result<String, ParseError> {
        let mark = self.source.index();
        let mut name = String::new();
        while name.len() < 31 {
            match self.source.current() {
                Some(c) if chars::is_entity_name(c) => {
                    self.advance();
                    name.push(c);
                }
                _ => break,
            }
        }
        if self.source.current() == Some(';') {
            self.advance();
            name.push(';');
        }

        let mut length = name.len();
        let mut resolved = None;
        while length > 0 {
            if let Some(value) = entities::lookup(&name[..length]) {
                resolved = Some(value);
                break;
            }
            length -= 1;
        }
        let Some(value) = resolved else {
            self.seek(mark);
            return Ok(String::from("&"));
        };
        // Give back whatever the longest match did not cover. Name
        // characters are ASCII, so byte length equals character count.
        self.seek(mark + length);

        if !name[..length].ends_with(';') {
            if allowed.is_some() {
                // Legacy attribute values: "&amp=x" and "&ampy" keep their
                // literal ampersand so pre-reference URLs survive.
                match self.source.current() {
                    Some('=') => {
                        self.report(ErrorCode::CharacterReferenceAttributeEqualsFound)?;
                        self.seek(mark);
                        return Ok(String::from("&"));
                    }
                    Some(c) if c.is_ascii_alphanumeric() => {
                        self.seek(mark);
                        return Ok(String::from("&"));
                    }
                    _ => {}
                }
            }
            self.report(ErrorCode::CharacterReferenceNotTerminated)?;
        }
        Ok(value.to_string())
    }
}
