//! DOCTYPE states.
//!
//! [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//!
//! The doctype grammar is `<!doctype NAME [PUBLIC "…" ["…"] | SYSTEM "…"]>`
//! with case-insensitive keywords and matching `"`/`'` identifier quotes.
//! Any deviation sets the force-quirks flag, and most of them additionally
//! route into the bogus doctype state, which skips to `>` or end of input.
//! End of input anywhere in here is recoverable: the partial token is
//! emitted with quirks forced.

use super::chars;
use super::core::HtmlTokenizer;
use super::error::{ErrorCode, ParseError};
use super::source::Position;
use super::token::Token;

impl HtmlTokenizer {
    /// Entry point, reached after the `doctype` keyword.
    pub(super) fn doctype(&mut self, start: Position) -> Result<Token, ParseError> {
        let mut token = Token::doctype(start);
        match self.advance() {
            Some(c) if chars::is_space(c) => {}
            // ">" is handled by the name state; reconsume.
            Some('>') => self.back(1),
            None => {
                self.report(ErrorCode::Eof)?;
                token.set_force_quirks();
                return Ok(token);
            }
            Some(_) => {
                self.report(ErrorCode::DoctypeUnexpected)?;
                self.back(1);
            }
        }
        self.doctype_name_before(token)
    }

    fn doctype_name_before(&mut self, mut token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('>') => {
                    self.report(ErrorCode::TagClosedWrong)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    token.append_to_doctype_name('\u{FFFD}');
                    return self.doctype_name(token);
                }
                Some(c) => {
                    token.append_to_doctype_name(c.to_ascii_lowercase());
                    return self.doctype_name(token);
                }
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
            }
        }
    }

    fn doctype_name(&mut self, mut token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => return self.doctype_name_after(token),
                Some('>') => return Ok(token),
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    token.append_to_doctype_name('\u{FFFD}');
                }
                Some(c) => token.append_to_doctype_name(c.to_ascii_lowercase()),
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
            }
        }
    }

    /// After the name: either the tag closes, or one of the identifier
    /// keywords follows.
    fn doctype_name_after(&mut self, mut token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('>') => return Ok(token),
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some(c) => {
                    if matches!(c, 'p' | 'P') && self.continues_with_insensitive("ublic") {
                        self.skip(5);
                        return self.doctype_public(token);
                    }
                    if matches!(c, 's' | 'S') && self.continues_with_insensitive("ystem") {
                        self.skip(5);
                        return self.doctype_system(token);
                    }
                    self.report(ErrorCode::DoctypeUnexpectedAfterName)?;
                    token.set_force_quirks();
                    return self.bogus_doctype(token);
                }
            }
        }
    }

    /// After the `PUBLIC` keyword. A quote directly after the keyword is
    /// tolerated with a quotation-mark error.
    fn doctype_public(&mut self, mut token: Token) -> Result<Token, ParseError> {
        match self.advance() {
            Some(c) if chars::is_space(c) => self.doctype_public_identifier_before(token),
            Some('"') => {
                self.report(ErrorCode::DoubleQuotationMarkUnexpected)?;
                token.start_public_identifier();
                self.doctype_public_identifier(token, '"')
            }
            Some('\'') => {
                self.report(ErrorCode::SingleQuotationMarkUnexpected)?;
                token.start_public_identifier();
                self.doctype_public_identifier(token, '\'')
            }
            Some('>') => {
                self.report(ErrorCode::TagClosedWrong)?;
                token.set_force_quirks();
                Ok(token)
            }
            None => {
                self.report(ErrorCode::Eof)?;
                token.set_force_quirks();
                Ok(token)
            }
            Some(_) => {
                self.report(ErrorCode::DoctypePublicInvalid)?;
                token.set_force_quirks();
                self.bogus_doctype(token)
            }
        }
    }

    fn doctype_public_identifier_before(&mut self, mut token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('"') => {
                    token.start_public_identifier();
                    return self.doctype_public_identifier(token, '"');
                }
                Some('\'') => {
                    token.start_public_identifier();
                    return self.doctype_public_identifier(token, '\'');
                }
                Some('>') => {
                    self.report(ErrorCode::TagClosedWrong)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some(_) => {
                    self.report(ErrorCode::DoctypePublicInvalid)?;
                    token.set_force_quirks();
                    return self.bogus_doctype(token);
                }
            }
        }
    }

    /// Identifier body; the closing quote must match the opening one.
    fn doctype_public_identifier(
        &mut self,
        mut token: Token,
        quote: char,
    ) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if c == quote => return self.doctype_public_identifier_after(token),
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    token.append_to_public_identifier('\u{FFFD}');
                }
                Some('>') => {
                    self.report(ErrorCode::TagClosedWrong)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some(c) => token.append_to_public_identifier(c),
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
            }
        }
    }

    fn doctype_public_identifier_after(&mut self, mut token: Token) -> Result<Token, ParseError> {
        match self.advance() {
            Some(c) if chars::is_space(c) => self.doctype_between(token),
            Some('>') => Ok(token),
            Some('"') => {
                self.report(ErrorCode::DoubleQuotationMarkUnexpected)?;
                token.start_system_identifier();
                self.doctype_system_identifier(token, '"')
            }
            Some('\'') => {
                self.report(ErrorCode::SingleQuotationMarkUnexpected)?;
                token.start_system_identifier();
                self.doctype_system_identifier(token, '\'')
            }
            None => {
                self.report(ErrorCode::Eof)?;
                token.set_force_quirks();
                Ok(token)
            }
            Some(_) => {
                self.report(ErrorCode::DoctypeInvalidCharacter)?;
                token.set_force_quirks();
                self.bogus_doctype(token)
            }
        }
    }

    /// Between the public and system identifiers.
    fn doctype_between(&mut self, mut token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('>') => return Ok(token),
                Some('"') => {
                    token.start_system_identifier();
                    return self.doctype_system_identifier(token, '"');
                }
                Some('\'') => {
                    token.start_system_identifier();
                    return self.doctype_system_identifier(token, '\'');
                }
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some(_) => {
                    self.report(ErrorCode::DoctypeInvalidCharacter)?;
                    token.set_force_quirks();
                    return self.bogus_doctype(token);
                }
            }
        }
    }

    /// After the `SYSTEM` keyword.
    fn doctype_system(&mut self, mut token: Token) -> Result<Token, ParseError> {
        match self.advance() {
            Some(c) if chars::is_space(c) => self.doctype_system_identifier_before(token),
            Some('"') => {
                self.report(ErrorCode::DoubleQuotationMarkUnexpected)?;
                token.start_system_identifier();
                self.doctype_system_identifier(token, '"')
            }
            Some('\'') => {
                self.report(ErrorCode::SingleQuotationMarkUnexpected)?;
                token.start_system_identifier();
                self.doctype_system_identifier(token, '\'')
            }
            Some('>') => {
                self.report(ErrorCode::TagClosedWrong)?;
                token.set_force_quirks();
                Ok(token)
            }
            None => {
                self.report(ErrorCode::Eof)?;
                token.set_force_quirks();
                Ok(token)
            }
            Some(_) => {
                self.report(ErrorCode::DoctypeSystemInvalid)?;
                token.set_force_quirks();
                self.bogus_doctype(token)
            }
        }
    }

    fn doctype_system_identifier_before(&mut self, mut token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('"') => {
                    token.start_system_identifier();
                    return self.doctype_system_identifier(token, '"');
                }
                Some('\'') => {
                    token.start_system_identifier();
                    return self.doctype_system_identifier(token, '\'');
                }
                Some('>') => {
                    self.report(ErrorCode::TagClosedWrong)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some(_) => {
                    self.report(ErrorCode::DoctypeSystemInvalid)?;
                    token.set_force_quirks();
                    return self.bogus_doctype(token);
                }
            }
        }
    }

    fn doctype_system_identifier(
        &mut self,
        mut token: Token,
        quote: char,
    ) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if c == quote => return self.doctype_system_identifier_after(token),
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    token.append_to_system_identifier('\u{FFFD}');
                }
                Some('>') => {
                    self.report(ErrorCode::TagClosedWrong)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some(c) => token.append_to_system_identifier(c),
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
            }
        }
    }

    /// Trailing junk after the system identifier does not force quirks; the
    /// identifiers were already parsed correctly.
    fn doctype_system_identifier_after(&mut self, mut token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('>') => return Ok(token),
                None => {
                    self.report(ErrorCode::Eof)?;
                    token.set_force_quirks();
                    return Ok(token);
                }
                Some(_) => {
                    self.report(ErrorCode::DoctypeInvalidCharacter)?;
                    return self.bogus_doctype(token);
                }
            }
        }
    }

    /// Skip to `>` or end of input; the token (usually with quirks forced)
    /// is emitted as-is.
    fn bogus_doctype(&mut self, token: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some('>') | None => return Ok(token),
                Some(_) => {}
            }
        }
    }
}
