use strum_macros::Display;

use super::buffer;
use super::chars;
use super::error::{ErrorCode, ErrorObserver, ParseError};
use super::source::{Position, PositionTracker, TextSource};
use super::token::Token;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The top-level content dispatch of the tokenizer. `PcData` is the ordinary
/// data state; the others change how character data and `<` are interpreted.
///
/// Start tags named `script` and `plaintext` switch the mode themselves;
/// `RcData` and `RawText` are set by the consumer (the tree construction
/// stage decides which elements hold raw text), which is why the mode is
/// exposed read/write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ParseMode {
    PcData,
    RcData,
    RawText,
    PlainText,
    Script,
}

/// Comment machine sub-states past the `<!--` preamble.
#[derive(Clone, Copy, PartialEq, Eq)]
enum CommentState {
    Data,
    EndDash,
    End,
    EndBang,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// The machine is pull-based: each call to [`read_next`](Self::read_next)
/// consumes characters until exactly one token is ready. Character data is
/// coalesced into [`Token::Text`] runs; when a structural token completes
/// while text is buffered, the text is emitted first and the structural
/// token is delivered on the next call.
pub struct HtmlTokenizer {
    pub(super) source: TextSource,
    pub(super) tracker: PositionTracker,
    mode: ParseMode,

    /// "The last start tag token emitted is used ... in the RCDATA, RAWTEXT,
    /// and script data states" to recognize appropriate end tags.
    pub(super) last_start_tag: Option<String>,

    /// The string buffer: accumulates character data between structural
    /// tokens. Taken from the process-wide pool, returned on drop.
    pub(super) buffer: String,
    /// Where the buffered text run began.
    pub(super) text_start: Position,

    /// A structural token that completed while text was still buffered.
    pub(super) pending: Option<Token>,
    current: Token,
    token_position: Position,

    accept_character_data: bool,
    pub(super) strict: bool,
    pub(super) observer: Option<ErrorObserver>,
    finished: bool,
}

impl HtmlTokenizer {
    /// Create a tokenizer over the given source. The initial mode is the
    /// data state.
    #[must_use]
    pub fn new(source: TextSource) -> Self {
        let origin = Position::start();
        Self {
            source,
            tracker: PositionTracker::new(),
            mode: ParseMode::PcData,
            last_start_tag: None,
            buffer: buffer::acquire(),
            text_start: origin,
            pending: None,
            current: Token::end_of_file(origin),
            token_position: origin,
            accept_character_data: false,
            strict: false,
            observer: None,
            finished: false,
        }
    }

    /// Consume input until exactly one token is ready.
    ///
    /// Returns `Ok(false)` when the token just emitted is
    /// [`Token::EndOfFile`] (and on every call thereafter), `Ok(true)`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// In strict mode the first parse error is returned and tokenization
    /// stops. In tolerant mode (the default) this never returns `Err`;
    /// errors go to the observer instead.
    pub fn read_next(&mut self) -> Result<bool, ParseError> {
        if let Some(token) = self.pending.take() {
            return Ok(self.finish(token));
        }
        if self.finished {
            return Ok(false);
        }
        let token = match self.mode {
            ParseMode::PcData => self.data()?,
            ParseMode::RcData => self.rc_data()?,
            ParseMode::RawText => self.raw_text()?,
            ParseMode::PlainText => self.plain_text()?,
            ParseMode::Script => self.script_data()?,
        };
        Ok(self.finish(token))
    }

    /// The most recently emitted token.
    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    #[must_use]
    pub const fn parse_mode(&self) -> ParseMode {
        self.mode
    }

    /// Set the content mode. The tree construction stage uses this to enter
    /// RCDATA (`<title>`, `<textarea>`) and RAWTEXT (`<style>`, ...) after
    /// the corresponding start tag.
    pub fn set_parse_mode(&mut self, mode: ParseMode) {
        self.mode = mode;
    }

    /// Whether `<![CDATA[` sections are recognized (enabled inside foreign
    /// content).
    #[must_use]
    pub const fn accept_character_data(&self) -> bool {
        self.accept_character_data
    }

    pub fn set_accept_character_data(&mut self, accept: bool) {
        self.accept_character_data = accept;
    }

    /// Whether the first parse error aborts tokenization.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Register (or clear) the observer that receives recoverable parse
    /// errors in tolerant mode.
    pub fn set_error_observer(&mut self, observer: Option<ErrorObserver>) {
        self.observer = observer;
    }

    /// Line of the most recently emitted token.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.token_position.line
    }

    /// Column of the most recently emitted token.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.token_position.column
    }

    /// Record an emitted token: track the last start tag name, apply the
    /// content-mode switches the tokenizer owns, and remember the position.
    fn finish(&mut self, token: Token) -> bool {
        match &token {
            Token::StartTag { name, .. } => {
                self.last_start_tag = Some(name.clone());
                self.mode = match name.as_str() {
                    "script" => ParseMode::Script,
                    "plaintext" => ParseMode::PlainText,
                    _ => ParseMode::PcData,
                };
            }
            // An emitted end tag always lands back in the data state; only
            // appropriate end tags terminate the raw content modes.
            Token::EndTag { .. } => self.mode = ParseMode::PcData,
            Token::EndOfFile { .. } => self.finished = true,
            _ => {}
        }
        self.token_position = token.position();
        let end = token.is_end_of_file();
        self.current = token;
        !end
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn data(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.here();
            match self.advance() {
                // "U+0026 AMPERSAND (&) - Switch to the character reference state."
                Some('&') => {
                    let resolved = self.consume_character_reference(None)?;
                    self.append_str(start, &resolved);
                }
                // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
                Some('<') => {
                    if let Some(token) = self.tag_open(start)? {
                        return Ok(self.hold(token));
                    }
                }
                // "U+0000 NULL - This is an unexpected-null-character parse
                // error." The character is dropped from the output.
                Some('\0') => self.report(ErrorCode::Null)?,
                // "Anything else - Emit the current input character as a
                // character token."
                Some(c) => self.append(start, c),
                // "EOF - Emit an end-of-file token" (after flushing any
                // buffered text).
                None => return Ok(self.flush_or_end_of_file()),
            }
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    fn rc_data(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.here();
            match self.advance() {
                Some('&') => {
                    let resolved = self.consume_character_reference(None)?;
                    self.append_str(start, &resolved);
                }
                Some('<') => {
                    if let Some(token) = self.content_end_tag(start)? {
                        return Ok(self.hold(token));
                    }
                }
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    self.append(start, '\u{FFFD}');
                }
                Some(c) => self.append(start, c),
                None => return Ok(self.flush_or_end_of_file()),
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Like RCDATA, but `&` has no meaning here.
    fn raw_text(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.here();
            match self.advance() {
                Some('<') => {
                    if let Some(token) = self.content_end_tag(start)? {
                        return Ok(self.hold(token));
                    }
                }
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    self.append(start, '\u{FFFD}');
                }
                Some(c) => self.append(start, c),
                None => return Ok(self.flush_or_end_of_file()),
            }
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    ///
    /// Everything up to end of input is character data; there is no way out.
    fn plain_text(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.here();
            match self.advance() {
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    self.append(start, '\u{FFFD}');
                }
                Some(c) => self.append(start, c),
                None => return Ok(self.flush_or_end_of_file()),
            }
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    ///
    /// `start` is the position of the consumed `<`. Returns the finished
    /// token, or `None` when the input turned out to be character data.
    fn tag_open(&mut self, start: Position) -> Result<Option<Token>, ParseError> {
        match self.advance() {
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => self.tag_end(start),
            // "ASCII alpha - Create a new start tag token."
            Some(c) if c.is_ascii_alphabetic() => {
                let mut tag = Token::start_tag(start);
                tag.append_to_name(c.to_ascii_lowercase());
                self.tag_name(tag).map(Some)
            }
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration
            // open state."
            Some('!') => self.markup_declaration(start),
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error."
            Some('?') => {
                self.report(ErrorCode::BogusComment)?;
                self.back(1);
                self.bogus_comment(start, false).map(Some)
            }
            None => {
                self.report(ErrorCode::Eof)?;
                self.append(start, '<');
                Ok(None)
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            Some(_) => {
                self.report(ErrorCode::AmbiguousOpenTag)?;
                self.append(start, '<');
                self.back(1);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn tag_end(&mut self, start: Position) -> Result<Option<Token>, ParseError> {
        match self.advance() {
            Some(c) if c.is_ascii_alphabetic() => {
                let mut tag = Token::end_tag(start);
                tag.append_to_name(c.to_ascii_lowercase());
                self.tag_name(tag).map(Some)
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name
            // parse error. Switch to the data state."
            Some('>') => {
                self.report(ErrorCode::TagClosedWrong)?;
                Ok(None)
            }
            None => {
                self.report(ErrorCode::Eof)?;
                self.append(start, '<');
                self.append(start, '/');
                Ok(None)
            }
            Some(_) => {
                self.report(ErrorCode::BogusComment)?;
                self.back(1);
                self.bogus_comment(start, false).map(Some)
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn tag_name(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => return self.before_attribute_name(tag),
                Some('/') => return self.closing_slash(tag),
                Some('>') => return self.emit_tag(tag),
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    tag.append_to_name('\u{FFFD}');
                }
                // ASCII upper alpha is lowercased; other characters are
                // preserved verbatim.
                Some(c) => tag.append_to_name(c.to_ascii_lowercase()),
                None => return self.end_of_input_in_tag(),
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn before_attribute_name(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('/') => return self.closing_slash(tag),
                Some('>') => return self.emit_tag(tag),
                // "U+003D EQUALS SIGN (=) - This is an
                // unexpected-equals-sign-before-attribute-name parse error.
                // Start a new attribute with that character as its name."
                Some('=') => {
                    self.report(ErrorCode::AttributeNameExpected)?;
                    tag.start_new_attribute();
                    tag.append_to_attribute_name('=');
                    return self.attribute_name(tag);
                }
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    tag.start_new_attribute();
                    tag.append_to_attribute_name('\u{FFFD}');
                    return self.attribute_name(tag);
                }
                Some(c @ ('"' | '\'' | '<')) => {
                    self.report(ErrorCode::AttributeNameInvalid)?;
                    tag.start_new_attribute();
                    tag.append_to_attribute_name(c);
                    return self.attribute_name(tag);
                }
                Some(c) => {
                    tag.start_new_attribute();
                    tag.append_to_attribute_name(c.to_ascii_lowercase());
                    return self.attribute_name(tag);
                }
                None => return self.end_of_input_in_tag(),
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// Duplicate names are not checked here; they are resolved when the tag
    /// is emitted, so the textual first occurrence always wins.
    fn attribute_name(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => return self.after_attribute_name(tag),
                Some('/') => return self.closing_slash(tag),
                Some('>') => return self.emit_tag(tag),
                Some('=') => return self.before_attribute_value(tag),
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    tag.append_to_attribute_name('\u{FFFD}');
                }
                Some(c @ ('"' | '\'' | '<')) => {
                    self.report(ErrorCode::AttributeNameInvalid)?;
                    tag.append_to_attribute_name(c);
                }
                Some(c) => tag.append_to_attribute_name(c.to_ascii_lowercase()),
                None => return self.end_of_input_in_tag(),
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn after_attribute_name(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('/') => return self.closing_slash(tag),
                Some('=') => return self.before_attribute_value(tag),
                Some('>') => return self.emit_tag(tag),
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    tag.start_new_attribute();
                    tag.append_to_attribute_name('\u{FFFD}');
                    return self.attribute_name(tag);
                }
                Some(c @ ('"' | '\'' | '<')) => {
                    self.report(ErrorCode::AttributeNameInvalid)?;
                    tag.start_new_attribute();
                    tag.append_to_attribute_name(c);
                    return self.attribute_name(tag);
                }
                Some(c) => {
                    tag.start_new_attribute();
                    tag.append_to_attribute_name(c.to_ascii_lowercase());
                    return self.attribute_name(tag);
                }
                None => return self.end_of_input_in_tag(),
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn before_attribute_value(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => {}
                Some('"') => return self.quoted_attribute_value(tag, '"'),
                Some('\'') => return self.quoted_attribute_value(tag, '\''),
                // "U+003E GREATER-THAN SIGN (>) - This is a
                // missing-attribute-value parse error. Emit the current tag."
                Some('>') => {
                    self.report(ErrorCode::TagClosedWrong)?;
                    return self.emit_tag(tag);
                }
                Some(_) => {
                    self.back(1);
                    return self.unquoted_attribute_value(tag);
                }
                None => return self.end_of_input_in_tag(),
            }
        }
    }

    /// [§ 13.2.5.36-37 Attribute value (quoted) states](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    ///
    /// Inside a quoted value `&` resolves a character reference with the
    /// closing quote as the additional allowed character.
    fn quoted_attribute_value(&mut self, mut tag: Token, quote: char) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if c == quote => return self.after_quoted_attribute_value(tag),
                Some('&') => {
                    let resolved = self.consume_character_reference(Some(quote))?;
                    tag.append_str_to_attribute_value(&resolved);
                }
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    tag.append_to_attribute_value('\u{FFFD}');
                }
                Some(c) => tag.append_to_attribute_value(c),
                None => return self.end_of_input_in_tag(),
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn after_quoted_attribute_value(&mut self, tag: Token) -> Result<Token, ParseError> {
        match self.advance() {
            Some(c) if chars::is_space(c) => self.before_attribute_name(tag),
            Some('/') => self.closing_slash(tag),
            Some('>') => self.emit_tag(tag),
            None => self.end_of_input_in_tag(),
            // "Anything else - This is a missing-whitespace-between-attributes
            // parse error. Reconsume in the before attribute name state."
            Some(_) => {
                self.report(ErrorCode::AttributeNameExpected)?;
                self.back(1);
                self.before_attribute_name(tag)
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    ///
    /// `&` uses `>` as the additional allowed character here; the literal
    /// characters `"'<=` and backtick draw an error but are still appended.
    fn unquoted_attribute_value(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        loop {
            match self.advance() {
                Some(c) if chars::is_space(c) => return self.before_attribute_name(tag),
                Some('>') => return self.emit_tag(tag),
                Some('&') => {
                    let resolved = self.consume_character_reference(Some('>'))?;
                    tag.append_str_to_attribute_value(&resolved);
                }
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    tag.append_to_attribute_value('\u{FFFD}');
                }
                Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                    self.report(ErrorCode::AttributeValueInvalid)?;
                    tag.append_to_attribute_value(c);
                }
                Some(c) => tag.append_to_attribute_value(c),
                None => return self.end_of_input_in_tag(),
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// Reached after a `/` inside a tag. Only `/>` sets the flag.
    fn closing_slash(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        match self.advance() {
            Some('>') => {
                tag.set_self_closing();
                self.emit_tag(tag)
            }
            None => self.end_of_input_in_tag(),
            Some(_) => {
                self.report(ErrorCode::ClosingSlashMisplaced)?;
                self.back(1);
                self.before_attribute_name(tag)
            }
        }
    }

    /// Finalize a tag token: resolve duplicate attributes and report the
    /// end-tag shape violations. Errors never change the emitted token.
    fn emit_tag(&mut self, mut tag: Token) -> Result<Token, ParseError> {
        let dropped = tag.dedupe_attributes();
        for _ in 0..dropped {
            self.report(ErrorCode::AttributeDuplicateOmitted)?;
        }
        if let Token::EndTag {
            self_closing,
            attributes,
            ..
        } = &tag
        {
            if *self_closing {
                self.report(ErrorCode::EndTagCannotBeSelfClosed)?;
            }
            if !attributes.is_empty() {
                self.report(ErrorCode::EndTagCannotHaveAttributes)?;
            }
        }
        Ok(tag)
    }

    /// "This is an eof-in-tag parse error. Emit an end-of-file token."
    /// The partially built tag is discarded.
    pub(super) fn end_of_input_in_tag(&mut self) -> Result<Token, ParseError> {
        self.report(ErrorCode::Eof)?;
        Ok(self.flush_or_end_of_file())
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Reached after `<!`. The `CDATA` sentinel is matched case-sensitively;
    /// the `doctype` keyword is not.
    fn markup_declaration(&mut self, start: Position) -> Result<Option<Token>, ParseError> {
        // "If the next two characters are both U+002D HYPHEN-MINUS..."
        if self.continues_with("--") {
            self.skip(2);
            return self.comment(start).map(Some);
        }
        // "...an ASCII case-insensitive match for the word 'DOCTYPE'..."
        if self.continues_with_insensitive("doctype") {
            self.skip(7);
            return self.doctype(start).map(Some);
        }
        // "...a case-sensitive match for the string '[CDATA['..." -- only
        // honored while the consumer accepts character data sections.
        if self.accept_character_data && self.continues_with("[CDATA[") {
            self.skip(7);
            self.character_data(start)?;
            return Ok(None);
        }
        // "Otherwise, this is an incorrectly-opened-comment parse error."
        self.report(ErrorCode::UndefinedMarkupDeclaration)?;
        let downlevel = self.source.current() == Some('[');
        self.bogus_comment(start, downlevel).map(Some)
    }

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    ///
    /// The contents join the surrounding text run; nothing inside a CDATA
    /// section is markup, not even NUL.
    fn character_data(&mut self, start: Position) -> Result<(), ParseError> {
        loop {
            match self.advance() {
                Some(']') if self.continues_with("]>") => {
                    self.skip(2);
                    return Ok(());
                }
                Some(c) => self.append(start, c),
                None => {
                    self.report(ErrorCode::Eof)?;
                    return Ok(());
                }
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// Everything up to `>` or end of input becomes comment data.
    /// `downlevel` marks comments opened with `<![`.
    fn bogus_comment(&mut self, start: Position, downlevel: bool) -> Result<Token, ParseError> {
        let mut comment = Token::comment(start, downlevel);
        loop {
            match self.advance() {
                Some('>') => return Ok(comment),
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    comment.append_to_comment('\u{FFFD}');
                }
                Some(c) => comment.append_to_comment(c),
                None => return Ok(comment),
            }
        }
    }

    /// [§ 13.2.5.43-44 Comment start states](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    ///
    /// Reached after `<!--`. An immediate `-` or `>` means the comment is
    /// empty and closed wrong.
    fn comment(&mut self, start: Position) -> Result<Token, ParseError> {
        let mut comment = Token::comment(start, false);
        let state = match self.advance() {
            Some('-') => match self.advance() {
                Some('-') => CommentState::End,
                Some('>') => {
                    self.report(ErrorCode::TagClosedWrong)?;
                    return Ok(comment);
                }
                Some('\0') => {
                    self.report(ErrorCode::Null)?;
                    comment.append_to_comment('-');
                    comment.append_to_comment('\u{FFFD}');
                    CommentState::Data
                }
                Some(c) => {
                    comment.append_to_comment('-');
                    comment.append_to_comment(c);
                    CommentState::Data
                }
                None => {
                    self.report(ErrorCode::Eof)?;
                    return Ok(comment);
                }
            },
            Some('>') => {
                self.report(ErrorCode::TagClosedWrong)?;
                return Ok(comment);
            }
            Some('\0') => {
                self.report(ErrorCode::Null)?;
                comment.append_to_comment('\u{FFFD}');
                CommentState::Data
            }
            Some(c) => {
                comment.append_to_comment(c);
                CommentState::Data
            }
            None => {
                self.report(ErrorCode::Eof)?;
                return Ok(comment);
            }
        };
        self.comment_body(comment, state)
    }

    /// [§ 13.2.5.45-52 Comment states](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// A flat loop over the comment sub-states; end of input in any of them
    /// is recoverable and still emits the partial comment.
    fn comment_body(
        &mut self,
        mut comment: Token,
        mut state: CommentState,
    ) -> Result<Token, ParseError> {
        loop {
            match state {
                CommentState::Data => match self.advance() {
                    Some('-') => state = CommentState::EndDash,
                    Some('\0') => {
                        self.report(ErrorCode::Null)?;
                        comment.append_to_comment('\u{FFFD}');
                    }
                    Some(c) => comment.append_to_comment(c),
                    None => {
                        self.report(ErrorCode::Eof)?;
                        return Ok(comment);
                    }
                },
                CommentState::EndDash => match self.advance() {
                    Some('-') => state = CommentState::End,
                    Some('\0') => {
                        self.report(ErrorCode::Null)?;
                        comment.append_str_to_comment("-\u{FFFD}");
                        state = CommentState::Data;
                    }
                    Some(c) => {
                        comment.append_to_comment('-');
                        comment.append_to_comment(c);
                        state = CommentState::Data;
                    }
                    None => {
                        self.report(ErrorCode::Eof)?;
                        return Ok(comment);
                    }
                },
                CommentState::End => match self.advance() {
                    Some('>') => return Ok(comment),
                    // Extra dashes before the close keep the machine here.
                    Some('-') => {
                        self.report(ErrorCode::CommentEndedWithDash)?;
                        comment.append_to_comment('-');
                    }
                    Some('!') => {
                        self.report(ErrorCode::CommentEndedWithEm)?;
                        state = CommentState::EndBang;
                    }
                    Some('\0') => {
                        self.report(ErrorCode::Null)?;
                        comment.append_str_to_comment("--\u{FFFD}");
                        state = CommentState::Data;
                    }
                    Some(c) => {
                        self.report(ErrorCode::CommentEndedUnexpected)?;
                        comment.append_str_to_comment("--");
                        comment.append_to_comment(c);
                        state = CommentState::Data;
                    }
                    None => {
                        self.report(ErrorCode::Eof)?;
                        return Ok(comment);
                    }
                },
                CommentState::EndBang => match self.advance() {
                    Some('-') => {
                        comment.append_str_to_comment("--!");
                        state = CommentState::EndDash;
                    }
                    Some('>') => return Ok(comment),
                    Some('\0') => {
                        self.report(ErrorCode::Null)?;
                        comment.append_str_to_comment("--!\u{FFFD}");
                        state = CommentState::Data;
                    }
                    Some(c) => {
                        comment.append_str_to_comment("--!");
                        comment.append_to_comment(c);
                        state = CommentState::Data;
                    }
                    None => {
                        self.report(ErrorCode::Eof)?;
                        return Ok(comment);
                    }
                },
            }
        }
    }

    /// [§ 13.2.5.9-14 RCDATA/RAWTEXT less-than sign states](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    ///
    /// Shared "appropriate end tag" recognizer for the raw content modes.
    /// `start` is the position of the consumed `<`. An end tag is only an end
    /// tag if its name matches the last emitted start tag (case-insensitive)
    /// and the name is followed by whitespace, `/` or `>`; otherwise every
    /// consumed character is restored as literal text.
    pub(super) fn content_end_tag(&mut self, start: Position) -> Result<Option<Token>, ParseError> {
        if self.source.current() != Some('/') {
            self.append(start, '<');
            return Ok(None);
        }
        self.advance();
        let mut name = String::new();
        while let Some(c) = self.source.current() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            self.advance();
            name.push(c);
        }
        let appropriate = !name.is_empty()
            && self
                .last_start_tag
                .as_deref()
                .is_some_and(|last| last.eq_ignore_ascii_case(&name))
            && self.next_is_tag_terminator();
        if appropriate {
            let mut tag = Token::end_tag(start);
            for c in name.chars() {
                tag.append_to_name(c.to_ascii_lowercase());
            }
            return match self.advance() {
                Some('>') => self.emit_tag(tag).map(Some),
                Some('/') => self.closing_slash(tag).map(Some),
                // Whitespace: the tag continues with attributes.
                _ => self.before_attribute_name(tag).map(Some),
            };
        }
        // Not an appropriate end tag: everything consumed was character data.
        self.append(start, '<');
        self.append(start, '/');
        for c in name.chars() {
            self.append(start, c);
        }
        Ok(None)
    }
}

impl Drop for HtmlTokenizer {
    fn drop(&mut self) {
        buffer::release(std::mem::take(&mut self.buffer));
    }
}

impl Iterator for HtmlTokenizer {
    type Item = Result<Token, ParseError>;

    /// Pull-loop convenience over [`read_next`](Self::read_next): yields
    /// every token including the final [`Token::EndOfFile`], or the fatal
    /// error in strict mode, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_next() {
            Ok(_) => Some(Ok(self.current.clone())),
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
