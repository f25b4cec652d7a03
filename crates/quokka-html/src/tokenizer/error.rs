//! Parse error reporting for the tokenizer.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! HTML parse errors are recoverable: the tokenizer reports the violation and
//! continues, because tolerant parsing is part of the format. Every error
//! carries a stable code and the position it was detected at. In non-strict
//! mode errors are delivered to the registered observer; in strict mode the
//! first error is returned as a fatal value from
//! [`read_next`](super::HtmlTokenizer::read_next) and tokenization stops.

use strum_macros::Display;
use thiserror::Error;

use super::source::Position;

/// The recoverable grammar violations the tokenizer can report.
///
/// Codes render in kebab-case (`ErrorCode::AmbiguousOpenTag` displays as
/// `ambiguous-open-tag`), which is the stable identifier to grep for in
/// diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorCode {
    /// End of input in a state that expected more.
    Eof,
    /// U+0000 found where disallowed; replaced with U+FFFD (or dropped in data).
    Null,
    /// `<` followed by something that cannot start a tag.
    AmbiguousOpenTag,
    /// A comment produced by markup that is not a comment (`<?`, `</#`, ...).
    BogusComment,
    /// `<!` followed by neither `--`, `doctype` nor an accepted `[CDATA[`.
    UndefinedMarkupDeclaration,
    /// `>` closed a construct prematurely.
    TagClosedWrong,
    /// `/` inside a tag not followed by `>`.
    ClosingSlashMisplaced,
    /// `/>` on an end tag; the flag is recorded anyway.
    EndTagCannotBeSelfClosed,
    /// Attributes on an end tag; they are recorded anyway.
    EndTagCannotHaveAttributes,
    /// `"`, `'` or `<` inside an attribute name.
    AttributeNameInvalid,
    /// `=` where an attribute name was expected.
    AttributeNameExpected,
    /// `"`, `'`, `<`, `=` or `` ` `` inside an unquoted attribute value.
    AttributeValueInvalid,
    /// A repeated attribute name; later occurrences are dropped.
    AttributeDuplicateOmitted,
    /// Comment closed with `--!>`.
    CommentEndedWithEm,
    /// Extra dash before the comment close.
    CommentEndedWithDash,
    /// `--` inside a comment not followed by `>`.
    CommentEndedUnexpected,
    /// Malformed doctype preamble or missing whitespace before the name.
    DoctypeUnexpected,
    /// Something other than `PUBLIC`/`SYSTEM` after the doctype name.
    DoctypeUnexpectedAfterName,
    /// Malformed public identifier.
    DoctypePublicInvalid,
    /// Malformed system identifier.
    DoctypeSystemInvalid,
    /// Unexpected character inside the doctype.
    DoctypeInvalidCharacter,
    /// `"` where whitespace was expected before an identifier.
    DoubleQuotationMarkUnexpected,
    /// `'` where whitespace was expected before an identifier.
    SingleQuotationMarkUnexpected,
    /// `&#` with no digits.
    CharacterReferenceWrongNumber,
    /// Numeric reference not terminated by `;`.
    CharacterReferenceSemicolonMissing,
    /// Numeric reference into the Windows-1252 override range.
    CharacterReferenceInvalidCode,
    /// Numeric reference that is no scalar value; resolved to U+FFFD.
    CharacterReferenceInvalidNumber,
    /// Numeric reference to a control or noncharacter; kept as-is.
    CharacterReferenceInvalidRange,
    /// Named reference matched without its terminating `;`.
    CharacterReferenceNotTerminated,
    /// `=` directly after a semicolon-less named reference in an attribute.
    CharacterReferenceAttributeEqualsFound,
}

/// A recoverable parse error with the position it was detected at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{code} at {position}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub position: Position,
}

/// Observer invoked for every recoverable error in non-strict mode.
///
/// The observer must not call back into the tokenizer; it receives the error
/// by reference and may inspect positions only. The borrow rules enforce
/// this: the tokenizer is exclusively borrowed for the duration of the call.
pub type ErrorObserver = Box<dyn FnMut(&ParseError)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_display_in_kebab_case() {
        assert_eq!(ErrorCode::AmbiguousOpenTag.to_string(), "ambiguous-open-tag");
        assert_eq!(ErrorCode::TagClosedWrong.to_string(), "tag-closed-wrong");
        assert_eq!(
            ErrorCode::CharacterReferenceWrongNumber.to_string(),
            "character-reference-wrong-number"
        );
    }

    #[test]
    fn error_display_includes_position() {
        let error = ParseError {
            code: ErrorCode::Null,
            position: Position {
                line: 3,
                column: 7,
                offset: 21,
            },
        };
        assert_eq!(error.to_string(), "null at 3:7");
    }
}
