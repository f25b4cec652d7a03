//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard as a pull-based state machine.

/// Reusable append-only character buffers shared between tokenizer instances.
mod buffer;
/// Character class predicates.
pub(crate) mod chars;
/// Character reference resolution per § 13.2.5.72.
mod character_reference;
/// The tokenizer state machine implementation.
mod core;
/// DOCTYPE states per § 13.2.5.53-68.
mod doctype;
/// Named character reference lookup and numeric reference tables.
pub mod entities;
/// Parse error codes, the error value and the observer contract.
pub mod error;
/// State transition, input and emission helpers.
mod helpers;
/// Script data states per § 13.2.5.15-31.
mod script_data;
/// The character source and source position tracking.
pub mod source;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HtmlTokenizer, ParseMode};
pub use self::error::{ErrorCode, ErrorObserver, ParseError};
pub use self::source::{Position, TextSource};
pub use self::token::{Attribute, Token};
