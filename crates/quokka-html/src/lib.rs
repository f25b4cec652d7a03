//! Streaming HTML5 tokenizer for the Quokka browser engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, PLAINTEXT and script data content modes
//!   - Tag, attribute, comment, DOCTYPE and CDATA section handling
//!   - Named and numeric character reference resolution with longest-prefix
//!     back-off
//!   - Recoverable parse errors delivered to an observer, or promoted to
//!     fatal in strict mode
//! - **Foreign content tracking** ([WHATWG § 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign))
//!   - SVG/MathML nesting depth over the emitted token stream
//!   - Tag name and attribute case adjustments for foreign elements
//!
//! The tokenizer is pull-based: each call to
//! [`HtmlTokenizer::read_next`](tokenizer::HtmlTokenizer::read_next) consumes
//! input until exactly one token is ready. Tree construction, CSS and DOM
//! building are left to downstream consumers of the token stream.

/// Foreign content (SVG/MathML) tracking and case adjustments.
pub mod foreign_content;
/// The tokenizer state machine and its support machinery.
pub mod tokenizer;

pub use foreign_content::ForeignContentFilter;
pub use tokenizer::{
    Attribute, ErrorCode, ErrorObserver, HtmlTokenizer, ParseError, ParseMode, Position,
    TextSource, Token,
};
