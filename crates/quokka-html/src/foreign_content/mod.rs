//! Foreign content (SVG and MathML) tracking over the emitted token stream.
//!
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
//!
//! The raw tokenizer lowercases every tag and attribute name, but SVG and
//! MathML are case-sensitive vocabularies. This layer wraps the token stream
//! *after* emission, so the raw machine stays faithful to the tokenization
//! rules, and restores the proper casing while tracking how deep the stream
//! currently is inside an `<svg>` or `<math>` subtree. While inside foreign
//! content it also switches the inner tokenizer to accept `<![CDATA[`
//! sections.

/// MathML case adjustments.
pub mod mathml;
/// SVG tag-name and attribute case adjustments.
pub mod svg;

use crate::tokenizer::{HtmlTokenizer, ParseError, Position, Token};

/// Wraps a tokenizer and rewrites start/end tags inside SVG/MathML subtrees.
///
/// Each depth starts at −1 ("not inside"), becomes 0 on the root foreign
/// element and returns to −1 when it closes. The two depths are disjoint:
/// whichever subtree was entered first claims the nesting until it closes
/// (HTML-in-foreign integration points are the tree builder's concern, not
/// this layer's).
pub struct ForeignContentFilter {
    tokenizer: HtmlTokenizer,
    current: Token,
    svg_depth: i32,
    mathml_depth: i32,
}

impl ForeignContentFilter {
    #[must_use]
    pub fn new(tokenizer: HtmlTokenizer) -> Self {
        Self {
            tokenizer,
            current: Token::end_of_file(Position::start()),
            svg_depth: -1,
            mathml_depth: -1,
        }
    }

    /// Pull the next token through the filter. Same contract as
    /// [`HtmlTokenizer::read_next`].
    ///
    /// # Errors
    ///
    /// Propagates the inner tokenizer's strict-mode error.
    pub fn read_next(&mut self) -> Result<bool, ParseError> {
        let more = self.tokenizer.read_next()?;
        let mut token = self.tokenizer.current().clone();
        self.track(&mut token);
        self.tokenizer
            .set_accept_character_data(self.in_foreign_content());
        self.current = token;
        Ok(more)
    }

    /// The most recently emitted (and possibly adjusted) token.
    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    /// Nesting depth inside `<svg>`, or −1 outside.
    #[must_use]
    pub const fn svg_depth(&self) -> i32 {
        self.svg_depth
    }

    /// Nesting depth inside `<math>`, or −1 outside.
    #[must_use]
    pub const fn mathml_depth(&self) -> i32 {
        self.mathml_depth
    }

    #[must_use]
    pub const fn in_foreign_content(&self) -> bool {
        self.svg_depth >= 0 || self.mathml_depth >= 0
    }

    /// Release the wrapped tokenizer.
    #[must_use]
    pub fn into_inner(self) -> HtmlTokenizer {
        self.tokenizer
    }

    fn track(&mut self, token: &mut Token) {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
                ..
            } => {
                if self.svg_depth >= 0 {
                    if !*self_closing {
                        self.svg_depth += 1;
                    }
                    svg::adjust_tag_name(name);
                    svg::adjust_attributes(attributes);
                } else if self.mathml_depth >= 0 {
                    if !*self_closing {
                        self.mathml_depth += 1;
                    }
                    mathml::adjust_attributes(attributes);
                } else if name == "svg" {
                    // A self-closing root opens and closes in one token and
                    // never enters the subtree.
                    if !*self_closing {
                        self.svg_depth = 0;
                    }
                    svg::adjust_attributes(attributes);
                } else if name == "math" {
                    if !*self_closing {
                        self.mathml_depth = 0;
                    }
                    mathml::adjust_attributes(attributes);
                }
            }
            Token::EndTag { name, .. } => {
                if self.svg_depth >= 0 {
                    self.svg_depth -= 1;
                    svg::adjust_tag_name(name);
                } else if self.mathml_depth >= 0 {
                    self.mathml_depth -= 1;
                }
            }
            _ => {}
        }
    }
}
