use core::fmt;

use super::source::Position;

/// An attribute on a start or end tag token.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value". Names are
/// ASCII-lowercased during tokenization; duplicates are removed when the tag
/// is emitted, keeping the first occurrence in textual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokens the tokenizer emits. Every token records the position where it
/// began. Character data is emitted as coalesced `Text` runs rather than one
/// token per character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of character data.
    Text { position: Position, data: String },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes."
    StartTag {
        position: Position,
        name: String,
        self_closing: bool,
        attributes: Vec<Attribute>,
    },

    /// End tag token. The self-closing flag and any attributes are recorded
    /// even though both draw a parse error; downstream treatment is the
    /// consumer's choice.
    EndTag {
        position: Position,
        name: String,
        self_closing: bool,
        attributes: Vec<Attribute>,
    },

    /// A comment. `downlevel_revealed` is set when the comment was opened
    /// with `<![`, the legacy "downlevel-revealed" conditional pattern.
    Comment {
        position: Position,
        data: String,
        downlevel_revealed: bool,
    },

    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag." Name and identifiers are missing (`None`)
    /// until the corresponding grammar production is entered, which is a
    /// distinct state from the empty string.
    Doctype {
        position: Position,
        name: Option<String>,
        public_identifier: Option<String>,
        system_identifier: Option<String>,
        force_quirks: bool,
    },

    /// End-of-file token; carries only the position input ended at.
    EndOfFile { position: Position },
}

impl Token {
    #[must_use]
    pub const fn text(position: Position, data: String) -> Self {
        Self::Text { position, data }
    }

    /// "When a start or end tag token is created, its self-closing flag must
    /// be unset and its attributes list must be empty."
    #[must_use]
    pub const fn start_tag(position: Position) -> Self {
        Self::StartTag {
            position,
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub const fn end_tag(position: Position) -> Self {
        Self::EndTag {
            position,
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub const fn comment(position: Position, downlevel_revealed: bool) -> Self {
        Self::Comment {
            position,
            data: String::new(),
            downlevel_revealed,
        }
    }

    /// "When a DOCTYPE token is created, its name, public identifier, and
    /// system identifier must be marked as missing, and the force-quirks
    /// flag must be set to off."
    #[must_use]
    pub const fn doctype(position: Position) -> Self {
        Self::Doctype {
            position,
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
        }
    }

    #[must_use]
    pub const fn end_of_file(position: Position) -> Self {
        Self::EndOfFile { position }
    }

    /// The position where the token began.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Text { position, .. }
            | Self::StartTag { position, .. }
            | Self::EndTag { position, .. }
            | Self::Comment { position, .. }
            | Self::Doctype { position, .. }
            | Self::EndOfFile { position } => *position,
        }
    }

    #[must_use]
    pub const fn is_end_of_file(&self) -> bool {
        matches!(self, Self::EndOfFile { .. })
    }

    // Mutation helpers for use during tokenization. These panic if called on
    // the wrong token variant, which indicates a bug in the state machine.

    /// "Append the current input character to the current tag token's tag name."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn append_to_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => name.push(c),
            _ => panic!("append_to_name called on a non-tag token"),
        }
    }

    /// "Set the self-closing flag of the current tag token."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn set_self_closing(&mut self) {
        match self {
            Self::StartTag { self_closing, .. } | Self::EndTag { self_closing, .. } => {
                *self_closing = true;
            }
            _ => panic!("set_self_closing called on a non-tag token"),
        }
    }

    /// "Start a new attribute in the current tag token."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn start_new_attribute(&mut self) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                attributes.push(Attribute::new(String::new(), String::new()));
            }
            _ => panic!("start_new_attribute called on a non-tag token"),
        }
    }

    /// "Append the current input character to the current attribute's name."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn append_to_attribute_name(&mut self, c: char) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                if let Some(attribute) = attributes.last_mut() {
                    attribute.name.push(c);
                }
            }
            _ => panic!("append_to_attribute_name called on a non-tag token"),
        }
    }

    /// "Append the current input character to the current attribute's value."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn append_to_attribute_value(&mut self, c: char) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                if let Some(attribute) = attributes.last_mut() {
                    attribute.value.push(c);
                }
            }
            _ => panic!("append_to_attribute_value called on a non-tag token"),
        }
    }

    /// Append a resolved character reference to the current attribute's value.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn append_str_to_attribute_value(&mut self, s: &str) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                if let Some(attribute) = attributes.last_mut() {
                    attribute.value.push_str(s);
                }
            }
            _ => panic!("append_str_to_attribute_value called on a non-tag token"),
        }
    }

    /// Drop attributes whose name already occurred earlier on the tag,
    /// preserving first-occurrence order. Returns the number removed so the
    /// caller can report one parse error per dropped attribute.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn dedupe_attributes(&mut self) -> usize {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                let before = attributes.len();
                let mut seen: Vec<String> = Vec::with_capacity(before);
                attributes.retain(|attribute| {
                    if seen.contains(&attribute.name) {
                        false
                    } else {
                        seen.push(attribute.name.clone());
                        true
                    }
                });
                before - attributes.len()
            }
            _ => panic!("dedupe_attributes called on a non-tag token"),
        }
    }

    /// "Append the current input character to the comment token's data."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token.
    pub fn append_to_comment(&mut self, c: char) {
        match self {
            Self::Comment { data, .. } => data.push(c),
            _ => panic!("append_to_comment called on a non-comment token"),
        }
    }

    /// # Panics
    ///
    /// Panics if called on a non-comment token.
    pub fn append_str_to_comment(&mut self, s: &str) {
        match self {
            Self::Comment { data, .. } => data.push_str(s),
            _ => panic!("append_str_to_comment called on a non-comment token"),
        }
    }

    /// "Append the current input character to the current DOCTYPE token's name."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_doctype_name(&mut self, c: char) {
        match self {
            Self::Doctype { name, .. } => match name {
                Some(name) => name.push(c),
                None => *name = Some(String::from(c)),
            },
            _ => panic!("append_to_doctype_name called on a non-DOCTYPE token"),
        }
    }

    /// "Set the token's public identifier to the empty string (not missing)."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn start_public_identifier(&mut self) {
        match self {
            Self::Doctype {
                public_identifier, ..
            } => *public_identifier = Some(String::new()),
            _ => panic!("start_public_identifier called on a non-DOCTYPE token"),
        }
    }

    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_public_identifier(&mut self, c: char) {
        match self {
            Self::Doctype {
                public_identifier, ..
            } => public_identifier.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_public_identifier called on a non-DOCTYPE token"),
        }
    }

    /// "Set the token's system identifier to the empty string (not missing)."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn start_system_identifier(&mut self) {
        match self {
            Self::Doctype {
                system_identifier, ..
            } => *system_identifier = Some(String::new()),
            _ => panic!("start_system_identifier called on a non-DOCTYPE token"),
        }
    }

    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_system_identifier(&mut self, c: char) {
        match self {
            Self::Doctype {
                system_identifier, ..
            } => system_identifier.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_system_identifier called on a non-DOCTYPE token"),
        }
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn set_force_quirks(&mut self) {
        match self {
            Self::Doctype { force_quirks, .. } => *force_quirks = true,
            _ => panic!("set_force_quirks called on a non-DOCTYPE token"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { data, .. } => write!(f, "Text({data:?})"),
            Self::StartTag {
                name,
                self_closing,
                attributes,
                ..
            } => {
                write!(f, "<{name}")?;
                for attribute in attributes {
                    write!(f, " {}=\"{}\"", attribute.name, attribute.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data, .. } => write!(f, "<!--{data}-->"),
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
                ..
            } => {
                write!(f, "DOCTYPE")?;
                if let Some(name) = name {
                    write!(f, " {name}")?;
                }
                if let Some(public_identifier) = public_identifier {
                    write!(f, " PUBLIC \"{public_identifier}\"")?;
                }
                if let Some(system_identifier) = system_identifier {
                    write!(f, " SYSTEM \"{system_identifier}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::EndOfFile { .. } => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let mut tag = Token::start_tag(Position::start());
        for (name, value) in [("a", "1"), ("b", "2"), ("a", "3"), ("c", "4"), ("b", "5")] {
            tag.start_new_attribute();
            for c in name.chars() {
                tag.append_to_attribute_name(c);
            }
            for c in value.chars() {
                tag.append_to_attribute_value(c);
            }
        }
        assert_eq!(tag.dedupe_attributes(), 2);
        match tag {
            Token::StartTag { attributes, .. } => {
                let names: Vec<_> = attributes.iter().map(|a| a.name.as_str()).collect();
                let values: Vec<_> = attributes.iter().map(|a| a.value.as_str()).collect();
                assert_eq!(names, ["a", "b", "c"]);
                assert_eq!(values, ["1", "2", "4"]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn doctype_identifiers_distinguish_missing_from_empty() {
        let mut token = Token::doctype(Position::start());
        match &token {
            Token::Doctype {
                public_identifier, ..
            } => assert!(public_identifier.is_none()),
            _ => unreachable!(),
        }
        token.start_public_identifier();
        match &token {
            Token::Doctype {
                public_identifier, ..
            } => assert_eq!(public_identifier.as_deref(), Some("")),
            _ => unreachable!(),
        }
    }

    #[test]
    fn display_renders_tags() {
        let mut tag = Token::start_tag(Position::start());
        tag.append_to_name('b');
        tag.append_to_name('r');
        tag.set_self_closing();
        assert_eq!(tag.to_string(), "<br />");
    }
}
