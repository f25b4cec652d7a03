//! Character class predicates used throughout the tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)

/// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
///
/// The whitespace set the tokenizer branches on: TAB, LF, FF and SPACE.
/// CR never reaches the state machine; it is normalized to LF on read.
pub(crate) const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C')
}

/// A character that can occur inside an entity name (ASCII alphanumeric).
pub(crate) const fn is_entity_name(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_set_excludes_carriage_return() {
        assert!(is_space(' '));
        assert!(is_space('\t'));
        assert!(is_space('\n'));
        assert!(is_space('\x0C'));
        assert!(!is_space('\r'));
        assert!(!is_space('a'));
    }

    #[test]
    fn entity_name_characters() {
        assert!(is_entity_name('a'));
        assert!(is_entity_name('Z'));
        assert!(is_entity_name('4'));
        assert!(!is_entity_name(';'));
        assert!(!is_entity_name('#'));
    }
}
