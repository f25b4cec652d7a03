//! Tests for the entity lookup service against the tokenizer's resolution.

use quokka_html::tokenizer::entities;
use quokka_html::{HtmlTokenizer, TextSource, Token};

fn resolve(input: &str) -> String {
    let mut tokenizer = HtmlTokenizer::new(TextSource::new(input));
    let mut out = String::new();
    while tokenizer.read_next().expect("tolerant mode never fails") {
        if let Token::Text { data, .. } = tokenizer.current() {
            out.push_str(data);
        }
    }
    out
}

#[test]
fn lookup_service_is_the_resolution_oracle() {
    // Whatever the table answers for a terminated name is exactly what the
    // tokenizer produces for `&name;` in character data.
    for name in ["amp;", "lt;", "gt;", "eacute;", "hellip;", "fjlig;", "euro;"] {
        let expected = entities::lookup(name).expect("table entry must exist");
        let input = format!("&{name}");
        assert_eq!(resolve(&input), expected, "entity {name}");
    }
}

#[test]
fn legacy_names_resolve_without_semicolon() {
    assert_eq!(resolve("&amp"), "&");
    assert_eq!(resolve("&copy"), "\u{00A9}");
}

#[test]
fn longest_match_wins_over_shorter_prefixes() {
    // "&ampamp" backs off to the legacy "amp" and re-reads the tail.
    assert_eq!(resolve("&ampamp"), "&amp");
}

#[test]
fn terminated_form_is_preferred_over_legacy() {
    // "&amp;lt;" must not greedily eat past the first semicolon: the
    // remaining "lt;" has no ampersand of its own and stays literal.
    assert_eq!(resolve("&amp;lt;"), "&lt;");
}

#[test]
fn numeric_and_named_references_agree() {
    assert_eq!(resolve("&#38;"), resolve("&amp;"));
    assert_eq!(resolve("&#x3C;"), resolve("&lt;"));
}
