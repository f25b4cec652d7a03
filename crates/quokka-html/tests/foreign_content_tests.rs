//! Integration tests for the foreign content filter.

use quokka_html::{ForeignContentFilter, HtmlTokenizer, TextSource, Token};

fn filter(input: &str) -> ForeignContentFilter {
    ForeignContentFilter::new(HtmlTokenizer::new(TextSource::new(input)))
}

/// Pull every token through the filter.
fn filtered_tokens(input: &str) -> Vec<Token> {
    let mut f = filter(input);
    let mut tokens = Vec::new();
    while f.read_next().expect("tolerant mode never fails") {
        tokens.push(f.current().clone());
    }
    tokens.push(f.current().clone());
    tokens
}

#[test]
fn svg_depth_tracks_the_subtree() {
    let mut f = filter("<svg><g/></svg>");
    assert_eq!(f.svg_depth(), -1);
    assert!(f.read_next().unwrap());
    assert!(matches!(f.current(), Token::StartTag { name, .. } if name == "svg"));
    assert_eq!(f.svg_depth(), 0);
    assert!(f.read_next().unwrap());
    assert!(matches!(f.current(), Token::StartTag { name, self_closing, .. }
        if name == "g" && *self_closing));
    assert_eq!(f.svg_depth(), 0); // self-closing does not nest
    assert!(f.read_next().unwrap());
    assert!(matches!(f.current(), Token::EndTag { name, .. } if name == "svg"));
    assert_eq!(f.svg_depth(), -1);
    assert!(!f.read_next().unwrap());
}

#[test]
fn nested_svg_elements_increment_the_depth() {
    let mut f = filter("<svg><g><rect></rect></g></svg>");
    let mut depths = Vec::new();
    while f.read_next().unwrap() {
        depths.push(f.svg_depth());
    }
    assert_eq!(depths, [0, 1, 2, 1, 0, -1]);
    assert_eq!(f.svg_depth(), -1);
}

#[test]
fn svg_attribute_casing_is_restored() {
    let tokens = filtered_tokens(r#"<svg viewbox="0 0 1 1"><textpath attributename="x"/></svg>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => assert_eq!(attributes[0].name, "viewBox"),
        _ => panic!("expected start tag"),
    }
    match &tokens[1] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "textPath");
            assert_eq!(attributes[0].name, "attributeName");
        }
        _ => panic!("expected start tag"),
    }
}

#[test]
fn svg_end_tag_names_are_adjusted_symmetrically() {
    let tokens = filtered_tokens("<svg><foreignobject></foreignobject></svg>");
    assert!(matches!(&tokens[1], Token::StartTag { name, .. } if name == "foreignObject"));
    assert!(matches!(&tokens[2], Token::EndTag { name, .. } if name == "foreignObject"));
}

#[test]
fn mathml_definitionurl_is_adjusted() {
    let mut f = filter(r##"<math definitionurl="#def"><mi>x</mi></math>"##);
    assert!(f.read_next().unwrap());
    match f.current() {
        Token::StartTag { attributes, .. } => assert_eq!(attributes[0].name, "definitionURL"),
        _ => panic!("expected start tag"),
    }
    assert_eq!(f.mathml_depth(), 0);
    assert_eq!(f.svg_depth(), -1);
    while f.read_next().unwrap() {}
    assert_eq!(f.mathml_depth(), -1);
}

#[test]
fn depths_are_disjoint_inside_foreign_content() {
    // A <math> inside an SVG subtree nests the SVG depth, not the MathML one.
    let mut f = filter("<svg><math></math></svg>");
    assert!(f.read_next().unwrap()); // svg
    assert!(f.read_next().unwrap()); // math
    assert_eq!(f.svg_depth(), 1);
    assert_eq!(f.mathml_depth(), -1);
    while f.read_next().unwrap() {}
    assert_eq!(f.svg_depth(), -1);
}

#[test]
fn self_closing_root_does_not_enter_foreign_content() {
    let mut f = filter("<svg/><p>");
    assert!(f.read_next().unwrap());
    assert_eq!(f.svg_depth(), -1);
    assert!(f.read_next().unwrap());
    assert!(matches!(f.current(), Token::StartTag { name, .. } if name == "p"));
    assert_eq!(f.svg_depth(), -1);
}

#[test]
fn cdata_sections_are_enabled_inside_foreign_content() {
    let tokens = filtered_tokens("<svg><![CDATA[a<b]]></svg>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "svg"));
    assert!(matches!(&tokens[1], Token::Text { data, .. } if data == "a<b"));
    assert!(matches!(&tokens[2], Token::EndTag { name, .. } if name == "svg"));
}

#[test]
fn cdata_sections_stay_disabled_outside_foreign_content() {
    let tokens = filtered_tokens("<![CDATA[a<b]]>");
    assert!(matches!(&tokens[0], Token::Comment { downlevel_revealed, .. }
        if *downlevel_revealed));
}
