//! MathML case adjustments.
//!
//! [§ 13.2.6.3 Adjust MathML attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-mathml-attributes)
//!
//! MathML element names are all-lowercase, so only one attribute needs its
//! casing restored.

use crate::tokenizer::Attribute;

const MATHML_ATTRIBUTE_ADJUSTMENTS: &[(&str, &str)] = &[("definitionurl", "definitionURL")];

/// Restore the canonical casing of MathML attribute names.
pub fn adjust_attributes(attributes: &mut [Attribute]) {
    for attribute in attributes {
        for &(from, to) in MATHML_ATTRIBUTE_ADJUSTMENTS {
            if attribute.name == from {
                attribute.name = to.to_string();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitionurl_restores_casing() {
        let mut attributes = vec![Attribute::new("definitionurl".into(), "#".into())];
        adjust_attributes(&mut attributes);
        assert_eq!(attributes[0].name, "definitionURL");
    }
}
