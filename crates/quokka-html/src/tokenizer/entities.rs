//! Named character reference lookup and numeric reference tables.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The named table is the crate's entity lookup service: a process-wide,
//! read-only map initialized once and safe for concurrent lookups from any
//! number of tokenizer instances. The full standard defines 2,231 entities;
//! this table carries the ones that occur in real documents, including the
//! legacy forms that match without a trailing semicolon.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps entity names (without the leading `&`) to their replacement strings.
/// Names that terminate with `;` are stored with the semicolon included, so
/// longest-prefix matching naturally prefers the terminated form.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Markup-significant characters, with their legacy semicolon-less forms.
    m.insert("amp;", "&");
    m.insert("amp", "&");
    m.insert("AMP;", "&");
    m.insert("AMP", "&");
    m.insert("lt;", "<");
    m.insert("lt", "<");
    m.insert("LT;", "<");
    m.insert("LT", "<");
    m.insert("gt;", ">");
    m.insert("gt", ">");
    m.insert("GT;", ">");
    m.insert("GT", ">");
    m.insert("quot;", "\"");
    m.insert("quot", "\"");
    m.insert("QUOT;", "\"");
    m.insert("QUOT", "\"");
    m.insert("apos;", "'");
    m.insert("nbsp;", "\u{00A0}");
    m.insert("nbsp", "\u{00A0}");

    // Common punctuation and symbols.
    m.insert("copy;", "\u{00A9}");
    m.insert("copy", "\u{00A9}");
    m.insert("reg;", "\u{00AE}");
    m.insert("reg", "\u{00AE}");
    m.insert("trade;", "\u{2122}");
    m.insert("sect;", "\u{00A7}");
    m.insert("para;", "\u{00B6}");
    m.insert("micro;", "\u{00B5}");
    m.insert("mdash;", "\u{2014}");
    m.insert("ndash;", "\u{2013}");
    m.insert("hellip;", "\u{2026}");
    m.insert("bull;", "\u{2022}");
    m.insert("middot;", "\u{00B7}");
    m.insert("dagger;", "\u{2020}");
    m.insert("Dagger;", "\u{2021}");
    m.insert("permil;", "\u{2030}");
    m.insert("prime;", "\u{2032}");
    m.insert("Prime;", "\u{2033}");
    m.insert("lsquo;", "\u{2018}");
    m.insert("rsquo;", "\u{2019}");
    m.insert("sbquo;", "\u{201A}");
    m.insert("ldquo;", "\u{201C}");
    m.insert("rdquo;", "\u{201D}");
    m.insert("bdquo;", "\u{201E}");
    m.insert("laquo;", "\u{00AB}");
    m.insert("raquo;", "\u{00BB}");
    m.insert("lsaquo;", "\u{2039}");
    m.insert("rsaquo;", "\u{203A}");
    m.insert("iexcl;", "\u{00A1}");
    m.insert("iquest;", "\u{00BF}");
    m.insert("shy;", "\u{00AD}");
    m.insert("oline;", "\u{203E}");
    m.insert("frasl;", "\u{2044}");

    // Spaces and formatting controls.
    m.insert("ensp;", "\u{2002}");
    m.insert("emsp;", "\u{2003}");
    m.insert("thinsp;", "\u{2009}");
    m.insert("zwnj;", "\u{200C}");
    m.insert("zwj;", "\u{200D}");
    m.insert("lrm;", "\u{200E}");
    m.insert("rlm;", "\u{200F}");

    // Currency.
    m.insert("cent;", "\u{00A2}");
    m.insert("pound;", "\u{00A3}");
    m.insert("curren;", "\u{00A4}");
    m.insert("yen;", "\u{00A5}");
    m.insert("euro;", "\u{20AC}");

    // Math and comparison.
    m.insert("times;", "\u{00D7}");
    m.insert("divide;", "\u{00F7}");
    m.insert("plusmn;", "\u{00B1}");
    m.insert("minus;", "\u{2212}");
    m.insert("lowast;", "\u{2217}");
    m.insert("radic;", "\u{221A}");
    m.insert("prop;", "\u{221D}");
    m.insert("infin;", "\u{221E}");
    m.insert("ne;", "\u{2260}");
    m.insert("equiv;", "\u{2261}");
    m.insert("le;", "\u{2264}");
    m.insert("ge;", "\u{2265}");
    m.insert("sim;", "\u{223C}");
    m.insert("cong;", "\u{2245}");
    m.insert("asymp;", "\u{2248}");
    m.insert("sub;", "\u{2282}");
    m.insert("sup;", "\u{2283}");
    m.insert("sube;", "\u{2286}");
    m.insert("supe;", "\u{2287}");
    m.insert("oplus;", "\u{2295}");
    m.insert("otimes;", "\u{2297}");
    m.insert("perp;", "\u{22A5}");
    m.insert("sdot;", "\u{22C5}");
    m.insert("forall;", "\u{2200}");
    m.insert("part;", "\u{2202}");
    m.insert("exist;", "\u{2203}");
    m.insert("empty;", "\u{2205}");
    m.insert("nabla;", "\u{2207}");
    m.insert("isin;", "\u{2208}");
    m.insert("notin;", "\u{2209}");
    m.insert("ni;", "\u{220B}");
    m.insert("prod;", "\u{220F}");
    m.insert("sum;", "\u{2211}");
    m.insert("and;", "\u{2227}");
    m.insert("or;", "\u{2228}");
    m.insert("cap;", "\u{2229}");
    m.insert("cup;", "\u{222A}");
    m.insert("int;", "\u{222B}");
    m.insert("there4;", "\u{2234}");
    m.insert("deg;", "\u{00B0}");
    m.insert("deg", "\u{00B0}");
    m.insert("not;", "\u{00AC}");
    m.insert("not", "\u{00AC}");
    m.insert("frac12;", "\u{00BD}");
    m.insert("frac14;", "\u{00BC}");
    m.insert("frac34;", "\u{00BE}");
    m.insert("sup1;", "\u{00B9}");
    m.insert("sup2;", "\u{00B2}");
    m.insert("sup3;", "\u{00B3}");
    m.insert("lceil;", "\u{2308}");
    m.insert("rceil;", "\u{2309}");
    m.insert("lfloor;", "\u{230A}");
    m.insert("rfloor;", "\u{230B}");
    m.insert("lang;", "\u{27E8}");
    m.insert("rang;", "\u{27E9}");

    // Arrows.
    m.insert("larr;", "\u{2190}");
    m.insert("uarr;", "\u{2191}");
    m.insert("rarr;", "\u{2192}");
    m.insert("darr;", "\u{2193}");
    m.insert("harr;", "\u{2194}");
    m.insert("crarr;", "\u{21B5}");

    // Greek letters.
    m.insert("Alpha;", "\u{0391}");
    m.insert("Beta;", "\u{0392}");
    m.insert("Gamma;", "\u{0393}");
    m.insert("Delta;", "\u{0394}");
    m.insert("Lambda;", "\u{039B}");
    m.insert("Pi;", "\u{03A0}");
    m.insert("Sigma;", "\u{03A3}");
    m.insert("Omega;", "\u{03A9}");
    m.insert("alpha;", "\u{03B1}");
    m.insert("beta;", "\u{03B2}");
    m.insert("gamma;", "\u{03B3}");
    m.insert("delta;", "\u{03B4}");
    m.insert("epsilon;", "\u{03B5}");
    m.insert("theta;", "\u{03B8}");
    m.insert("lambda;", "\u{03BB}");
    m.insert("mu;", "\u{03BC}");
    m.insert("pi;", "\u{03C0}");
    m.insert("rho;", "\u{03C1}");
    m.insert("sigma;", "\u{03C3}");
    m.insert("tau;", "\u{03C4}");
    m.insert("phi;", "\u{03C6}");
    m.insert("chi;", "\u{03C7}");
    m.insert("psi;", "\u{03C8}");
    m.insert("omega;", "\u{03C9}");

    // Latin letters with diacritics (legacy forms included).
    m.insert("Agrave;", "\u{00C0}");
    m.insert("Aacute;", "\u{00C1}");
    m.insert("Acirc;", "\u{00C2}");
    m.insert("Atilde;", "\u{00C3}");
    m.insert("Auml;", "\u{00C4}");
    m.insert("Aring;", "\u{00C5}");
    m.insert("AElig;", "\u{00C6}");
    m.insert("Ccedil;", "\u{00C7}");
    m.insert("Egrave;", "\u{00C8}");
    m.insert("Eacute;", "\u{00C9}");
    m.insert("Ecirc;", "\u{00CA}");
    m.insert("Euml;", "\u{00CB}");
    m.insert("Igrave;", "\u{00CC}");
    m.insert("Iacute;", "\u{00CD}");
    m.insert("Icirc;", "\u{00CE}");
    m.insert("Iuml;", "\u{00CF}");
    m.insert("Ntilde;", "\u{00D1}");
    m.insert("Ograve;", "\u{00D2}");
    m.insert("Oacute;", "\u{00D3}");
    m.insert("Ocirc;", "\u{00D4}");
    m.insert("Otilde;", "\u{00D5}");
    m.insert("Ouml;", "\u{00D6}");
    m.insert("Oslash;", "\u{00D8}");
    m.insert("Ugrave;", "\u{00D9}");
    m.insert("Uacute;", "\u{00DA}");
    m.insert("Ucirc;", "\u{00DB}");
    m.insert("Uuml;", "\u{00DC}");
    m.insert("Yacute;", "\u{00DD}");
    m.insert("szlig;", "\u{00DF}");
    m.insert("agrave;", "\u{00E0}");
    m.insert("agrave", "\u{00E0}");
    m.insert("aacute;", "\u{00E1}");
    m.insert("aacute", "\u{00E1}");
    m.insert("acirc;", "\u{00E2}");
    m.insert("atilde;", "\u{00E3}");
    m.insert("auml;", "\u{00E4}");
    m.insert("aring;", "\u{00E5}");
    m.insert("aelig;", "\u{00E6}");
    m.insert("ccedil;", "\u{00E7}");
    m.insert("ccedil", "\u{00E7}");
    m.insert("egrave;", "\u{00E8}");
    m.insert("egrave", "\u{00E8}");
    m.insert("eacute;", "\u{00E9}");
    m.insert("eacute", "\u{00E9}");
    m.insert("ecirc;", "\u{00EA}");
    m.insert("euml;", "\u{00EB}");
    m.insert("igrave;", "\u{00EC}");
    m.insert("iacute;", "\u{00ED}");
    m.insert("icirc;", "\u{00EE}");
    m.insert("iuml;", "\u{00EF}");
    m.insert("ntilde;", "\u{00F1}");
    m.insert("ntilde", "\u{00F1}");
    m.insert("ograve;", "\u{00F2}");
    m.insert("oacute;", "\u{00F3}");
    m.insert("ocirc;", "\u{00F4}");
    m.insert("otilde;", "\u{00F5}");
    m.insert("ouml;", "\u{00F6}");
    m.insert("oslash;", "\u{00F8}");
    m.insert("ugrave;", "\u{00F9}");
    m.insert("ugrave", "\u{00F9}");
    m.insert("uacute;", "\u{00FA}");
    m.insert("uacute", "\u{00FA}");
    m.insert("ucirc;", "\u{00FB}");
    m.insert("uuml;", "\u{00FC}");
    m.insert("yacute;", "\u{00FD}");
    m.insert("yuml;", "\u{00FF}");
    m.insert("OElig;", "\u{0152}");
    m.insert("oelig;", "\u{0153}");
    m.insert("Scaron;", "\u{0160}");
    m.insert("scaron;", "\u{0161}");
    m.insert("Yuml;", "\u{0178}");
    m.insert("fnof;", "\u{0192}");
    m.insert("circ;", "\u{02C6}");
    m.insert("tilde;", "\u{02DC}");

    // Card suits and misc glyphs.
    m.insert("loz;", "\u{25CA}");
    m.insert("spades;", "\u{2660}");
    m.insert("clubs;", "\u{2663}");
    m.insert("hearts;", "\u{2665}");
    m.insert("diams;", "\u{2666}");

    // Multi-character expansions exist too.
    m.insert("fjlig;", "fj");

    m
});

/// Look up a named character reference.
///
/// Returns the replacement string if found. The `name` must not include the
/// leading `&`, and includes the trailing `;` when one was consumed.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// The Windows-1252 override for numeric references in `0x80..=0x9F`: these
/// code points are C1 controls, but documents that use them almost always
/// mean the CP-1252 glyphs, so the reference resolves to the remapped
/// character. Code points in the range without a remapping fall through to
/// the ordinary range checks.
#[must_use]
pub fn windows_1252_remap(code: u32) -> Option<char> {
    Some(match code {
        0x80 => '\u{20AC}', // EURO SIGN
        0x82 => '\u{201A}', // SINGLE LOW-9 QUOTATION MARK
        0x83 => '\u{0192}', // LATIN SMALL LETTER F WITH HOOK
        0x84 => '\u{201E}', // DOUBLE LOW-9 QUOTATION MARK
        0x85 => '\u{2026}', // HORIZONTAL ELLIPSIS
        0x86 => '\u{2020}', // DAGGER
        0x87 => '\u{2021}', // DOUBLE DAGGER
        0x88 => '\u{02C6}', // MODIFIER LETTER CIRCUMFLEX ACCENT
        0x89 => '\u{2030}', // PER MILLE SIGN
        0x8A => '\u{0160}', // LATIN CAPITAL LETTER S WITH CARON
        0x8B => '\u{2039}', // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
        0x8C => '\u{0152}', // LATIN CAPITAL LIGATURE OE
        0x8E => '\u{017D}', // LATIN CAPITAL LETTER Z WITH CARON
        0x91 => '\u{2018}', // LEFT SINGLE QUOTATION MARK
        0x92 => '\u{2019}', // RIGHT SINGLE QUOTATION MARK
        0x93 => '\u{201C}', // LEFT DOUBLE QUOTATION MARK
        0x94 => '\u{201D}', // RIGHT DOUBLE QUOTATION MARK
        0x95 => '\u{2022}', // BULLET
        0x96 => '\u{2013}', // EN DASH
        0x97 => '\u{2014}', // EM DASH
        0x98 => '\u{02DC}', // SMALL TILDE
        0x99 => '\u{2122}', // TRADE MARK SIGN
        0x9A => '\u{0161}', // LATIN SMALL LETTER S WITH CARON
        0x9B => '\u{203A}', // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
        0x9C => '\u{0153}', // LATIN SMALL LIGATURE OE
        0x9E => '\u{017E}', // LATIN SMALL LETTER Z WITH CARON
        0x9F => '\u{0178}', // LATIN CAPITAL LETTER Y WITH DIAERESIS
        _ => return None,
    })
}

/// Numeric references that cannot denote a scalar value at all: zero,
/// surrogates, and anything past U+10FFFF. These resolve to U+FFFD.
#[must_use]
pub const fn is_invalid_number(code: u32) -> bool {
    code == 0 || (code >= 0xD800 && code <= 0xDFFF) || code > 0x10_FFFF
}

/// Valid scalar values a document should nevertheless not contain:
/// C0/C1 controls and the Unicode noncharacters. The resolved character is
/// kept; the caller only reports the violation.
#[must_use]
pub const fn is_invalid_range(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0D..=0x1F | 0x7F..=0x9F)
        || (code >= 0xFDD0 && code <= 0xFDEF)
        || (code & 0xFFFF) == 0xFFFE
        || (code & 0xFFFF) == 0xFFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_terminated_entities() {
        assert_eq!(lookup("amp;"), Some("&"));
        assert_eq!(lookup("lt;"), Some("<"));
        assert_eq!(lookup("eacute;"), Some("\u{00E9}"));
        assert_eq!(lookup("fjlig;"), Some("fj"));
    }

    #[test]
    fn lookup_legacy_entities_without_semicolon() {
        assert_eq!(lookup("amp"), Some("&"));
        assert_eq!(lookup("copy"), Some("\u{00A9}"));
        assert_eq!(lookup("eacute"), Some("\u{00E9}"));
        assert_eq!(lookup("trade"), None);
    }

    #[test]
    fn lookup_unknown_entity() {
        assert_eq!(lookup("notarealentity;"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn windows_1252_subset() {
        assert_eq!(windows_1252_remap(0x80), Some('\u{20AC}'));
        assert_eq!(windows_1252_remap(0x99), Some('\u{2122}'));
        // Holes in the table are not remapped.
        assert_eq!(windows_1252_remap(0x81), None);
        assert_eq!(windows_1252_remap(0x9D), None);
        assert_eq!(windows_1252_remap(0x41), None);
    }

    #[test]
    fn invalid_number_classes() {
        assert!(is_invalid_number(0));
        assert!(is_invalid_number(0xD800));
        assert!(is_invalid_number(0xDFFF));
        assert!(is_invalid_number(0x110000));
        assert!(!is_invalid_number('A' as u32));
        assert!(!is_invalid_number(0x10FFFF));
    }

    #[test]
    fn invalid_range_classes() {
        assert!(is_invalid_range(0x01));
        assert!(is_invalid_range(0x0D));
        assert!(is_invalid_range(0x81));
        assert!(is_invalid_range(0xFDD0));
        assert!(is_invalid_range(0xFFFE));
        assert!(is_invalid_range(0x1FFFF));
        assert!(!is_invalid_range('A' as u32));
        assert!(!is_invalid_range(0x20AC));
    }
}
