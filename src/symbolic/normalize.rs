//! Rewrites a formula typed by a human into text the parser reads without guessing.
//!
//! Two textual rules are applied, in this order:
//! 1. `word ^ digits` becomes `word**digits` (caret exponent on a word base)
//! 2. `<digit><letter>` becomes `<digit>*<letter>` (implicit multiplication)
//!
//! The rules are plain pattern substitutions, not a tokenizer: `(x+1)^3` is left
//! as is, and `2xy` becomes `2*xy`. The parser itself understands `^` for any
//! base and juxtaposed factors such as `2(x+1)`, so those forms still evaluate
//! correctly after normalization.
//!
//! # Example
//! ```
//! use RustedGaussQuad::symbolic::normalize::normalize;
//! assert_eq!(normalize("x^2 + 2*x + 1"), "x**2 + 2*x + 1");
//! assert_eq!(normalize("2x + 1"), "2*x + 1");
//! ```
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    // word ^ digits
    static ref CARET_EXPONENT: Regex =
        Regex::new(r"([A-Za-z0-9_]+)\s*\^\s*([0-9]+)").expect("valid regex");
    // digit immediately followed by a letter
    static ref DIGIT_LETTER: Regex = Regex::new(r"([0-9])([A-Za-z])").expect("valid regex");
}

/// Applies the caret-exponent rule and then the implicit-multiplication rule.
/// Pure; the input is not modified and no validation is performed.
pub fn normalize(raw: &str) -> String {
    let with_powers = CARET_EXPONENT.replace_all(raw, "${1}**${2}");
    let normalized = DIGIT_LETTER.replace_all(&with_powers, "${1}*${2}").into_owned();
    if normalized != raw {
        debug!("normalized '{}' into '{}'", raw, normalized);
    }
    normalized
}
