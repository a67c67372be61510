//! Description tokenizer. Splits normalized text on non-word runs while
//! keeping embedded decimals ("1,5" / "2.25") intact as single tokens.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize_text;

/// Stand-in for a protected decimal separator while splitting.
const DECIMAL_SENTINEL: char = '\u{1}';

static NON_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\x01]+").expect("tokenizer regex"));

/// Tokenize a description: normalize, protect digit-separator-digit
/// sequences, split on everything outside `[a-z0-9_]`, restore the protected
/// separator as a decimal point. Order-preserving; empty input -> empty vec.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = normalized.chars().collect();
    let mut protected = String::with_capacity(normalized.len());
    for (i, &ch) in chars.iter().enumerate() {
        let is_separator = ch == '.' || ch == ',';
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());
        if is_separator && between_digits {
            protected.push(DECIMAL_SENTINEL);
        } else {
            protected.push(ch);
        }
    }

    NON_TOKEN
        .replace_all(&protected, " ")
        .split_whitespace()
        .map(|token| token.replace(DECIMAL_SENTINEL, "."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Leche Entera (Bolsa) 1L"),
            vec!["leche", "entera", "bolsa", "1l"]
        );
    }

    #[test]
    fn protects_embedded_decimals() {
        assert_eq!(tokenize("yogur 1,5 lt"), vec!["yogur", "1.5", "lt"]);
        assert_eq!(tokenize("aceite 2.25lt"), vec!["aceite", "2.25lt"]);
    }

    #[test]
    fn bare_separators_still_split() {
        assert_eq!(tokenize("arroz, grado 2"), vec!["arroz", "grado", "2"]);
    }

    #[test]
    fn accents_folded_before_split() {
        assert_eq!(tokenize("Té Ceylán"), vec!["te", "ceylan"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" .,- ").is_empty());
    }
}
