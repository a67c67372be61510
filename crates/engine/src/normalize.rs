//! Canonicalization of raw cell values into comparable forms.
//!
//! Scoring never sees raw text directly: codes become digit strings, numbers
//! become `Option<f64>` (None = no information, never a mismatch), free text
//! is accent-folded, units go through a closed synonym table.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Collapse a spreadsheet scientific-notation cell ("7.80432E+12") back to
/// its integer digit string. Returns None when the value isn't that shape.
fn scientific_to_digits(raw: &str) -> Option<String> {
    if !raw.contains(['e', 'E']) {
        return None;
    }
    // Comma-decimal locales export "7,80432E+12".
    let value: f64 = raw.replace(',', ".").parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(format!("{value:.0}"))
}

/// Strip a code cell down to at most 14 digits.
///
/// Long barcodes round-trip through spreadsheets as scientific notation, so
/// those are expanded first. Empty or digit-free input yields "".
pub fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let expanded = scientific_to_digits(trimmed);
    let source = expanded.as_deref().unwrap_or(trimmed);
    source.chars().filter(|c| c.is_ascii_digit()).take(14).collect()
}

/// Parse a numeric cell under the comma-decimal convention: `.` is a
/// thousands separator, `,` is the decimal separator. Scientific notation is
/// accepted. Unparsable input is `None` ("no information"), distinct from 0.
pub fn normalize_number(raw: &str) -> Option<f64> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return None;
    }
    let rewritten = stripped.replace('.', "").replace(',', ".");
    match rewritten.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Lowercase, decompose (NFD) and drop combining marks, collapse whitespace
/// runs to single spaces. "Yogur Batido Ñam" -> "yogur batido nam".
pub fn normalize_text(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for ch in raw.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        for lower in ch.to_lowercase() {
            folded.push(lower);
        }
    }
    let mut collapsed = String::with_capacity(folded.len());
    for word in folded.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    collapsed
}

/// Text-normalize, then map measurement units through the closed synonym
/// table. Unmapped values pass through unchanged.
pub fn normalize_unit(raw: &str) -> String {
    let folded = normalize_text(raw);
    let mapped = match folded.as_str() {
        "kilogramo" | "kilogramos" | "kilogram" | "kilograms" | "kilo" | "kilos" | "kg" => "kg",
        "gramo" | "gramos" | "gram" | "grams" | "gr" | "g" => "g",
        "litro" | "litros" | "litre" | "litres" | "liter" | "liters" | "lt" | "l" => "l",
        "mililitro" | "mililitros" | "millilitre" | "millilitres" | "milliliter"
        | "milliliters" | "ml" => "ml",
        "unidad" | "unidades" | "unit" | "units" | "un" | "u" => "un",
        "metro" | "metros" | "metre" | "metres" | "meter" | "meters" | "mt" | "m" => "m",
        "centimetro" | "centimetros" | "centimetre" | "centimetres" | "centimeter"
        | "centimeters" | "cm" => "cm",
        _ => return folded,
    };
    mapped.to_string()
}
