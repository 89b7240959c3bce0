use regex::Regex;
use std::sync::OnceLock;

use crate::error::ExtractError;

/// A non-word character (currency glyph, space, separator) followed by a
/// digit run. The digit run is captured; the leading character is dropped.
const STACK_PATTERN: &str = r"\W(\d+)";

static STACK_REGEX: OnceLock<Regex> = OnceLock::new();
static DIGITS_REGEX: OnceLock<Regex> = OnceLock::new();

fn stack_regex() -> &'static Regex {
    STACK_REGEX.get_or_init(|| Regex::new(STACK_PATTERN).expect("stack pattern is valid"))
}

fn digits_regex() -> &'static Regex {
    DIGITS_REGEX.get_or_init(|| Regex::new(r"\d+").expect("digits pattern is valid"))
}

/// Cleans OCR text read from a stack display.
///
/// Concatenates every digit run that directly follows a non-word character,
/// scanning left to right. Text without such a run yields an empty string.
pub fn normalize_stack(raw: &str) -> String {
    stack_regex()
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect::<String>()
        .replace([' ', '\n'], "")
}

/// Cleans OCR text read from a bet display: newlines are removed, everything
/// else (currency marks, separators) is kept.
pub fn normalize_bet(raw: &str) -> String {
    raw.replace('\n', "")
}

/// Extracts the pot amount that follows `label:` in OCR text of the whole
/// table.
///
/// The first `label:` occurrence wins, even when another one further down
/// carries digits.
pub fn normalize_bank(raw: &str, label: &str) -> Result<String, ExtractError> {
    let pattern = format!(r#"{}:[" ]*\d*"#, regex::escape(label));
    let label_regex = Regex::new(&pattern)
        .map_err(|e| ExtractError::ExtractionFailed(format!("invalid bank label: {}", e)))?;

    let found = label_regex
        .find(raw)
        .ok_or_else(|| ExtractError::LabelNotFound {
            label: label.to_string(),
        })?;

    // Skip the label itself so digits in it are never taken as the value
    digits_regex()
        .find(&found.as_str()[label.len()..])
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::ValueMissing {
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = "Банк";

    #[test]
    fn test_stack_currency_with_thousands_separator() {
        assert_eq!(normalize_stack("$ 1,250\n"), "1250");
    }

    #[test]
    fn test_stack_euro() {
        assert_eq!(normalize_stack("€ 980"), "980");
    }

    #[test]
    fn test_stack_no_match_is_empty() {
        assert_eq!(normalize_stack(""), "");
        assert_eq!(normalize_stack("abc"), "");
        // Digits at the very start have no non-word character in front
        assert_eq!(normalize_stack("1250"), "");
        assert_eq!(normalize_stack("x12"), "");
    }

    #[test]
    fn test_stack_idempotent_behind_wrapper() {
        for raw in ["$ 1,250\n", "€ 980", "Stack: 12 000", "(45)\n\n"] {
            let once = normalize_stack(raw);
            let twice = normalize_stack(&format!(" {}", once));
            assert_eq!(once, twice, "raw input {:?}", raw);
        }
    }

    #[test]
    fn test_stack_left_to_right_order() {
        assert_eq!(normalize_stack("#3 |41 .5"), "3415");
    }

    #[test]
    fn test_stack_drops_glyph_and_trailing_words() {
        assert_eq!(normalize_stack("₽ 7 500 chips"), "7500");
    }

    #[test]
    fn test_bet_strips_newlines_only() {
        assert_eq!(normalize_bet("1 200 ₽\n\n"), "1 200 ₽");
        assert_eq!(normalize_bet("Ставка\n300"), "Ставка300");
        assert_eq!(normalize_bet(""), "");
    }

    #[test]
    fn test_bank_basic() {
        assert_eq!(normalize_bank("Банк: 4500\n", BANK).unwrap(), "4500");
    }

    #[test]
    fn test_bank_inside_table_text() {
        let text = "Игрок 1\nСтавка 200\nБанк:   12000 \nИгрок 2\n";
        assert_eq!(normalize_bank(text, BANK).unwrap(), "12000");
    }

    #[test]
    fn test_bank_quote_noise_after_colon() {
        assert_eq!(normalize_bank("Банк:\" 300", BANK).unwrap(), "300");
    }

    #[test]
    fn test_bank_label_missing() {
        let err = normalize_bank("Ставка: 4500\n", BANK).unwrap_err();
        assert!(matches!(err, ExtractError::LabelNotFound { ref label } if label == BANK));
    }

    #[test]
    fn test_bank_label_without_digits() {
        let err = normalize_bank("Банк: --\nБанк: 500", BANK).unwrap_err();
        assert!(matches!(err, ExtractError::ValueMissing { .. }));
    }

    #[test]
    fn test_bank_custom_label() {
        assert_eq!(normalize_bank("Pot: 75\n", "Pot").unwrap(), "75");
        assert_eq!(normalize_bank("Pot2: 75\n", "Pot2").unwrap(), "75");
    }

    #[test]
    fn test_bank_non_ascii_digits() {
        assert_eq!(normalize_bank("Банк: ٤٥٠٠", BANK).unwrap(), "٤٥٠٠");
        assert_eq!(normalize_bank("Банк: ١2", BANK).unwrap(), "١2");
        assert_eq!(normalize_stack("$ ٤٥"), "٤٥");
    }
}
