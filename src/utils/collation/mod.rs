//! Student name ordering.
//!
//! A small deterministic stand-in for a Hebrew-locale collator: Hebrew
//! letters sort before Latin, niqqud and other combining marks are ignored
//! at the primary level, and final letter forms (ך ם ן ף ץ) sort with their
//! regular forms. Remaining ties fall back to the raw strings so the order
//! is total.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Character classes in collation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Separator,
    Digit,
    Hebrew,
    Other,
}

fn fold_final_form(c: char) -> char {
    match c {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => other,
    }
}

fn classify(c: char) -> CharClass {
    if ('\u{05D0}'..='\u{05EA}').contains(&c) {
        CharClass::Hebrew
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Other
    } else {
        CharClass::Separator
    }
}

/// Primary collation key of a name.
pub fn collation_key(name: &str) -> Vec<(u8, u32)> {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(fold_final_form)
        .flat_map(char::to_lowercase)
        .map(|c| (classify(c) as u8, c as u32))
        .collect()
}

/// Compare two student names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.nfc().cmp(b.nfc()))
        .then_with(|| a.cmp(b))
}
