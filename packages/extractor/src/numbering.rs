//! Canonical numbering for articles and transitory provisions.
//!
//! Source documents number articles as `14`, `14 Bis`, `XIV`, `3o.` or
//! `5º`, and transitory provisions as `Primero`, `II` or `3`. Everything is
//! reduced to one canonical string: a decimal base with an optional
//! hyphenated uppercase suffix (`14-BIS`) for articles, and the Spanish
//! ordinal word (`Primero`) for transitories.

use regex::Regex;
use std::sync::LazyLock;

/// Ordinal sign marks: `5º`, `5°`, `5ª`, optionally followed by a period.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ORDINAL_SIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[º°ª]\.?").expect("valid regex"));

/// Spanish ordinal `o` glued to the digits: `3o`, `3o.`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GLUED_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d)o\.?$").expect("valid regex"));

/// Free-standing `o.` abbreviation at the end of the token.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LONE_ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)o\.\s*$").expect("valid regex"));

/// Trailing suffix token, optionally introduced by a hyphen or en-dash.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:[-–]\s*)?(bis|ter|qu[áa]ter|quinquies|sexies|septies|octies|nonies|decies|[a-z])$",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PURE_ROMAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[ivxlcdm]+$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,4}").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SMALL_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}$").expect("valid regex"));

/// Canonical transitory ordinals for 1 through 12.
pub const ORDINALS: [&str; 12] = [
    "Primero",
    "Segundo",
    "Tercero",
    "Cuarto",
    "Quinto",
    "Sexto",
    "Séptimo",
    "Octavo",
    "Noveno",
    "Décimo",
    "Undécimo",
    "Duodécimo",
];

/// Canonical ordinal of a sole transitory provision.
pub const SOLE_ORDINAL: &str = "Único";

/// Lower-case spellings accepted for each canonical ordinal word.
pub(crate) const ORDINAL_WORDS: &[(&str, &str)] = &[
    ("único", SOLE_ORDINAL),
    ("unico", SOLE_ORDINAL),
    ("sole", SOLE_ORDINAL),
    ("only", SOLE_ORDINAL),
    ("primero", "Primero"),
    ("first", "Primero"),
    ("segundo", "Segundo"),
    ("second", "Segundo"),
    ("tercero", "Tercero"),
    ("third", "Tercero"),
    ("cuarto", "Cuarto"),
    ("fourth", "Cuarto"),
    ("quinto", "Quinto"),
    ("fifth", "Quinto"),
    ("sexto", "Sexto"),
    ("sixth", "Sexto"),
    ("séptimo", "Séptimo"),
    ("septimo", "Séptimo"),
    ("seventh", "Séptimo"),
    ("octavo", "Octavo"),
    ("eighth", "Octavo"),
    ("noveno", "Noveno"),
    ("ninth", "Noveno"),
    ("décimo", "Décimo"),
    ("decimo", "Décimo"),
    ("tenth", "Décimo"),
    ("undécimo", "Undécimo"),
    ("undecimo", "Undécimo"),
    ("eleventh", "Undécimo"),
    ("duodécimo", "Duodécimo"),
    ("duodecimo", "Duodécimo"),
    ("twelfth", "Duodécimo"),
];

/// Decode a Roman numeral.
///
/// Accumulates right to left, subtracting a digit whenever it is smaller
/// than the largest digit seen so far. Case-insensitive.
///
/// # Returns
/// * `Some(n)` for a non-empty numeral with a positive value
/// * `None` for empty input, non-Roman characters, or a non-positive total
///
/// # Examples
/// ```
/// use normativa_extractor::numbering::decode_roman;
///
/// assert_eq!(decode_roman("XIV"), Some(14));
/// assert_eq!(decode_roman("mcmxcix"), Some(1999));
/// assert_eq!(decode_roman("X1"), None);
/// ```
#[must_use]
pub fn decode_roman(numeral: &str) -> Option<u32> {
    if numeral.is_empty() {
        return None;
    }

    let mut total: i64 = 0;
    let mut running_max: i64 = 0;
    for ch in numeral.chars().rev() {
        let value = match ch.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < running_max {
            total -= value;
        } else {
            total += value;
            running_max = value;
        }
    }

    u32::try_from(total).ok().filter(|n| *n > 0)
}

/// Normalize an article number token to canonical form.
///
/// Total and pure: every input yields a string, and the same input always
/// yields the same string.
///
/// # Examples
/// ```
/// use normativa_extractor::numbering::normalize_article_number;
///
/// assert_eq!(normalize_article_number("XIV Bis"), "14-BIS");
/// assert_eq!(normalize_article_number("3o."), "3");
/// assert_eq!(normalize_article_number("5º"), "5");
/// assert_eq!(normalize_article_number("27 A"), "27-A");
/// ```
#[must_use]
pub fn normalize_article_number(raw: &str) -> String {
    let token = ORDINAL_SIGN.replace_all(raw.trim(), "");
    let token = GLUED_ORDINAL.replace(token.trim(), "$1");
    let token = LONE_ABBREVIATION.replace(token.trim(), "");
    let token = token.trim();

    let (base, suffix) = split_suffix(token);

    let base = if PURE_ROMAN.is_match(base) {
        decode_roman(base).map(|n| n.to_string())
    } else {
        None
    }
    .or_else(|| DIGIT_RUN.find(base).map(|m| m.as_str().to_string()))
    .unwrap_or_else(|| base.to_string());

    match suffix {
        Some(suffix) => format!("{base}-{suffix}"),
        None => base,
    }
}

/// Split a trailing suffix off a cleaned token.
///
/// A single letter is only a suffix when it follows a number (digits or a
/// Roman numeral) and the token is not itself a Roman numeral (`XIV` is
/// fourteen, not `XI` + `V`). A suffix is never split off when nothing would
/// remain of the base.
fn split_suffix(token: &str) -> (&str, Option<String>) {
    let Some(caps) = SUFFIX.captures(token) else {
        return (token, None);
    };
    let (Some(whole), Some(word)) = (caps.get(0), caps.get(1)) else {
        return (token, None);
    };

    let base = token[..whole.start()].trim();
    if base.is_empty() {
        return (token, None);
    }
    if word.as_str().chars().count() == 1 {
        let follows_number =
            base.ends_with(|c: char| c.is_ascii_digit()) || PURE_ROMAN.is_match(base);
        if !follows_number || PURE_ROMAN.is_match(token) {
            return (token, None);
        }
    }

    (base, Some(word.as_str().to_uppercase()))
}

/// Normalize a transitory item marker to its canonical ordinal word.
///
/// Resolution order: ordinal word table, then Roman numeral, then a 1–3
/// digit decimal (1–12 map onto the table, anything else stays decimal),
/// and finally the capitalized raw text.
///
/// # Examples
/// ```
/// use normativa_extractor::numbering::normalize_transitory_ordinal;
///
/// assert_eq!(normalize_transitory_ordinal("PRIMERO"), "Primero");
/// assert_eq!(normalize_transitory_ordinal("First"), "Primero");
/// assert_eq!(normalize_transitory_ordinal("VII"), "Séptimo");
/// assert_eq!(normalize_transitory_ordinal("15"), "15");
/// ```
#[must_use]
pub fn normalize_transitory_ordinal(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();

    if let Some((_, canonical)) = ORDINAL_WORDS.iter().find(|(word, _)| *word == lower) {
        return (*canonical).to_string();
    }

    if PURE_ROMAN.is_match(&lower) {
        if let Some(n) = decode_roman(&lower) {
            return ordinal_for(n);
        }
    }

    if SMALL_DECIMAL.is_match(&lower) {
        if let Ok(n) = lower.parse::<u32>() {
            return ordinal_for(n);
        }
    }

    capitalize(trimmed)
}

/// Map 1–12 to the ordinal table; anything else renders as a decimal.
fn ordinal_for(n: u32) -> String {
    usize::try_from(n)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| ORDINALS.get(idx))
        .map_or_else(|| n.to_string(), |word| (*word).to_string())
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}
