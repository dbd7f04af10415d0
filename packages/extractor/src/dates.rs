//! Publication date harvesting.
//!
//! Gazette texts carry dates in several shapes: the consolidation notice
//! ("Texto vigente … Última reforma publicada DOF 13-03-2020"), the page
//! masthead ("Lunes 15 de enero de 2020"), long-form dates in the prose and
//! plain numeric dates. Four independent scans pool every candidate; the
//! publication date is the latest one.

use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Month table: number and accepted lower-case names.
///
/// `setiembre` is the legacy spelling of September.
const MONTHS: [(u32, &[&str]); 12] = [
    (1, &["enero", "january"]),
    (2, &["febrero", "february"]),
    (3, &["marzo", "march"]),
    (4, &["abril", "april"]),
    (5, &["mayo", "may"]),
    (6, &["junio", "june"]),
    (7, &["julio", "july"]),
    (8, &["agosto", "august"]),
    (9, &["septiembre", "setiembre", "september"]),
    (10, &["octubre", "october"]),
    (11, &["noviembre", "november"]),
    (12, &["diciembre", "december"]),
];

const WEEKDAYS: &str = r"lunes|martes|mi[eé]rcoles|jueves|viernes|s[aá]bado|domingo|monday|tuesday|wednesday|thursday|friday|saturday|sunday";

const NUMERIC_DATE: &str = r"(?P<d>\d{1,2})[-/](?P<m>\d{1,2})[-/](?P<y>\d{4})";

const NUMERIC_DATE_ALT: &str = r"(?P<d2>\d{1,2})[-/](?P<m2>\d{1,2})[-/](?P<y2>\d{4})";

/// Build the long-form date pattern: "15 de enero de 2020",
/// "15 of January of 2020" or "January 15, 2020".
fn long_date_pattern() -> String {
    let months = MONTHS
        .iter()
        .flat_map(|(_, names)| names.iter().copied())
        .collect::<Vec<_>>()
        .join("|");
    format!(
        r"(?:(?P<d>\d{{1,2}})\s+(?:de|of)\s+(?P<m>{months})\s+(?:del|de|of)\s+(?P<y>\d{{4}})|\b(?P<m2>{months})\s+(?P<d2>\d{{1,2}}),?\s+(?P<y2>\d{{4}}))"
    )
}

/// Consolidation notice followed by a numeric date, optionally bracketed.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAST_REFORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:texto\s+vigente|current\s+text).*?(?:[úu]ltima\s+reforma\s+publicada\s+dof|last\s+reform\s+published).*?(?:\[\s*{NUMERIC_DATE}\s*\]|{NUMERIC_DATE_ALT})"
    ))
    .expect("valid regex")
});

/// Masthead date: optional weekday, then a long-form date.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MASTHEAD_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:{WEEKDAYS})?\s*{}", long_date_pattern())).expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LONG_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){}", long_date_pattern())).expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(NUMERIC_DATE).expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Look up a month name case-insensitively.
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(_, names)| names.contains(&lower.as_str()))
        .map(|(number, _)| *number)
}

/// Build a date from captured day, month and year. Invalid dates are `None`.
fn to_date(day: &str, month: u32, year: &str) -> Option<NaiveDate> {
    let day = day.parse().ok()?;
    let year = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Read a numeric D/M/Y date from a capture set, trying the primary group
/// names first and the `…2` names second.
fn numeric_from(caps: &Captures<'_>) -> Option<NaiveDate> {
    for (d, m, y) in [("d", "m", "y"), ("d2", "m2", "y2")] {
        if let (Some(day), Some(month), Some(year)) = (caps.name(d), caps.name(m), caps.name(y)) {
            let month = month.as_str().parse().ok()?;
            return to_date(day.as_str(), month, year.as_str());
        }
    }
    None
}

/// Read a long-form date from a capture set.
fn long_from(caps: &Captures<'_>) -> Option<NaiveDate> {
    for (d, m, y) in [("d", "m", "y"), ("d2", "m2", "y2")] {
        if let (Some(day), Some(month), Some(year)) = (caps.name(d), caps.name(m), caps.name(y)) {
            let month = month_number(month.as_str())?;
            return to_date(day.as_str(), month, year.as_str());
        }
    }
    None
}

/// Extract every date candidate from a text.
///
/// The result pools four scans in order (consolidation notice, masthead,
/// long-form, numeric) and may contain duplicates. Invalid calendar dates
/// are dropped silently.
#[must_use]
pub fn extract_dates(text: &str) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    dates.extend(LAST_REFORM.captures_iter(text).filter_map(|c| numeric_from(&c)));
    dates.extend(MASTHEAD_DATE.captures_iter(text).filter_map(|c| long_from(&c)));
    dates.extend(LONG_DATE.captures_iter(text).filter_map(|c| long_from(&c)));
    dates.extend(NUMERIC.captures_iter(text).filter_map(|c| numeric_from(&c)));
    dates
}

/// Latest date found in a text, if any.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use normativa_extractor::dates::latest_date;
///
/// let text = "Publicado el 15 de enero de 2020. Reforma: 06/03/2021.";
/// assert_eq!(latest_date(text), NaiveDate::from_ymd_opt(2021, 3, 6));
/// assert_eq!(latest_date("sin fecha"), None);
/// ```
#[must_use]
pub fn latest_date(text: &str) -> Option<NaiveDate> {
    extract_dates(text).into_iter().max()
}

/// Parse a strict `YYYYMMDD` token from a file name.
///
/// The token is the first run of exactly eight digits; longer or shorter
/// digit runs are ignored. An invalid calendar date yields `None`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use normativa_extractor::dates::date_from_filename;
///
/// assert_eq!(
///     date_from_filename("norma_20220301_v2.pdf"),
///     NaiveDate::from_ymd_opt(2022, 3, 1)
/// );
/// assert_eq!(date_from_filename("norma_v2.pdf"), None);
/// ```
#[must_use]
pub fn date_from_filename(filename: &str) -> Option<NaiveDate> {
    let token = DIGIT_RUN
        .find_iter(filename)
        .map(|m| m.as_str())
        .find(|run| run.len() == 8)?;
    let year = token[..4].parse().ok()?;
    let month = token[4..6].parse().ok()?;
    let day = token[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_latest_mixed_formats() {
        let text = "Signed on January 15, 2020.\nAmended 06/03/2021.";
        assert_eq!(latest_date(text), Some(ymd(2021, 3, 6)));
    }

    #[test]
    fn test_long_form_spanish() {
        let dates = extract_dates("Ciudad de México, a 9 de Septiembre de 2019.");
        assert!(dates.contains(&ymd(2019, 9, 9)));
    }

    #[test]
    fn test_long_form_legacy_spelling_and_del() {
        let dates = extract_dates("publicada el 1 de setiembre del 2005");
        assert!(dates.contains(&ymd(2005, 9, 1)));
    }

    #[test]
    fn test_long_form_english_of() {
        let dates = extract_dates("issued on 2 of March of 2018");
        assert!(dates.contains(&ymd(2018, 3, 2)));
    }

    #[test]
    fn test_masthead_with_weekday() {
        let text = "DIARIO OFICIAL Lunes 15 de enero de 2024";
        let dates = extract_dates(text);
        // Found by both the masthead and the long-form scan
        assert_eq!(dates.iter().filter(|d| **d == ymd(2024, 1, 15)).count(), 2);
    }

    #[test]
    fn test_last_reform_bracketed() {
        let text = "TEXTO VIGENTE Última reforma publicada DOF [13/03/2020]";
        let dates = extract_dates(text);
        assert_eq!(dates.first(), Some(&ymd(2020, 3, 13)));
    }

    #[test]
    fn test_last_reform_english() {
        let text = "Current text. Last reform published 01-12-2022";
        assert_eq!(extract_dates(text).first(), Some(&ymd(2022, 12, 1)));
    }

    #[test]
    fn test_invalid_calendar_dates_dropped() {
        assert_eq!(extract_dates("31/02/2020 y 30 de febrero de 2021"), Vec::new());
        assert_eq!(latest_date("31/02/2020"), None);
    }

    #[test]
    fn test_no_dates() {
        assert!(extract_dates("").is_empty());
        assert_eq!(latest_date("Artículo 1.- Sin fechas."), None);
    }

    #[test]
    fn test_date_from_filename() {
        assert_eq!(date_from_filename("norma_20220301_v2.pdf"), Some(ymd(2022, 3, 1)));
        assert_eq!(date_from_filename("DOF20191109-reforma.pdf"), Some(ymd(2019, 11, 9)));
        assert_eq!(date_from_filename("reforma.pdf"), None);
        // Nine digits is not a date token
        assert_eq!(date_from_filename("acta_202203011.pdf"), None);
        // Invalid month
        assert_eq!(date_from_filename("x_20221301.pdf"), None);
    }

    #[test]
    fn test_month_number_case_insensitive() {
        assert_eq!(month_number("ENERO"), Some(1));
        assert_eq!(month_number("Setiembre"), Some(9));
        assert_eq!(month_number("December"), Some(12));
        assert_eq!(month_number("brumario"), None);
    }
}
