//! Instrument type classification from a title.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::InstrumentType;

/// Whole-word keywords per type, in precedence order.
const KEYWORDS: &[(&str, InstrumentType)] = &[
    (r"ley|law", InstrumentType::Law),
    (r"reglamento|regulations?", InstrumentType::Regulation),
    (r"constituci[oó]n|constitution", InstrumentType::Constitution),
    (r"disposiciones?|provisions?", InstrumentType::Provisions),
    (r"lineamientos?|guidelines?", InstrumentType::Guidelines),
    (r"acuerdo|agreement", InstrumentType::Agreement),
    (r"resoluci[oó]n|resolution", InstrumentType::Resolution),
    (
        r"norma\s+oficial\s+mexicana|official\s+(?:mexican\s+)?standard",
        InstrumentType::OfficialStandard,
    ),
    (r"manual", InstrumentType::Manual),
    (r"decreto|decree", InstrumentType::Decree),
    (r"aviso|notice", InstrumentType::Notice),
    (r"convocatoria|call", InstrumentType::Call),
    (r"convenio|covenant", InstrumentType::Covenant),
    (r"procedimiento|procedure", InstrumentType::Procedure),
    (r"programa|program(?:me)?", InstrumentType::Program),
    (r"reglas|rules", InstrumentType::Rules),
    (r"c[oó]digo|code", InstrumentType::Code),
];

#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
static RULES: LazyLock<Vec<(Regex, InstrumentType)>> = LazyLock::new(|| {
    KEYWORDS
        .iter()
        .map(|(words, ty)| {
            let regex = Regex::new(&format!(r"(?i)\b(?:{words})\b")).expect("valid regex");
            (regex, *ty)
        })
        .collect()
});

/// Classify a title into the instrument taxonomy.
///
/// The first type whose keyword appears in the title wins. A missing title,
/// or one matching no keyword, is [`InstrumentType::Other`].
///
/// # Examples
/// ```
/// use normativa_extractor::classify::classify;
/// use normativa_extractor::types::InstrumentType;
///
/// assert_eq!(classify(Some("REGLAMENTO DE LA LEY DE AHORRO")), InstrumentType::Law);
/// assert_eq!(classify(None), InstrumentType::Other);
/// ```
#[must_use]
pub fn classify(title: Option<&str>) -> InstrumentType {
    let Some(title) = title else {
        return InstrumentType::Other;
    };
    RULES
        .iter()
        .find(|(regex, _)| regex.is_match(title))
        .map_or(InstrumentType::Other, |(_, ty)| *ty)
}
