//! Per-field normalization.
//!
//! Sidexis enforces a maximum length on every SLIDA field. Values are
//! truncated by character count (matching the legacy connector) before the
//! field-specific cleanup runs; the order of the steps is part of the
//! contract.

/// Maximum field sizes accepted by Sidexis.
pub const MAX_NAME: usize = 32;
pub const MAX_DATE: usize = 10;
pub const MAX_TIME: usize = 8;
pub const MAX_INDEX: usize = 19;
pub const MAX_SEX: usize = 1;
pub const MAX_DENTIST: usize = 12;
pub const MAX_STATION: usize = 20;
pub const MAX_IMAGE_NUMBER: usize = 10;

/// Truncate to at most `max` characters.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Names cannot carry `@` or leading/trailing whitespace. Truncation runs
/// first, then the trim, then the `@` strip.
pub fn name(text: &str) -> String {
    truncate(text, MAX_NAME).trim().replace('@', "")
}

pub fn date(text: &str) -> String {
    truncate(text, MAX_DATE).to_string()
}

pub fn time(text: &str) -> String {
    truncate(text, MAX_TIME).to_string()
}

pub fn sex(text: &str) -> String {
    truncate(text, MAX_SEX).to_string()
}

pub fn dentist(text: &str) -> String {
    truncate(text, MAX_DENTIST).to_string()
}

pub fn station(text: &str) -> String {
    truncate(text, MAX_STATION).to_string()
}

/// Name pieces used to generate a card index when none was provided.
#[derive(Debug, Clone, Copy)]
pub struct IndexFallback<'a> {
    pub last_name: &'a str,
    pub first_name: &'a str,
    pub date_of_birth: &'a str,
}

/// External card index: truncated, uppercased, right-trimmed.
///
/// An empty result is replaced with an index generated from the fallback
/// name pieces, each passed through the name rule (the date included). The
/// generated value is used as-is: it is not re-truncated or uppercased, so
/// `Kim`/`Doyoung`/`01.02.1996` yields the 20-character
/// `KimDoyoung01.02.1996`.
pub fn index(text: &str, fallback: IndexFallback<'_>) -> String {
    let processed = truncate(text, MAX_INDEX).to_uppercase();
    let processed = processed.trim_end();
    if processed.is_empty() {
        format!(
            "{}{}{}",
            name(fallback.last_name),
            name(fallback.first_name),
            name(fallback.date_of_birth)
        )
    } else {
        processed.to_string()
    }
}

/// Image number.
///
/// The deployed connector checks the length against the station limit (20)
/// but cuts to the image-number limit (10), so values of 11 to 20
/// characters pass through unshortened. Downstream tooling has only ever
/// seen that behavior, so the asymmetry is kept.
pub fn image_number(text: &str) -> String {
    if text.chars().count() > MAX_STATION {
        truncate(text, MAX_IMAGE_NUMBER).to_string()
    } else {
        text.to_string()
    }
}
