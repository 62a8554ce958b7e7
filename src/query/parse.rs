//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use super::params::DeckQuery;
use crate::deck::Grade;

/// Parse a deck query string into a [`DeckQuery`] + warnings.
///
/// Deck keys are case-insensitive; unknown keys keep their spelling. A
/// repeated key warns with [`ParseWarning::DuplicateKey`] and the last
/// occurrence wins.
pub(crate) fn parse_query(query: &str) -> (DeckQuery, Vec<ParseWarning>) {
    let mut q = DeckQuery::new();
    let mut warnings = Vec::new();
    let mut seen: Vec<&'static str> = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);

        let Some(name) = deck_key(&key.to_ascii_lowercase()) else {
            let warning = if q.extras.contains_key(&key) {
                ParseWarning::DuplicateKey {
                    key: key.clone(),
                    value: value.clone(),
                }
            } else {
                ParseWarning::KeyNotRecognized {
                    key: key.clone(),
                    value: value.clone(),
                }
            };
            warnings.push(warning);
            q.extras.insert(key, value);
            continue;
        };

        if seen.contains(&name) {
            warnings.push(ParseWarning::DuplicateKey {
                key: String::from(name),
                value: value.clone(),
            });
        } else {
            seen.push(name);
        }
        dispatch_key(name, &value, &mut q, &mut warnings);
    }

    (q, warnings)
}

/// Canonical name of a deck key, `None` for keys the deck does not use.
fn deck_key(key: &str) -> Option<&'static str> {
    match key {
        "s" | "slide" => Some("s"),
        "zoom" => Some("zoom"),
        "grade" => Some("grade"),
        "print" => Some("print"),
        "vs" => Some("vs"),
        _ => None,
    }
}

fn dispatch_key(
    name: &'static str,
    value: &str,
    q: &mut DeckQuery,
    warnings: &mut Vec<ParseWarning>,
) {
    let invalid = |reason: &'static str| ParseWarning::ValueInvalid {
        key: name,
        value: String::from(value),
        reason,
    };
    match name {
        "s" => match parse_index(value) {
            Some(i) => q.slide = Some(i),
            None => warnings.push(invalid("expected a slide index (0, 1, 2, ...)")),
        },
        "zoom" => match parse_zoom(value) {
            Some(z) => q.zoom = Some(z),
            None => warnings.push(invalid("expected a number")),
        },
        "grade" => match parse_grade(value) {
            Some(g) => q.grade = Some(g),
            None => warnings.push(invalid("expected contrast|soft")),
        },
        // Flags are on only for the exact value "1"; anything else is off.
        "print" => q.print = value.trim() == "1",
        "vs" => q.visual_snapshot = value.trim() == "1",
        _ => {}
    }
}

// ---- Value parsers ----

/// Slide index. Any finite number is accepted: fractions truncate, values
/// past the `i64` range saturate, and the deck clamps the result.
fn parse_index(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v as i64)
    })
}

/// Any finite number; range clamping happens in [`DeckSettings::clamp_zoom`].
///
/// [`DeckSettings::clamp_zoom`]: crate::deck::DeckSettings::clamp_zoom
fn parse_zoom(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_grade(s: &str) -> Option<Grade> {
    match s.trim().to_ascii_lowercase().as_str() {
        "contrast" => Some(Grade::Contrast),
        "soft" => Some(Grade::Soft),
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    match pair.split_once('=') {
        Some((k, v)) => (k, v),
        None => (pair, ""),
    }
}

/// Percent-decode a URL component. Also handles '+' as space.
///
/// Invalid escapes pass through literally; decoded bytes that are not
/// valid UTF-8 become U+FFFD.
pub(crate) fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode a URL component (RFC 3986 unreserved set kept as-is).
pub(crate) fn percent_encode(s: &str, out: &mut String) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xF) as usize] as char);
            }
        }
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
