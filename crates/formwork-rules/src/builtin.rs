#![forbid(unsafe_code)]

//! Named built-in tests.
//!
//! Identifiers take an optional colon-separated argument
//! (`equals:password`, `min:8`). Pattern tests search unanchored except
//! `tel`, which matches the whole value. Length tests count graphemes for
//! text and elements for sequences. Unknown identifiers pass.

use std::sync::OnceLock;

use formwork_core::{Scalar, Value, ValueMap};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

const EMAIL_PATTERN: &str = r"[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?";
const ZIPCODE_PATTERN: &str = r"\d{5}-?(\d{4})?";
const TEL_PATTERN: &str =
    r"^\+?1?.?[(]{0,1}[0-9]{3}[)]{0,1}[-\s\.]{0,1}[0-9]{3}[-\s\.]{0,1}[0-9]{4}$";

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn zipcode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ZIPCODE_PATTERN).expect("zipcode pattern compiles"))
}

fn tel_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TEL_PATTERN).expect("tel pattern compiles"))
}

/// Evaluate a named test against a non-blank value.
///
/// `current` is the whole value map; `equals` reads its comparison target
/// from it. Callers apply the blank gate first — this function assumes the
/// value already passed it.
#[must_use]
pub fn evaluate(id: &str, value: &Value, current: &ValueMap) -> bool {
    let (name, arg) = match id.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (id, None),
    };

    match name {
        "exists" => !value.is_blank(),
        "email" => value.as_text().is_some_and(|t| email_re().is_match(t)),
        "zipcode" => value.as_text().is_some_and(|t| zipcode_re().is_match(t)),
        "tel" => value.as_text().is_some_and(|t| tel_re().is_match(t)),
        "equals" => {
            let other = arg
                .and_then(|field| current.get(field))
                .and_then(Value::as_text)
                .unwrap_or_default();
            value
                .as_text()
                .is_some_and(|t| t.trim() == other.trim())
        }
        "min" => match (length_of(value), arg.and_then(|a| a.parse::<usize>().ok())) {
            (Some(len), Some(bound)) => len >= bound,
            _ => false,
        },
        "max" => match (length_of(value), arg.and_then(|a| a.parse::<usize>().ok())) {
            (Some(len), Some(bound)) => len <= bound,
            _ => false,
        },
        _ => true,
    }
}

/// Length for `min`/`max`: grapheme count for text, element count for
/// sequences. Booleans have no length and fail both bounds.
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::Many(items) => Some(items.len()),
        Value::Scalar(Scalar::Text(s)) => Some(s.graphemes(true).count()),
        Value::Scalar(Scalar::Bool(_)) | Value::Null => None,
    }
}
