#![forbid(unsafe_code)]

//! Rule-chain evaluation.

use formwork_core::rule::EXISTS_RULE;
use formwork_core::{ErrorMap, RequiredField, Rule, RuleTest, Value, ValueMap};

use crate::builtin;
use crate::outcome::ValidationOutcome;

/// Message reported by a failing rule that declares none of its own.
pub const FALLBACK_MESSAGE: &str = "Field is invalid.";

/// Evaluate every required field's chain against the current value map.
///
/// Fields are visited in `required` order and each field's failing
/// messages join newline-separated, so both the error map contents and the
/// overall message are deterministic for a given record.
#[must_use]
pub fn validate(current: &ValueMap, required: &[RequiredField]) -> ValidationOutcome {
    let mut errors = ErrorMap::default();
    let mut message_parts: Vec<String> = Vec::new();

    for field in required {
        let value = current.get(field.name()).unwrap_or(&Value::Null);

        let failed: Vec<&str> = field
            .rules()
            .iter()
            .filter(|rule| !rule_passes(rule, value, current))
            .map(|rule| rule.message().unwrap_or(FALLBACK_MESSAGE))
            .collect();

        if !failed.is_empty() {
            let joined = failed.join("\n");
            message_parts.push(joined.clone());
            errors.insert(field.name().to_string(), joined);
        }
    }

    ValidationOutcome {
        valid: errors.is_empty(),
        message: message_parts.join("\n"),
        errors,
    }
}

/// One rule against one value, with the blank gate applied: a blank value
/// fails only `exists` and passes everything else.
fn rule_passes(rule: &Rule, value: &Value, current: &ValueMap) -> bool {
    if value.is_blank() {
        return rule.identifier() != Some(EXISTS_RULE);
    }

    match rule.test() {
        RuleTest::Custom(predicate) => predicate(value),
        RuleTest::Named(id) => builtin::evaluate(id, value, current),
    }
}
