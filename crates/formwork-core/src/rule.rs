#![forbid(unsafe_code)]

//! Rule declarations and required-field chains.
//!
//! A [`Rule`] pairs a test with an optional failure message. Tests are
//! either named built-ins (`"email"`, `"equals:password"`, `"min:8"`, …)
//! evaluated by `formwork-rules`, or custom predicates over the field's
//! current value. A [`RequiredField`] is the chain recorded for one
//! required field: its declared rules in order, terminated by the implicit
//! `exists` rule, deduplicated by rule identifier.

use std::fmt;
use std::sync::Arc;

use crate::node::FieldKind;
use crate::value::Value;

/// Identifier of the implicit presence rule appended to every required
/// chain.
pub const EXISTS_RULE: &str = "exists";

/// Message of the implicit presence rule.
pub const REQUIRED_MESSAGE: &str = "Field is required.";

/// A custom predicate over a field's current value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// The test half of a rule.
#[derive(Clone)]
pub enum RuleTest {
    /// A named built-in test; unknown names pass unconditionally.
    Named(String),
    /// A custom predicate. Each predicate is its own identity for
    /// deduplication.
    Custom(Predicate),
}

impl fmt::Debug for RuleTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(id) => f.debug_tuple("Named").field(id).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
        }
    }
}

/// One validation rule: a test plus the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Rule {
    test: RuleTest,
    message: Option<String>,
}

impl Rule {
    /// A rule backed by a named built-in test.
    #[must_use]
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            test: RuleTest::Named(id.into()),
            message: None,
        }
    }

    /// A rule backed by a custom predicate.
    #[must_use]
    pub fn custom(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: RuleTest::Custom(Arc::new(predicate)),
            message: None,
        }
    }

    /// The implicit presence rule every required chain ends with.
    #[must_use]
    pub fn exists() -> Self {
        Self::named(EXISTS_RULE).with_message(REQUIRED_MESSAGE)
    }

    /// Set the failure message (builder).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The test.
    #[must_use]
    pub fn test(&self) -> &RuleTest {
        &self.test
    }

    /// Deduplication identifier. `None` for custom predicates, which are
    /// each their own identity.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match &self.test {
            RuleTest::Named(id) => Some(id),
            RuleTest::Custom(_) => None,
        }
    }

    /// Declared failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// The validation chain recorded for one required field.
#[derive(Debug, Clone)]
pub struct RequiredField {
    name: String,
    kind: FieldKind,
    rules: Vec<Rule>,
}

impl RequiredField {
    /// Assemble the chain for a required field: declared rules in order,
    /// then the implicit `exists` rule, deduplicated by identifier (first
    /// occurrence wins).
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind, declared: &[Rule]) -> Self {
        let mut rules: Vec<Rule> = declared.to_vec();
        rules.push(Rule::exists());

        let mut seen: Vec<String> = Vec::new();
        rules.retain(|rule| match rule.identifier() {
            Some(id) => {
                if seen.iter().any(|s| s == id) {
                    false
                } else {
                    seen.push(id.to_string());
                    true
                }
            }
            None => true,
        });

        Self {
            name: name.into(),
            kind,
            rules,
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field classification at declaration time.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The rule chain, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{SelectKind, TextKind};

    #[test]
    fn chain_ends_with_exists() {
        let chain = RequiredField::new(
            "email",
            FieldKind::Text(TextKind::Email),
            &[Rule::named("email").with_message("Enter a valid email.")],
        );
        let ids: Vec<_> = chain.rules().iter().filter_map(Rule::identifier).collect();
        assert_eq!(ids, ["email", "exists"]);
    }

    #[test]
    fn duplicate_identifiers_keep_first() {
        let chain = RequiredField::new(
            "zip",
            FieldKind::Text(TextKind::Plain),
            &[
                Rule::named("zipcode").with_message("first"),
                Rule::named("zipcode").with_message("second"),
                // An explicitly declared exists displaces the implicit one.
                Rule::named("exists").with_message("custom presence"),
            ],
        );
        assert_eq!(chain.rules().len(), 2);
        assert_eq!(chain.rules()[0].message(), Some("first"));
        assert_eq!(chain.rules()[1].message(), Some("custom presence"));
    }

    #[test]
    fn custom_rules_are_never_deduplicated() {
        let chain = RequiredField::new(
            "age",
            FieldKind::Select(SelectKind::Checkbox),
            &[
                Rule::custom(|v| !v.is_blank()),
                Rule::custom(|v| !v.is_blank()),
            ],
        );
        // Two customs plus the implicit exists.
        assert_eq!(chain.rules().len(), 3);
    }

    #[test]
    fn exists_rule_carries_the_required_message() {
        let rule = Rule::exists();
        assert_eq!(rule.identifier(), Some(EXISTS_RULE));
        assert_eq!(rule.message(), Some(REQUIRED_MESSAGE));
    }
}
