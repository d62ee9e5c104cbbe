#![forbid(unsafe_code)]

//! The value record: the controller's authoritative field state.
//!
//! Four maps travel together: `current` (what the user sees and the caller
//! reads back), `external` (the last snapshot asserted by the declaration
//! tree, used only for drift detection), `required` (validation chains in
//! declaration order), and `errors` (the last validation result, possibly
//! seeded from outside).
//!
//! # Invariants
//!
//! 1. After a reconcile pass, every field name present in the tree has an
//!    entry in both `current` and `external`.
//! 2. Names absent from the latest tree keep their entries; the clear
//!    operation is the only whole-record reset.
//! 3. `required` holds at most one entry per field name.

use formwork_core::{ErrorMap, RequiredField, Value, ValueMap};

/// Authoritative record of every known field.
#[derive(Debug, Clone, Default)]
pub struct ValueRecord {
    current: ValueMap,
    external: ValueMap,
    required: Vec<RequiredField>,
    errors: ErrorMap,
}

impl ValueRecord {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current values, keyed by field name.
    #[must_use]
    pub fn current(&self) -> &ValueMap {
        &self.current
    }

    /// Last external snapshot, keyed by field name. Never surfaced to
    /// callers; exposed for inspection and tests.
    #[must_use]
    pub fn external(&self) -> &ValueMap {
        &self.external
    }

    /// Required-field chains in declaration order.
    #[must_use]
    pub fn required(&self) -> &[RequiredField] {
        &self.required
    }

    /// Last validation (or externally seeded) errors.
    #[must_use]
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Current values filtered for output: null and empty-sequence entries
    /// are dropped, everything else is cloned out.
    #[must_use]
    pub fn values(&self) -> ValueMap {
        self.current
            .iter()
            .filter(|(_, value)| value.is_set())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Reset every known field: sequences to empty, everything else to
    /// null, in both `current` and `external`.
    pub fn clear_values(&mut self) {
        for value in self.current.values_mut().chain(self.external.values_mut()) {
            *value = match value {
                Value::Many(_) => Value::Many(Vec::new()),
                _ => Value::Null,
            };
        }
    }

    /// Replace the stored errors (validation result or external seed).
    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    pub(crate) fn current_mut(&mut self) -> &mut ValueMap {
        &mut self.current
    }

    pub(crate) fn external_mut(&mut self) -> &mut ValueMap {
        &mut self.external
    }

    pub(crate) fn set_required(&mut self, required: Vec<RequiredField>) {
        self.required = required;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::Scalar;

    fn populated() -> ValueRecord {
        let mut record = ValueRecord::new();
        record
            .current_mut()
            .insert("name".into(), Value::from("Ada"));
        record.current_mut().insert("bio".into(), Value::Null);
        record.current_mut().insert(
            "tags".into(),
            Value::Many(vec![Scalar::from("x"), Scalar::from("y")]),
        );
        record.current_mut().insert("empty".into(), Value::Many(Vec::new()));
        record
            .external_mut()
            .insert("name".into(), Value::from("Ada"));
        record
            .external_mut()
            .insert("tags".into(), Value::Many(vec![Scalar::from("x")]));
        record
    }

    #[test]
    fn values_drops_null_and_empty_sequences() {
        let values = populated().values();
        assert_eq!(values.len(), 2);
        assert!(values.contains_key("name"));
        assert!(values.contains_key("tags"));
    }

    #[test]
    fn clear_resets_by_shape() {
        let mut record = populated();
        record.clear_values();

        assert_eq!(record.current()["name"], Value::Null);
        assert_eq!(record.current()["tags"], Value::Many(Vec::new()));
        assert_eq!(record.external()["name"], Value::Null);
        assert_eq!(record.external()["tags"], Value::Many(Vec::new()));
        assert!(record.values().is_empty());
    }

    #[test]
    fn clear_keeps_the_key_set() {
        let mut record = populated();
        let keys_before = record.current().len();
        record.clear_values();
        assert_eq!(record.current().len(), keys_before);
    }
}
