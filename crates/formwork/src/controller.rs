#![forbid(unsafe_code)]

//! The form controller: the single owner of the value record.
//!
//! Sits between the declaration tree the caller supplies and the widgets
//! the host renders. All mutation happens synchronously inside one of
//! three triggers: a new tree ([`FormController::set_tree`]), a new
//! external error map ([`FormController::set_errors`]), or a widget
//! interaction (the three update-protocol operations). The record always
//! commits before an update operation returns, so a widget adopting the
//! returned state observes the already-updated record.

use formwork_core::{ErrorMap, Node, Scalar, SelectKind, Value, ValueMap};
use formwork_rules::ValidationOutcome;

use crate::record::ValueRecord;
use crate::sync::{HandleCaps, HandleKey, HandleRegistry, WidgetHandle};
use crate::walker::{self, BoundNode};

/// Form-state controller over one declaration tree.
#[derive(Debug, Default)]
pub struct FormController {
    tree: Vec<Node>,
    record: ValueRecord,
    handles: HandleRegistry,
}

impl FormController {
    /// Build a controller from the initial declaration tree and run the
    /// first reconcile pass.
    #[must_use]
    pub fn new(tree: Vec<Node>) -> Self {
        let mut controller = Self {
            tree: Vec::new(),
            record: ValueRecord::new(),
            handles: HandleRegistry::new(),
        };
        controller.set_tree(tree);
        controller
    }

    // --- Configuration triggers ---

    /// Replace the declaration tree and reconcile the record against it.
    ///
    /// Names absent from the new tree keep their recorded values.
    pub fn set_tree(&mut self, tree: Vec<Node>) {
        self.tree = tree;
        walker::reconcile(&self.tree, &mut self.record, &mut self.handles);
    }

    /// Reconcile the current tree again, picking up widget-side changes
    /// (e.g. after handles mount).
    pub fn reconcile(&mut self) {
        walker::reconcile(&self.tree, &mut self.record, &mut self.handles);
    }

    /// Seed the error map from outside (e.g. server-side validation).
    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.record.set_errors(errors);
    }

    // --- Read access ---

    /// The authoritative record.
    #[must_use]
    pub fn record(&self) -> &ValueRecord {
        &self.record
    }

    /// Current values filtered for output: null and empty-sequence
    /// entries dropped.
    #[must_use]
    pub fn values(&self) -> ValueMap {
        self.record.values()
    }

    /// Validate and return the per-field error map.
    pub fn errors(&mut self) -> ErrorMap {
        self.validate().errors
    }

    /// Run every required field's rule chain against the current record.
    /// The computed errors replace the record's stored errors.
    pub fn validate(&mut self) -> ValidationOutcome {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("form.validate", required = self.record.required().len())
                .entered();

        let outcome = formwork_rules::validate(self.record.current(), self.record.required());
        self.record.set_errors(outcome.errors.clone());
        outcome
    }

    /// Project the declaration tree plus the record into a renderable
    /// snapshot.
    #[must_use]
    pub fn bind(&self) -> Vec<BoundNode> {
        walker::bind(&self.tree, &self.record)
    }

    // --- Whole-record operations ---

    /// Reset every known field: sequences to empty, everything else to
    /// null.
    pub fn clear_values(&mut self) {
        #[cfg(feature = "tracing")]
        self.trace_update("clear", "*");
        self.record.clear_values();
    }

    /// Move input focus to the text widget mounted for `name`. Returns
    /// whether a handle received the trigger.
    pub fn focus_field(&mut self, name: &str) -> bool {
        self.handles.focus(name)
    }

    // --- Update protocol (widget interactions) ---

    /// A text widget reported an edit: record it.
    pub fn text_changed(&mut self, name: &str, text: impl Into<String>) {
        #[cfg(feature = "tracing")]
        self.trace_update("text", name);
        self.record
            .current_mut()
            .insert(name.to_string(), Value::Scalar(Scalar::Text(text.into())));
    }

    /// A single-select toggle reported a press. Returns the active state
    /// the widget should adopt.
    ///
    /// Activation deactivates the previously current leaf's widget and
    /// records the new value. Deactivation is checkbox-only: a boolean
    /// candidate clears to `false`, anything else to null. Radio leaves —
    /// and any handle advertising [`HandleCaps::NO_TOGGLE`] — stay active.
    pub fn single_select(
        &mut self,
        name: &str,
        value: Scalar,
        requested_active: bool,
        kind: SelectKind,
    ) -> bool {
        #[cfg(feature = "tracing")]
        self.trace_update("single_select", name);

        let current = self
            .record
            .current()
            .get(name)
            .and_then(Value::as_scalar)
            .cloned();
        let is_current = current.as_ref() == Some(&value);

        if requested_active {
            if !is_current {
                if let Some(previous) = current {
                    let previous_key = HandleKey::Toggle(name.to_string(), previous);
                    self.handles.sync_active(&previous_key, false);
                }
                self.record
                    .current_mut()
                    .insert(name.to_string(), Value::Scalar(value));
            }
            true
        } else {
            let key = HandleKey::Toggle(name.to_string(), value.clone());
            let no_toggle = self
                .handles
                .caps(&key)
                .is_some_and(|caps| caps.contains(HandleCaps::NO_TOGGLE));

            if kind == SelectKind::Checkbox && !no_toggle {
                let cleared = if value.is_bool() {
                    Value::Scalar(Scalar::Bool(false))
                } else {
                    Value::Null
                };
                self.record.current_mut().insert(name.to_string(), cleared);
                false
            } else {
                true
            }
        }
    }

    /// A multi-select toggle reported a press. Returns the requested
    /// state as the acknowledged one.
    ///
    /// An absent value activates by appending; a present value is removed
    /// even when the press re-requests activation.
    pub fn multi_select(&mut self, name: &str, value: Scalar, requested_active: bool) -> bool {
        #[cfg(feature = "tracing")]
        self.trace_update("multi_select", name);

        let entry = self
            .record
            .current_mut()
            .entry(name.to_string())
            .or_insert_with(|| Value::Many(Vec::new()));
        if !matches!(entry, Value::Many(_)) {
            *entry = Value::Many(Vec::new());
        }
        if let Value::Many(items) = entry {
            if let Some(position) = items.iter().position(|v| v == &value) {
                items.remove(position);
            } else if requested_active {
                items.push(value);
            }
        }

        requested_active
    }

    // --- Handle registry ---

    /// Register a widget handle under its field identity.
    pub fn mount_handle(&mut self, key: HandleKey, handle: Box<dyn WidgetHandle>) {
        self.handles.mount(key, handle);
    }

    /// Remove a widget handle.
    pub fn unmount_handle(&mut self, key: &HandleKey) {
        self.handles.unmount(key);
    }

    /// The handle registry.
    #[must_use]
    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }

    /// The handle registry, mutably.
    pub fn handles_mut(&mut self) -> &mut HandleRegistry {
        &mut self.handles
    }

    #[cfg(feature = "tracing")]
    fn trace_update(&self, operation: &'static str, field: &str) {
        let _span = tracing::debug_span!("form.update", operation, field).entered();
    }
}
