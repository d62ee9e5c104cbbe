#![forbid(unsafe_code)]

//! Tree walker: the reconcile and bind passes.
//!
//! Both passes share one traversal shape — depth-first, declaration
//! order — over the tagged declaration tree. *Reconcile* folds the tree
//! into the value record, detecting and correcting drift against mounted
//! widget handles. *Bind* projects the tree plus the record into a
//! renderable snapshot.
//!
//! # Invariants
//!
//! 1. Traversal order is deterministic, so drift detection — which
//!    compares the previous external snapshot field by field — behaves the
//!    same on every run.
//! 2. Reconcile writes `current` and `external` entries for every named
//!    leaf it visits and never touches entries for names it does not.
//! 3. Multi-select sequences accumulate in traversal order.
//! 4. Bind never mutates; it reads the record as-is.

use formwork_core::{
    FieldKind, Node, RequiredField, Rule, Scalar, SelectField, SelectKind, TextField, TextKind,
    Value, ValueMap,
};

use crate::record::ValueRecord;
use crate::sync::{HandleKey, HandleRegistry};

/// Fresh state accumulated by one reconcile pass. Committed onto the
/// record at the end so names absent from the tree keep their entries.
#[derive(Default)]
struct Accumulator {
    current: ValueMap,
    external: ValueMap,
    required: Vec<RequiredField>,
}

/// Fold a declaration tree into the record, correcting widget drift
/// through the registry.
pub(crate) fn reconcile(tree: &[Node], record: &mut ValueRecord, handles: &mut HandleRegistry) {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("form.reconcile", nodes = tree.len()).entered();

    let mut acc = Accumulator::default();
    walk_reconcile(tree, record, handles, &mut acc);

    for (name, value) in acc.external {
        record.external_mut().insert(name, value);
    }
    for (name, value) in acc.current {
        record.current_mut().insert(name, value);
    }
    record.set_required(acc.required);
}

fn walk_reconcile(
    nodes: &[Node],
    prev: &ValueRecord,
    handles: &mut HandleRegistry,
    acc: &mut Accumulator,
) {
    for node in nodes {
        match node {
            Node::Group(group) => walk_reconcile(group.children(), prev, handles, acc),
            Node::Static(_) => {}
            Node::Text(field) => {
                reconcile_text(field, prev, acc);
                note_required(acc, field.name(), field.field_kind(), field.rules(), field.required());
            }
            Node::Select(field) => {
                if field.multiselect() {
                    reconcile_multi(field, prev, handles, acc);
                } else {
                    reconcile_single(field, prev, handles, acc);
                }
                note_required(acc, field.name(), field.field_kind(), field.rules(), field.required());
            }
        }
    }
}

fn reconcile_text(field: &TextField, prev: &ValueRecord, acc: &mut Accumulator) {
    let name = field.name();
    let declared = field.value();

    // The snapshot normalizes declared-empty to null, so "declared empty"
    // and "not declared" are indistinguishable to drift detection.
    let snapshot = match declared {
        Some(s) if !s.is_empty() => Value::from(s),
        _ => Value::Null,
    };

    // The outside value wins unless the declaration still says what the
    // last snapshot said; only then does the in-progress edit survive.
    let unchanged = match prev.external().get(name) {
        Some(Value::Scalar(Scalar::Text(prev_text))) => Some(prev_text.as_str()) == declared,
        _ => false,
    };

    let current = if unchanged {
        prev.current().get(name).cloned().unwrap_or_default()
    } else {
        declared.map(Value::from).unwrap_or_default()
    };

    acc.external.insert(name.to_string(), snapshot);
    acc.current.insert(name.to_string(), current);
}

fn reconcile_multi(
    field: &SelectField,
    prev: &ValueRecord,
    handles: &mut HandleRegistry,
    acc: &mut Accumulator,
) {
    let name = field.name();
    let value = field.value();
    let key = HandleKey::Toggle(name.to_string(), value.clone());
    let active = field.active();

    let was_present = prev
        .external()
        .get(name)
        .is_some_and(|v| v.contains(value));

    push_many(&mut acc.external, name, active.then_some(value));
    push_many(&mut acc.current, name, None);

    if active != was_present {
        // The outside asserted a different state than last seen: correct
        // the widget, record the value if it just became active.
        #[cfg(feature = "tracing")]
        tracing::debug!(field = name, value = %value, active, "drift corrected");
        handles.sync_active(&key, active);
        if active {
            push_many(&mut acc.current, name, Some(value));
        }
    } else {
        // No outside change; the widget itself knows whether the user
        // toggled it since the last pass. With no widget mounted, the
        // previously recorded membership stands.
        let selected = match handles.is_active(&key) {
            Some(reported) => reported,
            None => prev.current().get(name).is_some_and(|v| v.contains(value)),
        };
        if selected {
            push_many(&mut acc.current, name, Some(value));
        }
    }
}

fn reconcile_single(
    field: &SelectField,
    prev: &ValueRecord,
    handles: &mut HandleRegistry,
    acc: &mut Accumulator,
) {
    let name = field.name();
    let value = field.value();
    let key = HandleKey::Toggle(name.to_string(), value.clone());
    let active = field.active();

    let was_active = prev.external().get(name).and_then(Value::as_scalar) == Some(value);

    acc.external.entry(name.to_string()).or_insert(Value::Null);
    if active {
        acc.external
            .insert(name.to_string(), Value::Scalar(value.clone()));
    }

    acc.current.entry(name.to_string()).or_insert(Value::Null);
    if active != was_active {
        #[cfg(feature = "tracing")]
        tracing::debug!(field = name, value = %value, active, "drift corrected");
        handles.sync_active(&key, active);
        if active {
            acc.current
                .insert(name.to_string(), Value::Scalar(value.clone()));
        }
    } else {
        let selected = match handles.is_active(&key) {
            Some(reported) => reported,
            None => prev.current().get(name).and_then(Value::as_scalar) == Some(value),
        };
        if selected {
            acc.current
                .insert(name.to_string(), Value::Scalar(value.clone()));
        }
    }
}

/// Append to a field's sequence, creating (or reshaping) the entry as an
/// empty sequence first. `None` just ensures the entry exists.
fn push_many(map: &mut ValueMap, name: &str, value: Option<&Scalar>) {
    let entry = map
        .entry(name.to_string())
        .or_insert_with(|| Value::Many(Vec::new()));
    if !matches!(entry, Value::Many(_)) {
        *entry = Value::Many(Vec::new());
    }
    if let (Value::Many(items), Some(v)) = (entry, value) {
        items.push(v.clone());
    }
}

fn note_required(
    acc: &mut Accumulator,
    name: &str,
    kind: FieldKind,
    rules: &[Rule],
    required: bool,
) {
    if !required {
        return;
    }
    if acc.required.iter().any(|r| r.name() == name) {
        return;
    }
    acc.required.push(RequiredField::new(name, kind, rules));
}

// ---------------------------------------------------------------------------
// Bind pass
// ---------------------------------------------------------------------------

/// A bound text leaf: what the host needs to render and wire an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundText {
    /// Field name; route edits to `text_changed` under it.
    pub name: String,
    /// Editor affordance to use.
    pub kind: TextKind,
    /// Current value from the record.
    pub value: Value,
    /// Whether the field currently carries an error.
    pub error: bool,
    /// Field to focus when this one is submitted.
    pub submit_advance: Option<String>,
    /// Keep the editing session open on submit instead of dismissing it.
    /// Set whenever a submit-advance target is declared.
    pub keep_editing_on_submit: bool,
}

/// A bound select leaf: what the host needs to render and wire a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundSelect {
    /// Group name; route presses to `single_select`/`multi_select` under it.
    pub name: String,
    /// Toggle flavor.
    pub kind: SelectKind,
    /// This leaf's candidate value.
    pub value: Scalar,
    /// Whether presses route to the multi-select protocol.
    pub multiselect: bool,
    /// Whether the field currently carries an error.
    pub error: bool,
    /// Record-computed active state, present only when the declaration
    /// asserts `active` (the widget otherwise owns its own state).
    pub active_hint: Option<bool>,
    /// Display label, if declared.
    pub label: Option<String>,
}

/// One node of the bound rendering tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundNode {
    /// Grouping container.
    Group(Vec<BoundNode>),
    /// Plain text content.
    Static(String),
    /// Text leaf.
    Text(BoundText),
    /// Select leaf.
    Select(BoundSelect),
}

/// Project the declaration tree plus the record into a renderable
/// snapshot.
pub(crate) fn bind(nodes: &[Node], record: &ValueRecord) -> Vec<BoundNode> {
    nodes
        .iter()
        .map(|node| match node {
            Node::Group(group) => BoundNode::Group(bind(group.children(), record)),
            Node::Static(content) => BoundNode::Static(content.clone()),
            Node::Text(field) => BoundNode::Text(BoundText {
                name: field.name().to_string(),
                kind: field.kind(),
                value: record
                    .current()
                    .get(field.name())
                    .cloned()
                    .unwrap_or_default(),
                error: record.errors().contains_key(field.name()),
                submit_advance: field.next().map(String::from),
                keep_editing_on_submit: field.next().is_some(),
            }),
            Node::Select(field) => {
                let active_hint = if field.active() {
                    let current = record.current().get(field.name());
                    Some(if field.multiselect() {
                        current.is_some_and(|v| v.contains(field.value()))
                    } else {
                        current.and_then(Value::as_scalar) == Some(field.value())
                    })
                } else {
                    None
                };
                BoundNode::Select(BoundSelect {
                    name: field.name().to_string(),
                    kind: field.kind(),
                    value: field.value().clone(),
                    multiselect: field.multiselect(),
                    error: record.errors().contains_key(field.name()),
                    active_hint,
                    label: field.label().map(String::from),
                })
            }
        })
        .collect()
}
