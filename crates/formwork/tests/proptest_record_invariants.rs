#![forbid(unsafe_code)]

//! Property-based invariant tests for the value record and the reconcile
//! pass.
//!
//! These verify structural invariants that must hold for any well-formed
//! declaration tree (consistent classification per name, distinct values
//! per group, at most one asserted-active leaf per single-select group):
//!
//! 1. Reconciling the same tree again never changes the record.
//! 2. Every named leaf has `current` and `external` entries after a pass.
//! 3. Output filtering never leaks null or empty-sequence entries.
//! 4. Clearing blanks every entry and empties the output map.
//! 5. Two controllers fed the same tree agree exactly.
//! 6. Required entries are unique and name fields present in the tree.

use formwork::{FormController, Group, Node, SelectField, TextField, Value};
use proptest::prelude::*;

// ── Tree generator ──────────────────────────────────────────────────────

/// One field's shape, before names are assigned by position.
#[derive(Debug, Clone)]
enum FieldSeed {
    Text {
        value: Option<String>,
        required: bool,
    },
    Single {
        count: usize,
        active: Option<usize>,
    },
    Multi {
        mask: Vec<bool>,
    },
}

fn field_seed() -> impl Strategy<Value = FieldSeed> {
    prop_oneof![
        (proptest::option::of("[a-z]{0,5}"), any::<bool>())
            .prop_map(|(value, required)| FieldSeed::Text { value, required }),
        (1..4usize).prop_flat_map(|count| {
            proptest::option::of(0..count)
                .prop_map(move |active| FieldSeed::Single { count, active })
        }),
        proptest::collection::vec(any::<bool>(), 1..4).prop_map(|mask| FieldSeed::Multi { mask }),
    ]
}

fn seeds() -> impl Strategy<Value = (Vec<FieldSeed>, bool)> {
    (proptest::collection::vec(field_seed(), 1..6), any::<bool>())
}

/// Names are positional (`t0`, `s1`, `m2`, …) so a name is never
/// classified two ways, and group values are indexed so they stay
/// distinct.
fn build_tree(specs: &[FieldSeed], grouped: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, spec) in specs.iter().enumerate() {
        match spec {
            FieldSeed::Text { value, required } => {
                let mut field = TextField::new(format!("t{i}")).with_required(*required);
                if let Some(v) = value {
                    field = field.with_value(v.clone());
                }
                nodes.push(Node::from(field));
            }
            FieldSeed::Single { count, active } => {
                for v in 0..*count {
                    nodes.push(Node::from(
                        SelectField::radio(format!("s{i}"), format!("v{v}"))
                            .with_active(*active == Some(v)),
                    ));
                }
            }
            FieldSeed::Multi { mask } => {
                for (v, on) in mask.iter().enumerate() {
                    nodes.push(Node::from(
                        SelectField::checkbox(format!("m{i}"), format!("v{v}"))
                            .with_multiselect(true)
                            .with_active(*on),
                    ));
                }
            }
        }
    }
    if grouped {
        vec![Node::from(Group::new().with_children(nodes))]
    } else {
        nodes
    }
}

fn leaf_names(specs: &[FieldSeed]) -> Vec<String> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| match spec {
            FieldSeed::Text { .. } => format!("t{i}"),
            FieldSeed::Single { .. } => format!("s{i}"),
            FieldSeed::Multi { .. } => format!("m{i}"),
        })
        .collect()
}

// ── 1 + 5. Idempotence and determinism ──────────────────────────────────

proptest! {
    #[test]
    fn reconcile_is_idempotent((specs, grouped) in seeds()) {
        let tree = build_tree(&specs, grouped);
        let mut form = FormController::new(tree.clone());

        let current = form.record().current().clone();
        let external = form.record().external().clone();
        let required: Vec<String> =
            form.record().required().iter().map(|r| r.name().to_string()).collect();

        form.set_tree(tree.clone());
        form.set_tree(tree);

        prop_assert_eq!(form.record().current(), &current);
        prop_assert_eq!(form.record().external(), &external);
        let required_after: Vec<String> =
            form.record().required().iter().map(|r| r.name().to_string()).collect();
        prop_assert_eq!(required_after, required);
    }

    #[test]
    fn same_tree_means_same_record((specs, grouped) in seeds()) {
        let tree = build_tree(&specs, grouped);
        let a = FormController::new(tree.clone());
        let b = FormController::new(tree);

        prop_assert_eq!(a.record().current(), b.record().current());
        prop_assert_eq!(a.record().external(), b.record().external());
    }

    // ── 2. Entry invariant ──────────────────────────────────────────────

    #[test]
    fn every_leaf_name_has_entries((specs, grouped) in seeds()) {
        let tree = build_tree(&specs, grouped);
        let form = FormController::new(tree);

        for name in leaf_names(&specs) {
            prop_assert!(form.record().current().contains_key(&name), "current missing {}", name);
            prop_assert!(form.record().external().contains_key(&name), "external missing {}", name);
        }
    }

    // ── 3. Output filtering ─────────────────────────────────────────────

    #[test]
    fn output_never_leaks_unset_values((specs, grouped) in seeds()) {
        let tree = build_tree(&specs, grouped);
        let form = FormController::new(tree);

        for (name, value) in form.values() {
            prop_assert!(value.is_set(), "unset value leaked for {}", name);
        }
    }

    // ── 4. Clearing ─────────────────────────────────────────────────────

    #[test]
    fn clear_blanks_everything((specs, grouped) in seeds()) {
        let tree = build_tree(&specs, grouped);
        let mut form = FormController::new(tree);
        form.clear_values();

        prop_assert!(form.values().is_empty());
        for value in form.record().current().values() {
            prop_assert!(value.is_blank());
            prop_assert!(matches!(value, Value::Null | Value::Many(_)));
        }
    }

    // ── 6. Required bookkeeping ─────────────────────────────────────────

    #[test]
    fn required_entries_are_unique_tree_names((specs, grouped) in seeds()) {
        let tree = build_tree(&specs, grouped);
        let form = FormController::new(tree);
        let names = leaf_names(&specs);

        let mut seen = Vec::new();
        for entry in form.record().required() {
            prop_assert!(!seen.contains(&entry.name().to_string()));
            seen.push(entry.name().to_string());
            prop_assert!(names.iter().any(|n| n == entry.name()));
        }
    }
}
