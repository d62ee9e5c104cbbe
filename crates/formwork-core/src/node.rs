#![forbid(unsafe_code)]

//! Tagged declaration tree.
//!
//! Callers describe a form as a tree of [`Node`]s: grouping containers,
//! freeform text fields, select leaves (one leaf per candidate value;
//! leaves sharing a name form a selection group), and static text content.
//! The controller walks this tree; nothing here carries behavior.
//!
//! # Example
//!
//! ```
//! use formwork_core::{Group, SelectField, TextField};
//!
//! let tree = Group::new()
//!     .child(TextField::email("email").with_required(true))
//!     .child(TextField::password("password").with_next("confirm"))
//!     .child(
//!         Group::new()
//!             .child(SelectField::checkbox("tags", "red").with_multiselect(true))
//!             .child(SelectField::checkbox("tags", "blue").with_multiselect(true)),
//!     );
//!
//! assert_eq!(tree.children().len(), 3);
//! ```

use crate::rule::Rule;
use crate::value::Scalar;

/// Flavor of a text field. All kinds share the text update protocol; the
/// kind tells the host which editor affordances to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    /// Single-line freeform text (default).
    #[default]
    Plain,
    /// Multiline text area.
    Multiline,
    /// Email address entry.
    Email,
    /// Masked secret entry.
    Password,
    /// Telephone entry.
    Phone,
    /// Numeric entry.
    Number,
}

/// Flavor of a select leaf. Radio leaves refuse user-initiated
/// deactivation; checkboxes toggle freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectKind {
    /// Toggleable box (default).
    #[default]
    Checkbox,
    /// Exclusive button that cannot be toggled off by the user.
    Radio,
}

/// Classification of a named field, carried into required-field entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Freeform text of the given kind.
    Text(TextKind),
    /// Toggle of the given kind.
    Select(SelectKind),
}

/// A freeform text field declaration.
#[derive(Debug, Clone)]
pub struct TextField {
    name: String,
    kind: TextKind,
    value: Option<String>,
    next: Option<String>,
    required: bool,
    rules: Vec<Rule>,
}

impl TextField {
    /// Create a plain text field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TextKind::Plain,
            value: None,
            next: None,
            required: false,
            rules: Vec::new(),
        }
    }

    /// Create a multiline text area.
    #[must_use]
    pub fn multiline(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(TextKind::Multiline)
    }

    /// Create an email entry field.
    #[must_use]
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(TextKind::Email)
    }

    /// Create a masked secret entry field.
    #[must_use]
    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(TextKind::Password)
    }

    /// Create a telephone entry field.
    #[must_use]
    pub fn phone(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(TextKind::Phone)
    }

    /// Create a numeric entry field.
    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(TextKind::Number)
    }

    /// Set the kind (builder).
    #[must_use]
    pub fn with_kind(mut self, kind: TextKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the externally asserted value (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Name the field that receives focus when this one is submitted
    /// (builder).
    #[must_use]
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Mark the field required (builder).
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Append a validation rule (builder).
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace the validation rules (builder).
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TextKind {
        self.kind
    }

    /// Externally asserted value, if declared.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Submit-advance target, if declared.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Whether the field is required.
    #[inline]
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Declared validation rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classification for required-field bookkeeping.
    #[must_use]
    pub fn field_kind(&self) -> FieldKind {
        FieldKind::Text(self.kind)
    }
}

/// A select leaf declaration: one candidate value of a selection group.
#[derive(Debug, Clone)]
pub struct SelectField {
    name: String,
    kind: SelectKind,
    value: Scalar,
    active: bool,
    multiselect: bool,
    required: bool,
    rules: Vec<Rule>,
    label: Option<String>,
}

impl SelectField {
    /// Create a select leaf.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            kind: SelectKind::Checkbox,
            value: value.into(),
            active: false,
            multiselect: false,
            required: false,
            rules: Vec::new(),
            label: None,
        }
    }

    /// Create a checkbox leaf.
    #[must_use]
    pub fn checkbox(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::new(name, value)
    }

    /// Create a radio leaf.
    #[must_use]
    pub fn radio(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::new(name, value).with_kind(SelectKind::Radio)
    }

    /// Set the kind (builder).
    #[must_use]
    pub fn with_kind(mut self, kind: SelectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Externally assert the selection state (builder).
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Make the leaf part of a multi-select group (builder).
    #[must_use]
    pub fn with_multiselect(mut self, multiselect: bool) -> Self {
        self.multiselect = multiselect;
        self
    }

    /// Mark the field required (builder).
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Append a validation rule (builder).
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the display label carried next to the toggle (builder).
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Field name shared by the selection group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Select kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> SelectKind {
        self.kind
    }

    /// This leaf's candidate value.
    #[must_use]
    pub fn value(&self) -> &Scalar {
        &self.value
    }

    /// Externally asserted selection state (absent means inactive).
    #[inline]
    #[must_use]
    pub fn active(&self) -> bool {
        self.active
    }

    /// Whether the group records an ordered sequence of selections.
    #[inline]
    #[must_use]
    pub fn multiselect(&self) -> bool {
        self.multiselect
    }

    /// Whether the field is required.
    #[inline]
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Declared validation rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Display label, if declared.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Classification for required-field bookkeeping.
    #[must_use]
    pub fn field_kind(&self) -> FieldKind {
        FieldKind::Select(self.kind)
    }
}

/// A pure grouping container. Contributes nothing to the record.
#[derive(Debug, Clone, Default)]
pub struct Group {
    children: Vec<Node>,
}

impl Group {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// One node of the declaration tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Grouping container; recursed into, contributes nothing itself.
    Group(Group),
    /// Freeform text field.
    Text(TextField),
    /// One candidate value of a selection group.
    Select(SelectField),
    /// Plain text content, never a nested tree.
    Static(String),
}

impl Node {
    /// Static text content.
    #[must_use]
    pub fn text_content(content: impl Into<String>) -> Self {
        Self::Static(content.into())
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Self::Group(g)
    }
}

impl From<TextField> for Node {
    fn from(f: TextField) -> Self {
        Self::Text(f)
    }
}

impl From<SelectField> for Node {
    fn from(f: SelectField) -> Self {
        Self::Select(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preconfigured_text_kinds() {
        assert_eq!(TextField::email("e").kind(), TextKind::Email);
        assert_eq!(TextField::password("p").kind(), TextKind::Password);
        assert_eq!(TextField::phone("t").kind(), TextKind::Phone);
        assert_eq!(TextField::number("n").kind(), TextKind::Number);
        assert_eq!(TextField::multiline("m").kind(), TextKind::Multiline);
        assert_eq!(TextField::new("x").kind(), TextKind::Plain);
    }

    #[test]
    fn radio_leaves_default_to_inactive() {
        let leaf = SelectField::radio("color", "red");
        assert_eq!(leaf.kind(), SelectKind::Radio);
        assert!(!leaf.active());
        assert!(!leaf.multiselect());
    }

    #[test]
    fn groups_nest() {
        let tree = Group::new()
            .child(Group::new().child(TextField::new("inner")))
            .child(Node::text_content("hint"));
        assert_eq!(tree.children().len(), 2);
        match &tree.children()[0] {
            Node::Group(g) => assert_eq!(g.children().len(), 1),
            other => panic!("expected group, got {other:?}"),
        }
    }
}
