#![forbid(unsafe_code)]

//! Formwork public facade: a form-state controller between a declarative
//! field tree and the application holding the true data.
//!
//! The controller derives a value record by walking the declaration tree,
//! reconciles it against outside values on every update without clobbering
//! in-progress edits, keeps toggle widgets' visual state consistent with
//! the record through imperative handles, and runs a chainable
//! validation-rule engine over the record.
//!
//! # Example
//!
//! ```
//! use formwork::{FormController, Node, Rule, SelectField, TextField};
//!
//! let mut form = FormController::new(vec![
//!     Node::from(
//!         TextField::email("email")
//!             .with_required(true)
//!             .with_rule(Rule::named("email").with_message("Enter a valid email.")),
//!     ),
//!     Node::from(SelectField::checkbox("tags", "rust").with_multiselect(true)),
//! ]);
//!
//! form.text_changed("email", "ada@example.com");
//! form.multi_select("tags", "rust".into(), true);
//!
//! assert!(form.validate().valid);
//! assert_eq!(form.values().len(), 2);
//! ```

pub mod controller;
pub mod record;
pub mod sync;
pub mod walker;

// --- Controller re-exports -------------------------------------------------

pub use controller::FormController;
pub use record::ValueRecord;
pub use walker::{BoundNode, BoundSelect, BoundText};

// --- Sync-contract re-exports ----------------------------------------------

pub use sync::{HandleCaps, HandleKey, HandleRegistry, SharedToggle, WidgetHandle};

// --- Vocabulary re-exports -------------------------------------------------

pub use formwork_core::{
    ErrorMap, FieldKind, Group, Node, RequiredField, Rule, RuleTest, Scalar, SelectField,
    SelectKind, TextField, TextKind, Value, ValueMap,
};

// --- Validation re-exports -------------------------------------------------

pub use formwork_rules::{FALLBACK_MESSAGE, ValidationOutcome, validate};
