#![forbid(unsafe_code)]

//! Field-value model.
//!
//! Every field's state is a [`Value`]: `Null` (nothing recorded), a single
//! [`Scalar`] (text fields and single-select groups), or an ordered sequence
//! of scalars (multi-select groups). Blankness — the gate the validator
//! short-circuits on — is defined here so the controller and the rule engine
//! agree on it.

use std::collections::HashMap;
use std::fmt;

/// Map from field name to recorded value.
///
/// Uses the `ahash` hasher; field counts are small but these maps sit on the
/// reconcile hot path.
pub type ValueMap = HashMap<String, Value, ahash::RandomState>;

/// Map from field name to error message.
pub type ErrorMap = HashMap<String, String, ahash::RandomState>;

/// A single candidate value: the payload of one toggle leaf, or one recorded
/// text edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Scalar {
    /// Boolean payload (a lone checkbox toggling a flag).
    Bool(bool),
    /// Text payload.
    Text(String),
}

impl Scalar {
    /// The text payload, if this scalar is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// Whether this scalar carries a boolean payload.
    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// The recorded state of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Value {
    /// Nothing recorded.
    #[default]
    Null,
    /// A single scalar (text field or single-select group).
    Scalar(Scalar),
    /// Ordered selection of a multi-select group, in traversal order.
    Many(Vec<Scalar>),
}

impl Value {
    /// Blankness, as the validator defines it: null, an empty sequence, or
    /// whitespace-only text. A recorded boolean is never blank, `false`
    /// included.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Scalar(Scalar::Text(s)) => s.trim().is_empty(),
            Self::Scalar(Scalar::Bool(_)) => false,
            Self::Many(items) => items.is_empty(),
        }
    }

    /// Whether this value survives output filtering: everything except
    /// `Null` and an empty sequence. Empty text is set (the user typed and
    /// erased); an empty selection is not.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Scalar(_) => true,
            Self::Many(items) => !items.is_empty(),
        }
    }

    /// The scalar payload, if this is a single-valued entry.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The text payload, if this is a single text entry.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_text)
    }

    /// Sequence membership. `false` for non-sequence values.
    #[must_use]
    pub fn contains(&self, scalar: &Scalar) -> bool {
        match self {
            Self::Many(items) => items.contains(scalar),
            _ => false,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::from(s))
    }
}
