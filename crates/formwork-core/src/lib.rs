#![forbid(unsafe_code)]

//! Core vocabulary for Formwork: declaration tree, value model, and rules.
//!
//! # Role in Formwork
//! `formwork-core` is the data layer. It owns the tagged declaration tree
//! that callers describe forms with, the scalar/value model the controller
//! records, and the rule declarations the validator evaluates.
//!
//! # Primary responsibilities
//! - **Node**: tagged declaration variants (group, text, select, static).
//! - **Value / Scalar**: the unified field-value model and blankness.
//! - **Rule / RequiredField**: declarative validation chains.
//!
//! # How it fits in the system
//! The controller (`formwork`) walks `Node` trees and records `Value`s; the
//! validator (`formwork-rules`) evaluates `RequiredField` chains against the
//! recorded values. This crate has no behavior of its own beyond
//! construction and classification.

pub mod node;
pub mod rule;
pub mod value;

pub use node::{FieldKind, Group, Node, SelectField, SelectKind, TextField, TextKind};
pub use rule::{RequiredField, Rule, RuleTest};
pub use value::{ErrorMap, Scalar, Value, ValueMap};
