#![forbid(unsafe_code)]

//! Rule-chain validation engine.
//!
//! # Role in Formwork
//! `formwork-rules` evaluates the required-field chains the controller
//! records against the current value map, producing a per-field error map
//! and a joined display message. Validation is pure: no rule evaluation
//! mutates anything, nothing is thrown, failures are values.
//!
//! # Blank gate
//! A blank value (null, empty sequence, whitespace-only text) fails only
//! the implicit `exists` rule and passes every other rule, so an empty
//! required field surfaces exactly one failure instead of one per rule.
//!
//! # Built-in tests
//! `exists`, `email`, `zipcode`, `tel`, `equals:<field>`, `min:<n>`,
//! `max:<n>`. Unknown identifiers pass unconditionally, so a declaration
//! written against a newer rule set degrades instead of failing closed.

pub mod builtin;
mod evaluate;
mod outcome;

pub use evaluate::{FALLBACK_MESSAGE, validate};
pub use outcome::ValidationOutcome;
