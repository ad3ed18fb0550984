//! Prerequisite trees and their evaluation for Tabula.
//!
//! This crate provides:
//! - [`Prerequisite`] - Immutable predicate trees (leaf, negation, all/any/at-least)
//! - [`PrerequisiteKind`] / [`KindRegistry`] - Leaf semantics selected by kind tag
//! - [`Character`] - The character state predicates are evaluated against
//! - [`Operator`] - Comparison operators
//! - [`TermEvaluator`] / [`TermRegistry`] - Named formula terms usable as thresholds
//!
//! Evaluation is read-only with respect to the object store, so a finished
//! load can be shared between threads evaluating concurrently.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod character;
pub mod kinds;
pub mod node;
pub mod operator;
mod parse;
pub mod term;

pub use character::Character;
pub use kinds::{ClassLevelKind, KindRegistry, PrerequisiteKind, SpellSubSchoolKind};
pub use node::{Item, Leaf, Operand, Prerequisite};
pub use operator::Operator;
pub use term::{EqDamageDiceTerm, TermEvaluator, TermRegistry};
