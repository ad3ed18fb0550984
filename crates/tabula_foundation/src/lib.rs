//! Core types, values, and persistent collections for Tabula.
//!
//! This crate provides:
//! - [`EntityId`] - Stable identifiers for rules-data entities
//! - [`ObjectType`] - The type an entity belongs to (class, skill, spell, ...)
//! - [`Value`] - Scalar field values
//! - [`Dice`] - Damage dice expressions
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod dice;
pub mod entity;
pub mod error;
pub mod object_type;
pub mod value;

pub use collections::LtVec;
pub use dice::Dice;
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind};
pub use object_type::ObjectType;
pub use value::Value;

/// Result type alias using Tabula's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
