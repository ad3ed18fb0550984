//! Object graph store, references, and reference resolution for Tabula.
//!
//! This crate provides:
//! - [`ObjectStore`] - Typed entities with scalar, list, and single-reference fields
//! - [`Reference`] - Live handles to one entity, all entities of a type, or a subset
//! - [`Resolver`] - Turns identifier text into references, creating placeholders
//! - [`ChangeSet`] / [`Changes`] - Committed list edits and their consolidated view
//! - [`MasterListStore`] - Shared lists populated by deferred processing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod changes;
pub mod entity;
pub mod keys;
pub mod master_list;
pub mod reference;
pub mod resolver;
pub mod store;

pub use changes::{ChangeSet, Changes};
pub use entity::{Definition, Entity};
pub use keys::{FieldShape, ListKey, ObjectKey, ScalarKey};
pub use master_list::{MasterListEntry, MasterListStore};
pub use reference::Reference;
pub use resolver::Resolver;
pub use store::{FrozenStore, ObjectStore};
