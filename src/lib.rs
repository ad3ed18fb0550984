//! Tabula - Declarative rule-token engine for tabletop rules data
//!
//! This crate re-exports all layers of the Tabula system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: tabula_prereq     - Prerequisite trees, kinds, evaluation
//! Layer 2: tabula_token      - Tokens, load context, deferred scheduler
//! Layer 1: tabula_storage    - Object store, references, change sets, resolver
//! Layer 0: tabula_foundation - Core types (EntityId, ObjectType, Value, Error)
//! ```

pub use tabula_foundation as foundation;
pub use tabula_prereq as prereq;
pub use tabula_storage as storage;
pub use tabula_token as token;
