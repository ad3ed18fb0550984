//! Prerequisite kinds.
//!
//! A kind turns a key (a class name, a subschool, ...) into a number computed
//! from the character and the loaded object graph. Kinds are looked up by tag
//! in a [`KindRegistry`] built before any prerequisite is parsed, so an
//! unknown tag fails when the rule is loaded rather than when it is evaluated.

mod class_level;
mod spell_school_sub;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tabula_foundation::{Error, Result};
use tabula_storage::ObjectStore;

use crate::character::Character;
use crate::term::{TermEvaluator, TermRegistry};

pub use class_level::ClassLevelKind;
pub use spell_school_sub::SpellSubSchoolKind;

/// Leaf semantics selected by a kind tag.
pub trait PrerequisiteKind: Send + Sync {
    /// The tag, e.g. `SPELLSCHOOLSUB` for `PRESPELLSCHOOLSUB`.
    fn tag(&self) -> &str;

    /// The character's quantity for `key`.
    ///
    /// Computed fresh on every call; never cached.
    fn count(&self, key: &str, character: &Character, store: &ObjectStore) -> i64;
}

impl fmt::Debug for dyn PrerequisiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrerequisiteKind({})", self.tag())
    }
}

/// Kinds by tag, plus the formula terms thresholds may name.
#[derive(Clone, Debug, Default)]
pub struct KindRegistry {
    kinds: HashMap<String, Arc<dyn PrerequisiteKind>>,
    terms: TermRegistry,
}

impl KindRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in kinds and terms.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            terms: TermRegistry::with_defaults(),
            ..Self::new()
        };
        let builtins: [Arc<dyn PrerequisiteKind>; 2] =
            [Arc::new(ClassLevelKind), Arc::new(SpellSubSchoolKind)];
        for kind in builtins {
            registry.kinds.insert(kind.tag().to_ascii_uppercase(), kind);
        }
        registry
    }

    /// Registers a kind.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the tag is already taken.
    pub fn register(&mut self, kind: Arc<dyn PrerequisiteKind>) -> Result<()> {
        let tag = kind.tag().to_ascii_uppercase();
        if self.kinds.contains_key(&tag) {
            return Err(Error::configuration(format!(
                "prerequisite kind already registered: {tag}"
            )));
        }
        self.kinds.insert(tag, kind);
        Ok(())
    }

    /// Looks up a kind.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown tag.
    pub fn get(&self, tag: &str) -> Result<Arc<dyn PrerequisiteKind>> {
        self.kinds
            .get(&tag.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| Error::configuration(format!("unknown prerequisite kind: {tag}")))
    }

    /// Registers a formula term.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is already taken.
    pub fn register_term(&mut self, term: Arc<dyn TermEvaluator>) -> Result<()> {
        self.terms.register(term)
    }

    /// Returns the formula terms.
    #[must_use]
    pub fn terms(&self) -> &TermRegistry {
        &self.terms
    }

    /// Returns the registered tags, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.kinds.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}
