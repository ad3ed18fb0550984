//! Named formula terms.
//!
//! A term is a number computed from the character and the loaded store,
//! usable wherever a leaf takes a threshold: `PRECLASS:EQDAMAGEDICE,Fighter`
//! compares Fighter levels against the dice count of the wielded weapon.
//! Threshold names that are not registered terms stay character counters.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tabula_foundation::{Dice, Error, Result, Value};
use tabula_storage::{ObjectStore, ScalarKey};

use crate::character::Character;

/// Computes the value of one term.
pub trait TermEvaluator: Send + Sync {
    /// The name the term is written as, e.g. `EQDAMAGEDICE`.
    fn name(&self) -> &str;

    /// The term's value. Recomputed on every call.
    fn resolve(&self, character: &Character, store: &ObjectStore) -> i64;
}

impl fmt::Debug for dyn TermEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermEvaluator({})", self.name())
    }
}

/// `EQDAMAGEDICE`: how many dice the wielded weapon's damage rolls.
///
/// Reads 0 when nothing is wielded, the item has no `DAMAGE`, or the damage
/// is a flat amount.
#[derive(Clone, Copy, Debug, Default)]
pub struct EqDamageDiceTerm;

impl TermEvaluator for EqDamageDiceTerm {
    fn name(&self) -> &str {
        "EQDAMAGEDICE"
    }

    fn resolve(&self, character: &Character, store: &ObjectStore) -> i64 {
        character
            .wielded()
            .and_then(|item| store.scalar(item, ScalarKey::DAMAGE).ok().flatten())
            .and_then(Value::as_text)
            .and_then(|text| text.parse::<Dice>().ok())
            .map_or(0, |dice| i64::from(dice.times))
    }
}

/// Terms by upper-cased name.
#[derive(Clone, Debug, Default)]
pub struct TermRegistry {
    terms: HashMap<String, Arc<dyn TermEvaluator>>,
}

impl TermRegistry {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in terms.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let term: Arc<dyn TermEvaluator> = Arc::new(EqDamageDiceTerm);
        registry.terms.insert(term.name().to_ascii_uppercase(), term);
        registry
    }

    /// Registers a term.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is already taken.
    pub fn register(&mut self, term: Arc<dyn TermEvaluator>) -> Result<()> {
        let name = term.name().to_ascii_uppercase();
        if self.terms.contains_key(&name) {
            return Err(Error::configuration(format!("term already registered: {name}")));
        }
        self.terms.insert(name, term);
        Ok(())
    }

    /// Looks up a term by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn TermEvaluator>> {
        self.terms.get(&name.to_ascii_uppercase()).cloned()
    }
}
