//! Prerequisite trees and their evaluation.
//!
//! Trees are immutable once built and hold no cached results: every
//! [`Prerequisite::evaluate`] call recomputes its quantities from the
//! character and store it is given.

use std::fmt;
use std::sync::Arc;

use tabula_foundation::{Error, Result};
use tabula_storage::ObjectStore;

use crate::character::Character;
use crate::kinds::{KindRegistry, PrerequisiteKind};
use crate::operator::Operator;
use crate::term::TermEvaluator;

/// Right-hand side of a leaf comparison.
#[derive(Clone, Debug)]
pub enum Operand {
    /// A literal number.
    Number(i64),
    /// A character counter, read at evaluation time.
    Symbol(String),
    /// A registered formula term, computed at evaluation time.
    Term(Arc<dyn TermEvaluator>),
}

impl Operand {
    /// The term registered under `name` in `registry`, or else the character
    /// counter of that name.
    #[must_use]
    pub fn named(registry: &KindRegistry, name: &str) -> Self {
        registry
            .terms()
            .get(name)
            .map_or_else(|| Self::Symbol(name.to_string()), Self::Term)
    }

    fn value(&self, character: &Character, store: &ObjectStore) -> i64 {
        match self {
            Self::Number(n) => *n,
            Self::Symbol(name) => character.counter(name),
            Self::Term(term) => term.resolve(character, store),
        }
    }
}

impl PartialEq for Operand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Term(a), Self::Term(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl Eq for Operand {}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Symbol(s) => f.write_str(s),
            Self::Term(term) => f.write_str(term.name()),
        }
    }
}

/// One `key` or `key=cap` category of a weighted-threshold leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    /// Category key.
    pub key: String,
    /// Most this category may contribute; `None` is uncapped.
    pub cap: Option<u32>,
}

impl Item {
    /// Creates a category.
    #[must_use]
    pub fn new(key: impl Into<String>, cap: Option<u32>) -> Self {
        Self {
            key: key.into(),
            cap,
        }
    }
}

/// A leaf comparison.
#[derive(Clone, Debug)]
pub struct Leaf {
    kind: Arc<dyn PrerequisiteKind>,
    key: String,
    operator: Operator,
    operand: Operand,
    items: Vec<Item>,
}

impl Leaf {
    /// Returns the kind tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.kind.tag()
    }

    /// Returns the key of a simple comparison (empty for threshold leaves).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the operand.
    #[must_use]
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Returns the categories of a weighted-threshold leaf.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Computes the leaf's quantity: the plain count for a simple comparison,
    /// or the sum of capped per-category counts for a threshold leaf.
    #[must_use]
    pub fn quantity(&self, character: &Character, store: &ObjectStore) -> i64 {
        if self.items.is_empty() {
            return self.kind.count(&self.key, character, store);
        }
        self.items
            .iter()
            .map(|item| {
                let count = self.kind.count(&item.key, character, store);
                item.cap.map_or(count, |cap| count.min(i64::from(cap)))
            })
            .fold(0i64, i64::saturating_add)
    }

    fn evaluate(&self, character: &Character, store: &ObjectStore) -> bool {
        self.operator
            .compare(self.quantity(character, store), self.operand.value(character, store))
    }
}

impl PartialEq for Leaf {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
            && self.key == other.key
            && self.operator == other.operator
            && self.operand == other.operand
            && self.items == other.items
    }
}

impl Eq for Leaf {}

/// A prerequisite tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prerequisite {
    /// A comparison computed by a kind.
    Leaf(Leaf),
    /// Inverts its child.
    Not(Box<Prerequisite>),
    /// Every child holds. True when empty.
    All(Vec<Prerequisite>),
    /// At least one child holds. False when empty.
    Any(Vec<Prerequisite>),
    /// At least `n` children hold.
    AtLeast(usize, Vec<Prerequisite>),
}

impl Prerequisite {
    /// Builds a simple comparison: `count(key) <operator> operand`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `kind` is not registered.
    pub fn compare(
        registry: &KindRegistry,
        kind: &str,
        key: impl Into<String>,
        operator: Operator,
        operand: Operand,
    ) -> Result<Self> {
        Ok(Self::Leaf(Leaf {
            kind: registry.get(kind)?,
            key: key.into(),
            operator,
            operand,
            items: Vec::new(),
        }))
    }

    /// Builds a weighted threshold: the capped per-category counts are summed
    /// and compared against `operand`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `kind` is not registered or `items`
    /// is empty.
    pub fn threshold(
        registry: &KindRegistry,
        kind: &str,
        operator: Operator,
        operand: Operand,
        items: Vec<Item>,
    ) -> Result<Self> {
        let kind = registry.get(kind)?;
        if items.is_empty() {
            return Err(Error::configuration(format!(
                "PRE{} threshold without categories",
                kind.tag()
            )));
        }
        Ok(Self::Leaf(Leaf {
            kind,
            key: String::new(),
            operator,
            operand,
            items,
        }))
    }

    /// Builds an "at least `n` of `children`" node, normalizing to
    /// [`All`](Self::All) when every child is required and to
    /// [`Any`](Self::Any) when one suffices.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `n` is 0 or exceeds the number of
    /// children.
    pub fn at_least(n: usize, children: Vec<Prerequisite>) -> Result<Self> {
        if n == 0 || n > children.len() {
            return Err(Error::configuration(format!(
                "cannot require {n} of {} prerequisites",
                children.len()
            )));
        }
        Ok(if n == children.len() {
            Self::All(children)
        } else if n == 1 {
            Self::Any(children)
        } else {
            Self::AtLeast(n, children)
        })
    }

    /// Wraps this node in a negation.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluates the tree against a character and the loaded store.
    #[must_use]
    pub fn evaluate(&self, character: &Character, store: &ObjectStore) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.evaluate(character, store),
            Self::Not(child) => !child.evaluate(character, store),
            Self::All(children) => children.iter().all(|c| c.evaluate(character, store)),
            Self::Any(children) => children.iter().any(|c| c.evaluate(character, store)),
            Self::AtLeast(n, children) => {
                children
                    .iter()
                    .filter(|c| c.evaluate(character, store))
                    .take(*n)
                    .count()
                    == *n
            }
        }
    }
}
