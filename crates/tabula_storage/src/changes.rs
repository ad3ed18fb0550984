//! Change sets for list fields.
//!
//! A [`ChangeSet`] is the delta produced by one token application against
//! one list field. The store keeps every committed change set, and the field
//! content is always the fold of that log. [`Changes`] is the consolidated
//! view of the log that unparsing writes back out.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tabula_foundation::LtVec;

use crate::reference::Reference;

/// The add/remove/clear delta of one apply operation on one field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChangeSet {
    global_clear: bool,
    removed: Vec<Reference>,
    added: Vec<Reference>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the whole field content for removal.
    pub fn clear_all(&mut self) {
        self.global_clear = true;
    }

    /// Records a targeted removal. Repeated removals are recorded once.
    pub fn remove(&mut self, reference: Reference) {
        if !self.removed.contains(&reference) {
            self.removed.push(reference);
        }
    }

    /// Records an addition. Repeated additions are recorded once.
    pub fn add(&mut self, reference: Reference) {
        if !self.added.contains(&reference) {
            self.added.push(reference);
        }
    }

    /// Returns true if this change set clears the field first.
    #[must_use]
    pub fn includes_global_clear(&self) -> bool {
        self.global_clear
    }

    /// Returns the removed references in the order they were recorded.
    #[must_use]
    pub fn removed(&self) -> &[Reference] {
        &self.removed
    }

    /// Returns the added references in the order they were recorded.
    #[must_use]
    pub fn added(&self) -> &[Reference] {
        &self.added
    }

    /// Returns true if applying this change set would do nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.global_clear && self.removed.is_empty() && self.added.is_empty()
    }

    /// Applies this change set to list content: clear, then removals, then
    /// additions.
    #[must_use]
    pub fn apply_to(&self, content: &LtVec<Reference>) -> LtVec<Reference> {
        let base = if self.global_clear {
            LtVec::new()
        } else {
            content.filtered(|r| !self.removed.contains(r))
        };
        self.added
            .iter()
            .fold(base, |list, r| list.push_back(r.clone()))
    }
}

/// Consolidated view of every change committed to a field.
///
/// A global clear discards what came before it. A removal of something added
/// earlier cancels the addition; a removal of anything else is kept so it can
/// be written back as `.CLEAR.<ref>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    global_clear: bool,
    removed: Vec<Reference>,
    added: Vec<Reference>,
}

impl Changes {
    /// Folds a change log into its consolidated form.
    #[must_use]
    pub fn from_log<'a>(log: impl IntoIterator<Item = &'a ChangeSet>) -> Self {
        log.into_iter().fold(Self::default(), |mut acc, cs| {
            acc.merge(cs);
            acc
        })
    }

    fn merge(&mut self, cs: &ChangeSet) {
        if cs.global_clear {
            self.global_clear = true;
            self.removed.clear();
            self.added.clear();
        }
        for r in &cs.removed {
            if self.added.contains(r) {
                self.added.retain(|a| a != r);
            } else if !self.removed.contains(r) {
                self.removed.push(r.clone());
            }
        }
        for a in &cs.added {
            if !self.added.contains(a) {
                self.added.push(a.clone());
            }
        }
    }

    /// Returns true if a global clear is in effect.
    #[must_use]
    pub fn includes_global_clear(&self) -> bool {
        self.global_clear
    }

    /// Returns references removed without a matching earlier addition.
    #[must_use]
    pub fn removed(&self) -> &[Reference] {
        &self.removed
    }

    /// Returns references added and not removed since.
    #[must_use]
    pub fn added(&self) -> &[Reference] {
        &self.added
    }

    /// Returns true if the field was never effectively edited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.global_clear && self.removed.is_empty() && self.added.is_empty()
    }
}
