//! Token lookup by object type and name.

use std::collections::HashMap;
use std::sync::Arc;

use tabula_foundation::{Error, ObjectType, Result};

use crate::token::PrimaryToken;
use crate::tokens::{DamageToken, ReferenceListToken, TagListToken};

/// Registry of every primary token, keyed by `(object type, token name)`.
///
/// Token names are matched without regard to case.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<(ObjectType, String), Arc<dyn PrimaryToken>>,
}

impl TokenRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in tokens.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let builtins: Vec<Arc<dyn PrimaryToken>> = vec![
            Arc::new(ReferenceListToken::class_skill()),
            Arc::new(ReferenceListToken::cross_class_skill()),
            Arc::new(TagListToken::subschool()),
            Arc::new(TagListToken::object_type(ObjectType::CLASS)),
            Arc::new(TagListToken::object_type(ObjectType::SKILL)),
            Arc::new(TagListToken::object_type(ObjectType::SPELL)),
            Arc::new(TagListToken::object_type(ObjectType::EQUIPMENT)),
            Arc::new(DamageToken::new()),
        ];
        for token in builtins {
            registry
                .tokens
                .insert(Self::key(token.token_type(), token.name()), token);
        }
        registry
    }

    fn key(object_type: &ObjectType, name: &str) -> (ObjectType, String) {
        (object_type.clone(), name.to_ascii_uppercase())
    }

    /// Registers a token.
    ///
    /// # Errors
    ///
    /// Returns an error if a token with the same name is already registered
    /// for the same object type.
    pub fn register(&mut self, token: Arc<dyn PrimaryToken>) -> Result<()> {
        let key = Self::key(token.token_type(), token.name());
        if self.tokens.contains_key(&key) {
            return Err(Error::configuration(format!(
                "token already registered: {}:{}",
                key.0, key.1
            )));
        }
        self.tokens.insert(key, token);
        Ok(())
    }

    /// Looks up a token.
    #[must_use]
    pub fn get(&self, object_type: &ObjectType, name: &str) -> Option<&Arc<dyn PrimaryToken>> {
        self.tokens.get(&Self::key(object_type, name))
    }

    /// Returns the tokens applicable to `object_type`, sorted by name.
    #[must_use]
    pub fn tokens_for(&self, object_type: &ObjectType) -> Vec<&Arc<dyn PrimaryToken>> {
        let mut tokens: Vec<_> = self
            .tokens
            .iter()
            .filter(|((ty, _), _)| ty == object_type)
            .map(|(_, token)| token)
            .collect();
        tokens.sort_by(|a, b| a.name().cmp(b.name()));
        tokens
    }

    /// Returns the number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no token is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
