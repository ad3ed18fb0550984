//! The load session.
//!
//! `LoadContext` owns the object store for the duration of a load. Each
//! [`apply`](LoadContext::apply) call is atomic: the store is snapshotted
//! before the token parses and restored if anything fails, so a rejected line
//! leaves no trace (not even placeholders it created). Problems are logged
//! through `tracing` and retained as [`LoadMessage`]s.

use std::collections::BTreeSet;
use std::sync::Arc;

use tabula_foundation::{EntityId, Error, ErrorContext, ErrorKind, ObjectType, Result};
use tabula_storage::{Definition, FrozenStore, ObjectStore};
use tracing::{debug, trace, warn};

use crate::config::LoadConfig;
use crate::message::{LoadMessage, Severity};
use crate::registry::TokenRegistry;
use crate::scheduler::DeferredScheduler;
use crate::token::PrimaryToken;

/// Separator between a token name and its value in a data line.
pub const TOKEN_SEPARATOR: char = ':';

/// Summary returned by [`LoadContext::finish`].
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    /// Retained messages, oldest first.
    pub messages: Vec<LoadMessage>,
    /// Messages dropped because of the message limit.
    pub dropped_messages: usize,
    /// Deferred tasks that completed.
    pub deferred_succeeded: usize,
    /// Deferred tasks that failed.
    pub deferred_failed: usize,
    /// Placeholders that were referenced but never defined.
    pub undefined: Vec<EntityId>,
}

impl LoadReport {
    /// Counts warnings, errors, dropped messages, and undefined references.
    #[must_use]
    pub fn problems(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity >= Severity::Warning)
            .count()
            + self.dropped_messages
            + self.undefined.len()
    }

    /// Returns true if the load had no problem at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems() == 0
    }
}

/// A load session: the store under construction plus everything needed to
/// edit it.
#[derive(Debug)]
pub struct LoadContext {
    store: ObjectStore,
    registry: Arc<TokenRegistry>,
    scheduler: DeferredScheduler,
    config: LoadConfig,
    messages: Vec<LoadMessage>,
    dropped_messages: usize,
    reported_failures: BTreeSet<String>,
}

impl LoadContext {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new(registry: impl Into<Arc<TokenRegistry>>) -> Self {
        Self::with_config(registry, LoadConfig::default())
    }

    /// Creates a session with `config`.
    #[must_use]
    pub fn with_config(registry: impl Into<Arc<TokenRegistry>>, config: LoadConfig) -> Self {
        Self {
            store: ObjectStore::new(),
            registry: registry.into(),
            scheduler: DeferredScheduler::new(),
            config,
            messages: Vec::new(),
            dropped_messages: 0,
            reported_failures: BTreeSet::new(),
        }
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Consumes the session, returning the finished, read-only store.
    #[must_use]
    pub fn into_store(self) -> FrozenStore {
        self.store.freeze()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Returns the token registry.
    #[must_use]
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Returns the deferred scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &DeferredScheduler {
        &self.scheduler
    }

    /// Returns the retained messages.
    #[must_use]
    pub fn messages(&self) -> &[LoadMessage] {
        &self.messages
    }

    fn record(&mut self, message: LoadMessage) {
        match message.severity {
            Severity::Info => debug!(%message, "load message"),
            Severity::Warning | Severity::Error => warn!(%message, "load message"),
        }
        if self.messages.len() < self.config.message_limit {
            self.messages.push(message);
        } else {
            self.dropped_messages += 1;
        }
    }

    fn record_error(&mut self, err: &Error, token: Option<&str>, entity: EntityId, value: Option<&str>) {
        let mut message = LoadMessage::new(Severity::of(err), err.to_string()).with_entity(entity);
        if let Some(token) = token {
            message = message.with_token(token);
        }
        if let Some(value) = value {
            message = message.with_value(value);
        }
        self.record(message);
    }

    /// Records `err` and returns it located at `entity` and `token`.
    fn reject(&mut self, err: Error, token: Option<&str>, entity: EntityId, value: Option<&str>) -> Error {
        self.record_error(&err, token, entity, value);
        let context = self.locate(entity, token);
        err.with_context(context)
    }

    fn locate(&self, entity: EntityId, token: Option<&str>) -> ErrorContext {
        let owner = match self.store.entity(entity) {
            Ok(e) => format!("{}:{}", e.object_type(), e.name()),
            Err(_) => entity.to_string(),
        };
        let context = ErrorContext::new().within(owner);
        match token {
            Some(token) => context.within(token),
            None => context,
        }
    }

    // =========================================================================
    // Primary pass
    // =========================================================================

    /// Defines an entity, upgrading a forward placeholder in place.
    pub fn construct(&mut self, object_type: &ObjectType, name: &str) -> EntityId {
        let (id, outcome) = self.store.construct(object_type, name);
        match outcome {
            Definition::Duplicate if !self.config.allow_duplicate_definitions => {
                self.record(
                    LoadMessage::new(
                        Severity::Warning,
                        format!("duplicate definition of {object_type} {name}"),
                    )
                    .with_entity(id),
                );
            }
            _ => debug!(%object_type, entity = name, %id, ?outcome, "entity defined"),
        }
        id
    }

    fn token(&self, entity: EntityId, name: &str) -> Result<Arc<dyn PrimaryToken>> {
        let object_type = self.store.entity(entity)?.object_type();
        self.registry
            .get(object_type, name)
            .cloned()
            .ok_or_else(|| Error::unknown_token(object_type.clone(), name))
    }

    /// Applies token `name` with `value` to `entity`.
    ///
    /// On success the edit is committed and the token's deferred part (if
    /// any) is registered once for the entity. On failure the store is left
    /// exactly as it was and the problem is recorded.
    ///
    /// # Errors
    ///
    /// Returns the unknown-token, parse, or resolution error that rejected
    /// the line.
    pub fn apply(&mut self, entity: EntityId, name: &str, value: &str) -> Result<()> {
        let token = match self.token(entity, name) {
            Ok(token) => token,
            Err(err) => {
                return Err(self.reject(err, Some(name), entity, Some(value)));
            }
        };
        debug!(token = token.name(), %entity, value, "applying token");

        let snapshot = self.store.clone();
        if let Err(err) = self.parse_and_commit(token.as_ref(), entity, value) {
            self.store = snapshot;
            return Err(self.reject(err, Some(token.name()), entity, Some(value)));
        }

        if let Some(task) = token.deferred() {
            self.scheduler.register(task.priority(), entity, task);
        }
        Ok(())
    }

    fn parse_and_commit(&mut self, token: &dyn PrimaryToken, entity: EntityId, value: &str) -> Result<()> {
        let edit = token.parse(&mut self.store, entity, value)?;
        if self.config.trace_edits {
            trace!(token = token.name(), %entity, field = edit.field(), ?edit, "committing edit");
        }
        edit.commit(&mut self.store, entity)
    }

    /// Applies a `TOKEN:value` data line to `entity`.
    ///
    /// # Errors
    ///
    /// Returns a parse conflict if the line has no token separator, otherwise
    /// whatever [`apply`](Self::apply) returns.
    pub fn apply_line(&mut self, entity: EntityId, line: &str) -> Result<()> {
        let Some((name, value)) = line.split_once(TOKEN_SEPARATOR) else {
            let err = Error::parse_conflict(line, "missing token separator", line);
            return Err(self.reject(err, None, entity, Some(line)));
        };
        self.apply(entity, name, value)
    }

    // =========================================================================
    // Unparse
    // =========================================================================

    /// Writes token `name` of `entity` back out.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown token or entity, or a serialization
    /// conflict (which is also recorded).
    pub fn unparse(&mut self, entity: EntityId, name: &str) -> Result<Option<Vec<String>>> {
        let token = match self.token(entity, name) {
            Ok(token) => token,
            Err(err) => return Err(self.reject(err, Some(name), entity, None)),
        };
        token
            .unparse(&self.store, entity)
            .map_err(|err| self.reject(err, Some(token.name()), entity, None))
    }

    /// Writes every edited field of `entity` back out as `TOKEN:fragment`
    /// lines, in token-name order.
    ///
    /// A field whose history cannot be written unambiguously is recorded and
    /// left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn unparse_entity(&mut self, entity: EntityId) -> Result<Vec<String>> {
        let object_type = self.store.entity(entity)?.object_type().clone();
        let tokens: Vec<Arc<dyn PrimaryToken>> = self
            .registry
            .tokens_for(&object_type)
            .into_iter()
            .cloned()
            .collect();

        let mut lines = Vec::new();
        for token in tokens {
            match token.unparse(&self.store, entity) {
                Ok(Some(fragments)) => lines.extend(
                    fragments
                        .into_iter()
                        .map(|f| format!("{}{TOKEN_SEPARATOR}{f}", token.name())),
                ),
                Ok(None) => {}
                Err(err) => self.record_error(&err, Some(token.name()), entity, None),
            }
        }
        Ok(lines)
    }

    // =========================================================================
    // Deferred pass
    // =========================================================================

    /// Runs the deferred pass and reports on the session.
    ///
    /// May be called again; idempotent deferred tasks add nothing the second
    /// time and a failure already recorded is not recorded again.
    ///
    /// # Errors
    ///
    /// In strict mode, returns an error if the load recorded any problem.
    pub fn finish(&mut self) -> Result<LoadReport> {
        let run = self.scheduler.run_all(&mut self.store);
        for failure in &run.failures {
            // A rerun fails the same way; record each failure once.
            if self.reported_failures.insert(failure.to_string()) {
                self.record(LoadMessage::new(Severity::of(failure), failure.to_string()));
            }
        }

        let undefined: Vec<EntityId> = self.store.undefined().map(|e| e.id()).collect();
        for entity in self.store.undefined() {
            warn!(object_type = %entity.object_type(), entity = entity.name(), "referenced but never defined");
        }

        let report = LoadReport {
            messages: self.messages.clone(),
            dropped_messages: self.dropped_messages,
            deferred_succeeded: run.succeeded,
            deferred_failed: run.failures.len(),
            undefined,
        };
        if self.config.strict && !report.is_clean() {
            return Err(Error::new(ErrorKind::LoadFailed(report.problems())));
        }
        Ok(report)
    }
}
