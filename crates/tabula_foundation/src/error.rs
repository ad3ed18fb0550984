//! Errors raised while loading and evaluating rule data.
//!
//! None of these is fatal to a load session: the load context records them
//! as messages and moves on to the next token.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;
use crate::object_type::ObjectType;

/// A failure, optionally located in the data being loaded.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Where, when known.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// An error without location.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind, context: None }
    }

    /// Attaches a location, replacing any previous one.
    #[must_use]
    pub fn with_context(self, context: ErrorContext) -> Self {
        Self {
            context: Some(context),
            ..self
        }
    }

    /// Creates a parse conflict for `token` while parsing `value`.
    #[must_use]
    pub fn parse_conflict(
        token: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::ParseConflict {
            token: token.into(),
            message: message.into(),
            value: value.into(),
        })
    }

    /// Creates a resolution failure for `text` against `object_type`.
    #[must_use]
    pub fn resolution(
        object_type: ObjectType,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::ResolutionFailure {
            object_type,
            text: text.into(),
            reason: reason.into(),
        })
    }

    /// Creates a serialization conflict raised while unparsing `token`.
    #[must_use]
    pub fn serialization_conflict(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationConflict {
            token: token.into(),
            message: message.into(),
        })
    }

    /// Creates a deferred task failure.
    #[must_use]
    pub fn deferred_task(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeferredTaskFailure {
            task: task.into(),
            message: message.into(),
        })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration(message.into()))
    }

    /// Creates an unknown token error.
    #[must_use]
    pub fn unknown_token(object_type: ObjectType, token: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownToken {
            object_type,
            token: token.into(),
        })
    }

    /// The store holds no entity with this id.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Broken engine invariant.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error is a parse conflict.
    #[must_use]
    pub fn is_parse_conflict(&self) -> bool {
        matches!(self.kind, ErrorKind::ParseConflict { .. })
    }
}

/// What went wrong.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A token value is self-contradictory or malformed.
    ///
    /// Aborts only the current field edit; prior state is untouched.
    #[error("{token}: {message} (in '{value}')")]
    ParseConflict {
        /// Name of the token being parsed.
        token: String,
        /// What was wrong.
        message: String,
        /// The raw token value.
        value: String,
    },

    /// An identifier could not be turned into a reference, not even a
    /// forward placeholder.
    #[error("cannot resolve {object_type} reference '{text}': {reason}")]
    ResolutionFailure {
        /// The type the identifier was resolved against.
        object_type: ObjectType,
        /// The offending identifier.
        text: String,
        /// Why resolution failed.
        reason: String,
    },

    /// Field history cannot be written back unambiguously.
    #[error("{token}: {message}")]
    SerializationConflict {
        /// Name of the token being unparsed.
        token: String,
        /// What was contradictory.
        message: String,
    },

    /// A deferred task failed. Other tasks still run.
    #[error("deferred task {task} failed: {message}")]
    DeferredTaskFailure {
        /// Description of the task.
        task: String,
        /// Why it failed.
        message: String,
    },

    /// Invalid engine configuration, e.g. an unknown prerequisite kind.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No token with this name is registered for the object type.
    #[error("unknown token {token} for {object_type}")]
    UnknownToken {
        /// The object type the token was applied to.
        object_type: ObjectType,
        /// The token name.
        token: String,
    },

    /// A strict load session recorded problems.
    #[error("load finished with {0} problem(s)")]
    LoadFailed(usize),

    /// An id that the store never handed out.
    #[error("no entity {0}")]
    EntityNotFound(EntityId),

    /// A broken engine invariant, or a failure reported by a custom task.
    #[error("internal: {0}")]
    Internal(String),
}

/// Where in the data a failure happened.
///
/// Rendered as `file:line` followed by the frames, outermost first, e.g.
/// `classes.lst:12 in CLASS:Wizard > CSKILL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Data file the line came from.
    pub source: Option<String>,
    /// 1-based line within `source`.
    pub line: Option<usize>,
    /// Enclosing objects and tokens, outermost first.
    pub frames: Vec<String>,
}

impl ErrorContext {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the data file.
    #[must_use]
    pub fn in_file(self, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }

    /// Sets the line number.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        Self {
            line: Some(line),
            ..self
        }
    }

    /// Appends an inner frame.
    #[must_use]
    pub fn within(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = match (&self.source, self.line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => file.clone(),
            (None, Some(line)) => format!("line {line}"),
            (None, None) => String::new(),
        };
        f.write_str(&location)?;
        if !self.frames.is_empty() {
            if !location.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "in {}", self.frames.join(" > "))?;
        }
        Ok(())
    }
}
